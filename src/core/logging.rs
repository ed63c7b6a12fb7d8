// =============================================================================
// FORGE TIMER LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do engine de timers com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
//   (os argumentos continuam "usados" para não gerar warnings, mas o
//   código morto é eliminado pelo compilador)
// - Os macros ativos encaminham para a fachada `log` (target "forge");
//   quem hospeda o engine decide o backend (ex: `ConsoleLogger`)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros críticos (ex: overflow da fila de callbacks)
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal de execução (criação/deleção de timers)
// - DEBUG: Informações de debugging (start/stop)
// - TRACE: Detalhes extremos (cada expiração, cada dispatch)
//
// FEATURES:
// - no_logs:   Remove 100% dos logs (custo zero no binário)
// - log_error: Apenas ERROR, WARN
// - log_info:  ERROR, WARN, INFO
// - log_debug: ERROR, WARN, INFO, DEBUG
// - log_trace: Todos os níveis (padrão)
//
// COMO USAR:
//   kinfo!("(Timer) Criado id={:#x}", id.raw());
//   ktrace!("(Timer) Tick {}", now);
//
// =============================================================================

/// Target usado em todos os registros emitidos pelos macros.
pub const LOG_TARGET: &str = "forge";

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================
//
// Usados pelo `ConsoleLogger`. Cada prefixo inclui: código de cor + texto +
// reset de cor.
//
//   1;31 = Bold Red
//   1;33 = Bold Yellow
//   32   = Green
//   36   = Cyan
//   35   = Magenta
//   0    = Reset
//

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// Prefixo colorido de um nível.
pub fn prefix(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => P_ERROR,
        log::Level::Warn => P_WARN,
        log::Level::Info => P_INFO,
        log::Level::Debug => P_DEBUG,
        log::Level::Trace => P_TRACE,
    }
}

// =============================================================================
// MACRO DESATIVADO
// =============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __klog_disabled {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)+) => {
        $crate::__log::error!(target: $crate::core::logging::LOG_TARGET, $($arg)+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)+) => { $crate::__klog_disabled!($($arg)+) };
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)+) => {
        $crate::__log::warn!(target: $crate::core::logging::LOG_TARGET, $($arg)+)
    };
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)+) => { $crate::__klog_disabled!($($arg)+) };
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================
//
// kinfo! - Ativo exceto com no_logs / log_error
//

#[cfg(not(any(feature = "no_logs", feature = "log_error")))]
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)+) => {
        $crate::__log::info!(target: $crate::core::logging::LOG_TARGET, $($arg)+)
    };
}

#[cfg(any(feature = "no_logs", feature = "log_error"))]
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)+) => { $crate::__klog_disabled!($($arg)+) };
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================
//
// kdebug! - Ativo apenas com log_debug ou log_trace
//

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)+) => {
        $crate::__log::debug!(target: $crate::core::logging::LOG_TARGET, $($arg)+)
    };
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)+) => { $crate::__klog_disabled!($($arg)+) };
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================
//
// ktrace! - Ativo apenas com log_trace
//

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)+) => {
        $crate::__log::trace!(target: $crate::core::logging::LOG_TARGET, $($arg)+)
    };
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)+) => { $crate::__klog_disabled!($($arg)+) };
}
