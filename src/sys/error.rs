//! # Standard Status Codes (osStatus)
//!
//! Define os códigos de status retornados pela API de timers.
//! Baseado no padrão CMSIS-RTOS2 (`osStatus_t`) para compatibilidade com
//! código que já fala essa ABI.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Uniformidade:** Toda operação de ciclo de vida retorna um código padronizado.
//! - **Conversion:** `TimerError` (lado Rust) converte para `OsStatus` (lado ABI) via `From`.
//!
//! ## 🔍 Análise Crítica
//!
//! ### ⚠️ Pontos de Atenção
//! - `osErrorTimeout` existe apenas para manter a numeração; nenhuma operação
//!   de timer bloqueia, então o engine nunca o produz.
//!
//! --------------------------------------------------------------------------------
//!
//! Valores negativos indicam falha, igual ao retorno das syscalls do kernel.

use thiserror::Error;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsStatus {
    Ok = 0,              // Operation completed successfully
    Error = -1,          // Unspecified RTOS error
    ErrorTimeout = -2,   // Operation not completed within the timeout period
    ErrorResource = -3,  // Resource not available
    ErrorParameter = -4, // Parameter error
    ErrorNoMemory = -5,  // System is out of memory
    ErrorISR = -6,       // Not allowed in ISR context
}

impl OsStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_ok(self) -> bool {
        self == OsStatus::Ok
    }

    pub fn is_err(self) -> bool {
        !self.is_ok()
    }

    /// Nome curto do código (para logs).
    pub fn as_str(self) -> &'static str {
        match self {
            OsStatus::Ok => "osOK",
            OsStatus::Error => "osError",
            OsStatus::ErrorTimeout => "osErrorTimeout",
            OsStatus::ErrorResource => "osErrorResource",
            OsStatus::ErrorParameter => "osErrorParameter",
            OsStatus::ErrorNoMemory => "osErrorNoMemory",
            OsStatus::ErrorISR => "osErrorISR",
        }
    }
}

/// Erros das operações do engine de timers.
///
/// Uma operação que falha nunca altera o estado do timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TimerError {
    /// Chamada feita em contexto de interrupção.
    #[error("operation not allowed from interrupt context")]
    Isr,
    /// Handle nulo/fora da arena, ticks fora do intervalo ou atributos inválidos.
    #[error("invalid parameter")]
    Parameter,
    /// Estado do objeto incompatível com a operação (ou objeto já deletado).
    #[error("timer object in an incompatible state")]
    Resource,
    /// Arena de timers esgotada.
    #[error("timer pool exhausted")]
    NoMemory,
    /// Kernel ainda não inicializado.
    #[error("kernel not initialized")]
    NotReady,
}

/// Resultado padrão das operações de timer.
pub type TimerResult<T> = Result<T, TimerError>;

impl From<TimerError> for OsStatus {
    fn from(err: TimerError) -> Self {
        match err {
            TimerError::Isr => OsStatus::ErrorISR,
            TimerError::Parameter => OsStatus::ErrorParameter,
            TimerError::Resource => OsStatus::ErrorResource,
            TimerError::NoMemory => OsStatus::ErrorNoMemory,
            TimerError::NotReady => OsStatus::Error,
        }
    }
}

impl From<TimerResult<()>> for OsStatus {
    fn from(result: TimerResult<()>) -> Self {
        match result {
            Ok(()) => OsStatus::Ok,
            Err(err) => err.into(),
        }
    }
}
