//! # Timer Management (CMSIS-RTOS2)
//!
//! Fachada com a forma exata da API documentada: handles nulos em vez de
//! `Result`, `OsStatus` como retorno de status e `0/1` em `IsRunning`.
//!
//! | Função                 | Sucesso   | Falha                                 |
//! |------------------------|-----------|---------------------------------------|
//! | `os_timer_new`         | handle    | `TimerId::INVALID`                    |
//! | `os_timer_start`       | `Ok`      | `ErrorISR`, `ErrorParameter`, `ErrorResource` |
//! | `os_timer_stop`        | `Ok`      | `ErrorISR`, `ErrorParameter`, `ErrorResource` |
//! | `os_timer_is_running`  | `1`       | `0`                                   |
//! | `os_timer_delete`      | `Ok`      | `ErrorISR`, `ErrorParameter`, `ErrorResource` |
//! | `os_timer_get_name`    | nome      | `None`                                |

use crate::arch::Platform;
use crate::core::object::TimerId;
use crate::core::time::{TimerAttr, TimerEngine, TimerKind};
use crate::sys::{OsStatus, Ticks};

/// Função de callback (`osTimerFunc_t`).
pub type TimerFunc = fn(argument: usize);

/// Cria um timer (`osTimerNew`).
///
/// # Returns
/// Handle do timer ou `TimerId::INVALID` (função nula, ISR, kernel não
/// inicializado, atributos inválidos ou pool esgotado).
pub fn os_timer_new<P: Platform>(
    engine: &TimerEngine<P>,
    func: Option<TimerFunc>,
    kind: TimerKind,
    argument: usize,
    attr: Option<&TimerAttr>,
) -> TimerId {
    let Some(func) = func else {
        crate::kwarn!("(Syscall) osTimerNew: função de callback nula");
        return TimerId::INVALID;
    };

    engine
        .create(func, kind, argument, attr)
        .unwrap_or(TimerId::INVALID)
}

/// Nome do timer (`osTimerGetName`).
pub fn os_timer_get_name<P: Platform>(engine: &TimerEngine<P>, id: TimerId) -> Option<&'static str> {
    engine.get_name(id)
}

/// Inicia ou reinicia o timer (`osTimerStart`).
pub fn os_timer_start<P: Platform>(engine: &TimerEngine<P>, id: TimerId, ticks: Ticks) -> OsStatus {
    engine.start(id, ticks).into()
}

/// Para o timer (`osTimerStop`).
pub fn os_timer_stop<P: Platform>(engine: &TimerEngine<P>, id: TimerId) -> OsStatus {
    engine.stop(id).into()
}

/// Verifica se o timer está rodando (`osTimerIsRunning`).
///
/// # Returns
/// `1` rodando, `0` parado ou erro.
pub fn os_timer_is_running<P: Platform>(engine: &TimerEngine<P>, id: TimerId) -> u32 {
    engine.is_running(id) as u32
}

/// Deleta o timer (`osTimerDelete`).
pub fn os_timer_delete<P: Platform>(engine: &TimerEngine<P>, id: TimerId) -> OsStatus {
    engine.delete(id).into()
}
