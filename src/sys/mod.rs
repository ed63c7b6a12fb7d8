//! System Definitions (ABI).
//!
//! Contém as constantes e tipos que definem a interface entre o engine de
//! timers e o resto do kernel (códigos de status, estado do kernel).

pub mod error;
pub mod types;

pub use error::{OsStatus, TimerError, TimerResult};
pub use types::{KernelState, Ticks};
