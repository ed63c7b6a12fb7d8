// src/lib.rs
//! Forge Timer Library.
//!
//! Engine de software timers do Forge (CMSIS-RTOS2 Timer Management).
//! Define a estrutura hierárquica do subsistema:
//!
//! ```text
//! arch     → colaboradores externos (ISR, estado do kernel, wake-up)
//! core     → engine, objetos, fila da thread de timers, logging
//! sys      → ABI (osStatus, osKernelState)
//! syscall  → API no formato osTimer*
//! ```

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (necessário para Vec/Arc/VecDeque)
extern crate alloc;

#[doc(hidden)]
pub use log as __log;

// --- Módulos de Baixo Nível (Plataforma) ---
pub mod arch; // HAL (ISR, estado do kernel, thread de timers)

// --- Módulos Centrais ---
pub mod core; // Engine, Objetos, Work Queue, Logging
pub mod sys; // Definições de Sistema (Status, Estado do Kernel)

// --- Interface pública ---
pub mod syscall; // osTimerNew/Start/Stop/IsRunning/Delete/GetName

pub use crate::arch::{Platform, SimPlatform};
pub use crate::core::object::TimerId;
pub use crate::core::time::{
    EventLevel, TimerAttr, TimerCallback, TimerConfig, TimerEngine, TimerKind, TimerState,
    TimerStats,
};
pub use crate::sys::{KernelState, OsStatus, TimerError, TimerResult};
