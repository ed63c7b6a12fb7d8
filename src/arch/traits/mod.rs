//! Traits do Hardware Abstraction Layer (HAL).
//! Interfaces públicas que o engine usa para falar com o kernel hospedeiro.

pub mod platform;

// Re-exportar para facilitar uso: `use crate::arch::traits::Platform;`
pub use platform::Platform;
