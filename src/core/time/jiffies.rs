//! Arquivo: core/time/jiffies.rs
//!
//! Propósito: Jiffies (Contador de ticks do engine).
//! "Jiffies" é o termo histórico (do Linux) para ticks de relógio.
//! Cada `TimerEngine` tem o seu contador (`osKernelGetTickCount`).
//!
//! Detalhes de Implementação:
//! - Usa AtomicU64 para ser thread-safe e lock-free.
//! - Incrementado apenas pelo caminho de tick do engine.

//! Contador de Jiffies (Ticks)

use core::sync::atomic::{AtomicU64, Ordering};

use crate::sys::Ticks;

/// Frequência de tick padrão (ticks por segundo), usada só nas conversões.
pub const HZ: u64 = 1000;

/// Contador monotônico de ticks.
#[derive(Debug, Default)]
pub struct Jiffies(AtomicU64);

impl Jiffies {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Retorna o número atual de jiffies.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Incrementa o contador e retorna o novo valor.
    #[inline]
    pub(crate) fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Converte milisegundos para ticks (arredonda para cima, mínimo 1).
///
/// `None` se o resultado não couber em `Ticks`.
#[inline]
pub fn millis_to_ticks(millis: u64, hz: u64) -> Option<Ticks> {
    let ticks = millis.checked_mul(hz)?.div_ceil(1000).max(1);
    Ticks::try_from(ticks).ok()
}

/// Converte segundos para ticks. `None` se não couber em `Ticks`.
#[inline]
pub fn seconds_to_ticks(seconds: u64, hz: u64) -> Option<Ticks> {
    Ticks::try_from(seconds.checked_mul(hz)?).ok()
}
