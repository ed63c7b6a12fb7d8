//! Estatísticas do engine de timers

use core::sync::atomic::{AtomicU64, Ordering};

/// Contadores internos (lock-free).
#[derive(Debug, Default)]
pub(crate) struct TimerCounters {
    pub created: AtomicU64,
    pub deleted: AtomicU64,
    pub expired: AtomicU64,
    pub dispatched: AtomicU64,
    pub discarded: AtomicU64,
    pub queue_overflows: AtomicU64,
}

impl TimerCounters {
    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add(counter: &AtomicU64, n: usize) {
        if n > 0 {
            counter.fetch_add(n as u64, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> TimerStats {
        TimerStats {
            created: self.created.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            queue_overflows: self.queue_overflows.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot das estatísticas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    /// Timers criados
    pub created: u64,
    /// Timers deletados
    pub deleted: u64,
    /// Expirações detectadas pelo tick (inclui as descartadas por overflow)
    pub expired: u64,
    /// Callbacks executados pela thread de timers
    pub dispatched: u64,
    /// Notificações descartadas porque o timer foi deletado antes do dispatch
    pub discarded: u64,
    /// Notificações perdidas por fila cheia
    pub queue_overflows: u64,
}

impl TimerStats {
    /// Timers vivos segundo os contadores.
    pub fn live(&self) -> u64 {
        self.created.saturating_sub(self.deleted)
    }
}
