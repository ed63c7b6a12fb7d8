//! Execução diferida (thread de timers)

pub mod timer_queue;

pub use timer_queue::{Expiry, TimerQueue};
