//! Tempo e Timers
//!
//! Software timers baseados em ticks: objeto timer, engine, configuração
//! e estatísticas.

pub mod config;
pub mod engine;
pub mod jiffies;
pub mod stats;
pub mod timer;

mod tests;

pub use config::{EventLevel, TimerConfig};
pub use engine::TimerEngine;
pub use jiffies::Jiffies;
pub use stats::TimerStats;
pub use timer::{TimerAttr, TimerCallback, TimerKind, TimerState};
