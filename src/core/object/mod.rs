//! # Object - Objetos do engine de timers
//!
//! Timers são referenciados apenas por handles opacos (`TimerId`) que
//! indexam uma arena de slots com geração.

pub mod arena;
pub mod handle;

pub use arena::{SlotArena, SlotError};
pub use handle::TimerId;
