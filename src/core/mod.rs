//! Core Module
//!
//! Contém a lógica central do engine de timers, independente de
//! arquitetura: objetos/handles, tempo, execução diferida e logging.

pub mod debug;
pub mod logging;
pub mod object;
pub mod time;
pub mod work;
