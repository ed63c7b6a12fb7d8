//! Debug e diagnóstico

pub mod console;

pub use console::{ConsoleLogger, ConsoleSink};
