//! Backend de log para console
//!
//! `log::Log` que formata `[arquivo:linha] PREFIXO mensagem` e entrega a
//! linha pronta para um `ConsoleSink` instalado pelo kernel hospedeiro
//! (UART, buffer de dmesg, stdout no host...).

use alloc::string::String;
use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

use crate::core::logging;

/// Destino das linhas de log.
pub trait ConsoleSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// `Log` implementation para console
pub struct ConsoleLogger {
    sink: Once<&'static dyn ConsoleSink>,
    level: LevelFilter,
}

impl ConsoleLogger {
    #[cfg(debug_assertions)]
    const LEVEL_FILTER: LevelFilter = LevelFilter::Trace;

    #[cfg(not(debug_assertions))]
    const LEVEL_FILTER: LevelFilter = LevelFilter::Info;

    pub const fn new() -> Self {
        Self {
            sink: Once::new(),
            level: Self::LEVEL_FILTER,
        }
    }

    pub const fn with_level(level: LevelFilter) -> Self {
        Self {
            sink: Once::new(),
            level,
        }
    }

    /// Instala o destino. Só a primeira chamada tem efeito.
    pub fn attach(&self, sink: &'static dyn ConsoleSink) {
        self.sink.call_once(|| sink);
    }

    /// Registra este logger como logger global.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }

    /// Formata um registro. Separado de `log` para poder ser testado.
    pub fn format(record: &Record) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "[{}:{}] {}{}",
            record.file().unwrap_or("???"),
            record.line().unwrap_or(0),
            logging::prefix(record.level()),
            record.args()
        );
        line
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = self.sink.get() {
            sink.write_line(&Self::format(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use log::Level;
    use alloc::vec::Vec;
    use spin::Mutex;

    struct Capture(Mutex<Vec<String>>);

    impl ConsoleSink for Capture {
        fn write_line(&self, line: &str) {
            self.0.lock().push(line.to_string());
        }
    }

    #[test]
    fn test_format_line() {
        let record = Record::builder()
            .args(format_args!("timer 3 criado"))
            .level(Level::Info)
            .file(Some("engine.rs"))
            .line(Some(42))
            .build();

        let line = ConsoleLogger::format(&record);
        assert_eq!(line, "[engine.rs:42] \x1b[32m[INFO]\x1b[0m timer 3 criado");
    }

    #[test]
    fn test_level_filter_and_sink() {
        static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
        let logger = ConsoleLogger::with_level(LevelFilter::Warn);
        logger.attach(&CAPTURE);

        let warn = Record::builder()
            .args(format_args!("fila cheia"))
            .level(Level::Warn)
            .build();
        let debug = Record::builder()
            .args(format_args!("detalhe"))
            .level(Level::Debug)
            .build();

        logger.log(&warn);
        logger.log(&debug);

        let lines = CAPTURE.0.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("fila cheia"));
    }

    #[test]
    fn test_no_sink_is_silent() {
        let logger = ConsoleLogger::new();
        let record = Record::builder()
            .args(format_args!("ninguém escuta"))
            .level(Level::Error)
            .build();
        logger.log(&record);
    }
}
