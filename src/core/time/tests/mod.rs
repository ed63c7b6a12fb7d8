//! Testes para o engine de timers
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Todos os testes do engine
//! cargo test --package forge-timer --lib core::time::tests
//!
//! # Um módulo específico
//! cargo test --package forge-timer --lib core::time::tests::dispatch
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `lifecycle.rs` - create/start/stop/delete/get_name e códigos de erro
//! - `firing.rs` - contagem regressiva, one-shot, periódico, ordem de expiração
//! - `dispatch.rs` - thread de timers: fila, overflow, descarte, reentrância
//! - `concurrency.rs` - threads reais disputando a tabela e a fila

#![cfg(test)]

pub mod dispatch;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::Mutex;

use crate::arch::SimPlatform;
use crate::core::time::{TimerCallback, TimerConfig, TimerEngine};

/// Helper: engine com kernel rodando e configuração padrão
pub fn running_engine() -> TimerEngine<SimPlatform> {
    TimerEngine::with_defaults(SimPlatform::running())
}

/// Helper: engine com configuração customizada
pub fn engine_with(config: TimerConfig) -> TimerEngine<SimPlatform> {
    TimerEngine::new(SimPlatform::running(), config).expect("configuração de teste válida")
}

/// Helper: callback que conta disparos e guarda o último argumento
pub struct Counter {
    hits: Arc<AtomicUsize>,
    last_arg: Arc<AtomicUsize>,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            last_arg: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    pub fn callback(&self) -> impl TimerCallback + 'static {
        let hits = self.hits.clone();
        let last_arg = self.last_arg.clone();
        move |arg: usize| {
            hits.fetch_add(1, Ordering::SeqCst);
            last_arg.store(arg, Ordering::SeqCst);
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_arg(&self) -> usize {
        self.last_arg.load(Ordering::SeqCst)
    }
}

/// Helper: callback que registra o argumento em um log compartilhado
pub fn recorder(log: &Arc<Mutex<Vec<usize>>>) -> impl TimerCallback + 'static {
    let log = log.clone();
    move |arg: usize| log.lock().push(arg)
}
