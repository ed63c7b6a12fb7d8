//! Arquivo: core/time/timer.rs
//!
//! Propósito: Objeto timer (software timer do CMSIS-RTOS2).
//! Guarda callback, argumento, tipo, período e a contagem regressiva.
//!
//! Detalhes de Implementação:
//! - Baseado em ticks do engine (`Jiffies`).
//! - O tipo (one-shot/periódico) é fixado na criação.
//! - `remaining` só tem significado enquanto `Running` e nunca é zero nesse estado.

use alloc::sync::Arc;

use crate::sys::Ticks;

/// Callback para quando o timer expirar (`osTimerFunc_t`).
///
/// Roda na thread de timers, nunca em contexto de interrupção.
pub trait TimerCallback: Send + Sync {
    fn on_expiration(&self, argument: usize);
}

impl<F> TimerCallback for F
where
    F: Fn(usize) + Send + Sync,
{
    fn on_expiration(&self, argument: usize) {
        self(argument)
    }
}

/// Tipo do timer (`osTimerType_t`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Dispara uma vez e para.
    Once = 0,
    /// Dispara a cada período até `stop`/`delete`.
    Periodic = 1,
}

/// Estado de ciclo de vida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Atributos de criação (`osTimerAttr_t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerAttr {
    /// Nome legível (opcional)
    pub name: Option<&'static str>,
    /// Reservado, deve ser zero
    pub attr_bits: u32,
}

impl TimerAttr {
    pub const fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            attr_bits: 0,
        }
    }
}

/// Resultado de um tick para um timer armado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Pending,
    Expired,
}

/// Um timer vivo na arena do engine
pub(crate) struct TimerObject {
    pub name: Option<&'static str>,
    pub kind: TimerKind,
    pub callback: Arc<dyn TimerCallback>,
    pub argument: usize,
    /// Período (ticks) configurado pelo último `start`
    pub period: Ticks,
    /// Ticks até a próxima expiração
    pub remaining: Ticks,
    pub state: TimerState,
    /// Ordem de criação (desempate de expirações no mesmo tick)
    pub seq: u64,
}

impl TimerObject {
    /// Cria um timer parado
    pub fn new(
        callback: Arc<dyn TimerCallback>,
        kind: TimerKind,
        argument: usize,
        name: Option<&'static str>,
        seq: u64,
    ) -> Self {
        Self {
            name,
            kind,
            callback,
            argument,
            period: 0,
            remaining: 0,
            state: TimerState::Stopped,
            seq,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Arma (ou rearma) com `ticks` > 0
    pub fn arm(&mut self, ticks: Ticks) {
        self.period = ticks;
        self.remaining = ticks;
        self.state = TimerState::Running;
    }

    pub fn disarm(&mut self) {
        self.remaining = 0;
        self.state = TimerState::Stopped;
    }

    /// Decrementa a contagem. Na expiração, one-shot desarma e periódico
    /// recarrega o período.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Pending;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining != 0 {
            return TickOutcome::Pending;
        }

        match self.kind {
            TimerKind::Once => self.disarm(),
            TimerKind::Periodic => self.remaining = self.period,
        }
        TickOutcome::Expired
    }
}
