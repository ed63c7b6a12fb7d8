//! Constantes de configuração do engine de timers

use bitflags::bitflags;

use crate::core::object::TimerId;
use crate::sys::{TimerError, TimerResult};

/// Número máximo padrão de timers vivos por engine
pub const MAX_TIMERS: usize = 32;

/// Profundidade padrão da fila de callbacks da thread de timers
pub const TIMER_QUEUE_DEPTH: usize = 16;

/// Maior contagem de ticks aceita por `start` (osWaitForever excluído)
pub const MAX_TIMER_TICKS: u32 = 0xFFFF_FFFE;

bitflags! {
    /// Níveis de eventos emitidos pelo engine.
    /// Define QUAIS eventos chegam aos macros de log.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventLevel: u8 {
        /// Falhas de operação e overflow da fila.
        const ERROR  = 1 << 0;
        /// Chamadas da API (create/start/stop/delete).
        const API    = 1 << 1;
        /// Operações internas (expiração, dispatch).
        const OP     = 1 << 2;
        /// Detalhes de cada tick.
        const DETAIL = 1 << 3;

        /// Todos os eventos.
        const ALL    = Self::ERROR.bits() | Self::API.bits() | Self::OP.bits() | Self::DETAIL.bits();
    }
}

/// Configuração de um `TimerEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Timers vivos simultâneos
    pub max_timers: usize,
    /// Notificações pendentes na fila da thread de timers
    pub queue_depth: usize,
    /// Limite superior de `ticks` em `start`
    pub max_ticks: u32,
    /// Eventos registrados em log
    pub events: EventLevel,
}

impl TimerConfig {
    pub const fn new() -> Self {
        Self {
            max_timers: MAX_TIMERS,
            queue_depth: TIMER_QUEUE_DEPTH,
            max_ticks: MAX_TIMER_TICKS,
            events: EventLevel::ERROR.union(EventLevel::API),
        }
    }

    pub const fn with_max_timers(mut self, max_timers: usize) -> Self {
        self.max_timers = max_timers;
        self
    }

    pub const fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }

    pub const fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub const fn with_events(mut self, events: EventLevel) -> Self {
        self.events = events;
        self
    }

    /// Valida os limites (a arena endereça no máximo `TimerId::MAX_INDEX + 1` slots).
    pub fn validate(&self) -> TimerResult<()> {
        if self.max_timers == 0 || self.max_timers > TimerId::MAX_INDEX + 1 {
            return Err(TimerError::Parameter);
        }
        if self.queue_depth == 0 || self.max_ticks == 0 {
            return Err(TimerError::Parameter);
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new()
    }
}
