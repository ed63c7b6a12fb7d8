//! # Timer Engine
//!
//! Engine de software timers (CMSIS-RTOS2 `osTimer*`).
//!
//! ## 🏗️ Arquitetura e Fluxo
//!
//! ```text
//!  Tick Source (ISR)          Thread qualquer             Thread de Timers
//!  ─────────────────          ───────────────             ────────────────
//!  engine.tick()              create/start/stop/delete    engine.run_pending()
//!    │ decrementa armados        │                          │
//!    │ expirados → TimerQueue ───┼──────────────────────────▶ executa callbacks
//!    └ platform.wake_timer_thread()                         (FIFO, um por vez)
//! ```
//!
//! - O tick **nunca** executa callbacks; só marca expiração e enfileira.
//! - Callbacks rodam fora de ISR e podem chamar a própria API do engine.
//! - Toda mutação da tabela passa pelo `spin::Mutex` da tabela; nenhum lock
//!   fica preso durante um callback.
//! - Todo lock é tomado dentro de `Platform::critical_section` (interrupções
//!   desabilitadas), porque a ISR de tick disputa os mesmos locks.
//! - O caminho de tick não aloca: as expirações vão para um buffer
//!   pré-alocado com `max_timers` entradas.
//!
//! ## Políticas
//! - Expirações no mesmo tick são enfileiradas em ordem de criação.
//! - One-shot fica `Stopped` assim que a expiração é detectada.
//! - `start`/`stop` depois que o callback já foi enfileirado não o cancelam;
//!   `delete` cancela (a notificação é descartada no dispatch), desde que
//!   termine antes de o dispatch retirar aquela notificação da fila.

use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

use crate::arch::Platform;
use crate::core::object::{SlotArena, SlotError, TimerId};
use crate::core::time::config::{EventLevel, TimerConfig};
use crate::core::time::jiffies::Jiffies;
use crate::core::time::stats::{TimerCounters, TimerStats};
use crate::core::time::timer::{
    TickOutcome, TimerAttr, TimerCallback, TimerKind, TimerObject,
};
use crate::core::work::{Expiry, TimerQueue};
use crate::sys::{Ticks, TimerError, TimerResult};

/// Tabela de timers (protegida pelo lock do engine)
struct TimerTable {
    timers: SlotArena<TimerObject>,
    /// Próximo número de sequência de criação
    next_seq: u64,
    /// Expirações do tick corrente (capacidade fixa em `max_timers`)
    expired: Vec<(u64, Expiry)>,
}

/// Engine de timers.
///
/// Uma instância explícita por kernel (ou por teste): não existe estado
/// global. Compartilhe via `Arc` entre a ISR de tick, as threads da
/// aplicação e a thread de timers.
pub struct TimerEngine<P: Platform> {
    platform: P,
    config: TimerConfig,
    table: Mutex<TimerTable>,
    queue: TimerQueue,
    /// Token da thread de timers (um único contexto faz dispatch)
    dispatch: Mutex<()>,
    jiffies: Jiffies,
    counters: TimerCounters,
}

impl<P: Platform> TimerEngine<P> {
    /// Cria um engine com a configuração dada.
    pub fn new(platform: P, config: TimerConfig) -> TimerResult<Self> {
        config.validate()?;
        Ok(Self::build(platform, config))
    }

    /// Cria um engine com a configuração padrão.
    pub fn with_defaults(platform: P) -> Self {
        Self::build(platform, TimerConfig::new())
    }

    fn build(platform: P, config: TimerConfig) -> Self {
        crate::kinfo!(
            "(Timer) Engine: max_timers={} queue_depth={} max_ticks={}",
            config.max_timers,
            config.queue_depth,
            config.max_ticks
        );

        Self {
            platform,
            config,
            table: Mutex::new(TimerTable {
                timers: SlotArena::new(config.max_timers),
                next_seq: 0,
                expired: Vec::with_capacity(config.max_timers),
            }),
            queue: TimerQueue::new(config.queue_depth),
            dispatch: Mutex::new(()),
            jiffies: Jiffies::new(),
            counters: TimerCounters::default(),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    // =========================================================================
    // CICLO DE VIDA
    // =========================================================================

    /// Cria um timer parado (`osTimerNew`).
    ///
    /// Permitido antes do scheduler rodar, mas não antes da inicialização
    /// do kernel nem em contexto de interrupção.
    pub fn create<C>(
        &self,
        callback: C,
        kind: TimerKind,
        argument: usize,
        attr: Option<&TimerAttr>,
    ) -> TimerResult<TimerId>
    where
        C: TimerCallback + 'static,
    {
        const OP: &str = "create";

        if self.platform.in_interrupt() {
            return Err(self.fail(OP, TimerId::INVALID, TimerError::Isr));
        }
        if !self.platform.kernel_state().is_initialized() {
            return Err(self.fail(OP, TimerId::INVALID, TimerError::NotReady));
        }

        let attr = attr.copied().unwrap_or_default();
        if attr.attr_bits != 0 {
            return Err(self.fail(OP, TimerId::INVALID, TimerError::Parameter));
        }

        let callback: Arc<dyn TimerCallback> = Arc::new(callback);
        let inserted = self.locked(|table| {
            let seq = table.next_seq;
            let object = TimerObject::new(callback, kind, argument, attr.name, seq);
            match table.timers.insert(object) {
                Ok(id) => {
                    table.next_seq += 1;
                    Ok(id)
                }
                Err(_) => Err((table.timers.capacity(), table.timers.retired())),
            }
        });

        let id = match inserted {
            Ok(id) => id,
            Err((capacity, retired)) => {
                if self.event(EventLevel::ERROR) {
                    crate::kwarn!(
                        "(Timer) Pool esgotado: capacidade={} aposentados={}",
                        capacity,
                        retired
                    );
                }
                return Err(self.fail(OP, TimerId::INVALID, TimerError::NoMemory));
            }
        };

        TimerCounters::bump(&self.counters.created);
        if self.event(EventLevel::API) {
            crate::kinfo!(
                "(Timer) Criado id={:#x} kind={:?} name={:?}",
                id.raw(),
                kind,
                attr.name
            );
        }
        Ok(id)
    }

    /// Arma (ou rearma) o timer para expirar em `ticks` (`osTimerStart`).
    ///
    /// `ticks` vira também o período de um timer periódico. Rearmar um timer
    /// que já está rodando reinicia a contagem.
    pub fn start(&self, id: TimerId, ticks: Ticks) -> TimerResult<()> {
        const OP: &str = "start";

        if self.platform.in_interrupt() {
            return Err(self.fail(OP, id, TimerError::Isr));
        }

        let max_ticks = self.config.max_ticks;
        let result = self.locked(|table| match table.timers.check(id) {
            Err(SlotError::Invalid) => Err(TimerError::Parameter),
            _ if ticks == 0 || ticks > max_ticks => Err(TimerError::Parameter),
            Err(SlotError::Stale) => Err(TimerError::Resource),
            Ok(_) => table
                .timers
                .get_mut(id)
                .map(|timer| timer.arm(ticks))
                .map_err(TimerError::from),
        });
        result.map_err(|err| self.fail(OP, id, err))?;

        if self.event(EventLevel::API) {
            crate::kdebug!("(Timer) Start id={:#x} ticks={}", id.raw(), ticks);
        }
        Ok(())
    }

    /// Desarma um timer rodando (`osTimerStop`).
    pub fn stop(&self, id: TimerId) -> TimerResult<()> {
        const OP: &str = "stop";

        if self.platform.in_interrupt() {
            return Err(self.fail(OP, id, TimerError::Isr));
        }

        let result = self.locked(|table| -> TimerResult<()> {
            let timer = table.timers.get_mut(id)?;
            if !timer.is_running() {
                return Err(TimerError::Resource);
            }
            timer.disarm();
            Ok(())
        });
        result.map_err(|err| self.fail(OP, id, err))?;

        if self.event(EventLevel::API) {
            crate::kdebug!("(Timer) Stop id={:#x}", id.raw());
        }
        Ok(())
    }

    /// Verifica se o timer está armado (`osTimerIsRunning`).
    ///
    /// Qualquer erro (handle inválido, ISR) é reportado como `false`.
    pub fn is_running(&self, id: TimerId) -> bool {
        if self.platform.in_interrupt() {
            return false;
        }
        self.locked(|table| {
            table
                .timers
                .get(id)
                .map(|timer| timer.is_running())
                .unwrap_or(false)
        })
    }

    /// Desarma (se preciso) e destrói o timer (`osTimerDelete`).
    ///
    /// O handle fica inválido; callbacks já enfileirados são descartados.
    /// Um callback que o dispatch já retirou da fila (rodando ou prestes a
    /// rodar) não é interrompido: só o cancela um `delete` que termina antes.
    pub fn delete(&self, id: TimerId) -> TimerResult<()> {
        const OP: &str = "delete";

        if self.platform.in_interrupt() {
            return Err(self.fail(OP, id, TimerError::Isr));
        }

        let removed = self.locked(|table| table.timers.remove(id));
        let timer = removed.map_err(|err| self.fail(OP, id, err.into()))?;

        TimerCounters::bump(&self.counters.deleted);
        if self.event(EventLevel::API) {
            crate::kinfo!(
                "(Timer) Deletado id={:#x} (estava rodando: {})",
                id.raw(),
                timer.is_running()
            );
        }
        Ok(())
    }

    /// Nome do timer (`osTimerGetName`).
    pub fn get_name(&self, id: TimerId) -> Option<&'static str> {
        if self.platform.in_interrupt() {
            return None;
        }
        self.locked(|table| table.timers.get(id).ok().and_then(|timer| timer.name))
    }

    /// Tipo do timer.
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.locked(|table| table.timers.get(id).ok().map(|timer| timer.kind))
    }

    /// Ticks até a próxima expiração, `None` se parado ou inválido.
    pub fn remaining_ticks(&self, id: TimerId) -> Option<Ticks> {
        self.locked(|table| {
            table
                .timers
                .get(id)
                .ok()
                .filter(|timer| timer.is_running())
                .map(|timer| timer.remaining)
        })
    }

    /// Timers vivos.
    pub fn active_timers(&self) -> usize {
        self.locked(|table| table.timers.len())
    }

    // =========================================================================
    // TICK (contexto de interrupção)
    // =========================================================================

    /// Avança o tempo em um tick. Chamado pela ISR do relógio do kernel.
    ///
    /// Retorna quantas expirações foram enfileiradas.
    pub fn tick(&self) -> usize {
        let now = self.jiffies.inc();

        let (queued, overflowed) = self.locked(|table| {
            let TimerTable {
                timers, expired, ..
            } = table;

            for (id, timer) in timers.iter_mut() {
                if timer.tick() == TickOutcome::Expired {
                    let expiry = Expiry::new(id, now, timer.callback.clone(), timer.argument);
                    expired.push((timer.seq, expiry));
                }
            }

            // Desempate determinístico: ordem de criação
            expired.sort_unstable_by_key(|(seq, _)| *seq);

            let mut queued = 0;
            let mut overflowed = 0;
            for (_, expiry) in expired.drain(..) {
                match self.queue.push(expiry) {
                    Ok(()) => queued += 1,
                    Err(_) => overflowed += 1,
                }
            }
            (queued, overflowed)
        });

        TimerCounters::add(&self.counters.expired, queued + overflowed);
        TimerCounters::add(&self.counters.queue_overflows, overflowed);

        if overflowed > 0 && self.event(EventLevel::ERROR) {
            crate::kerror!(
                "(Timer) Fila de callbacks cheia (depth={}): {} expirações perdidas no tick {}",
                self.queue.depth(),
                overflowed,
                now
            );
        }
        if queued > 0 && self.event(EventLevel::OP) {
            crate::ktrace!("(Timer) Tick {}: {} expirações enfileiradas", now, queued);
        } else if self.event(EventLevel::DETAIL) {
            crate::ktrace!("(Timer) Tick {}", now);
        }

        if queued > 0 {
            self.platform.wake_timer_thread();
        }
        queued
    }

    /// Avança `ticks` ticks. Retorna o total de expirações enfileiradas.
    pub fn advance(&self, ticks: u64) -> usize {
        (0..ticks).map(|_| self.tick()).sum()
    }

    /// Ticks desde a criação do engine (`osKernelGetTickCount`).
    pub fn tick_count(&self) -> u64 {
        self.jiffies.get()
    }

    // =========================================================================
    // THREAD DE TIMERS
    // =========================================================================

    /// Expirações aguardando a thread de timers.
    pub fn pending(&self) -> usize {
        self.platform.critical_section(|| self.queue.len())
    }

    /// Executa os callbacks pendentes, em ordem FIFO.
    ///
    /// Deve ser chamado pela thread de timers quando acordada. Só um contexto
    /// faz dispatch por vez: uma chamada concorrente (ou aninhada, de dentro
    /// de um callback) retorna `0` imediatamente e a fila fica para quem já
    /// está drenando.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;

        loop {
            let Some(token) = self.dispatch.try_lock() else {
                return ran;
            };

            while let Some(expiry) = self.platform.critical_section(|| self.queue.pop()) {
                let alive = self.locked(|table| table.timers.check(expiry.id).is_ok());
                if !alive {
                    TimerCounters::bump(&self.counters.discarded);
                    if self.event(EventLevel::OP) {
                        crate::ktrace!(
                            "(Timer) Descartado id={:#x} (expirou no tick {}): deletado antes do dispatch",
                            expiry.id.raw(),
                            expiry.tick
                        );
                    }
                    continue;
                }

                expiry.run();
                TimerCounters::bump(&self.counters.dispatched);
                ran += 1;
            }

            drop(token);

            // Um tick pode ter enfileirado entre o último pop e a liberação do token
            if self.platform.critical_section(|| self.queue.is_empty()) {
                return ran;
            }
        }
    }

    /// Snapshot das estatísticas.
    pub fn stats(&self) -> TimerStats {
        self.counters.snapshot()
    }

    // =========================================================================
    // AUXILIARES
    // =========================================================================

    /// Acesso à tabela com interrupções desabilitadas.
    fn locked<R>(&self, f: impl FnOnce(&mut TimerTable) -> R) -> R {
        self.platform.critical_section(|| f(&mut self.table.lock()))
    }

    #[inline]
    fn event(&self, level: EventLevel) -> bool {
        self.config.events.contains(level)
    }

    fn fail(&self, op: &'static str, id: TimerId, err: TimerError) -> TimerError {
        if self.event(EventLevel::ERROR) {
            crate::kwarn!("(Timer) {} id={:#x} falhou: {}", op, id.raw(), err);
        }
        err
    }
}
