//! Arquivo: core/work/timer_queue.rs
//!
//! Propósito: Fila de callbacks da thread de timers.
//! O tick (contexto de interrupção) só enfileira notificações de expiração;
//! a thread de timers as consome e executa os callbacks fora da ISR.
//!
//! Detalhes de Implementação:
//! - Usa `VecDeque` protegido por `spin::Mutex`.
//! - Capacidade fixa: com a fila cheia a notificação é recusada (o chamador
//!   contabiliza o overflow).
//! - FIFO estrita: callbacks rodam na ordem em que as expirações foram detectadas.

//! Fila de trabalho diferido dos timers

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use spin::Mutex;

use crate::core::object::TimerId;
use crate::core::time::timer::TimerCallback;

/// Notificação de expiração (um item de trabalho)
pub struct Expiry {
    /// Timer que expirou
    pub id: TimerId,
    /// Tick em que a expiração foi detectada
    pub tick: u64,
    callback: Arc<dyn TimerCallback>,
    argument: usize,
}

impl Expiry {
    pub fn new(id: TimerId, tick: u64, callback: Arc<dyn TimerCallback>, argument: usize) -> Self {
        Self {
            id,
            tick,
            callback,
            argument,
        }
    }

    /// Executa o callback
    pub fn run(&self) {
        self.callback.on_expiration(self.argument);
    }
}

/// Fila de expirações
pub struct TimerQueue {
    queue: Mutex<VecDeque<Expiry>>,
    depth: usize,
}

impl TimerQueue {
    /// Cria uma nova fila com capacidade `depth`
    pub fn new(depth: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(depth)),
            depth,
        }
    }

    /// Enfileira uma expiração. Devolve o item se a fila estiver cheia.
    pub fn push(&self, expiry: Expiry) -> Result<(), Expiry> {
        let mut q = self.queue.lock();
        if q.len() >= self.depth {
            return Err(expiry);
        }
        q.push_back(expiry);
        Ok(())
    }

    /// Retira o próximo item protegendo o lock o mínimo possível
    pub fn pop(&self) -> Option<Expiry> {
        self.queue.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    fn expiry(index: u16, callback: Arc<dyn TimerCallback>) -> Expiry {
        Expiry::new(TimerId::new(index, 0), 1, callback, index as usize)
    }

    #[test]
    fn test_fifo_order() {
        let noop: Arc<dyn TimerCallback> = Arc::new(|_: usize| {});
        let queue = TimerQueue::new(4);
        for i in 0..3 {
            assert!(queue.push(expiry(i, noop.clone())).is_ok());
        }

        let order: alloc::vec::Vec<_> = core::iter::from_fn(|| queue.pop())
            .map(|e| e.id.index())
            .collect();
        assert_eq!(order, [Some(0), Some(1), Some(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_rejects() {
        let noop: Arc<dyn TimerCallback> = Arc::new(|_: usize| {});
        let queue = TimerQueue::new(1);
        assert!(queue.push(expiry(0, noop.clone())).is_ok());

        let rejected = queue.push(expiry(1, noop)).unwrap_err();
        assert_eq!(rejected.id.index(), Some(1));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_run_passes_argument() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let callback: Arc<dyn TimerCallback> = Arc::new(move |arg: usize| {
            sink.fetch_add(arg, Ordering::Relaxed);
        });

        expiry(7, callback).run();
        assert_eq!(seen.load(Ordering::Relaxed), 7);
    }
}
