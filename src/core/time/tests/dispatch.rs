//! Testes da thread de timers (fila, overflow, descarte, reentrância)

#![cfg(test)]

use alloc::sync::{Arc, Weak};
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use spin::Mutex;

use super::{engine_with, recorder, running_engine, Counter};
use crate::arch::{Platform, SimPlatform};
use crate::core::object::TimerId;
use crate::core::time::{TimerConfig, TimerEngine, TimerKind};
use crate::sys::TimerError;

/// Helper: slot onde o teste publica o handle depois do `create`
fn handle_slot() -> Arc<AtomicU32> {
    Arc::new(AtomicU32::new(TimerId::INVALID.raw()))
}

fn load(slot: &AtomicU32) -> TimerId {
    TimerId::from_raw(slot.load(Ordering::SeqCst))
}

#[test]
fn test_deleted_timer_callback_is_discarded() {
    let engine = running_engine();
    let counter = Counter::new();
    let id = engine
        .create(counter.callback(), TimerKind::Once, 0, None)
        .unwrap();

    engine.start(id, 2).unwrap();
    engine.advance(2);
    assert_eq!(engine.pending(), 1);

    engine.delete(id).unwrap();
    assert_eq!(engine.run_pending(), 0);
    assert_eq!(counter.hits(), 0);
    assert_eq!(engine.stats().discarded, 1);
    assert_eq!(engine.pending(), 0);
}

#[test]
fn test_discard_survives_slot_reuse() {
    let engine = running_engine();
    let old = Counter::new();
    let new = Counter::new();

    let id = engine
        .create(old.callback(), TimerKind::Once, 0, None)
        .unwrap();
    engine.start(id, 1).unwrap();
    engine.tick();
    engine.delete(id).unwrap();

    // Mesmo slot, geração nova: a notificação antiga não pode alcançá-lo
    let reused = engine
        .create(new.callback(), TimerKind::Once, 0, None)
        .unwrap();
    assert_eq!(reused.index(), id.index());

    assert_eq!(engine.run_pending(), 0);
    assert_eq!(old.hits(), 0);
    assert_eq!(new.hits(), 0);
}

#[test]
fn test_stop_does_not_cancel_queued_callback() {
    let engine = running_engine();
    let counter = Counter::new();
    let id = engine
        .create(counter.callback(), TimerKind::Periodic, 0, None)
        .unwrap();

    engine.start(id, 2).unwrap();
    engine.advance(2);
    engine.stop(id).unwrap();

    assert_eq!(engine.run_pending(), 1);
    assert_eq!(counter.hits(), 1);
    assert!(!engine.is_running(id));
}

#[test]
fn test_restart_does_not_cancel_queued_callback() {
    let engine = running_engine();
    let counter = Counter::new();
    let id = engine
        .create(counter.callback(), TimerKind::Once, 0, None)
        .unwrap();

    engine.start(id, 1).unwrap();
    engine.tick();
    engine.start(id, 10).unwrap();

    assert_eq!(engine.run_pending(), 1);
    assert_eq!(counter.hits(), 1);
    assert_eq!(engine.remaining_ticks(id), Some(10));
}

#[test]
fn test_queue_overflow_is_counted() {
    let engine = engine_with(TimerConfig::new().with_queue_depth(1));
    let log = Arc::new(Mutex::new(Vec::new()));

    let a = engine
        .create(recorder(&log), TimerKind::Once, 1, None)
        .unwrap();
    let b = engine
        .create(recorder(&log), TimerKind::Once, 2, None)
        .unwrap();
    engine.start(a, 3).unwrap();
    engine.start(b, 3).unwrap();

    assert_eq!(engine.advance(3), 1);
    let stats = engine.stats();
    assert_eq!(stats.expired, 2);
    assert_eq!(stats.queue_overflows, 1);

    // O primeiro na ordem de criação ficou na fila; os dois pararam
    engine.run_pending();
    assert_eq!(*log.lock(), vec![1]);
    assert!(!engine.is_running(a));
    assert!(!engine.is_running(b));
}

#[test]
fn test_callback_stops_own_timer() {
    let engine = Arc::new(running_engine());
    let slot = handle_slot();
    let hits = Arc::new(AtomicUsize::new(0));
    let result = Arc::new(Mutex::new(None));

    let id = {
        let weak: Weak<TimerEngine<SimPlatform>> = Arc::downgrade(&engine);
        let slot = slot.clone();
        let hits = hits.clone();
        let result = result.clone();
        engine
            .create(
                move |_arg: usize| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if let Some(engine) = weak.upgrade() {
                        *result.lock() = Some(engine.stop(load(&slot)));
                    }
                },
                TimerKind::Periodic,
                0,
                None,
            )
            .unwrap()
    };
    slot.store(id.raw(), Ordering::SeqCst);

    engine.start(id, 2).unwrap();
    engine.advance(2);
    engine.run_pending();

    assert_eq!(*result.lock(), Some(Ok(())));
    assert!(!engine.is_running(id));

    engine.advance(10);
    engine.run_pending();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_callback_deletes_own_timer() {
    let engine = Arc::new(running_engine());
    let slot = handle_slot();
    let result = Arc::new(Mutex::new(None));

    let id = {
        let weak = Arc::downgrade(&engine);
        let slot = slot.clone();
        let result = result.clone();
        engine
            .create(
                move |_arg: usize| {
                    if let Some(engine) = weak.upgrade() {
                        *result.lock() = Some(engine.delete(load(&slot)));
                    }
                },
                TimerKind::Periodic,
                0,
                None,
            )
            .unwrap()
    };
    slot.store(id.raw(), Ordering::SeqCst);

    engine.start(id, 1).unwrap();
    // Duas expirações enfileiradas antes do dispatch
    engine.advance(2);
    assert_eq!(engine.pending(), 2);

    // A primeira deleta o timer; a segunda é descartada
    assert_eq!(engine.run_pending(), 1);
    assert_eq!(*result.lock(), Some(Ok(())));
    assert_eq!(engine.stats().discarded, 1);
    assert_eq!(engine.active_timers(), 0);
    assert_eq!(engine.start(id, 1), Err(TimerError::Resource));
}

#[test]
fn test_callback_rearms_other_timer() {
    let engine = Arc::new(running_engine());
    let target = Counter::new();
    let target_id = engine
        .create(target.callback(), TimerKind::Once, 0, None)
        .unwrap();

    let weak = Arc::downgrade(&engine);
    let trigger = engine
        .create(
            move |_arg: usize| {
                if let Some(engine) = weak.upgrade() {
                    let _ = engine.start(target_id, 3);
                }
            },
            TimerKind::Once,
            0,
            None,
        )
        .unwrap();

    engine.start(trigger, 1).unwrap();
    engine.tick();
    engine.run_pending();
    assert_eq!(engine.remaining_ticks(target_id), Some(3));

    engine.advance(3);
    engine.run_pending();
    assert_eq!(target.hits(), 1);
}

#[test]
fn test_nested_run_pending_returns_zero() {
    let engine = Arc::new(running_engine());
    let nested = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..2 {
        let weak = Arc::downgrade(&engine);
        let nested = nested.clone();
        let id = engine
            .create(
                move |_arg: usize| {
                    if let Some(engine) = weak.upgrade() {
                        nested.lock().push(engine.run_pending());
                    }
                },
                TimerKind::Once,
                0,
                None,
            )
            .unwrap();
        engine.start(id, 1).unwrap();
    }

    engine.tick();
    // Ambos rodam na chamada externa, em ordem
    assert_eq!(engine.run_pending(), 2);
    assert_eq!(*nested.lock(), vec![0, 0]);
}

#[test]
fn test_delete_from_earlier_callback_cancels_later() {
    let engine = Arc::new(running_engine());
    let victim = Counter::new();
    let slot = handle_slot();

    // Criado antes: roda primeiro no lote do mesmo tick
    let weak = Arc::downgrade(&engine);
    let target = slot.clone();
    let first = engine
        .create(
            move |_arg: usize| {
                if let Some(engine) = weak.upgrade() {
                    let _ = engine.delete(load(&target));
                }
            },
            TimerKind::Once,
            0,
            None,
        )
        .unwrap();
    let second = engine
        .create(victim.callback(), TimerKind::Once, 0, None)
        .unwrap();
    slot.store(second.raw(), Ordering::SeqCst);

    engine.start(first, 1).unwrap();
    engine.start(second, 1).unwrap();
    assert_eq!(engine.tick(), 2);

    // O delete termina antes de o dispatch retirar a segunda notificação
    assert_eq!(engine.run_pending(), 1);
    assert_eq!(victim.hits(), 0);
    assert_eq!(engine.stats().discarded, 1);
    assert_eq!(engine.active_timers(), 1);
}

#[test]
fn test_locks_are_taken_with_interrupts_masked() {
    let engine = Arc::new(running_engine());
    let seen_enabled = Arc::new(Mutex::new(None));

    let weak = Arc::downgrade(&engine);
    let seen = seen_enabled.clone();
    let id = engine
        .create(
            move |_arg: usize| {
                if let Some(engine) = weak.upgrade() {
                    *seen.lock() = Some(engine.platform().are_interrupts_enabled());
                }
            },
            TimerKind::Once,
            0,
            None,
        )
        .unwrap();

    let before = engine.platform().interrupt_masks();
    engine.start(id, 1).unwrap();
    assert!(engine.platform().interrupt_masks() > before);
    assert!(engine.platform().are_interrupts_enabled());

    let before = engine.platform().interrupt_masks();
    engine.tick();
    assert!(engine.platform().interrupt_masks() > before);
    assert!(engine.platform().are_interrupts_enabled());

    // O callback roda fora de qualquer seção crítica
    engine.run_pending();
    assert_eq!(*seen_enabled.lock(), Some(true));
    assert!(engine.platform().are_interrupts_enabled());
}

#[test]
fn test_run_pending_on_empty_queue() {
    let engine = running_engine();
    assert_eq!(engine.run_pending(), 0);
    assert_eq!(engine.stats().dispatched, 0);
}
