//! Plataforma Simulada
//!
//! Implementação de `Platform` sem hardware: contexto de interrupção,
//! estado do kernel e wake-up da thread de timers são apenas atômicos.
//!
//! Usada em ambientes hospedados (host) e nos testes. Simula um único core:
//! `enter_isr()` e o flag de interrupções valem para qualquer thread que
//! consulte esta instância.

use alloc::boxed::Box;
use core::sync::atomic::{AtomicBool, AtomicI8, AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

use super::traits::Platform;
use crate::sys::KernelState;

type Waker = Box<dyn Fn() + Send + Sync>;

/// Plataforma simulada.
pub struct SimPlatform {
    /// Profundidade de aninhamento de ISR (0 = contexto de thread)
    isr_depth: AtomicUsize,
    /// Flag de interrupções do core simulado (IF)
    interrupts: AtomicBool,
    /// Quantas vezes as interrupções foram desabilitadas
    masks: AtomicU64,
    state: AtomicI8,
    wakeups: AtomicU64,
    waker: Mutex<Option<Waker>>,
}

impl SimPlatform {
    /// Cria plataforma com kernel `Inactive`.
    pub const fn new() -> Self {
        Self {
            isr_depth: AtomicUsize::new(0),
            interrupts: AtomicBool::new(true),
            masks: AtomicU64::new(0),
            state: AtomicI8::new(KernelState::Inactive.as_raw()),
            wakeups: AtomicU64::new(0),
            waker: Mutex::new(None),
        }
    }

    /// Cria plataforma já com o scheduler rodando.
    pub fn running() -> Self {
        let platform = Self::new();
        platform.set_state(KernelState::Running);
        platform
    }

    /// `osKernelInitialize`: Inactive -> Ready.
    pub fn initialize(&self) {
        let _ = self.state.compare_exchange(
            KernelState::Inactive.as_raw(),
            KernelState::Ready.as_raw(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// `osKernelStart`: Ready -> Running.
    pub fn start(&self) {
        let _ = self.state.compare_exchange(
            KernelState::Ready.as_raw(),
            KernelState::Running.as_raw(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn set_state(&self, state: KernelState) {
        self.state.store(state.as_raw(), Ordering::Release);
    }

    /// Entra em contexto de interrupção até o guard ser destruído.
    pub fn enter_isr(&self) -> IsrGuard<'_> {
        self.isr_depth.fetch_add(1, Ordering::AcqRel);
        IsrGuard { platform: self }
    }

    /// Quantas seções críticas (CLI) foram abertas.
    pub fn interrupt_masks(&self) -> u64 {
        self.masks.load(Ordering::Acquire)
    }

    /// Quantas vezes a thread de timers foi acordada.
    pub fn wakeups(&self) -> u64 {
        self.wakeups.load(Ordering::Acquire)
    }

    /// Instala o hook chamado em cada wake-up (ex: `Thread::unpark`).
    pub fn set_waker<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.waker.lock() = Some(Box::new(f));
    }
}

impl Default for SimPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SimPlatform {
    fn in_interrupt(&self) -> bool {
        self.isr_depth.load(Ordering::Acquire) != 0
    }

    fn kernel_state(&self) -> KernelState {
        KernelState::from_raw(self.state.load(Ordering::Acquire))
    }

    fn wake_timer_thread(&self) {
        self.wakeups.fetch_add(1, Ordering::AcqRel);
        if let Some(waker) = self.waker.lock().as_ref() {
            waker();
        }
    }

    fn disable_interrupts(&self) {
        self.interrupts.store(false, Ordering::Release);
        self.masks.fetch_add(1, Ordering::AcqRel);
    }

    fn enable_interrupts(&self) {
        self.interrupts.store(true, Ordering::Release);
    }

    fn are_interrupts_enabled(&self) -> bool {
        self.interrupts.load(Ordering::Acquire)
    }
}

/// Guard de contexto de interrupção - sai da ISR ao sair do escopo
pub struct IsrGuard<'a> {
    platform: &'a SimPlatform,
}

impl Drop for IsrGuard<'_> {
    fn drop(&mut self) {
        self.platform.isr_depth.fetch_sub(1, Ordering::AcqRel);
    }
}
