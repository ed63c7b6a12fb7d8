//! Interface Abstrata da Plataforma (HAL).
//! Define o que o engine de timers precisa saber do kernel que o hospeda.

use crate::sys::KernelState;

/// Colaboradores externos do engine de timers.
///
/// O engine não conhece threads, scheduler nem controlador de interrupções:
/// tudo passa por aqui.
pub trait Platform: Send + Sync {
    /// Verifica se o chamador está em contexto de interrupção (ISR).
    /// Operações de ciclo de vida são rejeitadas nesse contexto.
    fn in_interrupt(&self) -> bool;

    /// Estado atual do kernel. Timers só podem ser criados depois da
    /// inicialização.
    fn kernel_state(&self) -> KernelState;

    /// Acorda a thread de timers. Chamado pelo tick quando há callbacks
    /// enfileirados.
    fn wake_timer_thread(&self) {}

    /// Desabilita interrupções no core atual (CLI).
    fn disable_interrupts(&self) {}

    /// Habilita interrupções no core atual (STI).
    fn enable_interrupts(&self) {}

    /// Verifica se as interrupções estão habilitadas.
    fn are_interrupts_enabled(&self) -> bool {
        false
    }

    /// Executa `f` com interrupções desabilitadas, restaurando o estado
    /// anterior na saída.
    ///
    /// Todo lock do engine é tomado aqui dentro: a ISR de tick usa os mesmos
    /// locks, e uma interrupção no meio de uma seção travada giraria para
    /// sempre no mesmo core.
    fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R {
        let were_enabled = self.are_interrupts_enabled();
        self.disable_interrupts();
        let result = f();
        if were_enabled {
            self.enable_interrupts();
        }
        result
    }
}

impl<P: Platform + ?Sized> Platform for &P {
    fn in_interrupt(&self) -> bool {
        (**self).in_interrupt()
    }

    fn kernel_state(&self) -> KernelState {
        (**self).kernel_state()
    }

    fn wake_timer_thread(&self) {
        (**self).wake_timer_thread()
    }

    fn disable_interrupts(&self) {
        (**self).disable_interrupts()
    }

    fn enable_interrupts(&self) {
        (**self).enable_interrupts()
    }

    fn are_interrupts_enabled(&self) -> bool {
        (**self).are_interrupts_enabled()
    }
}

impl<P: Platform + ?Sized> Platform for alloc::sync::Arc<P> {
    fn in_interrupt(&self) -> bool {
        (**self).in_interrupt()
    }

    fn kernel_state(&self) -> KernelState {
        (**self).kernel_state()
    }

    fn wake_timer_thread(&self) {
        (**self).wake_timer_thread()
    }

    fn disable_interrupts(&self) {
        (**self).disable_interrupts()
    }

    fn enable_interrupts(&self) {
        (**self).enable_interrupts()
    }

    fn are_interrupts_enabled(&self) -> bool {
        (**self).are_interrupts_enabled()
    }
}
