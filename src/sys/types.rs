//! Tipos fundamentais do sistema

/// Estado do kernel (`osKernelState_t`).
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelState {
    /// Kernel ainda não inicializado.
    Inactive = 0,
    /// Inicializado, scheduler ainda não rodando.
    Ready = 1,
    Running = 2,
    Locked = 3,
    Suspended = 4,
    Error = -1,
}

impl KernelState {
    pub const fn from_raw(raw: i8) -> Self {
        match raw {
            0 => KernelState::Inactive,
            1 => KernelState::Ready,
            2 => KernelState::Running,
            3 => KernelState::Locked,
            4 => KernelState::Suspended,
            _ => KernelState::Error,
        }
    }

    pub const fn as_raw(self) -> i8 {
        self as i8
    }

    /// O kernel já passou pela inicialização (objetos podem ser criados).
    pub const fn is_initialized(self) -> bool {
        matches!(
            self,
            KernelState::Ready | KernelState::Running | KernelState::Locked | KernelState::Suspended
        )
    }
}

/// Contagem de ticks do kernel.
pub type Ticks = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_state_raw_roundtrip() {
        for state in [
            KernelState::Inactive,
            KernelState::Ready,
            KernelState::Running,
            KernelState::Locked,
            KernelState::Suspended,
            KernelState::Error,
        ] {
            assert_eq!(KernelState::from_raw(state.as_raw()), state);
        }
    }

    #[test]
    fn test_initialization_gate() {
        assert!(!KernelState::Inactive.is_initialized());
        assert!(!KernelState::Error.is_initialized());
        assert!(KernelState::Ready.is_initialized());
        assert!(KernelState::Running.is_initialized());
    }
}
