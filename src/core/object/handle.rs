//! Handle opaco para timers

/// Handle opaco que representa um timer (`osTimerId_t`).
///
/// Quem chama nunca vê ponteiros reais, apenas handles:
///
/// ```text
///  31            16 15             0
/// +----------------+----------------+
/// |   generation   |   index + 1    |
/// +----------------+----------------+
/// ```
///
/// Índice `0` no campo baixo é o handle nulo. A geração invalida handles
/// antigos quando o slot é reutilizado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TimerId(u32);

impl TimerId {
    /// Handle inválido/nulo
    pub const INVALID: TimerId = TimerId(0);

    /// Maior índice de slot representável.
    pub const MAX_INDEX: usize = 0xFFFE;

    /// Cria handle a partir de índice de slot e geração
    pub const fn new(index: u16, generation: u16) -> Self {
        Self(((generation as u32) << 16) | (index as u32 + 1))
    }

    /// Reconstrói um handle a partir do valor raw (ABI)
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Retorna o valor raw do handle
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Verifica se é válido (não nulo)
    pub const fn is_valid(&self) -> bool {
        (self.0 & 0xFFFF) != 0
    }

    /// Índice do slot, `None` para handle nulo
    pub const fn index(&self) -> Option<usize> {
        match self.0 & 0xFFFF {
            0 => None,
            low => Some(low as usize - 1),
        }
    }

    pub const fn generation(&self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_packing() {
        let id = TimerId::new(5, 7);
        assert!(id.is_valid());
        assert_eq!(id.index(), Some(5));
        assert_eq!(id.generation(), 7);
        assert_eq!(TimerId::from_raw(id.raw()), id);
    }

    #[test]
    fn test_null_handle() {
        assert!(!TimerId::INVALID.is_valid());
        assert_eq!(TimerId::INVALID.index(), None);
        assert_eq!(TimerId::default(), TimerId::INVALID);

        // Geração sem índice continua sendo nulo
        assert!(!TimerId::from_raw(0x0003_0000).is_valid());
    }

    #[test]
    fn test_index_zero_is_not_null() {
        let id = TimerId::new(0, 0);
        assert!(id.is_valid());
        assert_eq!(id.raw(), 1);
    }
}
