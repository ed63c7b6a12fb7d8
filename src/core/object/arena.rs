//! Arquivo: core/object/arena.rs
//!
//! Propósito: Arena de slots com capacidade fixa para objetos referenciados
//! por `TimerId`.
//!
//! Detalhes de Implementação:
//! - Slots crescem sob demanda até `capacity` (nunca além).
//! - Cada slot tem um contador de geração incrementado na remoção; handles
//!   antigos deixam de bater e são classificados como `Stale`.
//! - A geração nunca dá a volta: um slot que esgota as gerações é aposentado
//!   (não volta para a lista livre), senão um handle antigo voltaria a valer.
//! - Slots livres são reutilizados em ordem LIFO.

use alloc::vec::Vec;

use super::handle::TimerId;
use crate::sys::TimerError;

/// Motivo de um handle não resolver para um objeto vivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// Handle nulo, slot nunca alocado ou geração nunca emitida.
    Invalid,
    /// Índice válido mas o objeto foi destruído (geração diferente).
    Stale,
}

impl From<SlotError> for TimerError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::Invalid => TimerError::Parameter,
            SlotError::Stale => TimerError::Resource,
        }
    }
}

struct Slot<T> {
    generation: u16,
    value: Option<T>,
}

/// Arena de capacidade fixa.
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u16>,
    capacity: usize,
    len: usize,
    retired: usize,
}

impl<T> SlotArena<T> {
    /// Cria arena vazia. `capacity` é limitado a `TimerId::MAX_INDEX + 1`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            capacity: capacity.min(TimerId::MAX_INDEX + 1),
            len: 0,
            retired: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Slots aposentados por esgotamento de geração.
    pub fn retired(&self) -> usize {
        self.retired
    }

    /// Insere um objeto. Devolve o objeto de volta se a arena estiver cheia.
    pub fn insert(&mut self, value: T) -> Result<TimerId, T> {
        let index = match self.free.pop() {
            Some(index) => index as usize,
            None if self.slots.len() < self.capacity => {
                self.slots.push(Slot {
                    generation: 0,
                    value: None,
                });
                self.slots.len() - 1
            }
            None => return Err(value),
        };

        let slot = &mut self.slots[index];
        slot.value = Some(value);
        self.len += 1;
        Ok(TimerId::new(index as u16, slot.generation))
    }

    /// Classifica o handle sem acessar o objeto.
    ///
    /// Gerações só crescem, então uma geração maior que a atual do slot
    /// nunca foi emitida.
    pub fn check(&self, id: TimerId) -> Result<usize, SlotError> {
        let index = id.index().ok_or(SlotError::Invalid)?;
        let slot = self.slots.get(index).ok_or(SlotError::Invalid)?;
        let generation = id.generation();

        if generation > slot.generation {
            Err(SlotError::Invalid)
        } else if generation == slot.generation && slot.value.is_some() {
            Ok(index)
        } else {
            Err(SlotError::Stale)
        }
    }

    pub fn get(&self, id: TimerId) -> Result<&T, SlotError> {
        let index = self.check(id)?;
        self.slots[index].value.as_ref().ok_or(SlotError::Stale)
    }

    pub fn get_mut(&mut self, id: TimerId) -> Result<&mut T, SlotError> {
        let index = self.check(id)?;
        self.slots[index].value.as_mut().ok_or(SlotError::Stale)
    }

    /// Remove o objeto e invalida todos os handles para ele.
    pub fn remove(&mut self, id: TimerId) -> Result<T, SlotError> {
        let index = self.check(id)?;
        let slot = &mut self.slots[index];
        let value = slot.value.take().ok_or(SlotError::Stale)?;
        self.len -= 1;

        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(index as u16);
            }
            // Fica vazio com a última geração: handles dela são `Stale`
            None => self.retired += 1,
        }
        Ok(value)
    }

    /// Percorre os objetos vivos em ordem de slot.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TimerId, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.value
                .as_mut()
                .map(|value| (TimerId::new(index as u16, generation), value))
        })
    }
}
