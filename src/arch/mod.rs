//! # Hardware Abstraction Layer (HAL)
//!
//! O módulo `arch` atua como a **única** ponte entre o engine de timers
//! (lógica agnóstica) e o kernel/hardware que o hospeda.
//!
//! ## 🎯 Propósito e Responsabilidade
//! - **Isolamento:** O engine (`forge_timer::core::time`) **não deve** saber em qual CPU está rodando
//!   nem como o scheduler cria threads.
//! - **Abstração:** Define a trait `Platform` (em `traits/`) que cada porte deve satisfazer:
//!   detector de contexto de interrupção, gate de inicialização do kernel e wake-up
//!   da thread de timers.
//!
//! ## 🏗️ Arquitetura e Fluxo
//! 1. O kernel hospedeiro implementa `Platform` para seu porte.
//! 2. `TimerEngine<P: Platform>` usa dispatch estático (sem `dyn` no caminho do tick).
//! 3. `sim::SimPlatform` é o porte simulado usado no host e nos testes.

pub mod sim;
pub mod traits;

pub use sim::{IsrGuard, SimPlatform};
pub use traits::*;
