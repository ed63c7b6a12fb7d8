//! # API pública no formato CMSIS-RTOS2
//!
//! Camada fina sobre o `TimerEngine`: converte `Result` em códigos de
//! status, handles nulos e `0/1`, exatamente como a API documentada.

pub mod timer;

pub use timer::{
    os_timer_delete, os_timer_get_name, os_timer_is_running, os_timer_new, os_timer_start,
    os_timer_stop, TimerFunc,
};
