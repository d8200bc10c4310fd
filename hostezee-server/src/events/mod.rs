//! Event bus module

mod bus;

pub use bus::EventBus;
