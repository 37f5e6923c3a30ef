//! Server-side services

pub mod event_bus;

pub use event_bus::{BroadcastEventBus, BusEvent, EventPublisher};
