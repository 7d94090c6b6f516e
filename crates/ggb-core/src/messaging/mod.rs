//! Outbound reply schema and the emitter port.

pub mod port;
pub mod types;
