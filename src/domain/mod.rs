// Domain layer: content records, chat turns and the ports adapters implement.

pub mod chat;
pub mod model;
pub mod ports;
