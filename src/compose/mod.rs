//! Composite loggers built from other emitters

pub mod fan_out;
pub mod wrapping;

pub use fan_out::FanOutLogger;
pub use wrapping::{SharedEmitter, WrappingLogger};
