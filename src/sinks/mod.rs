//! Concrete sinks

#[cfg(feature = "console")]
pub mod console;
pub mod memory;
pub mod null;
pub mod writer;

#[cfg(feature = "console")]
pub use console::{ConsoleConfig, ConsoleLogger, ConsoleStream};
pub use memory::{MemoryLogMessage, MemoryLogger, MessageOrder};
pub use null::NullLogger;
pub use writer::WriterLogger;
