//! # scoped_logger
//!
//! A structured logging library built around per-identity nested scopes,
//! a composable formatter pipeline and lifecycle hooks.
//!
//! Every logger shares one [`core::LoggerCore`]: source identity,
//! severity threshold, display flags, formatter, counter, scope registry
//! and hook bus. Concrete sinks implement the single
//! [`core::Emitter::emit`] primitive and inherit the whole convenience
//! surface from [`core::EmitterExt`].
//!
//! ## Quick start
//!
//! ```
//! use scoped_logger::prelude::*;
//!
//! fn main() -> scoped_logger::Result<()> {
//!     let mut logger = MemoryLogger::new("App");
//!     logger.core_mut().set_log_date(false);
//!     logger.core_mut().set_log_time(false);
//!
//!     logger.log_info("starting up")?;
//!     logger.with_scope("import", |logger| {
//!         logger.log_info("row 1").map(|_| ())
//!     })??;
//!
//!     let lines: Vec<_> = logger
//!         .messages(MessageOrder::OldestFirst)
//!         .iter()
//!         .map(|m| m.rendered().to_string())
//!         .collect();
//!     assert_eq!(lines, vec!["[App]: starting up", "[App] [import]: row 1"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Composition
//!
//! Two composites build bigger loggers out of smaller ones:
//! [`compose::FanOutLogger`] forwards each call to two independently
//! configured children, and [`compose::WrappingLogger`] keeps a
//! (possibly shared) secondary sink synchronized with a primary one.
//!
//! ## Scopes
//!
//! Scope stacks are keyed by source identity in a
//! [`core::ScopeRegistry`], so several logger instances declaring the
//! same identity present one coherent nesting context. Loggers built
//! with [`core::LoggerCore::isolated`] get a private registry instead.

pub mod compose;
pub mod core;
pub mod sinks;

mod macros;

pub use crate::core::{
    default_formatter, Emitter, EmitterExt, ErrorInfo, EventId, Formatter, HookBus, HookEvent,
    LoggerCore, LoggerError, LogLevel, LogRecord, LogValue, Result, ScopeGuard, ScopeMarker,
    ScopeRegistry, SourceId, SubscriptionId,
};
pub use compose::{FanOutLogger, SharedEmitter, WrappingLogger};
#[cfg(feature = "console")]
pub use sinks::{ConsoleConfig, ConsoleLogger, ConsoleStream};
pub use sinks::{MemoryLogMessage, MemoryLogger, MessageOrder, NullLogger, WriterLogger};

/// One-stop import for applications.
pub mod prelude {
    pub use crate::compose::{FanOutLogger, SharedEmitter, WrappingLogger};
    pub use crate::core::{
        Emitter, EmitterExt, ErrorInfo, EventId, HookEvent, LoggerCore, LogLevel, LogRecord,
        LogValue, SourceId,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::{ConsoleConfig, ConsoleLogger};
    pub use crate::sinks::{MemoryLogger, MessageOrder, NullLogger, WriterLogger};
}
