//! Core logger types and traits

pub mod error;
pub mod format;
pub mod hooks;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod scope;
pub mod value;

pub use error::{LoggerError, Result};
pub use format::{default_formatter, format_default, format_error, format_event, format_value, Formatter};
pub use hooks::{HookBus, HookCallback, HookEvent, SubscriptionId};
pub use log_level::LogLevel;
pub use logger::{Emitter, EmitterExt, LoggerCore};
pub use record::LogRecord;
pub use scope::{ScopeGuard, ScopeMarker, ScopeRegistry, SourceId};
pub use value::{ErrorInfo, EventId, LogValue};
