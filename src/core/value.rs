//! Logged value capabilities
//!
//! This module provides:
//! - `LogValue`: the shape of a logged state value, resolved once at the
//!   call site instead of probed dynamically during formatting
//! - `ErrorInfo`: an error-shaped value with kind, message and stack
//! - `EventId`: a numeric or named event identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a value handed to a logger.
///
/// Every state value is converted into exactly one of these capabilities
/// when it enters the logging core; the formatter pipeline then dispatches
/// on the variant instead of inspecting the value's runtime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogValue {
    /// An explicitly null value (renders as the literal `null`)
    Null,
    /// Plain text, rendered as-is
    Text(String),
    /// A bare structured record, rendered through generic JSON inspection
    Structured(serde_json::Value),
    /// An error-shaped value
    Error(ErrorInfo),
    /// A custom type's own text conversion, captured at the call site
    Rendered(String),
    /// A message plus trailing arguments from a convenience call
    List(Vec<LogValue>),
}

impl LogValue {
    /// Capture any `Display` type through its own text conversion.
    pub fn display(value: impl fmt::Display) -> Self {
        LogValue::Rendered(value.to_string())
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Text(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Text(s)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => LogValue::Null,
            serde_json::Value::String(s) => LogValue::Text(s),
            other => LogValue::Structured(other),
        }
    }
}

impl From<ErrorInfo> for LogValue {
    fn from(e: ErrorInfo) -> Self {
        LogValue::Error(e)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Structured(serde_json::Value::Bool(b))
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Structured(serde_json::Value::Number(i.into()))
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::from(i as i64)
    }
}

impl From<u64> for LogValue {
    fn from(u: u64) -> Self {
        LogValue::Structured(serde_json::Value::Number(u.into()))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Structured(
            serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        )
    }
}

/// An error-shaped value: a kind label, a message and an optional stack.
///
/// For values captured from `std::error::Error`, the stack is the chain of
/// `source()` causes, innermost last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    kind: String,
    message: String,
    stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error, its message and its cause chain.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: short_type_name::<E>(),
            message: error.to_string(),
            stack: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::format::format_error(Some(self)))
    }
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let no_generics = full.split('<').next().unwrap_or(full);
    no_generics
        .rsplit("::")
        .next()
        .unwrap_or(no_generics)
        .to_string()
}

/// Identifier of a logical event attached to a log record.
///
/// `Id(0)` is the default and means "no event"; it renders as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventId {
    Id(u32),
    Named { id: u32, name: String },
}

impl EventId {
    pub fn named(id: u32, name: impl Into<String>) -> Self {
        EventId::Named {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            EventId::Id(id) => *id,
            EventId::Named { id, .. } => *id,
        }
    }

    /// True for the default `Id(0)` "no event" marker.
    pub fn is_none(&self) -> bool {
        matches!(self, EventId::Id(0))
    }
}

impl Default for EventId {
    fn default() -> Self {
        EventId::Id(0)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        EventId::Id(id)
    }
}
