//! The pure formatter pipeline
//!
//! Four composable functions turn a state value and/or an error into
//! display text. A logger holds one [`Formatter`] (default:
//! [`default_formatter`]) and any individual emission may override it for
//! that call only.

use super::value::{ErrorInfo, EventId, LogValue};
use std::sync::Arc;

/// A state/error pair formatter. Any such function is acceptable as a
/// logger-level or per-call formatter.
pub type Formatter = Arc<dyn Fn(Option<&LogValue>, Option<&ErrorInfo>) -> String + Send + Sync>;

/// The stock formatter wrapping [`format_default`].
pub fn default_formatter() -> Formatter {
    Arc::new(|state, error| format_default(state, error))
}

/// Render a state value.
///
/// Absent values render as empty text, `Null` as the literal `null`,
/// text as itself, structured records through generic JSON inspection and
/// custom types through their captured text conversion.
pub fn format_value(value: Option<&LogValue>) -> String {
    match value {
        None => String::new(),
        Some(LogValue::Null) => "null".to_string(),
        Some(LogValue::Text(s)) => s.clone(),
        Some(LogValue::Structured(v)) => v.to_string(),
        Some(LogValue::Error(e)) => format_error(Some(e)),
        Some(LogValue::Rendered(s)) => s.clone(),
        Some(LogValue::List(items)) => items
            .iter()
            .map(|item| format_value(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Render an error-shaped value.
///
/// Absent errors render as empty text. Otherwise the kind appears in
/// brackets, followed by the message when one is present and the stack
/// when one is present.
pub fn format_error(error: Option<&ErrorInfo>) -> String {
    let Some(error) = error else {
        return String::new();
    };

    let mut out = format!("[{}]", error.kind());
    if !error.message().is_empty() {
        out.push_str(": ");
        out.push_str(error.message());
    }
    if let Some(stack) = error.stack() {
        // A stack with no message still gets the separator, without a
        // dangling empty message.
        out.push_str(if error.message().is_empty() {
            ": Stack: "
        } else {
            " Stack: "
        });
        out.push_str(stack);
    }
    out
}

/// Render an event identifier. The default `Id(0)` means "no event" and
/// renders as empty text.
pub fn format_event(event: &EventId) -> String {
    match event {
        EventId::Id(0) => String::new(),
        EventId::Id(id) => id.to_string(),
        EventId::Named { id, name } => format!("{}/{}", id, name),
    }
}

/// Join the rendered state and error with `", "`, omitting either side if
/// it is empty.
pub fn format_default(state: Option<&LogValue>, error: Option<&ErrorInfo>) -> String {
    if state.is_none() {
        return format_error(error);
    }
    if error.is_none() {
        return format_value(state);
    }

    let state_text = format_value(state);
    let error_text = format_error(error);
    match (state_text.is_empty(), error_text.is_empty()) {
        (true, _) => error_text,
        (_, true) => state_text,
        _ => format!("{}, {}", state_text, error_text),
    }
}
