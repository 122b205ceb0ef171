//! Log record structure

use super::format::Formatter;
use super::log_level::LogLevel;
use super::value::{ErrorInfo, EventId, LogValue};
use std::fmt;

/// One emission call's arguments: severity, event identifier, optional
/// state value, optional error and an optional per-call formatter
/// override.
///
/// Records are ephemeral; the core never stores them. They are cloneable
/// so composite loggers can forward the identical call to both children
/// (a retaining sink such as the memory logger keeps its own copies).
#[derive(Clone, Default)]
pub struct LogRecord {
    pub level: LogLevel,
    pub event: EventId,
    pub state: Option<LogValue>,
    pub error: Option<ErrorInfo>,
    pub formatter: Option<Formatter>,
}

impl LogRecord {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_event(mut self, event: impl Into<EventId>) -> Self {
        self.event = event.into();
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<LogValue>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("level", &self.level)
            .field("event", &self.event)
            .field("state", &self.state)
            .field("error", &self.error)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = LogRecord::default();
        assert_eq!(record.level, LogLevel::Info);
        assert!(record.event.is_none());
        assert!(record.state.is_none());
        assert!(record.error.is_none());
        assert!(record.formatter.is_none());
    }

    #[test]
    fn test_record_builder() {
        let record = LogRecord::new(LogLevel::Warn)
            .with_event(7u32)
            .with_state("slow response")
            .with_error(ErrorInfo::new("Timeout", "2s elapsed"));

        assert_eq!(record.level, LogLevel::Warn);
        assert_eq!(record.event, EventId::Id(7));
        assert_eq!(record.state, Some(LogValue::Text("slow response".into())));
        assert_eq!(record.error.as_ref().map(|e| e.kind()), Some("Timeout"));
    }
}
