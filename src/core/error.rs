//! Error types for the logging core

use super::scope::SourceId;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// No scope stack exists for the source identity
    #[error("no scope stack is known for source '{source_id}'; the scope may belong to a different logger")]
    ScopeNotKnown { source_id: SourceId },

    /// The scope being ended is not the topmost one
    #[error("the scope is not on top of the stack for source '{source_id}', or the stack is empty")]
    ScopeNotTopOfStack { source_id: SourceId },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Create a scope-not-known error for a source identity
    pub fn scope_not_known(source_id: SourceId) -> Self {
        LoggerError::ScopeNotKnown { source_id }
    }

    /// Create a not-top-of-stack error for a source identity
    pub fn scope_not_top(source_id: SourceId) -> Self {
        LoggerError::ScopeNotTopOfStack { source_id }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("ConsoleConfig", "level routed to both streams");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::scope_not_top(SourceId::new("worker"));
        assert!(matches!(err, LoggerError::ScopeNotTopOfStack { .. }));
    }

    #[test]
    fn test_scope_errors_carry_no_error_source() {
        use std::error::Error;

        // The identity is payload, not a cause chain.
        let err = LoggerError::scope_not_top(SourceId::new("worker"));
        assert!(err.source().is_none());
        let err = LoggerError::scope_not_known(SourceId::new("worker"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::scope_not_known(SourceId::new("Importer"));
        assert_eq!(
            err.to_string(),
            "no scope stack is known for source 'Importer'; the scope may belong to a different logger"
        );

        let err = LoggerError::config("ConsoleConfig", "empty routing");
        assert_eq!(
            err.to_string(),
            "invalid configuration for ConsoleConfig: empty routing"
        );
    }
}
