//! Null sink
//!
//! Discards every message while still honoring the emission contract:
//! gate check, counter, and all hook notifications. Useful as a
//! placeholder sink and in tests.

use crate::core::{Emitter, LoggerCore, LogRecord, Result, SourceId};

pub struct NullLogger {
    core: LoggerCore,
}

impl NullLogger {
    pub fn new(source: impl Into<SourceId>) -> Self {
        Self {
            core: LoggerCore::new(source),
        }
    }
}

impl Emitter for NullLogger {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn emit(&mut self, record: LogRecord) -> Result<()> {
        self.core.emit_with(record, |_| Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmitterExt, HookEvent, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_counts_enabled_only() {
        let mut logger = NullLogger::new("Void");
        logger.log_info("counted").unwrap();
        logger.log_debug("gated").unwrap();
        logger.log_critical("counted").unwrap();

        assert_eq!(logger.num_messages_logged(), 2);
    }

    #[test]
    fn test_hook_contract_still_fires() {
        let mut logger = NullLogger::new("Void");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger
            .core()
            .hooks()
            .subscribe(Arc::new(move |event: &HookEvent| {
                sink.lock().push(event.kind())
            }));

        logger.log_at(LogLevel::Error, "discarded").unwrap();
        assert_eq!(
            *seen.lock(),
            vec!["before_emit", "message_emitted", "after_emit"]
        );
    }
}
