//! Independent fan-out composite
//!
//! Forwards every call verbatim to two children that keep their own
//! configuration. The composite applies no severity gate of its own;
//! each child gates the forwarded record against its own threshold.

use crate::core::{Emitter, LoggerCore, LogRecord, Result, SourceId};
use std::fmt;

pub struct FanOutLogger<A: Emitter, B: Emitter> {
    core: LoggerCore,
    first: A,
    second: B,
}

impl<A: Emitter, B: Emitter> FanOutLogger<A, B> {
    pub fn new(source: impl Into<SourceId>, first: A, second: B) -> Self {
        Self {
            core: LoggerCore::new(source),
            first,
            second,
        }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    /// Split back into the two children.
    pub fn into_children(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Emitter, B: Emitter> fmt::Debug for FanOutLogger<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutLogger")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<A: Emitter, B: Emitter> Emitter for FanOutLogger<A, B> {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    /// Forwards first-then-second. A failure in the first child
    /// propagates and the second child is skipped; there is no
    /// failure isolation between children.
    fn emit(&mut self, record: LogRecord) -> Result<()> {
        self.core.publish_before(&record);
        let _after = self.core.after_guard();

        let level = record.level;
        self.first.emit(record.clone())?;
        self.second.emit(record)?;

        // One forwarded call counts once here, regardless of how many
        // children actually wrote it.
        self.core.count_emitted(level, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmitterExt, LoggerError, LogLevel};
    use crate::sinks::{MemoryLogger, MessageOrder};

    fn quiet<E: Emitter>(mut logger: E) -> E {
        logger.core_mut().set_log_date(false);
        logger.core_mut().set_log_time(false);
        logger
    }

    #[test]
    fn test_both_children_receive_the_call() {
        let first = quiet(MemoryLogger::new("A"));
        let second = quiet(MemoryLogger::new("B"));
        let mut dual = FanOutLogger::new("Dual", first, second);

        dual.log_info("shared").unwrap();

        let (first, second) = dual.into_children();
        assert_eq!(
            first.messages(MessageOrder::OldestFirst)[0].rendered(),
            "[A]: shared"
        );
        assert_eq!(
            second.messages(MessageOrder::OldestFirst)[0].rendered(),
            "[B]: shared"
        );
    }

    #[test]
    fn test_children_gate_independently() {
        let mut first = quiet(MemoryLogger::new("A"));
        first.core_mut().set_level(LogLevel::Error);
        let second = quiet(MemoryLogger::new("B"));
        let mut dual = FanOutLogger::new("Dual", first, second);

        dual.log_info("only B").unwrap();

        assert_eq!(dual.first().len(), 0);
        assert_eq!(dual.second().len(), 1);
        // The composite counted the forwarded call once.
        assert_eq!(dual.num_messages_logged(), 1);
    }

    #[test]
    fn test_counter_is_per_call_not_per_child() {
        let first = quiet(MemoryLogger::new("A"));
        let second = quiet(MemoryLogger::new("B"));
        let mut dual = FanOutLogger::new("Dual", first, second);

        dual.log_info("one").unwrap();
        dual.log_info("two").unwrap();

        assert_eq!(dual.num_messages_logged(), 2);
        assert_eq!(dual.first().num_messages_logged(), 2);
        assert_eq!(dual.second().num_messages_logged(), 2);
    }

    #[test]
    fn test_debug_output_names_the_composite() {
        let dual = FanOutLogger::new(
            "Dual",
            quiet(MemoryLogger::new("A")),
            quiet(MemoryLogger::new("B")),
        );
        let rendered = format!("{:?}", dual);
        assert!(rendered.contains("FanOutLogger"));
        assert!(rendered.contains("Dual"));
    }

    struct FailingSink {
        core: LoggerCore,
    }

    impl Emitter for FailingSink {
        fn core(&self) -> &LoggerCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut LoggerCore {
            &mut self.core
        }

        fn emit(&mut self, record: LogRecord) -> Result<()> {
            self.core
                .emit_with(record, |_| Err(LoggerError::writer("sink down")))
        }
    }

    #[test]
    fn test_first_child_failure_skips_second() {
        let failing = FailingSink {
            core: LoggerCore::isolated("Bad"),
        };
        let second = quiet(MemoryLogger::new("B"));
        let mut dual = FanOutLogger::new("Dual", failing, second);

        assert!(dual.log_error("boom").is_err());
        assert_eq!(dual.second().len(), 0);
        assert_eq!(dual.num_messages_logged(), 0);
    }
}
