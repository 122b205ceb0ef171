//! Synchronized wrapping composite
//!
//! Pairs a primary sink with a (possibly shared) secondary sink and
//! keeps both children's settings mirroring the wrapper's own: once at
//! construction (seeded from the primary), on every write-through
//! setter, and again right before each emission, so a secondary shared
//! by several wrappers always reflects the wrapper currently emitting.
//! Mutations applied directly to a wrapped logger do not survive the
//! next emission. Both children end up with the same identity and scope
//! registry, so their lines carry identical labels.

use crate::core::{Emitter, Formatter, LoggerCore, LogLevel, LogRecord, Result};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;

/// Handle to a secondary sink that several wrappers may share. The last
/// wrapper to emit wins the settings race.
pub struct SharedEmitter<E: Emitter> {
    inner: Arc<Mutex<E>>,
}

impl<E: Emitter> SharedEmitter<E> {
    pub fn new(emitter: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(emitter)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, E> {
        self.inner.lock()
    }

    /// Recover the sink when this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<E, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<E: Emitter> Clone for SharedEmitter<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Emitter> fmt::Debug for SharedEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEmitter").finish_non_exhaustive()
    }
}

pub struct WrappingLogger<A: Emitter, B: Emitter> {
    core: LoggerCore,
    primary: A,
    secondary: SharedEmitter<B>,
}

impl<A: Emitter, B: Emitter> WrappingLogger<A, B> {
    /// Wrap `primary`, stamping its settings onto the wrapper and onto
    /// `secondary` immediately.
    pub fn new(primary: A, secondary: SharedEmitter<B>) -> Self {
        let mut core = LoggerCore::new(primary.core().source().clone());
        core.copy_settings_from(primary.core());
        secondary.lock().core_mut().copy_settings_from(primary.core());
        Self {
            core,
            primary,
            secondary,
        }
    }

    pub fn primary(&self) -> &A {
        &self.primary
    }

    /// Direct mutations bypass the write-through setters and are
    /// overwritten by the wrapper's own settings at the next emission.
    pub fn primary_mut(&mut self) -> &mut A {
        &mut self.primary
    }

    pub fn secondary(&self) -> SharedEmitter<B> {
        self.secondary.clone()
    }

    pub fn into_parts(self) -> (A, SharedEmitter<B>) {
        (self.primary, self.secondary)
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.core.set_level(level);
        self.primary.core_mut().set_level(level);
        self.secondary.lock().core_mut().set_level(level);
    }

    pub fn set_log_date(&mut self, value: bool) {
        self.core.set_log_date(value);
        self.primary.core_mut().set_log_date(value);
        self.secondary.lock().core_mut().set_log_date(value);
    }

    pub fn set_log_time(&mut self, value: bool) {
        self.core.set_log_time(value);
        self.primary.core_mut().set_log_time(value);
        self.secondary.lock().core_mut().set_log_time(value);
    }

    pub fn set_log_type(&mut self, value: bool) {
        self.core.set_log_type(value);
        self.primary.core_mut().set_log_type(value);
        self.secondary.lock().core_mut().set_log_type(value);
    }

    pub fn set_log_scope(&mut self, value: bool) {
        self.core.set_log_scope(value);
        self.primary.core_mut().set_log_scope(value);
        self.secondary.lock().core_mut().set_log_scope(value);
    }

    pub fn set_formatter(&mut self, formatter: Formatter) {
        self.core.set_formatter(Arc::clone(&formatter));
        self.primary
            .core_mut()
            .set_formatter(Arc::clone(&formatter));
        self.secondary.lock().core_mut().set_formatter(formatter);
    }
}

impl<A: Emitter, B: Emitter> fmt::Debug for WrappingLogger<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappingLogger")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<A: Emitter, B: Emitter> Emitter for WrappingLogger<A, B> {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn emit(&mut self, record: LogRecord) -> Result<()> {
        // Re-stamp the wrapper's own settings (and scope registry) onto
        // both children; direct mutations of the wrapped loggers do not
        // survive an emission.
        self.primary.core_mut().copy_settings_from(&self.core);
        self.secondary
            .lock()
            .core_mut()
            .copy_settings_from(&self.core);

        self.core.publish_before(&record);
        let _after = self.core.after_guard();

        let level = record.level;
        self.primary.emit(record.clone())?;
        self.secondary.lock().emit(record)?;
        self.core.count_emitted(level, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmitterExt, LogValue};
    use crate::sinks::{MemoryLogger, MessageOrder};

    fn quiet_memory(source: &str) -> MemoryLogger {
        let mut logger = MemoryLogger::new(source);
        logger.core_mut().set_log_date(false);
        logger.core_mut().set_log_time(false);
        logger
    }

    #[test]
    fn test_construction_mirrors_primary_onto_secondary() {
        let mut primary = quiet_memory("Main");
        primary.core_mut().set_level(LogLevel::Warn);
        let mut secondary = quiet_memory("Side");
        secondary.core_mut().set_level(LogLevel::Trace);

        let wrapped = WrappingLogger::new(primary, SharedEmitter::new(secondary));

        let secondary = wrapped.secondary();
        let secondary = secondary.lock();
        assert_eq!(secondary.core().level(), LogLevel::Warn);
        assert_eq!(secondary.core().source().as_str(), "Main");
    }

    #[test]
    fn test_write_through_setter_reaches_all_three() {
        let primary = quiet_memory("Main");
        let secondary = SharedEmitter::new(quiet_memory("Side"));
        let mut wrapped = WrappingLogger::new(primary, secondary);

        wrapped.set_level(LogLevel::Error);

        assert_eq!(wrapped.core().level(), LogLevel::Error);
        assert_eq!(wrapped.primary().core().level(), LogLevel::Error);
        assert_eq!(wrapped.secondary().lock().core().level(), LogLevel::Error);
    }

    #[test]
    fn test_wrapper_settings_override_direct_child_mutation() {
        let primary = quiet_memory("Main");
        let secondary = SharedEmitter::new(quiet_memory("Side"));
        let mut wrapped = WrappingLogger::new(primary, secondary);

        // Raise the primary's threshold behind the wrapper's back; the
        // wrapper re-stamps its own (Info) onto both children, so the
        // record is not gated anywhere.
        wrapped.primary_mut().core_mut().set_level(LogLevel::Critical);
        wrapped.log_error("kept by both").unwrap();

        assert_eq!(wrapped.primary().len(), 1);
        assert_eq!(wrapped.secondary().lock().len(), 1);
        assert_eq!(wrapped.primary().core().level(), LogLevel::Info);
        assert_eq!(wrapped.secondary().lock().core().level(), LogLevel::Info);
    }

    #[test]
    fn test_both_lines_carry_the_primary_identity() {
        let primary = quiet_memory("Main");
        let secondary = SharedEmitter::new(quiet_memory("Side"));
        let mut wrapped = WrappingLogger::new(primary, secondary);

        wrapped.log_info("hello").unwrap();

        let (primary, secondary) = wrapped.into_parts();
        assert_eq!(
            primary.messages(MessageOrder::OldestFirst)[0].rendered(),
            "[Main]: hello"
        );
        assert_eq!(
            secondary.lock().messages(MessageOrder::OldestFirst)[0].rendered(),
            "[Main]: hello"
        );
    }

    #[test]
    fn test_shared_secondary_last_writer_wins() {
        let secondary = SharedEmitter::new(quiet_memory("Side"));

        let mut first_primary = quiet_memory("First");
        first_primary.core_mut().set_level(LogLevel::Warn);
        let mut first = WrappingLogger::new(first_primary, secondary.clone());

        let second_primary = quiet_memory("Second");
        let mut second = WrappingLogger::new(second_primary, secondary.clone());

        first.log_warning("from first").unwrap();
        assert_eq!(secondary.lock().core().source().as_str(), "First");

        second.log_info("from second").unwrap();
        assert_eq!(secondary.lock().core().source().as_str(), "Second");
        assert_eq!(secondary.lock().core().level(), LogLevel::Info);
        assert_eq!(secondary.lock().len(), 2);
    }

    #[test]
    fn test_debug_output_names_the_composite() {
        let wrapped = WrappingLogger::new(
            quiet_memory("Main"),
            SharedEmitter::new(quiet_memory("Side")),
        );
        let rendered = format!("{:?}", wrapped);
        assert!(rendered.contains("WrappingLogger"));
        assert!(rendered.contains("Main"));
    }

    #[test]
    fn test_formatter_writes_through() {
        let primary = quiet_memory("Main");
        let secondary = SharedEmitter::new(quiet_memory("Side"));
        let mut wrapped = WrappingLogger::new(primary, secondary);

        wrapped.set_formatter(Arc::new(|state: Option<&LogValue>, _| {
            format!("<<{}>>", crate::core::format_value(state))
        }));
        wrapped.log_info("wrapped").unwrap();

        assert_eq!(
            wrapped.primary().messages(MessageOrder::OldestFirst)[0].rendered(),
            "[Main]: <<wrapped>>"
        );
        assert_eq!(
            wrapped.secondary().lock().messages(MessageOrder::OldestFirst)[0].rendered(),
            "[Main]: <<wrapped>>"
        );
    }
}
