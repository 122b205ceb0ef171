//! Logger core and the emitter capability trait
//!
//! [`LoggerCore`] owns everything a concrete sink shares with every other
//! sink: the source identity, the severity threshold, the display flags,
//! the current formatter, the emitted-message counter, the scope-registry
//! handle and the hook bus. Sinks implement the single [`Emitter::emit`]
//! primitive; [`EmitterExt`] layers the level-specific convenience calls
//! and the structured scope helpers on top of any emitter.

use super::error::Result;
use super::format::{default_formatter, format_event, Formatter};
use super::hooks::{HookBus, HookEvent};
use super::log_level::LogLevel;
use super::record::LogRecord;
use super::scope::{ScopeGuard, ScopeMarker, ScopeRegistry, SourceId};
use super::value::LogValue;
use chrono::Local;
use std::future::Future;
use std::sync::Arc;

/// Shared state and behavior of every logger variant.
#[derive(Clone)]
pub struct LoggerCore {
    source: SourceId,
    level: LogLevel,
    log_date: bool,
    log_time: bool,
    log_type: bool,
    log_scope: bool,
    formatter: Formatter,
    num_messages_logged: u64,
    scopes: Arc<ScopeRegistry>,
    hooks: HookBus,
}

impl LoggerCore {
    /// Core using the process-wide scope registry: loggers with the same
    /// source identity share one scope stack.
    pub fn new(source: impl Into<SourceId>) -> Self {
        Self::with_registry(source, ScopeRegistry::global())
    }

    /// Core with a private scope registry, immune to cross-instance
    /// interleaving on the same identity.
    pub fn isolated(source: impl Into<SourceId>) -> Self {
        Self::with_registry(source, Arc::new(ScopeRegistry::new()))
    }

    pub fn with_registry(source: impl Into<SourceId>, scopes: Arc<ScopeRegistry>) -> Self {
        Self {
            source: source.into(),
            level: LogLevel::default(),
            log_date: true,
            log_time: true,
            log_type: true,
            log_scope: true,
            formatter: default_formatter(),
            num_messages_logged: 0,
            scopes,
            hooks: HookBus::new(),
        }
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<SourceId>) {
        self.source = source.into();
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn log_date(&self) -> bool {
        self.log_date
    }

    pub fn set_log_date(&mut self, value: bool) {
        self.log_date = value;
    }

    pub fn log_time(&self) -> bool {
        self.log_time
    }

    pub fn set_log_time(&mut self, value: bool) {
        self.log_time = value;
    }

    pub fn log_type(&self) -> bool {
        self.log_type
    }

    pub fn set_log_type(&mut self, value: bool) {
        self.log_type = value;
    }

    pub fn log_scope(&self) -> bool {
        self.log_scope
    }

    pub fn set_log_scope(&mut self, value: bool) {
        self.log_scope = value;
    }

    pub fn formatter(&self) -> Formatter {
        Arc::clone(&self.formatter)
    }

    pub fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = formatter;
    }

    /// Number of enabled emissions performed so far. Gated-out calls do
    /// not count.
    pub fn num_messages_logged(&self) -> u64 {
        self.num_messages_logged
    }

    pub fn registry(&self) -> &Arc<ScopeRegistry> {
        &self.scopes
    }

    pub fn set_registry(&mut self, scopes: Arc<ScopeRegistry>) {
        self.scopes = scopes;
    }

    pub fn hooks(&self) -> &HookBus {
        &self.hooks
    }

    /// `level >= threshold`, the severity gate.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Copy identity, threshold, display flags, formatter and the scope
    /// registry handle from `other`. Hooks and counter stay untouched.
    /// This is the wrapping logger's mirror step.
    pub fn copy_settings_from(&mut self, other: &LoggerCore) {
        self.source = other.source.clone();
        self.level = other.level;
        self.log_date = other.log_date;
        self.log_time = other.log_time;
        self.log_type = other.log_type;
        self.log_scope = other.log_scope;
        self.formatter = Arc::clone(&other.formatter);
        self.scopes = Arc::clone(&other.scopes);
    }

    /// Current date in `YYYY-MM-DD`, or empty when the flag is off.
    pub fn date_label(&self) -> String {
        if self.log_date {
            Local::now().format("%Y-%m-%d").to_string()
        } else {
            String::new()
        }
    }

    /// Current time in `HH:MM:SS`, or empty when the flag is off.
    pub fn time_label(&self) -> String {
        if self.log_time {
            Local::now().format("%H:%M:%S").to_string()
        } else {
            String::new()
        }
    }

    /// Bracketed source identity, or empty when the flag is off.
    pub fn type_label(&self) -> String {
        if self.log_type {
            format!("[{}]", self.source)
        } else {
            String::new()
        }
    }

    /// Rendered scope stack for this identity, or empty when the flag is
    /// off or no scope is open.
    pub fn scope_label(&self) -> String {
        if self.log_scope {
            self.scopes.scope_label(&self.source)
        } else {
            String::new()
        }
    }

    /// Label prefix for an emission, per the display flags.
    pub fn prefix(&self, event: &super::value::EventId) -> String {
        compose_prefix(
            &self.date_label(),
            &self.time_label(),
            &self.type_label(),
            &self.scope_label(),
            &format_event(event),
        )
    }

    /// Push a scope for this logger's identity and publish `ScopeBegin`.
    pub fn begin_scope(&self, value: impl Into<LogValue>) -> ScopeMarker {
        let marker = self.scopes.begin_scope(&self.source, Some(value.into()));
        self.hooks.publish(HookEvent::ScopeBegin {
            source: self.source.clone(),
            value: marker.value().cloned(),
        });
        marker
    }

    /// Pop the topmost scope named by `marker` and publish `ScopeEnd`.
    /// Fails without mutating the stack when the marker is unknown or not
    /// topmost; the marker stays usable after a failed call.
    pub fn end_scope(&self, marker: &ScopeMarker) -> Result<()> {
        self.scopes.end_scope(marker)?;
        self.hooks.publish(HookEvent::ScopeEnd {
            source: self.source.clone(),
            value: marker.value().cloned(),
        });
        Ok(())
    }

    /// Begin a scope that ends when the returned guard is dropped.
    pub fn scope(&self, value: impl Into<LogValue>) -> ScopeGuard {
        let marker = self.begin_scope(value);
        ScopeGuard::new(Arc::clone(&self.scopes), self.hooks.clone(), marker)
    }

    /// Shared emission driver for sinks that render text eagerly.
    ///
    /// Runs the whole emission contract: `BeforeEmit`, gate check, prefix
    /// and text resolution, the sink side effect, counter increment,
    /// `MessageEmitted`, and - unconditionally, via a drop guard -
    /// `AfterEmit`. Gated-out calls return `Ok(())` without side effects.
    pub fn emit_with<F>(&mut self, record: LogRecord, side_effect: F) -> Result<()>
    where
        F: FnOnce(&str) -> Result<()>,
    {
        self.publish_before(&record);
        let _after = self.after_guard();

        if !self.is_enabled(record.level) {
            return Ok(());
        }

        let prefix = self.prefix(&record.event);
        let formatter = record
            .formatter
            .clone()
            .unwrap_or_else(|| Arc::clone(&self.formatter));
        let text = formatter(record.state.as_ref(), record.error.as_ref());
        let line = format!("{}{}", prefix, text);
        let line = line.trim();

        side_effect(line)?;
        self.count_emitted(record.level, Some(line.to_string()));
        Ok(())
    }

    /// Publish `BeforeEmit` with the call's raw arguments. Sinks that
    /// defer formatting drive the contract manually with this,
    /// [`LoggerCore::after_guard`] and [`LoggerCore::count_emitted`].
    pub fn publish_before(&self, record: &LogRecord) {
        self.hooks
            .publish(HookEvent::before(self.source.clone(), record));
    }

    /// Guard publishing `AfterEmit` when dropped, on every exit path.
    pub fn after_guard(&self) -> AfterEmitGuard {
        AfterEmitGuard {
            hooks: self.hooks.clone(),
            source: self.source.clone(),
        }
    }

    /// Count one enabled emission and publish `MessageEmitted`.
    pub fn count_emitted(&mut self, level: LogLevel, text: Option<String>) {
        self.num_messages_logged += 1;
        self.hooks.publish(HookEvent::MessageEmitted {
            source: self.source.clone(),
            level,
            text,
        });
    }
}

impl std::fmt::Debug for LoggerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerCore")
            .field("source", &self.source)
            .field("level", &self.level)
            .field("log_date", &self.log_date)
            .field("log_time", &self.log_time)
            .field("log_type", &self.log_type)
            .field("log_scope", &self.log_scope)
            .field("num_messages_logged", &self.num_messages_logged)
            .finish_non_exhaustive()
    }
}

/// Compose the label prefix: date, time, type, scope and event segments
/// in that fixed order, empty segments omitted, single spaces between the
/// rest, terminated by `": "` only when any segment is present.
pub(crate) fn compose_prefix(
    date: &str,
    time: &str,
    type_label: &str,
    scope: &str,
    event: &str,
) -> String {
    let event_label = if event.is_empty() {
        String::new()
    } else {
        format!("[E:{}]", event)
    };

    let joined = [date, time, type_label, scope, event_label.as_str()]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        joined
    } else {
        format!("{}: ", joined)
    }
}

/// Publishes `AfterEmit` on drop so the after-hook fires even when the
/// formatter or the sink side effect fails.
pub struct AfterEmitGuard {
    hooks: HookBus,
    source: SourceId,
}

impl Drop for AfterEmitGuard {
    fn drop(&mut self) {
        self.hooks.publish(HookEvent::AfterEmit {
            source: self.source.clone(),
        });
    }
}

/// The emitter capability: configuration access plus the single abstract
/// emission primitive every concrete sink implements.
pub trait Emitter: Send {
    fn core(&self) -> &LoggerCore;

    fn core_mut(&mut self) -> &mut LoggerCore;

    /// The emission primitive. Must follow the contract documented on
    /// [`LoggerCore::emit_with`]; never fails for gated-out records.
    fn emit(&mut self, record: LogRecord) -> Result<()>;
}

/// Convenience surface derived from the [`Emitter`] primitive.
#[allow(async_fn_in_trait)]
pub trait EmitterExt: Emitter {
    fn is_enabled(&self, level: LogLevel) -> bool {
        self.core().is_enabled(level)
    }

    fn num_messages_logged(&self) -> u64 {
        self.core().num_messages_logged()
    }

    /// Log `message` at `level`, with event id 0.
    fn log_at(&mut self, level: LogLevel, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.emit(LogRecord::new(level).with_state(message))?;
        Ok(self)
    }

    /// Log `message` plus trailing arguments at `level`. When exactly one
    /// trailing argument is error-shaped it becomes the record's error;
    /// otherwise message and arguments fold into a list state.
    fn log_at_with(
        &mut self,
        level: LogLevel,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        let message = message.into();
        let record = if args.len() == 1 && matches!(args[0], LogValue::Error(_)) {
            let Some(LogValue::Error(error)) = args.into_iter().next() else {
                unreachable!("single error-shaped argument checked above")
            };
            LogRecord::new(level)
                .with_state(message)
                .with_error(error)
        } else if args.is_empty() {
            LogRecord::new(level).with_state(message)
        } else {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(message);
            items.extend(args);
            LogRecord::new(level).with_state(LogValue::List(items))
        };
        self.emit(record)?;
        Ok(self)
    }

    fn log_trace(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Trace, message)
    }

    fn log_debug(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Debug, message)
    }

    fn log_info(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Info, message)
    }

    fn log_warning(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Warn, message)
    }

    fn log_error(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Error, message)
    }

    fn log_critical(&mut self, message: impl Into<LogValue>) -> Result<&mut Self> {
        self.log_at(LogLevel::Critical, message)
    }

    fn log_trace_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Trace, message, args)
    }

    fn log_debug_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Debug, message, args)
    }

    fn log_info_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Info, message, args)
    }

    fn log_warning_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Warn, message, args)
    }

    fn log_error_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Error, message, args)
    }

    fn log_critical_with(
        &mut self,
        message: impl Into<LogValue>,
        args: Vec<LogValue>,
    ) -> Result<&mut Self> {
        self.log_at_with(LogLevel::Critical, message, args)
    }

    /// Push a scope; the caller must pass the marker back to `end_scope`.
    fn begin_scope(&mut self, value: impl Into<LogValue>) -> ScopeMarker {
        self.core().begin_scope(value)
    }

    fn end_scope(&mut self, marker: &ScopeMarker) -> Result<()> {
        self.core().end_scope(marker)
    }

    /// Push a scope that ends when the returned guard drops.
    fn scope(&mut self, value: impl Into<LogValue>) -> ScopeGuard {
        self.core().scope(value)
    }

    /// Run `body` inside a scope, guaranteeing the scope ends on every
    /// exit path of `body`, including panics.
    fn with_scope<R>(
        &mut self,
        value: impl Into<LogValue>,
        body: impl FnOnce(&mut Self) -> R,
    ) -> Result<R> {
        let guard = self.core().scope(value);
        let out = body(self);
        guard.end()?;
        Ok(out)
    }

    /// Await `fut` inside a scope. The guard ends the scope even when the
    /// future panics or is cancelled mid-suspension.
    async fn with_scope_async<R>(
        &mut self,
        value: impl Into<LogValue>,
        fut: impl Future<Output = R>,
    ) -> Result<R> {
        let guard = self.core().scope(value);
        let out = fut.await;
        guard.end()?;
        Ok(out)
    }
}

impl<E: Emitter + ?Sized> EmitterExt for E {}
