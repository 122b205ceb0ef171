//! In-memory retaining sink
//!
//! Keeps emitted messages in a bounded ring instead of writing them out.
//! Labels are captured at emission time so the stored message reflects
//! the scope stack and display flags as they were; the final text is
//! rendered lazily on first access and cached.

use crate::core::logger::compose_prefix;
use crate::core::{
    format_event, Emitter, ErrorInfo, EventId, Formatter, LoggerCore, LogLevel, LogRecord, LogValue,
    Result, SourceId,
};
use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_CAPACITY: usize = 1000;

/// Iteration order for retained messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrder {
    NewestFirst,
    OldestFirst,
}

/// One retained emission with its labels frozen at capture time.
pub struct MemoryLogMessage {
    date: String,
    time: String,
    type_label: String,
    scope: String,
    level: LogLevel,
    event: EventId,
    state: Option<LogValue>,
    error: Option<ErrorInfo>,
    formatter: Formatter,
    rendered: OnceLock<String>,
}

impl MemoryLogMessage {
    fn capture(core: &LoggerCore, record: LogRecord) -> Self {
        let formatter = record
            .formatter
            .unwrap_or_else(|| core.formatter());
        Self {
            date: core.date_label(),
            time: core.time_label(),
            type_label: core.type_label(),
            scope: core.scope_label(),
            level: record.level,
            event: record.event,
            state: record.state,
            error: record.error,
            formatter,
            rendered: OnceLock::new(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn event(&self) -> &EventId {
        &self.event
    }

    pub fn state(&self) -> Option<&LogValue> {
        self.state.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Full line as an eager sink would have written it, rendered on
    /// first call and cached afterwards.
    pub fn rendered(&self) -> &str {
        self.rendered.get_or_init(|| {
            let prefix = compose_prefix(
                &self.date,
                &self.time,
                &self.type_label,
                &self.scope,
                &format_event(&self.event),
            );
            let text = (self.formatter)(self.state.as_ref(), self.error.as_ref());
            format!("{}{}", prefix, text).trim().to_string()
        })
    }

    /// Drop the cached text so the next [`MemoryLogMessage::rendered`]
    /// re-runs the formatter.
    pub fn clear_rendered(&mut self) {
        self.rendered.take();
    }
}

impl fmt::Debug for MemoryLogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryLogMessage")
            .field("level", &self.level)
            .field("event", &self.event)
            .field("state", &self.state)
            .field("error", &self.error)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Sink retaining the last `capacity` messages, oldest evicted first.
pub struct MemoryLogger {
    core: LoggerCore,
    messages: VecDeque<MemoryLogMessage>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new(source: impl Into<SourceId>) -> Self {
        Self::with_capacity(source, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(source: impl Into<SourceId>, capacity: usize) -> Self {
        Self {
            core: LoggerCore::new(source),
            messages: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shrink or grow the bound. Shrinking discards the oldest retained
    /// messages immediately.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Retained messages in the requested order.
    pub fn messages(&self, order: MessageOrder) -> Vec<&MemoryLogMessage> {
        match order {
            MessageOrder::OldestFirst => self.messages.iter().collect(),
            MessageOrder::NewestFirst => self.messages.iter().rev().collect(),
        }
    }

    /// Mutable access to retained messages, oldest first. Needed for
    /// [`MemoryLogMessage::clear_rendered`].
    pub fn messages_mut(&mut self) -> impl Iterator<Item = &mut MemoryLogMessage> {
        self.messages.iter_mut()
    }

    /// Retained messages matching `predicate`, in the requested order.
    pub fn messages_filtered(
        &self,
        order: MessageOrder,
        predicate: impl Fn(&MemoryLogMessage) -> bool,
    ) -> Vec<&MemoryLogMessage> {
        self.messages(order)
            .into_iter()
            .filter(|message| predicate(message))
            .collect()
    }
}

impl Emitter for MemoryLogger {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    /// Drives the contract manually: rendering is deferred, so there is
    /// no line to hand to `MessageEmitted` and no eager formatter run
    /// that could fail.
    fn emit(&mut self, record: LogRecord) -> Result<()> {
        self.core.publish_before(&record);
        let _after = self.core.after_guard();

        if !self.core.is_enabled(record.level) {
            return Ok(());
        }

        let level = record.level;
        let message = MemoryLogMessage::capture(&self.core, record);
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        self.core.count_emitted(level, None);
        Ok(())
    }
}
