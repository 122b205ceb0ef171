//! Lifecycle hook bus
//!
//! A typed publish/subscribe channel carrying a tagged event enum instead
//! of name-keyed dispatch. Every emission publishes `BeforeEmit`, then
//! (when enabled and successful) `MessageEmitted`, then `AfterEmit` -
//! the last one unconditionally, even when the formatter or the sink
//! fails. Scope transitions publish `ScopeBegin` / `ScopeEnd`.

use super::log_level::LogLevel;
use super::record::LogRecord;
use super::scope::SourceId;
use super::value::{ErrorInfo, EventId, LogValue};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A lifecycle notification, tagged by kind.
#[derive(Debug, Clone)]
pub enum HookEvent {
    /// Published first on every emission, enabled or not, with the call's
    /// raw arguments.
    BeforeEmit {
        source: SourceId,
        level: LogLevel,
        event: EventId,
        state: Option<LogValue>,
        error: Option<ErrorInfo>,
    },
    /// Published once per enabled, successful emission. `text` carries the
    /// final rendered line for textual sinks and is absent for sinks that
    /// do not render (fan-out, wrapping).
    MessageEmitted {
        source: SourceId,
        level: LogLevel,
        text: Option<String>,
    },
    /// Published last on every emission, on every exit path.
    AfterEmit { source: SourceId },
    /// A scope was pushed for `source`.
    ScopeBegin {
        source: SourceId,
        value: Option<LogValue>,
    },
    /// A scope was popped for `source`.
    ScopeEnd {
        source: SourceId,
        value: Option<LogValue>,
    },
}

impl HookEvent {
    pub(crate) fn before(source: SourceId, record: &LogRecord) -> Self {
        HookEvent::BeforeEmit {
            source,
            level: record.level,
            event: record.event.clone(),
            state: record.state.clone(),
            error: record.error.clone(),
        }
    }

    pub fn source(&self) -> &SourceId {
        match self {
            HookEvent::BeforeEmit { source, .. }
            | HookEvent::MessageEmitted { source, .. }
            | HookEvent::AfterEmit { source }
            | HookEvent::ScopeBegin { source, .. }
            | HookEvent::ScopeEnd { source, .. } => source,
        }
    }

    /// Short tag for the event kind, handy for test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            HookEvent::BeforeEmit { .. } => "before_emit",
            HookEvent::MessageEmitted { .. } => "message_emitted",
            HookEvent::AfterEmit { .. } => "after_emit",
            HookEvent::ScopeBegin { .. } => "scope_begin",
            HookEvent::ScopeEnd { .. } => "scope_end",
        }
    }
}

/// Subscriber callback. Observers must not emit on the same logger from
/// within a callback.
pub type HookCallback = Arc<dyn Fn(&HookEvent) + Send + Sync>;

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

/// Publish/subscribe channel for [`HookEvent`]s.
///
/// Cloning produces another handle to the same subscriber list, so a
/// logger and its emission guards observe one bus.
#[derive(Clone, Default)]
pub struct HookBus {
    subscribers: Arc<RwLock<Vec<(usize, HookCallback)>>>,
    next_id: Arc<std::sync::atomic::AtomicUsize>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: HookCallback) -> SubscriptionId {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.subscribers.write().push((id, callback));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().retain(|(sid, _)| *sid != id.0);
    }

    pub fn publish(&self, event: HookEvent) {
        let subscribers = self.subscribers.read();
        for (_, callback) in subscribers.iter() {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl fmt::Debug for HookBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recording_bus() -> (HookBus, Arc<Mutex<Vec<&'static str>>>) {
        let bus = HookBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(Arc::new(move |event| sink.lock().push(event.kind())));
        (bus, seen)
    }

    #[test]
    fn test_publish_reaches_subscribers_in_order() {
        let (bus, seen) = recording_bus();
        let src = SourceId::new("T");

        bus.publish(HookEvent::ScopeBegin {
            source: src.clone(),
            value: None,
        });
        bus.publish(HookEvent::ScopeEnd {
            source: src,
            value: None,
        });

        assert_eq!(*seen.lock(), vec!["scope_begin", "scope_end"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = HookBus::new();
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let id = bus.subscribe(Arc::new(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }));

        let event = HookEvent::AfterEmit {
            source: SourceId::new("T"),
        };
        bus.publish(event.clone());
        bus.unsubscribe(id);
        bus.publish(event);

        assert_eq!(count.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[test]
    fn test_cloned_bus_shares_subscribers() {
        let (bus, seen) = recording_bus();
        let clone = bus.clone();
        clone.publish(HookEvent::AfterEmit {
            source: SourceId::new("T"),
        });
        assert_eq!(*seen.lock(), vec!["after_emit"]);
    }
}
