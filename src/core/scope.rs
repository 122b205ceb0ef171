//! Scope stacks keyed by logical source identity
//!
//! This module provides:
//! - `SourceId`: the logical source identity of a logger
//! - `ScopeRegistry`: an explicit identity -> stack registry
//! - `ScopeMarker`: the handle returned by `begin_scope`
//! - `ScopeGuard`: scoped acquisition with guaranteed release
//!
//! Stacks are keyed by *identity*, not by logger instance: multiple logger
//! instances declaring the same identity share one stack, which lets
//! composed loggers present one coherent nesting context. The flip side is
//! that concurrent users of one identity must open and close scopes in
//! LIFO order across all of them, or `end_scope` fails with
//! `ScopeNotTopOfStack`. Callers who want immunity construct their logger
//! with a private registry (`LoggerCore::isolated`).

use super::error::{LoggerError, Result};
use super::format::format_value;
use super::value::LogValue;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Logical source identity of a logger.
///
/// Loggers are type-specific in concept; the identity is the textual name
/// of that type (or any context-identifying string). Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(Arc<str>);

impl SourceId {
    pub fn new(name: impl AsRef<str>) -> Self {
        SourceId(Arc::from(name.as_ref()))
    }

    /// Identity derived from a Rust type name (last path segment).
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let no_generics = full.split('<').next().unwrap_or(full);
        SourceId::new(no_generics.rsplit("::").next().unwrap_or(no_generics))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceId {
    fn from(name: &str) -> Self {
        SourceId::new(name)
    }
}

impl From<String> for SourceId {
    fn from(name: String) -> Self {
        SourceId::new(name)
    }
}

/// Marker for one open scope.
///
/// Holds the identity it was opened under, a unique serial (markers
/// compare by reference identity, never by value equality) and the caller
/// value. Created by `begin_scope`, passed by reference to `end_scope`,
/// so a failed end leaves it usable; deliberately not `Clone`.
#[derive(Debug)]
pub struct ScopeMarker {
    source: SourceId,
    serial: u64,
    value: Option<LogValue>,
}

impl ScopeMarker {
    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn value(&self) -> Option<&LogValue> {
        self.value.as_ref()
    }
}

#[derive(Debug, Clone)]
struct ScopeEntry {
    serial: u64,
    value: Option<LogValue>,
}

/// Registry of scope stacks, keyed by source identity.
///
/// One process-wide instance exists (`ScopeRegistry::global`); loggers may
/// instead own a private instance to opt out of cross-instance sharing.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    stacks: Mutex<HashMap<SourceId, Vec<ScopeEntry>>>,
    next_serial: AtomicU64,
}

static GLOBAL_REGISTRY: OnceLock<Arc<ScopeRegistry>> = OnceLock::new();

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry shared by default-constructed loggers.
    pub fn global() -> Arc<ScopeRegistry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(ScopeRegistry::new())))
    }

    /// Push a new scope for `source`, lazily creating its stack.
    pub fn begin_scope(&self, source: &SourceId, value: Option<LogValue>) -> ScopeMarker {
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        let mut stacks = self.stacks.lock();
        stacks
            .entry(source.clone())
            .or_default()
            .push(ScopeEntry {
                serial,
                value: value.clone(),
            });

        ScopeMarker {
            source: source.clone(),
            serial,
            value,
        }
    }

    /// Pop the scope named by `marker`.
    ///
    /// Fails with `ScopeNotKnown` when no stack exists for the marker's
    /// identity and with `ScopeNotTopOfStack` when the stack is empty or
    /// the marker is not the topmost entry. On failure the stack is left
    /// untouched.
    pub fn end_scope(&self, marker: &ScopeMarker) -> Result<()> {
        let mut stacks = self.stacks.lock();
        let stack = stacks
            .get_mut(&marker.source)
            .ok_or_else(|| LoggerError::scope_not_known(marker.source.clone()))?;

        match stack.last() {
            Some(top) if top.serial == marker.serial => {
                stack.pop();
                Ok(())
            }
            _ => Err(LoggerError::scope_not_top(marker.source.clone())),
        }
    }

    /// Number of open scopes for `source`.
    pub fn depth(&self, source: &SourceId) -> usize {
        self.stacks
            .lock()
            .get(source)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Render the stack for `source`, outermost first, as `[a, b]`.
    /// Empty text when no stack exists or the stack is empty.
    pub fn scope_label(&self, source: &SourceId) -> String {
        let stacks = self.stacks.lock();
        match stacks.get(source) {
            Some(stack) if !stack.is_empty() => {
                let parts = stack
                    .iter()
                    .map(|entry| format_value(entry.value.as_ref()))
                    .collect::<Vec<_>>();
                format!("[{}]", parts.join(", "))
            }
            _ => String::new(),
        }
    }
}

/// Ends its scope when dropped, on every exit path including panics and
/// cancellation. Use `end()` to surface scope-discipline errors instead of
/// swallowing them.
#[must_use = "dropping the guard ends the scope immediately"]
pub struct ScopeGuard {
    registry: Arc<ScopeRegistry>,
    hooks: super::hooks::HookBus,
    marker: Option<ScopeMarker>,
}

impl ScopeGuard {
    pub(crate) fn new(
        registry: Arc<ScopeRegistry>,
        hooks: super::hooks::HookBus,
        marker: ScopeMarker,
    ) -> Self {
        Self {
            registry,
            hooks,
            marker: Some(marker),
        }
    }

    pub fn marker(&self) -> &ScopeMarker {
        self.marker
            .as_ref()
            .expect("marker present until end() or drop")
    }

    /// End the scope now, surfacing any scope-discipline failure.
    pub fn end(mut self) -> Result<()> {
        let marker = self
            .marker
            .take()
            .expect("marker present until end() or drop");
        self.finish(&marker)
    }

    fn finish(&self, marker: &ScopeMarker) -> Result<()> {
        self.registry.end_scope(marker)?;
        self.hooks.publish(super::hooks::HookEvent::ScopeEnd {
            source: marker.source.clone(),
            value: marker.value.clone(),
        });
        Ok(())
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if let Some(marker) = self.marker.take() {
            // Errors cannot surface from drop; end() is the fallible path.
            let _ = self.finish(&marker);
        }
    }
}
