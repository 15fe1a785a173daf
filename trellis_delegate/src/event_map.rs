// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative `"type selector"` handler tables.
//!
//! A view layer typically declares its delegated handlers as a table rather
//! than issuing registry calls one by one:
//!
//! ```text
//! click  .add     → on_add
//! click  .remove  → on_remove
//! change .title   → on_rename
//! ```
//!
//! [`EventMap`] holds such a table and binds or unbinds it against a
//! [`DelegationRegistry`](crate::registry::DelegationRegistry) as a unit, so
//! attach and detach always cover exactly the same triples.

use alloc::string::String;
use alloc::vec::Vec;

use crate::registry::DelegationRegistry;
use crate::types::{DelegationError, DelegationHost, HandlerRef};

/// One parsed `"type selector"` entry.
struct Entry<H: DelegationHost> {
    event_type: String,
    selector: String,
    handler: HandlerRef<H>,
}

/// An ordered table of delegated bindings, declared before a root exists.
///
/// Entries accumulate via [`on`](Self::on) and are applied with
/// [`bind`](Self::bind) once a registry has a root. The map keeps handler
/// references, so [`unbind`](Self::unbind) removes exactly what
/// [`bind`](Self::bind) added and nothing else sharing the same type or
/// selector.
pub struct EventMap<H: DelegationHost> {
    entries: Vec<Entry<H>>,
    context: Option<H::Node>,
}

impl<H: DelegationHost> core::fmt::Debug for EventMap<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventMap")
            .field("entries", &self.entries.len())
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

impl<H: DelegationHost> Default for EventMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DelegationHost> EventMap<H> {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            context: None,
        }
    }

    /// Invoke every handler in this table with `node` instead of the matched
    /// element. Views use this to receive their own root node.
    pub fn with_context(mut self, node: H::Node) -> Self {
        self.context = Some(node);
        self
    }

    /// Number of declared entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declare an entry from a `"type selector"` spec string.
    ///
    /// The event type is everything before the first whitespace; the selector
    /// is the remainder with surrounding whitespace trimmed. Both parts are
    /// required.
    pub fn on(
        &mut self,
        spec: &str,
        handler: HandlerRef<H>,
    ) -> Result<&mut Self, EventMapError> {
        let spec = spec.trim();
        let Some((event_type, selector)) = spec.split_once(char::is_whitespace) else {
            return Err(EventMapError::MissingSelector);
        };
        let selector = selector.trim();
        if event_type.is_empty() || selector.is_empty() {
            return Err(EventMapError::MissingSelector);
        }
        self.entries.push(Entry {
            event_type: String::from(event_type),
            selector: String::from(selector),
            handler,
        });
        Ok(self)
    }
}

impl<H: DelegationHost + 'static> EventMap<H> {
    /// Register every entry with the registry, in declaration order.
    pub fn bind(
        &self,
        registry: &mut DelegationRegistry<H>,
        host: &mut H,
    ) -> Result<(), DelegationError> {
        for entry in &self.entries {
            registry.add(
                host,
                &entry.event_type,
                &entry.selector,
                &entry.handler,
                self.context,
            )?;
        }
        Ok(())
    }

    /// Remove exactly the triples this table binds.
    ///
    /// Each entry is removed by its full `(type, selector, handler)` filter,
    /// so bindings added outside the table survive even when they share a
    /// type or selector with it.
    pub fn unbind(
        &self,
        registry: &mut DelegationRegistry<H>,
        host: &mut H,
    ) -> Result<(), DelegationError> {
        for entry in &self.entries {
            registry.remove(
                host,
                crate::types::RemoveFilter {
                    event_type: Some(&entry.event_type),
                    selector: Some(&entry.selector),
                    handler: Some(&entry.handler),
                },
            )?;
        }
        Ok(())
    }
}

/// Errors from declaring an [`EventMap`] entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventMapError {
    /// The spec string has no selector part after the event type.
    MissingSelector,
}

impl core::fmt::Display for EventMapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSelector => {
                write!(f, "event spec needs both an event type and a selector")
            }
        }
    }
}

impl core::error::Error for EventMapError {}
