// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The delegation registry.
//!
//! ## Overview
//!
//! One registry owns one root node at a time and a table of bindings. Each
//! [`add`](DelegationRegistry::add) synthesizes a dispatcher and attaches it
//! to the root as its own capture-phase listener; each native delivery walks
//! from the event's original target up toward the root, re-matching the
//! selector against the live tree, and invokes the original handler on the
//! nearest matching ancestor.
//!
//! ## Why capture phase
//!
//! Listening in the capture phase at the root observes the event before any
//! bubble-phase handler on an intermediate node can stop propagation, so
//! delegated handlers cannot be starved by descendants.
//!
//! ## Boundary
//!
//! The walk is inclusive of the original target and exclusive of the root:
//! the root is only tested when it is itself the target. This boundary is a
//! documented, tested invariant.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{
    DelegationError, DelegationHost, Dispatcher, HandlerId, HandlerRef, HandlerScope, Matcher,
    RemoveFilter,
};

/// One registered association of an event type, a selector, and a handler.
struct Binding<H: DelegationHost> {
    event_type: String,
    selector: String,
    dispatcher: Dispatcher<H>,
}

/// Bindings created from one handler identity, in registration order.
///
/// Order is irrelevant for dispatch but keeps removal deterministic. A group
/// is dropped when its last binding goes; a later `add` with the same handler
/// starts a fresh group under the same identity.
struct HandlerGroup<H: DelegationHost> {
    id: HandlerId,
    bindings: Vec<Binding<H>>,
}

/// Routes native events at a root node to selector-matched descendants.
///
/// ## Usage
///
/// - Bind a root with [`set_root`](Self::set_root); the selector-match
///   capability is resolved once, up front, and re-resolved whenever the root
///   changes.
/// - Register bindings with [`add`](Self::add) as a view's event table is
///   processed. Identical repeated registrations are kept and all fire.
/// - Tear down selectively with [`remove`](Self::remove), or entirely with
///   [`remove_all`](Self::remove_all) when a view detaches.
///
/// The registry never owns the host tree; it is passed in per call, and the
/// only host state touched is the root's listener list.
pub struct DelegationRegistry<H: DelegationHost> {
    root: Option<H::Node>,
    matcher: Option<Matcher<H>>,
    groups: Vec<HandlerGroup<H>>,
    scope: HandlerScope,
}

impl<H: DelegationHost> core::fmt::Debug for DelegationRegistry<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelegationRegistry")
            .field("has_root", &self.root.is_some())
            .field("groups", &self.groups.len())
            .field("bindings", &self.binding_count())
            .finish_non_exhaustive()
    }
}

impl<H: DelegationHost> Default for DelegationRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: DelegationHost> DelegationRegistry<H> {
    /// Registry with a private [`HandlerScope`].
    pub fn new() -> Self {
        Self::with_scope(HandlerScope::new())
    }

    /// Registry sharing a [`HandlerScope`] with others, so handler identities
    /// stay unique across registries that see the same handlers.
    pub fn with_scope(scope: HandlerScope) -> Self {
        Self {
            root: None,
            matcher: None,
            groups: Vec::new(),
            scope,
        }
    }

    /// The currently bound root, if any.
    pub fn root(&self) -> Option<H::Node> {
        self.root
    }

    /// Total number of live bindings.
    pub fn binding_count(&self) -> usize {
        self.groups.iter().map(|g| g.bindings.len()).sum()
    }

    /// Detach every binding from the current root, if one is bound.
    fn teardown(&mut self, host: &mut H) {
        let Some(root) = self.root else {
            return;
        };
        for group in self.groups.drain(..) {
            for binding in group.bindings {
                host.detach_capture(root, &binding.event_type, &binding.dispatcher);
            }
        }
    }
}

impl<H: DelegationHost + 'static> DelegationRegistry<H> {
    /// Bind (or re-bind) the root node.
    ///
    /// Any bindings against a prior root are detached first, so no listener
    /// can leak; nothing is re-bound automatically — callers re-[`add`](Self::add)
    /// against the new root. The selector-match capability is then resolved
    /// against `root`; on failure the registry is left with no root bound and
    /// [`DelegationError::MatchCapabilityUnavailable`] is returned.
    pub fn set_root(&mut self, host: &mut H, root: H::Node) -> Result<(), DelegationError> {
        self.teardown(host);
        match host.resolve_matcher(root) {
            Some(matcher) => {
                self.root = Some(root);
                self.matcher = Some(matcher);
                Ok(())
            }
            None => {
                self.root = None;
                self.matcher = None;
                Err(DelegationError::MatchCapabilityUnavailable)
            }
        }
    }

    /// Register a delegated binding.
    ///
    /// Assigns the handler's identity on first registration, synthesizes a
    /// dispatcher closing over `(root, matcher, selector, handler, context)`,
    /// and attaches it to the root as a capture-phase listener for
    /// `event_type`. The handler is later invoked with `context`, or with the
    /// matched element when `context` is `None`.
    ///
    /// There is no de-duplication: registering the same arguments twice
    /// yields two independent bindings, and both fire on a matching event.
    pub fn add(
        &mut self,
        host: &mut H,
        event_type: &str,
        selector: &str,
        handler: &HandlerRef<H>,
        context: Option<H::Node>,
    ) -> Result<(), DelegationError> {
        let (root, matcher) = match (self.root, &self.matcher) {
            (Some(root), Some(matcher)) => (root, matcher.clone()),
            _ => return Err(DelegationError::RootNotSet),
        };
        let id = handler.ensure_id(&self.scope);
        let dispatcher = make_dispatcher(root, matcher, selector, handler.clone(), context);
        host.attach_capture(root, event_type, dispatcher.clone());
        let binding = Binding {
            event_type: String::from(event_type),
            selector: String::from(selector),
            dispatcher,
        };
        match self.groups.iter_mut().find(|g| g.id == id) {
            Some(group) => group.bindings.push(binding),
            None => self.groups.push(HandlerGroup {
                id,
                bindings: alloc::vec![binding],
            }),
        }
        Ok(())
    }

    /// Remove bindings matching the filter, detaching their listeners.
    ///
    /// All filter fields are optional; the default filter removes everything
    /// on the current root. Detachment uses the same `(event_type,
    /// dispatcher, capture)` triple used at attach time. Safe to call with no
    /// matching bindings; the second identical call removes nothing and
    /// raises no error.
    pub fn remove(
        &mut self,
        host: &mut H,
        filter: RemoveFilter<'_, H>,
    ) -> Result<(), DelegationError> {
        let Some(root) = self.root else {
            return Err(DelegationError::RootNotSet);
        };
        let handler_id = filter.handler.and_then(HandlerRef::id);
        for group in &mut self.groups {
            if let Some(id) = handler_id
                && group.id != id
            {
                continue;
            }
            let mut i = 0;
            while i < group.bindings.len() {
                let matched = filter.event_type.is_none_or(|t| t == group.bindings[i].event_type)
                    && filter.selector.is_none_or(|s| s == group.bindings[i].selector);
                if matched {
                    let binding = group.bindings.remove(i);
                    host.detach_capture(root, &binding.event_type, &binding.dispatcher);
                } else {
                    i += 1;
                }
            }
        }
        self.groups.retain(|g| !g.bindings.is_empty());
        Ok(())
    }

    /// Remove every binding on the current root.
    pub fn remove_all(&mut self, host: &mut H) -> Result<(), DelegationError> {
        self.remove(host, RemoveFilter::default())
    }
}

/// Build the capture-phase listener for one binding.
///
/// The walk starts at the event's original target and follows parent links:
/// reaching the root from below ends it, a node without the match capability
/// ends it, running out of parents ends it; the first node satisfying the
/// selector receives the dispatch and the walk stops there, so only the
/// nearest matching ancestor fires.
fn make_dispatcher<H: DelegationHost + 'static>(
    root: H::Node,
    matcher: Matcher<H>,
    selector: &str,
    handler: HandlerRef<H>,
    context: Option<H::Node>,
) -> Dispatcher<H> {
    let selector = String::from(selector);
    Dispatcher::new(move |host: &mut H, event: &H::Event| {
        let target = host.event_target(event);
        let mut node = target;
        loop {
            if node != target && node == root {
                return;
            }
            match matcher(host, node, &selector) {
                None => return,
                Some(true) => break,
                Some(false) => {}
            }
            match host.parent_of(&node) {
                Some(parent) => node = parent,
                None => return,
            }
        }
        handler.call(host, event, context.unwrap_or(node));
    })
}
