// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for delegation: the host capability trait, handler references
//! and identities, dispatchers, removal filters, and errors.
//!
//! ## Overview
//!
//! These types describe the delegation protocol. The
//! [registry](crate::registry) consumes a [`DelegationHost`] — it never owns
//! the tree, only its listener attachments.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;

/// Capabilities the registry requires from its host environment.
///
/// A host is a DOM-like tree: nodes with parent links, a selector-match
/// operation resolvable per root, and a capture-phase listener API keyed by
/// event type and function identity. `trellis_dom::Tree` implements this
/// behind the `dom_adapter` feature; tests and other toolkits can supply
/// their own.
pub trait DelegationHost {
    /// Node handle. Cheap to copy, compared by identity.
    type Node: Copy + Eq + 'static;
    /// Native event delivered to listeners.
    type Event;

    /// Parent of `node`, or `None` at the top of the tree.
    fn parent_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The original target the event was dispatched at.
    fn event_target(&self, event: &Self::Event) -> Self::Node;

    /// Resolve the selector-match capability against `root`.
    ///
    /// Called once per [`set_root`](crate::registry::DelegationRegistry::set_root);
    /// returning `None` means the root supports no recognized match
    /// operation, which the registry surfaces as
    /// [`DelegationError::MatchCapabilityUnavailable`]. The returned matcher
    /// must stay valid until the root is replaced.
    fn resolve_matcher(&self, root: Self::Node) -> Option<Matcher<Self>>
    where
        Self: Sized;

    /// Attach `dispatcher` as a capture-phase listener for `event_type` on `node`.
    ///
    /// Attachment order must be invocation order for listeners on the same
    /// node, and hosts must tolerate detachment from within a delivery;
    /// in-flight events keep seeing the listener set they started with.
    fn attach_capture(&mut self, node: Self::Node, event_type: &str, dispatcher: Dispatcher<Self>)
    where
        Self: Sized;

    /// Detach a previously attached dispatcher, matched by function identity.
    ///
    /// Must be symmetric with [`attach_capture`](Self::attach_capture): the
    /// registry always detaches with the same `(event_type, dispatcher)` pair
    /// it attached with.
    fn detach_capture(&mut self, node: Self::Node, event_type: &str, dispatcher: &Dispatcher<Self>)
    where
        Self: Sized;
}

/// Resolved selector-match capability, bound to one root.
///
/// `(host, node, selector)` returns `Some(verdict)`, or `None` when the node
/// lacks the capability entirely (the ancestor walk aborts silently on
/// `None`).
pub type Matcher<H> =
    Rc<dyn Fn(&H, <H as DelegationHost>::Node, &str) -> Option<bool>>;

/// The function actually attached to the host's listener API.
///
/// Closes over the root, the resolved matcher, the selector, the original
/// handler, and the optional invocation context. Compared by function
/// identity; clones share it.
pub struct Dispatcher<H: DelegationHost> {
    f: Rc<dyn Fn(&mut H, &H::Event)>,
}

impl<H: DelegationHost> Dispatcher<H> {
    pub(crate) fn new(f: impl Fn(&mut H, &H::Event) + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Whether two dispatchers are the same attached function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }

    /// The shared function itself, for hosts whose listener API wants an `Rc`.
    ///
    /// All clones obtained here share identity with this dispatcher, so a
    /// host can key removal on pointer equality.
    pub fn as_rc(&self) -> Rc<dyn Fn(&mut H, &H::Event)> {
        Rc::clone(&self.f)
    }

    /// Invoke the dispatcher as the host's native delivery would.
    pub fn call(&self, host: &mut H, event: &H::Event) {
        (self.f)(host, event);
    }
}

impl<H: DelegationHost> Clone for Dispatcher<H> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<H: DelegationHost> core::fmt::Debug for Dispatcher<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Dispatcher").field(&Rc::as_ptr(&self.f)).finish()
    }
}

/// Stable identity of an original handler, assigned on first registration.
///
/// Groups every binding created from the same handler across `add` calls, so
/// bulk removal by handler works regardless of the event types and selectors
/// used at registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// The raw identity value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Allocator for [`HandlerId`]s with an explicit lifecycle.
///
/// Registries created with
/// [`DelegationRegistry::new`](crate::registry::DelegationRegistry::new) own
/// a private scope. Applications that share handlers between several
/// registries should create one scope and build every registry
/// [`with_scope`](crate::registry::DelegationRegistry::with_scope), so
/// identities stay unique across them. Clones share the counter.
#[derive(Clone, Debug, Default)]
pub struct HandlerScope {
    next: Rc<Cell<u64>>,
}

impl HandlerScope {
    /// Fresh scope with no identities handed out.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&self) -> HandlerId {
        let id = self.next.get().wrapping_add(1);
        self.next.set(id);
        HandlerId(id)
    }
}

/// Cloneable reference to an original handler.
///
/// The handler is invoked with the host, the native event, and the invocation
/// node (the registered context, or the matched element when no context was
/// given). Clones share both the function and the lazily assigned identity,
/// so any clone can be used for registration or grouped removal.
pub struct HandlerRef<H: DelegationHost> {
    inner: Rc<HandlerInner<H>>,
}

struct HandlerInner<H: DelegationHost> {
    func: Box<dyn Fn(&mut H, &H::Event, H::Node)>,
    id: Cell<Option<HandlerId>>,
}

impl<H: DelegationHost> HandlerRef<H> {
    /// Wrap a function as a delegatable handler.
    pub fn new(f: impl Fn(&mut H, &H::Event, H::Node) + 'static) -> Self {
        Self {
            inner: Rc::new(HandlerInner {
                func: Box::new(f),
                id: Cell::new(None),
            }),
        }
    }

    /// The assigned identity, if this handler has ever been registered.
    pub fn id(&self) -> Option<HandlerId> {
        self.inner.id.get()
    }

    /// Whether two references share the same underlying handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn ensure_id(&self, scope: &HandlerScope) -> HandlerId {
        match self.inner.id.get() {
            Some(id) => id,
            None => {
                let id = scope.allocate();
                self.inner.id.set(Some(id));
                id
            }
        }
    }

    pub(crate) fn call(&self, host: &mut H, event: &H::Event, node: H::Node) {
        (self.inner.func)(host, event, node);
    }
}

impl<H: DelegationHost> Clone for HandlerRef<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: DelegationHost> core::fmt::Debug for HandlerRef<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerRef")
            .field("id", &self.inner.id.get())
            .finish_non_exhaustive()
    }
}

/// Filters applied by [`remove`](crate::registry::DelegationRegistry::remove).
///
/// An omitted filter matches anything; the default value removes every
/// binding. A handler filter narrows removal only when the handler carries an
/// assigned identity — a handler that was never registered filters nothing.
pub struct RemoveFilter<'a, H: DelegationHost> {
    /// Only bindings of this event type.
    pub event_type: Option<&'a str>,
    /// Only bindings registered with exactly this selector text.
    pub selector: Option<&'a str>,
    /// Only bindings created from this handler.
    pub handler: Option<&'a HandlerRef<H>>,
}

impl<H: DelegationHost> Default for RemoveFilter<'_, H> {
    fn default() -> Self {
        Self {
            event_type: None,
            selector: None,
            handler: None,
        }
    }
}

impl<H: DelegationHost> core::fmt::Debug for RemoveFilter<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RemoveFilter")
            .field("event_type", &self.event_type)
            .field("selector", &self.selector)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Errors surfaced at the registry boundary.
///
/// Everything else is a silent no-op by contract: a delegation miss is an
/// expected steady-state outcome, and removing bindings that do not exist
/// removes nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DelegationError {
    /// The root supports no recognized selector-match operation. Fatal to the
    /// `set_root` call; there is no fallback matching strategy.
    MatchCapabilityUnavailable,
    /// `add` or `remove` was called with no root bound.
    RootNotSet,
}

impl core::fmt::Display for DelegationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MatchCapabilityUnavailable => {
                write!(f, "root node has no selector-match capability")
            }
            Self::RootNotSet => write!(f, "no root bound; call set_root first"),
        }
    }
}

impl core::error::Error for DelegationError {}
