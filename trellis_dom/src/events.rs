// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration and synchronous event dispatch.
//!
//! ## Overview
//!
//! Every node carries its own listener list. Dispatch walks the root→target
//! path twice: a capture pass (outermost node first) delivering
//! [`ListenerFlags::CAPTURE`] registrations, then a bubble pass (target
//! first) delivering the rest. Listener lists are snapshotted per node before
//! invocation, so handlers that add or remove listeners affect only future
//! events, never the delivery already in flight.
//!
//! ## Stopping
//!
//! [`Event::stop_propagation`] prevents delivery to any *further* node and
//! cancels the remaining passes; listeners already selected for the current
//! node still run. Because capture at an outer node runs before bubble
//! anywhere below it, a capture-phase listener at a root observes every event
//! regardless of bubble-phase stopping on intermediate nodes.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::tree::Tree;
use crate::types::{ListenerFlags, NodeId};

/// A single event travelling through the tree.
#[derive(Debug)]
pub struct Event {
    event_type: String,
    target: NodeId,
    stopped: Cell<bool>,
}

impl Event {
    /// Event of the given type with the given original target.
    pub fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: String::from(event_type),
            target,
            stopped: Cell::new(false),
        }
    }

    /// The event type, e.g. `click`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The original target the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Stop delivery to any further node. Listeners already selected for the
    /// current node still run.
    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    /// Whether propagation has been stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Cloneable listener handle.
///
/// Clones share the underlying function and compare equal under
/// [`Listener::ptr_eq`]; removal is keyed on that identity, mirroring how
/// native listener APIs pair `add` and `remove` by function reference.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&mut Tree, &Event)>);

impl Listener {
    /// Wrap a function as a listener.
    pub fn new(f: impl Fn(&mut Tree, &Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Wrap an already shared function without another allocation.
    pub fn from_rc(f: Rc<dyn Fn(&mut Tree, &Event)>) -> Self {
        Self(f)
    }

    /// Whether two handles refer to the same underlying function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn call(&self, tree: &mut Tree, event: &Event) {
        (self.0)(tree, event);
    }
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Listener").field(&Rc::as_ptr(&self.0)).finish()
    }
}

pub(crate) struct ListenerEntry {
    pub(crate) event_type: String,
    pub(crate) flags: ListenerFlags,
    pub(crate) listener: Listener,
}

impl core::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("event_type", &self.event_type)
            .field("flags", &self.flags)
            .field("listener", &self.listener)
            .finish()
    }
}

impl Tree {
    /// Append a listener to `node` for `event_type`.
    ///
    /// Registrations are delivered in append order within a pass. Duplicate
    /// registrations are kept; each fires independently. Stale ids are a
    /// silent no-op.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
        flags: ListenerFlags,
    ) {
        if let Some(n) = self.node_opt_mut(node) {
            n.listeners.push(ListenerEntry {
                event_type: String::from(event_type),
                flags,
                listener,
            });
        }
    }

    /// Remove every registration on `node` matching the
    /// `(event_type, listener identity, capture bit)` triple.
    ///
    /// The [`ListenerFlags::ONCE`] bit is ignored when matching, as it does
    /// not participate in registration identity. No-op for stale ids or
    /// unknown listeners.
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: &Listener,
        flags: ListenerFlags,
    ) {
        let capture = flags.contains(ListenerFlags::CAPTURE);
        if let Some(n) = self.node_opt_mut(node) {
            n.listeners.retain(|e| {
                !(e.event_type == event_type
                    && e.flags.contains(ListenerFlags::CAPTURE) == capture
                    && e.listener.ptr_eq(listener))
            });
        }
    }

    /// Number of listener registrations currently attached to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.node_opt(node).map_or(0, |n| n.listeners.len())
    }

    /// Deliver `event` through the tree: capture pass from the outermost
    /// ancestor down to the target, then bubble pass back out.
    ///
    /// A stale target is a silent no-op.
    pub fn dispatch_event(&mut self, event: &Event) {
        let path = self.path_from_root(event.target());
        for &node in &path {
            self.deliver(node, event, true);
            if event.propagation_stopped() {
                return;
            }
        }
        for &node in path.iter().rev() {
            self.deliver(node, event, false);
            if event.propagation_stopped() {
                return;
            }
        }
    }

    fn deliver(&mut self, node: NodeId, event: &Event, capture: bool) {
        let Some(n) = self.node_opt(node) else {
            return;
        };
        // Snapshot: the live list may be edited by the handlers below.
        let selected: Vec<(Listener, bool)> = n
            .listeners
            .iter()
            .filter(|e| {
                e.event_type == event.event_type
                    && e.flags.contains(ListenerFlags::CAPTURE) == capture
            })
            .map(|e| (e.listener.clone(), e.flags.contains(ListenerFlags::ONCE)))
            .collect();
        for (listener, once) in selected {
            if once {
                // Detach before invoking so reentrant dispatch cannot fire it twice.
                let flags = if capture {
                    ListenerFlags::CAPTURE
                } else {
                    ListenerFlags::empty()
                };
                self.remove_event_listener(node, event.event_type(), &listener, flags);
            }
            listener.call(self, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::types::ElementData;

    fn counting_listener(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Listener {
        let log = Rc::clone(log);
        Listener::new(move |_, _| log.borrow_mut().push(tag))
    }

    fn chain(tree: &mut Tree) -> (NodeId, NodeId, NodeId) {
        let root = tree.insert(None, ElementData::new("div"));
        let mid = tree.insert(Some(root), ElementData::new("p"));
        let leaf = tree.insert(Some(mid), ElementData::new("span"));
        (root, mid, leaf)
    }

    #[test]
    fn capture_then_bubble_order() {
        let mut tree = Tree::new();
        let (root, mid, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        tree.add_event_listener(
            root,
            "click",
            counting_listener(&log, "root-capture"),
            ListenerFlags::CAPTURE,
        );
        tree.add_event_listener(
            leaf,
            "click",
            counting_listener(&log, "leaf-bubble"),
            ListenerFlags::empty(),
        );
        tree.add_event_listener(
            mid,
            "click",
            counting_listener(&log, "mid-bubble"),
            ListenerFlags::empty(),
        );
        tree.dispatch_event(&Event::new("click", leaf));
        assert_eq!(
            *log.borrow(),
            vec!["root-capture", "leaf-bubble", "mid-bubble"]
        );
    }

    #[test]
    fn type_filter_applies() {
        let mut tree = Tree::new();
        let (root, _, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        tree.add_event_listener(
            root,
            "keydown",
            counting_listener(&log, "keys"),
            ListenerFlags::CAPTURE,
        );
        tree.dispatch_event(&Event::new("click", leaf));
        assert!(log.borrow().is_empty());
        tree.dispatch_event(&Event::new("keydown", leaf));
        assert_eq!(*log.borrow(), vec!["keys"]);
    }

    #[test]
    fn remove_is_keyed_on_identity_and_capture_bit() {
        let mut tree = Tree::new();
        let (root, _, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = counting_listener(&log, "hit");
        tree.add_event_listener(root, "click", l.clone(), ListenerFlags::CAPTURE);

        // Wrong capture bit: nothing removed.
        tree.remove_event_listener(root, "click", &l, ListenerFlags::empty());
        assert_eq!(tree.listener_count(root), 1);

        tree.remove_event_listener(root, "click", &l, ListenerFlags::CAPTURE);
        assert_eq!(tree.listener_count(root), 0);
        tree.dispatch_event(&Event::new("click", leaf));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn registration_order_is_invocation_order() {
        let mut tree = Tree::new();
        let (root, _, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        tree.add_event_listener(
            root,
            "click",
            counting_listener(&log, "first"),
            ListenerFlags::CAPTURE,
        );
        tree.add_event_listener(
            root,
            "click",
            counting_listener(&log, "second"),
            ListenerFlags::CAPTURE,
        );
        tree.dispatch_event(&Event::new("click", leaf));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn stop_propagation_halts_later_nodes_but_not_root_capture() {
        let mut tree = Tree::new();
        let (root, mid, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        tree.add_event_listener(
            root,
            "click",
            counting_listener(&log, "root-capture"),
            ListenerFlags::CAPTURE,
        );
        let stopper = Listener::new(|_, ev: &Event| ev.stop_propagation());
        tree.add_event_listener(leaf, "click", stopper, ListenerFlags::empty());
        tree.add_event_listener(
            mid,
            "click",
            counting_listener(&log, "mid-bubble"),
            ListenerFlags::empty(),
        );
        tree.dispatch_event(&Event::new("click", leaf));
        // Root capture ran before the leaf bubble listener stopped the event.
        assert_eq!(*log.borrow(), vec!["root-capture"]);
    }

    #[test]
    fn once_listeners_fire_a_single_time() {
        let mut tree = Tree::new();
        let (root, _, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        tree.add_event_listener(
            root,
            "click",
            counting_listener(&log, "once"),
            ListenerFlags::CAPTURE | ListenerFlags::ONCE,
        );
        tree.dispatch_event(&Event::new("click", leaf));
        tree.dispatch_event(&Event::new("click", leaf));
        assert_eq!(*log.borrow(), vec!["once"]);
        assert_eq!(tree.listener_count(root), 0);
    }

    #[test]
    fn handler_mutating_listeners_affects_only_future_events() {
        let mut tree = Tree::new();
        let (root, _, leaf) = chain(&mut tree);
        let log = Rc::new(RefCell::new(Vec::new()));
        let late = counting_listener(&log, "late");
        let adder = {
            let late = late.clone();
            Listener::new(move |tree: &mut Tree, ev: &Event| {
                let target = ev.target();
                let root = tree.path_from_root(target)[0];
                tree.add_event_listener(root, "click", late.clone(), ListenerFlags::CAPTURE);
            })
        };
        tree.add_event_listener(root, "click", adder, ListenerFlags::CAPTURE);
        tree.dispatch_event(&Event::new("click", leaf));
        // The listener added mid-dispatch did not run for this event.
        assert!(log.borrow().is_empty());
        tree.dispatch_event(&Event::new("click", leaf));
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn stale_target_is_a_no_op() {
        let mut tree = Tree::new();
        let (_, _, leaf) = chain(&mut tree);
        tree.remove(leaf);
        tree.dispatch_event(&Event::new("click", leaf));
    }
}
