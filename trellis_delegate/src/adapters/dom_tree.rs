// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DelegationHost`] implementation for [`trellis_dom::Tree`].
//!
//! Dispatchers become ordinary capture-phase [`Listener`]s on the root, so
//! delegated bindings interleave with directly attached listeners under the
//! tree's normal dispatch order. The selector-match capability parses the
//! selector text per event with [`trellis_select::Selector`] and tests the
//! node's element data; a selector that fails to parse simply never matches.

use alloc::rc::Rc;

use trellis_dom::{Event, Listener, ListenerFlags, NodeId, Tree};
use trellis_select::Selector;

use crate::types::{DelegationHost, Dispatcher, Matcher};

impl DelegationHost for Tree {
    type Node = NodeId;
    type Event = Event;

    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Tree::parent_of(self, *node)
    }

    fn event_target(&self, event: &Event) -> NodeId {
        event.target()
    }

    fn resolve_matcher(&self, root: NodeId) -> Option<Matcher<Self>> {
        if !self.is_alive(root) {
            return None;
        }
        Some(Rc::new(|tree: &Tree, node: NodeId, selector: &str| {
            let element = tree.element(node)?;
            match Selector::parse(selector) {
                Ok(sel) => Some(sel.matches(element)),
                Err(_) => Some(false),
            }
        }))
    }

    fn attach_capture(&mut self, node: NodeId, event_type: &str, dispatcher: Dispatcher<Self>) {
        self.add_event_listener(
            node,
            event_type,
            Listener::from_rc(dispatcher.as_rc()),
            ListenerFlags::CAPTURE,
        );
    }

    fn detach_capture(&mut self, node: NodeId, event_type: &str, dispatcher: &Dispatcher<Self>) {
        self.remove_event_listener(
            node,
            event_type,
            &Listener::from_rc(dispatcher.as_rc()),
            ListenerFlags::CAPTURE,
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use trellis_dom::{ElementData, Event, Listener, ListenerFlags, NodeId, Tree};

    use crate::registry::DelegationRegistry;
    use crate::types::{DelegationError, HandlerRef, RemoveFilter};

    type Log = Rc<RefCell<Vec<(&'static str, NodeId)>>>;

    fn logging_handler(log: &Log, tag: &'static str) -> HandlerRef<Tree> {
        let log = Rc::clone(log);
        HandlerRef::new(move |_: &mut Tree, _: &Event, node| log.borrow_mut().push((tag, node)))
    }

    /// `ul#list > li.item > span`.
    fn list_fixture(tree: &mut Tree) -> (NodeId, NodeId, NodeId) {
        let list = tree.insert(None, ElementData::new("ul").with_id("list"));
        let item = tree.insert(Some(list), ElementData::new("li").with_class("item"));
        let span = tree.insert(Some(item), ElementData::new("span"));
        (list, item, span)
    }

    #[test]
    fn delegated_click_reaches_the_matching_item() {
        let mut tree = Tree::new();
        let (list, item, span) = list_fixture(&mut tree);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, list).unwrap();

        let log: Log = Log::default();
        let h = logging_handler(&log, "h");
        reg.add(&mut tree, "click", "li.item", &h, None).unwrap();

        tree.dispatch_event(&Event::new("click", span));
        assert_eq!(*log.borrow(), vec![("h", item)]);

        // Clicking the list itself matches nothing.
        log.borrow_mut().clear();
        tree.dispatch_event(&Event::new("click", list));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn capture_delegation_beats_a_bubble_phase_stopper() {
        let mut tree = Tree::new();
        let (list, item, span) = list_fixture(&mut tree);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, list).unwrap();

        // A bubble listener between target and root that kills propagation.
        tree.add_event_listener(
            item,
            "click",
            Listener::new(|_, ev| ev.stop_propagation()),
            ListenerFlags::empty(),
        );

        let log: Log = Log::default();
        let h = logging_handler(&log, "h");
        reg.add(&mut tree, "click", "li.item", &h, None).unwrap();

        tree.dispatch_event(&Event::new("click", span));
        assert_eq!(*log.borrow(), vec![("h", item)]);
    }

    #[test]
    fn teardown_leaves_the_root_without_listeners() {
        let mut tree = Tree::new();
        let (list, _, _) = list_fixture(&mut tree);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, list).unwrap();

        let log: Log = Log::default();
        let h = logging_handler(&log, "h");
        reg.add(&mut tree, "click", "li.item", &h, None).unwrap();
        reg.add(&mut tree, "focus", "li", &h, None).unwrap();
        assert_eq!(tree.listener_count(list), 2);

        reg.remove(
            &mut tree,
            RemoveFilter {
                event_type: Some("click"),
                ..RemoveFilter::default()
            },
        )
        .unwrap();
        assert_eq!(tree.listener_count(list), 1);

        reg.remove_all(&mut tree).unwrap();
        assert_eq!(tree.listener_count(list), 0);
    }

    #[test]
    fn moving_the_root_detaches_the_old_one() {
        let mut tree = Tree::new();
        let (list, _, span) = list_fixture(&mut tree);
        let other = tree.insert(None, ElementData::new("section"));
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, list).unwrap();

        let log: Log = Log::default();
        let h = logging_handler(&log, "h");
        reg.add(&mut tree, "click", "li.item", &h, None).unwrap();

        reg.set_root(&mut tree, other).unwrap();
        assert_eq!(tree.listener_count(list), 0);
        tree.dispatch_event(&Event::new("click", span));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn a_dead_root_has_no_match_capability() {
        let mut tree = Tree::new();
        let node = tree.insert(None, ElementData::new("div"));
        tree.remove(node);

        let mut reg: DelegationRegistry<Tree> = DelegationRegistry::new();
        assert_eq!(
            reg.set_root(&mut tree, node),
            Err(DelegationError::MatchCapabilityUnavailable)
        );
    }

    #[test]
    fn an_unparseable_selector_never_matches() {
        let mut tree = Tree::new();
        let (list, _, span) = list_fixture(&mut tree);
        let mut reg = DelegationRegistry::new();
        reg.set_root(&mut tree, list).unwrap();

        let log: Log = Log::default();
        let h = logging_handler(&log, "h");
        reg.add(&mut tree, "click", "li >", &h, None).unwrap();

        tree.dispatch_event(&Event::new("click", span));
        assert!(log.borrow().is_empty());
    }
}
