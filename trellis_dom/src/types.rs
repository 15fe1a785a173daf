// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, listener flags, and
//! per-node element data.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Flags describing a listener registration.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ListenerFlags: u8 {
        /// Deliver during the capture pass (root toward target). Without this
        /// flag the listener runs during the bubble pass.
        const CAPTURE = 0b0000_0001;
        /// Detach automatically after the first delivery.
        const ONCE    = 0b0000_0010;
    }
}

impl Default for ListenerFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Element payload carried by every node.
///
/// Implements [`trellis_select::Element`], so parsed selectors can be tested
/// directly against a node's data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, e.g. `li`.
    pub tag: String,
    /// Optional element id.
    pub id: Option<String>,
    /// Class list. Order is irrelevant for matching.
    pub classes: Vec<String>,
    /// Attribute name/value pairs.
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Element with the given tag and nothing else.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: String::from(tag),
            ..Self::default()
        }
    }

    /// Builder-style id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(String::from(id));
        self
    }

    /// Builder-style class (repeatable).
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(String::from(class));
        self
    }

    /// Builder-style attribute (repeatable).
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((String::from(name), String::from(value)));
        self
    }
}

impl trellis_select::Element for ElementData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use trellis_select::Selector;

    use super::*;

    #[test]
    fn element_data_matches_selectors() {
        let el = ElementData::new("li")
            .with_id("first")
            .with_class("item")
            .with_attr("draggable", "true");
        assert!(Selector::parse("li.item#first").unwrap().matches(&el));
        assert!(Selector::parse("[draggable=true]").unwrap().matches(&el));
        assert!(!Selector::parse(".selected").unwrap().matches(&el));
    }

    #[test]
    fn listener_flags_default_to_bubble_single() {
        let f = ListenerFlags::default();
        assert!(!f.contains(ListenerFlags::CAPTURE));
        assert!(!f.contains(ListenerFlags::ONCE));
    }
}
