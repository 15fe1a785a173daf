// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_dom --heading-base-level=0

//! Trellis DOM: an arena-backed element tree with listeners and dispatch.
//!
//! ## Overview
//!
//! This crate provides the host side of event delegation:
//!
//! - A slot arena [`Tree`] of elements addressed by generational [`NodeId`]s,
//!   with explicit parent/child structure.
//! - [`ElementData`] (tag, id, classes, attributes) implementing
//!   [`trellis_select::Element`], so selectors match directly against nodes.
//! - Per-node listener lists ([`Listener`], [`ListenerFlags`]) and
//!   synchronous [`Tree::dispatch_event`] running a capture pass (root →
//!   target) followed by a bubble pass (target → root).
//!
//! It deliberately models only what delegation needs: no text nodes, no
//! rendering, no mutation observers.
//!
//! # Example
//!
//! ```rust
//! use trellis_dom::{ElementData, Event, Listener, ListenerFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let list = tree.insert(None, ElementData::new("ul").with_id("list"));
//! let item = tree.insert(Some(list), ElementData::new("li").with_class("item"));
//!
//! tree.add_event_listener(
//!     list,
//!     "click",
//!     Listener::new(|_, ev| println!("captured {} at root", ev.event_type())),
//!     ListenerFlags::CAPTURE,
//! );
//! tree.dispatch_event(&Event::new("click", item));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod events;
pub mod tree;
pub mod types;

pub use events::{Event, Listener};
pub use tree::Tree;
pub use types::{ElementData, ListenerFlags, NodeId};
