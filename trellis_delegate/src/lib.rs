// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_delegate --heading-base-level=0

//! Trellis Delegate: a `no_std` event delegation registry for UI trees.
//!
//! ## Overview
//!
//! Instead of attaching one listener per interactive element, a
//! [`DelegationRegistry`](crate::registry::DelegationRegistry) attaches one
//! capture-phase listener per binding at a single root node and routes each
//! event to the nearest ancestor of its target that matches a CSS-style
//! selector. Views with many small interactive children pay for one listener
//! set at their root, and elements added or removed under the root need no
//! listener bookkeeping at all.
//!
//! The registry does not own a tree. It talks to its host through the
//! [`DelegationHost`](crate::types::DelegationHost) capability trait: parent
//! links, the event's original target, a per-root selector-match capability,
//! and a capture-phase listener API keyed by function identity.
//!
//! ## Workflow
//!
//! 1) Bind a root —
//!    [`set_root`](crate::registry::DelegationRegistry::set_root) resolves
//!    the selector-match capability once, up front, and detaches any
//!    bindings left on a previous root.
//! 2) Register — [`add`](crate::registry::DelegationRegistry::add) takes an
//!    event type, a selector, a
//!    [`HandlerRef`](crate::types::HandlerRef), and an optional context
//!    node. Each call attaches its own dispatcher; nothing is de-duplicated.
//! 3) Dispatch — on delivery the dispatcher walks target → parent → …,
//!    stopping when it reaches the root from below, and invokes the handler
//!    on the first matching node. Only the nearest match fires.
//! 4) Tear down —
//!    [`remove`](crate::registry::DelegationRegistry::remove) filters by any
//!    combination of event type, selector text, and handler identity;
//!    [`remove_all`](crate::registry::DelegationRegistry::remove_all)
//!    clears the root entirely.
//!
//! ## Handler identity
//!
//! Handlers are grouped by an identity assigned at first registration and
//! shared by clones of the same [`HandlerRef`](crate::types::HandlerRef), so
//! one `remove` call can drop every binding a handler participates in across
//! event types and selectors. Identities come from a
//! [`HandlerScope`](crate::types::HandlerScope), which applications can share
//! between registries.
//!
//! ## Layering
//!
//! [`event_map`](crate::event_map) sits above the registry: declarative
//! `"click .btn"` tables bound and unbound as a unit. Below it,
//! [`adapters::dom_tree`](crate::adapters) (feature `dom_adapter`) implements
//! the host trait for `trellis_dom::Tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod event_map;
pub mod registry;
pub mod types;
