// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree basics.
//!
//! Builds a small list, attaches capture and bubble listeners directly, and
//! dispatches one click to show the capture → target → bubble order.
//!
//! Run:
//! - `cargo run -p trellis_demos --example dom_tree_basics`

use trellis_dom::{ElementData, Event, Listener, ListenerFlags, Tree};

fn main() {
    let mut tree = Tree::new();
    let list = tree.insert(None, ElementData::new("ul").with_id("list"));
    let item = tree.insert(Some(list), ElementData::new("li").with_class("item"));
    let span = tree.insert(Some(item), ElementData::new("span"));

    tree.add_event_listener(
        list,
        "click",
        Listener::new(|_, _| println!("  capture at ul#list")),
        ListenerFlags::CAPTURE,
    );
    tree.add_event_listener(
        span,
        "click",
        Listener::new(|_, _| println!("  target   at span")),
        ListenerFlags::empty(),
    );
    tree.add_event_listener(
        list,
        "click",
        Listener::new(|_, _| println!("  bubble   at ul#list")),
        ListenerFlags::empty(),
    );

    println!("== click on span ==");
    tree.dispatch_event(&Event::new("click", span));
}
