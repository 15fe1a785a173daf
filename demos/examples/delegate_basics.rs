// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegation basics.
//!
//! One binding at the list root handles clicks for every row, including rows
//! inserted after registration. The handler receives the matched `li`, not
//! the inner span the click targeted.
//!
//! Run:
//! - `cargo run -p trellis_demos --example delegate_basics`

use trellis_delegate::registry::DelegationRegistry;
use trellis_delegate::types::HandlerRef;
use trellis_dom::{ElementData, Event, Tree};

fn main() {
    let mut tree = Tree::new();
    let list = tree.insert(None, ElementData::new("ul").with_id("list"));
    let item = tree.insert(Some(list), ElementData::new("li").with_class("item"));
    let span = tree.insert(Some(item), ElementData::new("span"));

    let mut registry = DelegationRegistry::new();
    registry.set_root(&mut tree, list).expect("live root");

    let handler: HandlerRef<Tree> = HandlerRef::new(|tree: &mut Tree, ev: &Event, node| {
        let tag = tree.element(node).map_or("?", |el| el.tag.as_str());
        println!("  {} routed to <{tag}> {node:?}", ev.event_type());
    });
    registry
        .add(&mut tree, "click", "li.item", &handler, None)
        .expect("root is set");

    println!("== click on the span inside the first row ==");
    tree.dispatch_event(&Event::new("click", span));

    // A row added later needs no listener of its own.
    let late = tree.insert(Some(list), ElementData::new("li").with_class("item"));
    println!("== click on a row added after registration ==");
    tree.dispatch_event(&Event::new("click", late));

    registry.remove_all(&mut tree).expect("root is set");
    println!("== after remove_all: silence ==");
    tree.dispatch_event(&Event::new("click", span));
}
