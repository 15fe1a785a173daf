// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative handler tables.
//!
//! A small todo-list view declares its delegated handlers as `"type
//! selector"` entries, binds them as one unit, and unbinds them on teardown.
//!
//! Run:
//! - `cargo run -p trellis_demos --example delegate_event_map`

use trellis_delegate::event_map::EventMap;
use trellis_delegate::registry::DelegationRegistry;
use trellis_delegate::types::HandlerRef;
use trellis_dom::{ElementData, Event, Tree};

fn main() {
    let mut tree = Tree::new();
    let view = tree.insert(None, ElementData::new("section").with_id("todos"));
    let row = tree.insert(Some(view), ElementData::new("li").with_class("item"));
    let toggle = tree.insert(Some(row), ElementData::new("input").with_class("toggle"));
    let destroy = tree.insert(Some(row), ElementData::new("button").with_class("destroy"));

    let mut registry = DelegationRegistry::new();
    registry.set_root(&mut tree, view).expect("live root");

    let say = |what: &'static str| {
        HandlerRef::new(move |_: &mut Tree, _: &Event, node| println!("  {what} on {node:?}"))
    };
    let mut map: EventMap<Tree> = EventMap::new();
    map.on("change .toggle", say("toggle"))
        .expect("valid spec")
        .on("click .destroy", say("destroy"))
        .expect("valid spec")
        .on("click .item", say("select row"))
        .expect("valid spec");

    map.bind(&mut registry, &mut tree).expect("root is set");
    println!("== change on the checkbox ==");
    tree.dispatch_event(&Event::new("change", toggle));
    println!("== click on the destroy button ==");
    tree.dispatch_event(&Event::new("click", destroy));

    map.unbind(&mut registry, &mut tree).expect("root is set");
    println!("== after unbind: {} bindings ==", registry.binding_count());
}
