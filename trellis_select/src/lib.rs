// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_select --heading-base-level=0

//! Trellis Select: a small CSS selector subset for delegation-style matching.
//!
//! Trellis Select is a reusable building block for event delegation and
//! element queries.
//!
//! - Parse compound simple selectors (`li.item`, `#list`, `input[type=text]`,
//!   `*`) and comma-separated alternatives.
//! - Match a parsed [`Selector`] against anything implementing [`Element`].
//! - No combinators: delegation re-tests one ancestor at a time, so a
//!   combinator would be matched against the wrong scope. Parsing refuses
//!   them instead of guessing.
//!
//! It is independent of any particular tree representation. Higher layers
//! (like an element tree or a delegation registry) implement [`Element`] for
//! their node data and feed elements here.
//!
//! # Example
//!
//! ```rust
//! use trellis_select::{Element, Selector};
//!
//! struct Tag(&'static str);
//! impl Element for Tag {
//!     fn tag(&self) -> &str {
//!         self.0
//!     }
//!     fn id(&self) -> Option<&str> {
//!         None
//!     }
//!     fn has_class(&self, _: &str) -> bool {
//!         false
//!     }
//!     fn attr(&self, _: &str) -> Option<&str> {
//!         None
//!     }
//! }
//!
//! let sel = Selector::parse("li, p").unwrap();
//! assert!(sel.matches(&Tag("li")));
//! assert!(!sel.matches(&Tag("div")));
//! ```

#![no_std]

extern crate alloc;

mod matcher;
pub mod parser;
pub mod types;

pub use types::{AttrOp, AttrTest, Compound, Element, ParseError, Selector};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_match_round_trip() {
        struct Plain;
        impl Element for Plain {
            fn tag(&self) -> &str {
                "div"
            }
            fn id(&self) -> Option<&str> {
                Some("root")
            }
            fn has_class(&self, name: &str) -> bool {
                name == "wrap"
            }
            fn attr(&self, _: &str) -> Option<&str> {
                None
            }
        }

        assert!(Selector::parse("div#root.wrap").unwrap().matches(&Plain));
        assert!(!Selector::parse("span").unwrap().matches(&Plain));
        assert!(Selector::parse("ul li").is_err());
    }
}
