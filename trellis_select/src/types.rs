// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector data model: parsed selectors, compounds, attribute tests, and the
//! [`Element`] seam implemented by matchable element representations.

use alloc::string::String;
use alloc::vec::Vec;

/// A parsed selector: one or more comma-separated [`Compound`]s.
///
/// A selector matches an element when any of its compounds matches. Only
/// compound simple selectors are representable; combinators are rejected at
/// parse time (see [`ParseError::CombinatorUnsupported`]).
///
/// ## Example
///
/// ```
/// use trellis_select::Selector;
/// let s = Selector::parse("li.item, #footer").unwrap();
/// assert_eq!(s.compounds().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    pub(crate) parts: Vec<Compound>,
}

impl Selector {
    /// The comma-separated alternatives of this selector, in source order.
    pub fn compounds(&self) -> &[Compound] {
        &self.parts
    }
}

/// One compound simple selector, e.g. `input.wide[type=text]`.
///
/// All present constraints must hold for the compound to match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    /// Required tag name; `None` means the universal selector.
    pub tag: Option<String>,
    /// Required `#id`.
    pub id: Option<String>,
    /// Required `.class` names (all must be present).
    pub classes: Vec<String>,
    /// Required `[attr]` / `[attr=value]` tests.
    pub attrs: Vec<AttrTest>,
}

/// A single attribute constraint inside a compound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrTest {
    /// Attribute name.
    pub name: String,
    /// How the attribute value is tested.
    pub op: AttrOp,
}

/// Attribute test operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]` — the attribute exists.
    Present,
    /// `[attr=value]` — the attribute exists with exactly this value.
    Equals(String),
}

/// Errors produced by [`Selector::parse`](crate::Selector::parse).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input (or one comma-separated alternative) was empty.
    Empty,
    /// A character that cannot start or continue a simple selector.
    UnexpectedChar {
        /// Byte offset of the offending character.
        at: usize,
        /// The character itself.
        ch: char,
    },
    /// `#`, `.`, or `[` was not followed by a name.
    EmptyName {
        /// Byte offset just past the sigil.
        at: usize,
    },
    /// An attribute test was not terminated by `]`.
    UnclosedAttribute {
        /// Byte offset where the test began.
        at: usize,
    },
    /// Whitespace or a combinator appeared inside an alternative. Delegation
    /// re-matches each ancestor in isolation, so combinators cannot be given
    /// a correct meaning here and are refused outright.
    CombinatorUnsupported {
        /// Byte offset of the combinator.
        at: usize,
    },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty selector"),
            Self::UnexpectedChar { at, ch } => {
                write!(f, "unexpected character {ch:?} at byte {at}")
            }
            Self::EmptyName { at } => write!(f, "missing name at byte {at}"),
            Self::UnclosedAttribute { at } => {
                write!(f, "unclosed attribute test starting at byte {at}")
            }
            Self::CombinatorUnsupported { at } => {
                write!(f, "combinators are not supported (byte {at})")
            }
        }
    }
}

impl core::error::Error for ParseError {}

/// Element view consumed by [`Selector::matches`](crate::Selector::matches).
///
/// Implement this for whatever element representation your tree stores; the
/// matcher never needs tree structure, only the element's own facts.
pub trait Element {
    /// Tag name. Compared ASCII case-insensitively.
    fn tag(&self) -> &str;
    /// The element id, if any. Compared exactly.
    fn id(&self) -> Option<&str>;
    /// Whether the element carries the given class. Compared exactly.
    fn has_class(&self, name: &str) -> bool;
    /// The value of the given attribute, if present.
    fn attr(&self, name: &str) -> Option<&str>;
}
