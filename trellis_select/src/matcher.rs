// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matching parsed selectors against [`Element`]s.

use crate::types::{AttrOp, Compound, Element, Selector};

impl Selector {
    /// Parse selector text. See the [parser](crate::parser) docs for the
    /// accepted grammar.
    pub fn parse(input: &str) -> Result<Self, crate::ParseError> {
        crate::parser::parse(input)
    }

    /// Whether any comma-separated alternative matches the element.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        self.parts.iter().any(|c| c.matches(element))
    }
}

impl Compound {
    /// Whether every constraint of this compound holds for the element.
    ///
    /// Tag names compare ASCII case-insensitively (HTML convention); ids,
    /// classes, and attribute values compare exactly.
    pub fn matches<E: Element>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag
            && !tag.eq_ignore_ascii_case(element.tag())
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|t| match &t.op {
            AttrOp::Present => element.attr(&t.name).is_some(),
            AttrOp::Equals(v) => element.attr(&t.name) == Some(v.as_str()),
        })
    }
}
