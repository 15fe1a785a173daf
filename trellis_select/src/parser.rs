// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector text parsing.
//!
//! ## Grammar
//!
//! ```text
//! selector     = compound *( "," compound )
//! compound     = [ tag | "*" ] *( id | class | attr )
//! id           = "#" name
//! class        = "." name
//! attr         = "[" name [ "=" value ] "]"
//! ```
//!
//! Whitespace is permitted only around commas. Anything that would read as a
//! combinator (a space, `>`, `+`, `~` inside an alternative) is an error:
//! ancestors are re-matched one at a time during delegation, so a combinator
//! has no sound interpretation at match time.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{AttrOp, AttrTest, Compound, ParseError, Selector};

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '-'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(ParseError::EmptyName { at: start });
        }
        Ok(String::from(&self.input[start..self.pos]))
    }
}

pub(crate) fn parse(input: &str) -> Result<Selector, ParseError> {
    let mut parts = Vec::new();
    let mut base = 0_usize;
    for raw in input.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        // Offsets inside the compound are relative to the full input.
        let offset = base + (raw.len() - raw.trim_start().len());
        parts.push(parse_compound(trimmed, offset)?);
        base += raw.len() + 1;
    }
    Ok(Selector { parts })
}

fn parse_compound(text: &str, offset: usize) -> Result<Compound, ParseError> {
    let mut cur = Cursor {
        input: text,
        pos: 0,
    };
    let mut out = Compound::default();

    match cur.peek() {
        Some('*') => {
            cur.bump();
        }
        Some(ch) if is_name_start(ch) => {
            out.tag = Some(cur.name()?);
        }
        _ => {}
    }

    while let Some(ch) = cur.peek() {
        let at = offset + cur.pos;
        match ch {
            '#' => {
                cur.bump();
                out.id = Some(cur.name().map_err(|_| ParseError::EmptyName {
                    at: at + 1,
                })?);
            }
            '.' => {
                cur.bump();
                out.classes.push(cur.name().map_err(|_| ParseError::EmptyName {
                    at: at + 1,
                })?);
            }
            '[' => {
                cur.bump();
                out.attrs.push(parse_attr(&mut cur, at)?);
            }
            ' ' | '\t' | '>' | '+' | '~' => {
                return Err(ParseError::CombinatorUnsupported { at });
            }
            _ => return Err(ParseError::UnexpectedChar { at, ch }),
        }
    }

    Ok(out)
}

fn parse_attr(cur: &mut Cursor<'_>, start: usize) -> Result<AttrTest, ParseError> {
    let name = cur.name().map_err(|_| ParseError::EmptyName {
        at: start + 1,
    })?;
    match cur.bump() {
        Some(']') => Ok(AttrTest {
            name,
            op: AttrOp::Present,
        }),
        Some('=') => {
            let vstart = cur.pos;
            while let Some(ch) = cur.peek() {
                if ch == ']' {
                    break;
                }
                cur.bump();
            }
            let value = String::from(&cur.input[vstart..cur.pos]);
            match cur.bump() {
                Some(']') => Ok(AttrTest {
                    name,
                    op: AttrOp::Equals(value),
                }),
                _ => Err(ParseError::UnclosedAttribute { at: start }),
            }
        }
        _ => Err(ParseError::UnclosedAttribute { at: start }),
    }
}
