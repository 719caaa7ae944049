//! Minimal selector engine.
//!
//! Supported syntax: type selectors, `*`, `#id`, `.class`, `[attr]`,
//! `[attr=value]` (bare or quoted value), `:focus`, the descendant and child
//! (`>`) combinators, and comma-separated selector lists.
//!
//! Invariants:
//! - Type selectors and attribute names compare case-insensitively.
//! - Matching never mutates the document.

use std::fmt;

use super::{Document, ElementId};
use crate::error::SelectorError;

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeTest>,
    focus: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTest {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns a `SelectorError` for empty input, unsupported pseudo-classes,
    /// unterminated attribute tests, or stray characters.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            source,
            chars: source.chars().collect(),
            pos: 0,
        };
        let alternatives = parser.selector_list()?;
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` matches any selector of the list.
    pub fn matches<D: Document + ?Sized>(&self, doc: &D, element: ElementId) -> bool {
        self.alternatives.iter().any(|complex| {
            complex
                .compounds
                .len()
                .checked_sub(1)
                .is_some_and(|last| complex.matches_from(doc, last, element))
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Complex {
    fn matches_from<D: Document + ?Sized>(&self, doc: &D, index: usize, element: ElementId) -> bool {
        if !self.compounds[index].matches(doc, element) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => doc
                .parent(element)
                .is_some_and(|parent| self.matches_from(doc, index - 1, parent)),
            Combinator::Descendant => {
                let mut ancestor = doc.parent(element);
                while let Some(candidate) = ancestor {
                    if self.matches_from(doc, index - 1, candidate) {
                        return true;
                    }
                    ancestor = doc.parent(candidate);
                }
                false
            }
        }
    }
}

impl Compound {
    fn matches<D: Document + ?Sized>(&self, doc: &D, element: ElementId) -> bool {
        if let Some(tag) = &self.tag
            && !doc.tag_name(element).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && doc.attribute(element, "id").as_deref() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = doc.attribute(element, "class").unwrap_or_default();
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|class| present.contains(&class.as_str())) {
                return false;
            }
        }
        for test in &self.attributes {
            match (doc.attribute(element, &test.name), &test.value) {
                (None, _) => return false,
                (Some(actual), Some(expected)) if actual != *expected => return false,
                _ => {}
            }
        }
        if self.focus && doc.active_element() != Some(element) {
            return false;
        }
        true
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            found,
            position: self.pos,
            selector: self.source.to_string(),
        }
    }

    fn unexpected_end(&self) -> SelectorError {
        SelectorError::UnexpectedEnd {
            selector: self.source.to_string(),
        }
    }

    fn unterminated(&self) -> SelectorError {
        SelectorError::Unterminated {
            selector: self.source.to_string(),
        }
    }

    fn selector_list(&mut self) -> Result<Vec<Complex>, SelectorError> {
        if self.source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            list.push(self.complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(list)
    }

    fn complex(&mut self) -> Result<Complex, SelectorError> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_whitespace => combinators.push(Combinator::Descendant),
                Some(c) => return Err(self.unexpected(c)),
            }
            compounds.push(self.compound()?);
        }
        Ok(Complex {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();
        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => compound.tag = Some(self.ident()?),
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute_test()?);
                }
                Some(':') => {
                    self.pos += 1;
                    let name = self.ident()?;
                    if !name.eq_ignore_ascii_case("focus") {
                        return Err(SelectorError::UnsupportedPseudoClass {
                            name,
                            selector: self.source.to_string(),
                        });
                    }
                    compound.focus = true;
                }
                _ => break,
            }
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.unexpected_end(),
            });
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.unexpected_end(),
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute_test(&mut self) -> Result<AttributeTest, SelectorError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ']' || c == '=' || c.is_whitespace() {
                break;
            }
            if matches!(c, '~' | '|' | '^' | '$' | '*' | '"' | '\'') {
                return Err(self.unexpected(c));
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => self.unterminated(),
            });
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(']') => None,
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                Some(self.attribute_value().ok_or_else(|| self.unterminated())?)
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(self.unterminated()),
        };

        self.skip_whitespace();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttributeTest {
                    name: name.to_ascii_lowercase(),
                    value,
                })
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unterminated()),
        }
    }

    /// Quoted or bare attribute value; `None` when a quote is never closed.
    fn attribute_value(&mut self) -> Option<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                self.peek()?;
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Some(value)
            }
            _ => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c != ']' && !c.is_whitespace()) {
                    self.pos += 1;
                }
                Some(self.chars[start..self.pos].iter().collect())
            }
        }
    }
}
