//! CSS selector subset
//!
//! Supports what the page scripts need: comma-separated groups of compound
//! selectors joined by the descendant combinator. A compound selector is an
//! optional tag (or `*`) followed by any number of `#id`, `.class`,
//! `[attr]`, `[attr="value"]` and `[attr^="value"]` parts.
//!
//! ```
//! use nemesix_core::Selector;
//!
//! let selector = Selector::parse(".animate-nav-items .nav-item, form[action=\"/login\"]").unwrap();
//! assert_eq!(selector.groups(), 2);
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::dom::{Document, NodeId};
use crate::error::{CoreError, Result};

/// Attribute condition inside `[...]`
#[derive(Clone, Debug, PartialEq, Eq)]
enum AttributeMatcher {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl AttributeMatcher {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self {
            AttributeMatcher::Exists(name) => doc.attribute(node, name).is_some(),
            AttributeMatcher::Equals(name, value) => {
                doc.attribute(node, name) == Some(value.as_str())
            }
            AttributeMatcher::Prefix(name, prefix) => doc
                .attribute(node, name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    attributes: SmallVec<[AttributeMatcher; 1]>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && doc.tag(node) != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.id_of(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| doc.has_class(node, c))
            && self.attributes.iter().all(|a| a.matches(doc, node))
    }
}

/// A chain of compounds; the last one is the subject
#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(doc, node) {
            return false;
        }

        // Match remaining compounds right-to-left against the ancestor chain
        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = doc.parent(node);
        while let Some(compound) = remaining.peek() {
            let Some(ancestor) = current else {
                return false;
            };
            if compound.matches(doc, ancestor) {
                remaining.next();
            }
            current = doc.parent(ancestor);
        }
        true
    }
}

/// A parsed selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Complex>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self> {
        let groups = Parser::new(input).parse()?;
        Ok(Self {
            source: input.trim().to_string(),
            groups,
        })
    }

    /// The selector text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of comma-separated groups
    pub fn groups(&self) -> usize {
        self.groups.len()
    }

    /// Check whether a node matches any group
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups.iter().any(|g| g.matches(doc, node))
    }
}

impl FromStr for Selector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn error(&self, reason: impl Into<String>) -> CoreError {
        CoreError::selector(self.input, reason)
    }

    fn parse(mut self) -> Result<Vec<Complex>> {
        let mut groups = Vec::new();
        let mut compounds = Vec::new();

        self.skip_whitespace();
        loop {
            match self.peek() {
                None => {
                    if compounds.is_empty() {
                        return Err(self.error("empty selector"));
                    }
                    groups.push(Complex { compounds });
                    return Ok(groups);
                }
                Some(',') => {
                    self.bump();
                    if compounds.is_empty() {
                        return Err(self.error("empty selector group"));
                    }
                    groups.push(Complex {
                        compounds: std::mem::take(&mut compounds),
                    });
                    self.skip_whitespace();
                }
                Some(_) => {
                    let compound = self.parse_compound()?;
                    compounds.push(compound);
                    self.skip_whitespace();
                }
            }
        }
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.bump();
            compound.tag = Some("*".to_string());
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.parse_attribute()?);
                }
                None | Some(',') => break,
                Some(c) if c.is_whitespace() => break,
                Some(c) => return Err(self.error(format!("unexpected character `{}`", c))),
            }
        }

        if compound.is_empty() {
            return Err(self.error("empty compound selector"));
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> Result<AttributeMatcher> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();

        let matcher = match self.bump() {
            Some(']') => return Ok(AttributeMatcher::Exists(name)),
            Some('=') => {
                let value = self.parse_attribute_value()?;
                AttributeMatcher::Equals(name, value)
            }
            Some('^') if self.bump() == Some('=') => {
                let value = self.parse_attribute_value()?;
                AttributeMatcher::Prefix(name, value)
            }
            _ => return Err(self.error("malformed attribute selector")),
        };

        self.skip_whitespace();
        if self.bump() != Some(']') {
            return Err(self.error("unterminated attribute selector"));
        }
        Ok(matcher)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek() != Some(quote) {
                    return Err(self.error("unterminated string"));
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.bump();
                Ok(value)
            }
            _ => self.parse_ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
