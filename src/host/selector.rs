//! The CSS selector subset used by the controllers.
//!
//! Only compound selectors are supported: an optional tag followed by any
//! number of `#id`, `.class`, `[attr]`, `[attr="value"]` and `[attr^="value"]`
//! parts. Combinators and pseudo-classes are rejected.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`
    Exists(String),
    /// `[name="value"]`
    Equals(String, String),
    /// `[name^="value"]`
    Prefix(String, String),
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

/// The parts of an element a selector can look at.
pub struct ElementView<'a> {
    /// Lowercase tag name
    pub tag: &'a str,
    /// Class list
    pub classes: &'a [String],
    /// Attributes, `id` included
    pub attributes: &'a BTreeMap<String, String>,
}

impl Selector {
    /// Parses a selector.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Empty selector");
        }

        let chars: Vec<char> = input.chars().collect();
        let mut selector = Self::default();
        let mut pos = 0;

        if is_ident_char(chars[0]) {
            let tag = read_ident(&chars, &mut pos);
            selector.tag = Some(tag.to_lowercase());
        } else if chars[0] == '*' {
            pos += 1;
        }

        while pos < chars.len() {
            match chars[pos] {
                '#' => {
                    pos += 1;
                    let id = read_ident(&chars, &mut pos);
                    if id.is_empty() {
                        bail!("Missing id after '#' in selector: {}", input);
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    pos += 1;
                    let class = read_ident(&chars, &mut pos);
                    if class.is_empty() {
                        bail!("Missing class after '.' in selector: {}", input);
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    pos += 1;
                    selector.attrs.push(read_attr(&chars, &mut pos, input)?);
                }
                other => bail!("Unsupported character '{}' in selector: {}", other, input),
            }
        }

        Ok(selector)
    }

    /// Whether `element` satisfies every part of the selector.
    #[must_use]
    pub fn matches(&self, element: &ElementView<'_>) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(element.tag) {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if element.attributes.get("id") != Some(id) {
                return false;
            }
        }

        if !self
            .classes
            .iter()
            .all(|class| element.classes.iter().any(|c| c == class))
        {
            return false;
        }

        self.attrs.iter().all(|attr| match attr {
            AttrMatch::Exists(name) => element.attributes.contains_key(name),
            AttrMatch::Equals(name, value) => element.attributes.get(name) == Some(value),
            AttrMatch::Prefix(name, prefix) => element
                .attributes
                .get(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        })
    }
}

impl FromStr for Selector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn read_attr(chars: &[char], pos: &mut usize, input: &str) -> Result<AttrMatch> {
    let name = read_ident(chars, pos);
    if name.is_empty() {
        bail!("Missing attribute name in selector: {}", input);
    }

    match chars.get(*pos) {
        Some(']') => {
            *pos += 1;
            Ok(AttrMatch::Exists(name))
        }
        Some('=') => {
            *pos += 1;
            let value = read_attr_value(chars, pos, input)?;
            Ok(AttrMatch::Equals(name, value))
        }
        Some('^') if chars.get(*pos + 1) == Some(&'=') => {
            *pos += 2;
            let value = read_attr_value(chars, pos, input)?;
            Ok(AttrMatch::Prefix(name, value))
        }
        _ => bail!("Malformed attribute condition in selector: {}", input),
    }
}

fn read_attr_value(chars: &[char], pos: &mut usize, input: &str) -> Result<String> {
    let value = match chars.get(*pos) {
        Some(&quote @ ('"' | '\'')) => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                bail!("Unterminated attribute value in selector: {}", input);
            }
            let value: String = chars[start..*pos].iter().collect();
            *pos += 1;
            value
        }
        _ => read_ident(chars, pos),
    };

    if chars.get(*pos) != Some(&']') {
        bail!("Missing ']' in selector: {}", input);
    }
    *pos += 1;
    Ok(value)
}
