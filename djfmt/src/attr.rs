//! Attribute normalization.

use crate::helpers;
use itertools::Itertools;
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// An attribute as written in the source.
pub struct Attribute<'s> {
    pub name: &'s str,
    pub value: Option<&'s str>,
}

impl<'s> From<(&'s str, Option<&'s str>)> for Attribute<'s> {
    fn from((name, value): (&'s str, Option<&'s str>)) -> Self {
        Self { name, value }
    }
}

impl<'s> From<(&'s str, &'s str)> for Attribute<'s> {
    fn from((name, value): (&'s str, &'s str)) -> Self {
        Self {
            name,
            value: Some(value),
        }
    }
}

impl<'s> From<&'s str> for Attribute<'s> {
    fn from(name: &'s str) -> Self {
        Self { name, value: None }
    }
}

/// Lower-case `attr` only if that yields an attribute HTML knows for `tag_name`.
///
/// Anything else keeps its casing, since template engines and frameworks
/// inject case-sensitive attribute names.
pub fn canonical_name<'a>(tag_name: &str, attr: &'a str) -> Cow<'a, str> {
    if attr.chars().any(|c| c.is_ascii_uppercase()) {
        let lower = attr.to_ascii_lowercase();
        if helpers::is_known_attribute(tag_name, &lower) {
            Cow::Owned(lower)
        } else {
            Cow::Borrowed(attr)
        }
    } else {
        Cow::Borrowed(attr)
    }
}

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(value: &str) -> Cow<'_, str> {
    let trimmed = value.trim();
    let mut prev_space = false;
    let canonical = trimmed.chars().all(|c| {
        let ok = if c.is_whitespace() {
            c == ' ' && !prev_space
        } else {
            true
        };
        prev_space = c.is_whitespace();
        ok
    });
    if canonical {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(trimmed.split_whitespace().join(" "))
    }
}

/// Render `name="value"` or a bare `name` for a single attribute.
pub fn render_attribute(tag_name: &str, attr: &Attribute) -> String {
    let name = canonical_name(tag_name, attr.name);
    match attr.value {
        Some(value) if !value.is_empty() => {
            format!("{name}=\"{}\"", collapse_whitespace(value))
        }
        _ => name.into_owned(),
    }
}

/// Render all attributes with a leading space, or nothing when there are none.
pub fn render_attributes(tag_name: &str, attrs: &[Attribute]) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!(
            " {}",
            attrs
                .iter()
                .map(|attr| render_attribute(tag_name, attr))
                .join(" ")
        )
    }
}
