//! Per-element classification.
//!
//! A [`Tag`] is built once for every element the driver walks over and tells
//! it how the element may be laid out: whether whitespace around it matters,
//! whether its contents must keep their indentation, and whether it is a
//! void or an embedded-script element.

use crate::{
    attr::{self, Attribute},
    helpers,
    style::StyleLookup,
};
use std::borrow::Cow;

const DEFAULT_DISPLAY: &str = "inline";
const DEFAULT_WHITE_SPACE: &str = "normal";

#[derive(Clone, Debug)]
pub struct Tag<'s> {
    raw_name: &'s str,
    namespace: Option<&'s str>,
    name: Cow<'s, str>,
    parent: Option<&'s Tag<'s>>,
    attributes: Vec<Attribute<'s>>,
    data: Option<&'s str>,
    is_space_sensitive: bool,
    is_pre: bool,
    is_script: bool,
    is_void: bool,
}

impl<'s> Tag<'s> {
    /// Classify an element against the built-in HTML tables.
    pub fn new(
        raw_name: &'s str,
        parent: Option<&'s Tag<'s>>,
        attributes: Vec<Attribute<'s>>,
    ) -> Self {
        Self::with_lookup(raw_name, parent, attributes, StyleLookup::html())
    }

    /// Classify an element, resolving display and white-space through `styles`.
    pub fn with_lookup(
        raw_name: &'s str,
        parent: Option<&'s Tag<'s>>,
        attributes: Vec<Attribute<'s>>,
        styles: &StyleLookup,
    ) -> Self {
        let (namespace, name) = split_namespace(raw_name);
        let name = canonical_tag_name(name);

        let display = styles.display();
        let display = display.get(&*name).copied().unwrap_or(DEFAULT_DISPLAY);
        let is_space_sensitive = !display.starts_with("table")
            && !matches!(display, "block" | "list-item" | "inline-block" | "none");

        let white_space = styles.white_space();
        let is_pre = white_space
            .get(&*name)
            .copied()
            .unwrap_or(DEFAULT_WHITE_SPACE)
            .starts_with("pre");

        // namespaced variants such as `svg:style` have lost their prefix by now
        let is_script = matches!(&*name, "script" | "style");
        let is_void = helpers::is_void_element(&name);

        Self {
            raw_name,
            namespace,
            name,
            parent,
            attributes,
            data: None,
            is_space_sensitive,
            is_pre,
            is_script,
            is_void,
        }
    }

    /// Attach the text content the driver collected for this element.
    pub fn with_data(mut self, data: &'s str) -> Self {
        self.data = Some(data);
        self
    }

    pub fn raw_name(&self) -> &'s str {
        self.raw_name
    }

    pub fn namespace(&self) -> Option<&'s str> {
        self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&'s Tag<'s>> {
        self.parent
    }

    pub fn attributes(&self) -> &[Attribute<'s>] {
        &self.attributes
    }

    pub fn data(&self) -> Option<&'s str> {
        self.data
    }

    /// Whitespace around this element changes what gets rendered.
    pub fn is_space_sensitive(&self) -> bool {
        self.is_space_sensitive
    }

    /// Contents must keep their original indentation.
    pub fn is_indentation_sensitive(&self) -> bool {
        self.is_pre
    }

    pub fn is_pre(&self) -> bool {
        self.is_pre
    }

    /// Hosts an embedded language (`<script>`, `<style>`).
    pub fn is_script(&self) -> bool {
        self.is_script
    }

    pub fn is_void(&self) -> bool {
        self.is_void
    }

    /// Whether the enclosing element is space- or indentation-sensitive.
    pub fn parent_is_sensitive(&self) -> bool {
        self.parent
            .is_some_and(|parent| parent.is_indentation_sensitive() || parent.is_space_sensitive())
    }

    /// Normalized attribute list, with a leading space unless empty.
    pub fn attributes_string(&self) -> String {
        attr::render_attributes(&self.name, &self.attributes)
    }

    /// `<name attrs>`, or `<name attrs />` for void elements.
    pub fn open_tag(&self) -> String {
        format!(
            "<{}{}{}",
            self.name,
            self.attributes_string(),
            self.tag_closing()
        )
    }

    /// `</name>`, or nothing for void elements.
    pub fn close_tag(&self) -> String {
        if self.is_void {
            String::new()
        } else {
            format!("</{}{}", self.name, self.tag_closing())
        }
    }

    fn tag_closing(&self) -> &'static str {
        if self.is_void { " />" } else { ">" }
    }
}

fn split_namespace(raw_name: &str) -> (Option<&str>, &str) {
    match memchr::memchr(b':', raw_name.as_bytes()) {
        Some(i) => (Some(&raw_name[..i]), &raw_name[i + 1..]),
        None => (None, raw_name),
    }
}

/// Lower-case `name` if that makes it a known HTML tag; keep it verbatim otherwise.
pub fn canonical_tag_name(name: &str) -> Cow<'_, str> {
    if helpers::is_html_tag(name) {
        return Cow::Borrowed(name);
    }
    let lower = name.to_lowercase();
    if helpers::is_html_tag(&lower) {
        Cow::Owned(lower)
    } else {
        Cow::Borrowed(name)
    }
}
