//! Default rendering styles of HTML elements.
//!
//! The table below follows the user-agent stylesheet of the HTML rendering
//! section, trimmed to the properties formatting decisions depend on.
//! Lookups don't implement the cascade: for a given property, each selector
//! simply maps to the value of the last rule in table order declaring it.

use parking_lot::RwLock;
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, OnceLock},
};

/// One rule of a style table: a comma-separated selector list and its declarations.
#[derive(Clone, Copy, Debug)]
pub struct StyleRule {
    pub selectors: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

impl StyleRule {
    pub fn get(&self, property: &str) -> Option<&'static str> {
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| *value)
    }
}

const fn rule(
    selectors: &'static str,
    declarations: &'static [(&'static str, &'static str)],
) -> StyleRule {
    StyleRule {
        selectors,
        declarations,
    }
}

pub static HTML_STYLES: &[StyleRule] = &[
    rule(
        "[hidden], area, base, basefont, datalist, head, link, meta, noembed, noframes, param, rp, script, style, template, title",
        &[("display", "none")],
    ),
    rule("html, body", &[("display", "block")]),
    rule(
        "address, blockquote, center, dialog, div, figure, figcaption, footer, form, header, hr, legend, listing, main, p, plaintext, pre, search, xmp",
        &[("display", "block")],
    ),
    rule("dialog:not([open])", &[("display", "none")]),
    rule("slot", &[("display", "contents")]),
    rule("pre[wrap]", &[("white-space", "pre-wrap")]),
    rule(
        "listing, plaintext, pre, xmp",
        &[("font-family", "monospace"), ("white-space", "pre")],
    ),
    rule("ruby", &[("display", "ruby")]),
    rule("rt", &[("display", "ruby-text")]),
    rule(
        "article, aside, h1, h2, h3, h4, h5, h6, hgroup, nav, section",
        &[("display", "block")],
    ),
    rule(
        "dir, dd, dl, dt, menu, ol, ul",
        &[("display", "block")],
    ),
    rule("li", &[("display", "list-item"), ("text-align", "match-parent")]),
    rule("table", &[("display", "table")]),
    rule("caption", &[("display", "table-caption")]),
    rule("colgroup, colgroup[hidden]", &[("display", "table-column-group")]),
    rule("col, col[hidden]", &[("display", "table-column")]),
    rule("thead, thead[hidden]", &[("display", "table-header-group")]),
    rule("tbody, tbody[hidden]", &[("display", "table-row-group")]),
    rule("tfoot, tfoot[hidden]", &[("display", "table-footer-group")]),
    rule("tr, tr[hidden]", &[("display", "table-row")]),
    rule("td, th", &[("display", "table-cell")]),
    rule("td[nowrap], th[nowrap]", &[("white-space", "nowrap")]),
    rule("input, select, button, textarea", &[("display", "inline-block")]),
    rule("input, select, textarea", &[("text-indent", "initial")]),
    rule("textarea", &[("white-space", "pre-wrap")]),
    rule("fieldset", &[("display", "block"), ("margin-inline", "2px")]),
    rule("details, summary", &[("display", "block")]),
    rule("details > summary:first-of-type", &[("display", "list-item")]),
    rule("marquee", &[("display", "inline-block"), ("text-align", "initial")]),
    rule("meter, progress", &[("display", "inline-block")]),
    rule("nobr", &[("white-space", "nowrap")]),
    rule("wbr", &[("content", "'\\200B'")]),
    rule("frameset", &[("display", "block")]),
    rule("optgroup", &[("display", "block")]),
    rule("img:is([sizes=\"auto\" i], [sizes^=\"auto,\" i])", &[("contain", "size")]),
    rule("video", &[("object-fit", "contain")]),
    rule("iframe", &[("border", "2px inset")]),
    rule("embed[hidden]", &[("display", "inline"), ("height", "0"), ("width", "0")]),
    rule("input[type=hidden i]", &[("display", "none")]),
];

/// Elements whose formatting must not follow the table defaults.
static DISPLAY_OVERRIDES: [(&str, &str); 17] = [
    ("button", "inline-block"),
    ("template", "inline"),
    ("source", "block"),
    ("track", "block"),
    ("script", "block"),
    ("param", "block"),
    ("details", "block"),
    ("summary", "block"),
    ("dialog", "block"),
    ("meter", "inline-block"),
    ("progress", "inline-block"),
    ("object", "inline-block"),
    ("video", "inline-block"),
    ("audio", "inline-block"),
    ("select", "inline-block"),
    ("option", "block"),
    ("optgroup", "block"),
];

/// Resolved values of one property, keyed by individual selector.
pub type PropertyMap = HashMap<&'static str, &'static str>;

/// Per-property view over a static style table.
///
/// Resolved properties are memoized for the lifetime of the lookup.
pub struct StyleLookup {
    rules: &'static [StyleRule],
    resolved: RwLock<HashMap<String, Arc<PropertyMap>>>,
    display: OnceLock<Arc<PropertyMap>>,
}

static HTML: LazyLock<StyleLookup> = LazyLock::new(|| StyleLookup::new(HTML_STYLES));

impl StyleLookup {
    pub fn new(rules: &'static [StyleRule]) -> Self {
        Self {
            rules,
            resolved: RwLock::new(HashMap::new()),
            display: OnceLock::new(),
        }
    }

    /// Lookup over the built-in HTML style table.
    pub fn html() -> &'static StyleLookup {
        &HTML
    }

    pub fn rules(&self) -> &'static [StyleRule] {
        self.rules
    }

    /// Map each selector declaring `property` to its value, the last rule winning.
    pub fn resolve_property(&self, property: &str) -> Arc<PropertyMap> {
        if let Some(map) = self.resolved.read().get(property) {
            return Arc::clone(map);
        }
        let mut resolved = self.resolved.write();
        Arc::clone(
            resolved
                .entry(property.to_owned())
                .or_insert_with(|| Arc::new(resolve(self.rules, property))),
        )
    }

    /// `display` values, with the formatter overrides taking precedence over the table.
    pub fn display(&self) -> Arc<PropertyMap> {
        Arc::clone(self.display.get_or_init(|| {
            let mut display = resolve(self.rules, "display");
            display.extend(DISPLAY_OVERRIDES);
            Arc::new(display)
        }))
    }

    pub fn white_space(&self) -> Arc<PropertyMap> {
        self.resolve_property("white-space")
    }
}

fn resolve(rules: &'static [StyleRule], property: &str) -> PropertyMap {
    rules
        .iter()
        .filter_map(|rule| rule.get(property).map(|value| (rule.selectors, value)))
        .flat_map(|(selectors, value)| {
            selectors
                .split(',')
                .map(str::trim)
                .map(move |selector| (selector, value))
        })
        .collect()
}
