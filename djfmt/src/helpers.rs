use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

static HTML_TAG_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    css_dataset::tags::STANDARD_HTML_TAGS
        .iter()
        .chain(css_dataset::tags::NON_STANDARD_HTML_TAGS.iter())
        .copied()
        .collect()
});

/// Whether `name` is a recognized HTML tag name. Case-sensitive; names are lower case.
pub(crate) fn is_html_tag(name: &str) -> bool {
    HTML_TAG_NAMES.contains(name)
}

static VOID_ELEMENTS: [&str; 20] = [
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr", "image",
    "img", "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

pub(crate) fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

static GLOBAL_ATTRIBUTES: [&str; 28] = [
    "accesskey",
    "autocapitalize",
    "autofocus",
    "class",
    "contenteditable",
    "dir",
    "draggable",
    "enterkeyhint",
    "hidden",
    "id",
    "inert",
    "inputmode",
    "is",
    "itemid",
    "itemprop",
    "itemref",
    "itemscope",
    "itemtype",
    "lang",
    "nonce",
    "popover",
    "slot",
    "spellcheck",
    "style",
    "tabindex",
    "title",
    "translate",
    "writingsuggestions",
];

static ELEMENT_ATTRIBUTES: &[(&str, &[&str])] = &[
    (
        "a",
        &[
            "charset",
            "coords",
            "download",
            "href",
            "hreflang",
            "name",
            "ping",
            "referrerpolicy",
            "rel",
            "rev",
            "shape",
            "target",
            "type",
        ],
    ),
    ("applet", &["align", "alt", "archive", "code", "codebase", "height", "hspace", "name", "object", "vspace", "width"]),
    (
        "area",
        &[
            "alt",
            "coords",
            "download",
            "href",
            "hreflang",
            "nohref",
            "ping",
            "referrerpolicy",
            "rel",
            "shape",
            "target",
            "type",
        ],
    ),
    ("audio", &["autoplay", "controls", "crossorigin", "loop", "muted", "preload", "src"]),
    ("base", &["href", "target"]),
    ("basefont", &["color", "face", "size"]),
    ("blockquote", &["cite"]),
    ("body", &["alink", "background", "bgcolor", "link", "text", "vlink"]),
    ("br", &["clear"]),
    (
        "button",
        &[
            "disabled",
            "form",
            "formaction",
            "formenctype",
            "formmethod",
            "formnovalidate",
            "formtarget",
            "name",
            "popovertarget",
            "popovertargetaction",
            "type",
            "value",
        ],
    ),
    ("canvas", &["height", "width"]),
    ("caption", &["align"]),
    ("col", &["align", "char", "charoff", "span", "valign", "width"]),
    ("colgroup", &["align", "char", "charoff", "span", "valign", "width"]),
    ("data", &["value"]),
    ("del", &["cite", "datetime"]),
    ("details", &["name", "open"]),
    ("dialog", &["open"]),
    ("dir", &["compact"]),
    ("div", &["align"]),
    ("dl", &["compact"]),
    ("embed", &["height", "src", "type", "width"]),
    ("fieldset", &["disabled", "form", "name"]),
    ("font", &["color", "face", "size"]),
    (
        "form",
        &[
            "accept",
            "accept-charset",
            "action",
            "autocomplete",
            "enctype",
            "method",
            "name",
            "novalidate",
            "target",
        ],
    ),
    ("frame", &["frameborder", "longdesc", "marginheight", "marginwidth", "name", "noresize", "scrolling", "src"]),
    ("frameset", &["cols", "rows"]),
    ("h1", &["align"]),
    ("h2", &["align"]),
    ("h3", &["align"]),
    ("h4", &["align"]),
    ("h5", &["align"]),
    ("h6", &["align"]),
    ("head", &["profile"]),
    ("hr", &["align", "noshade", "size", "width"]),
    ("html", &["manifest", "version"]),
    (
        "iframe",
        &[
            "align",
            "allow",
            "allowfullscreen",
            "allowpaymentrequest",
            "allowusermedia",
            "frameborder",
            "height",
            "loading",
            "longdesc",
            "marginheight",
            "marginwidth",
            "name",
            "referrerpolicy",
            "sandbox",
            "scrolling",
            "src",
            "srcdoc",
            "width",
        ],
    ),
    (
        "img",
        &[
            "align",
            "alt",
            "border",
            "crossorigin",
            "decoding",
            "fetchpriority",
            "height",
            "hspace",
            "ismap",
            "loading",
            "longdesc",
            "name",
            "referrerpolicy",
            "sizes",
            "src",
            "srcset",
            "usemap",
            "vspace",
            "width",
        ],
    ),
    (
        "input",
        &[
            "accept",
            "align",
            "alt",
            "autocomplete",
            "checked",
            "dirname",
            "disabled",
            "form",
            "formaction",
            "formenctype",
            "formmethod",
            "formnovalidate",
            "formtarget",
            "height",
            "ismap",
            "list",
            "max",
            "maxlength",
            "min",
            "minlength",
            "multiple",
            "name",
            "pattern",
            "placeholder",
            "popovertarget",
            "popovertargetaction",
            "readonly",
            "required",
            "size",
            "src",
            "step",
            "type",
            "usemap",
            "value",
            "width",
        ],
    ),
    ("ins", &["cite", "datetime"]),
    ("isindex", &["prompt"]),
    ("label", &["for", "form"]),
    ("legend", &["align"]),
    ("li", &["type", "value"]),
    (
        "link",
        &[
            "as",
            "blocking",
            "charset",
            "color",
            "crossorigin",
            "disabled",
            "fetchpriority",
            "href",
            "hreflang",
            "imagesizes",
            "imagesrcset",
            "integrity",
            "media",
            "referrerpolicy",
            "rel",
            "rev",
            "sizes",
            "target",
            "type",
        ],
    ),
    ("map", &["name"]),
    ("menu", &["compact"]),
    ("meta", &["charset", "content", "http-equiv", "media", "name", "scheme"]),
    ("meter", &["high", "low", "max", "min", "optimum", "value"]),
    (
        "object",
        &[
            "align",
            "archive",
            "border",
            "classid",
            "codebase",
            "codetype",
            "data",
            "declare",
            "form",
            "height",
            "hspace",
            "name",
            "standby",
            "type",
            "typemustmatch",
            "usemap",
            "vspace",
            "width",
        ],
    ),
    ("ol", &["compact", "reversed", "start", "type"]),
    ("optgroup", &["disabled", "label"]),
    ("option", &["disabled", "label", "selected", "value"]),
    ("output", &["for", "form", "name"]),
    ("p", &["align"]),
    ("param", &["name", "type", "value", "valuetype"]),
    ("pre", &["width"]),
    ("progress", &["max", "value"]),
    ("q", &["cite"]),
    (
        "script",
        &[
            "async",
            "blocking",
            "charset",
            "crossorigin",
            "defer",
            "fetchpriority",
            "integrity",
            "language",
            "nomodule",
            "referrerpolicy",
            "src",
            "type",
        ],
    ),
    ("select", &["autocomplete", "disabled", "form", "multiple", "name", "required", "size"]),
    ("slot", &["name"]),
    ("source", &["height", "media", "sizes", "src", "srcset", "type", "width"]),
    ("style", &["blocking", "media", "type"]),
    (
        "table",
        &[
            "align",
            "bgcolor",
            "border",
            "cellpadding",
            "cellspacing",
            "frame",
            "rules",
            "summary",
            "width",
        ],
    ),
    ("tbody", &["align", "char", "charoff", "valign"]),
    (
        "td",
        &[
            "abbr", "align", "axis", "bgcolor", "char", "charoff", "colspan", "headers", "height",
            "nowrap", "rowspan", "scope", "valign", "width",
        ],
    ),
    (
        "template",
        &[
            "shadowrootclonable",
            "shadowrootdelegatesfocus",
            "shadowrootmode",
        ],
    ),
    (
        "textarea",
        &[
            "autocomplete",
            "cols",
            "dirname",
            "disabled",
            "form",
            "maxlength",
            "minlength",
            "name",
            "placeholder",
            "readonly",
            "required",
            "rows",
            "wrap",
        ],
    ),
    ("tfoot", &["align", "char", "charoff", "valign"]),
    (
        "th",
        &[
            "abbr", "align", "axis", "bgcolor", "char", "charoff", "colspan", "headers", "height",
            "nowrap", "rowspan", "scope", "valign", "width",
        ],
    ),
    ("thead", &["align", "char", "charoff", "valign"]),
    ("time", &["datetime"]),
    ("tr", &["align", "bgcolor", "char", "charoff", "valign"]),
    ("track", &["default", "kind", "label", "src", "srclang"]),
    ("ul", &["compact", "type"]),
    (
        "video",
        &[
            "autoplay",
            "controls",
            "crossorigin",
            "height",
            "loop",
            "muted",
            "playsinline",
            "poster",
            "preload",
            "src",
            "width",
        ],
    ),
];

static ELEMENT_ATTRIBUTES_BY_TAG: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| ELEMENT_ATTRIBUTES.iter().copied().collect());

/// Whether `attr` is a global attribute or one defined for `tag_name`.
/// Both are expected in lower case.
pub(crate) fn is_known_attribute(tag_name: &str, attr: &str) -> bool {
    GLOBAL_ATTRIBUTES.contains(&attr)
        || ELEMENT_ATTRIBUTES_BY_TAG
            .get(tag_name)
            .is_some_and(|attrs| attrs.contains(&attr))
}

pub(crate) static SCRIPT_OPENER_AC: LazyLock<Option<AhoCorasick>> = LazyLock::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(["<script", "<style"])
        .ok()
});

/// Split `text` into lines on every Unicode line boundary, `\r\n` counting as one.
///
/// Unlike [`str::lines`], a lone `\r`, vertical tab, form feed, the
/// separator controls `\x1c`-`\x1e`, NEL and the Unicode line and paragraph
/// separators also end a line. A trailing boundary doesn't start an extra line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.char_indices().find(|(_, c)| is_line_boundary(*c)) {
            Some((i, c)) => {
                let tail = &rest[i + c.len_utf8()..];
                let tail = if c == '\r' {
                    tail.strip_prefix('\n').unwrap_or(tail)
                } else {
                    tail
                };
                (&rest[..i], tail)
            }
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
