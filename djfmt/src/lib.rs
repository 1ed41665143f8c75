#![doc = include_str!("../README.md")]

pub mod attr;
pub mod config;
mod error;
mod helpers;
pub mod pattern;
pub mod script;
pub mod style;
pub mod tag;
mod unformatted;

use crate::{
    config::FormatOptions,
    pattern::PatternCache,
    script::{Hints, ScriptLanguage},
};
pub use crate::{
    attr::Attribute,
    error::*,
    tag::Tag,
    unformatted::{IgnoredBlocks, UnformattedBlocks},
};
use std::borrow::Cow;

/// Re-indent the `<script>` and `<style>` blocks of a document.
///
/// An external beautifier is required for formatting the code inside
/// those blocks. It's called twice per block, with `indent_level` set to
/// `1` and `2` in the [`Hints`]; the lines it indents differently between
/// both calls get the indentation of the opening tag.
///
/// ```
/// use djfmt::format_text;
/// use std::borrow::Cow;
///
/// let code = "<div>\n    <script>\nfoo();\n    </script>\n</div>";
///
/// let formatted = format_text(code, &Default::default(), |code, hints| {
///     let indent = hints.options.indent_unit().repeat(hints.options.indent_level);
///     let lines: Vec<_> = code
///         .lines()
///         .map(str::trim)
///         .filter(|line| !line.is_empty())
///         .map(|line| format!("{indent}{line}"))
///         .collect();
///     Ok::<_, std::convert::Infallible>(Cow::from(lines.join("\n")))
/// })
/// .unwrap();
///
/// assert_eq!(formatted, "<div>\n    <script>\n        foo();\n    </script>\n</div>");
/// ```
///
/// Regions matched by [`ScriptOptions::ignored_blocks`](config::ScriptOptions::ignored_blocks),
/// or by [`IgnoredBlocks::DEFAULT_PATTERNS`] if unset, are left untouched.
pub fn format_text<E, F>(
    code: &str,
    options: &FormatOptions,
    beautifier: F,
) -> Result<String, FormatError<E>>
where
    F: for<'a> FnMut(&'a str, Hints) -> Result<Cow<'a, str>, E>,
{
    let cache = PatternCache::global();
    let ignored = match &options.script.ignored_blocks {
        Some(patterns) => IgnoredBlocks::new(patterns, cache)?,
        None => IgnoredBlocks::with_defaults(cache)?,
    };
    format_text_with(code, options, &ignored, beautifier)
}

/// Same as [`format_text`], but asks `unformatted` which blocks to leave alone.
pub fn format_text_with<E, F, U>(
    code: &str,
    options: &FormatOptions,
    unformatted: &U,
    mut beautifier: F,
) -> Result<String, FormatError<E>>
where
    U: UnformattedBlocks + ?Sized,
    F: for<'a> FnMut(&'a str, Hints) -> Result<Cow<'a, str>, E>,
{
    let mut code = Cow::Borrowed(code);
    if options.script.format_js {
        code = Cow::Owned(
            script::reformat(
                &code,
                ScriptLanguage::JavaScript,
                &options.js_options(),
                unformatted,
                &mut beautifier,
            )?
            .into_owned(),
        );
    }
    if options.script.format_css {
        code = Cow::Owned(
            script::reformat(
                &code,
                ScriptLanguage::Css,
                &options.css_options(),
                unformatted,
                &mut beautifier,
            )?
            .into_owned(),
        );
    }
    Ok(code.into_owned())
}
