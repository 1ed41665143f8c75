//! Re-indentation of embedded `<script>` and `<style>` blocks.
//!
//! External beautifiers only accept a number of indentation steps, while a
//! block nested in markup needs its lines shifted by an arbitrary column.
//! So the block is beautified twice, at one and at two steps. Lines that
//! differ between both runs are the ones the beautifier indents, and they
//! receive the margin of the opening tag; lines that come out identical
//! (like the continuation of a multi-line string) are emitted untouched.

use crate::{
    config::BeautifierOptions,
    error::FormatError,
    helpers,
    pattern::{Captured, Flags, PatternCache},
    unformatted::UnformattedBlocks,
};
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Language embedded in a block.
pub enum ScriptLanguage {
    /// Contents of `<script>` tags.
    JavaScript,
    /// Contents of `<style>` tags.
    Css,
}

impl ScriptLanguage {
    /// Host element name.
    pub fn tag_name(self) -> &'static str {
        match self {
            ScriptLanguage::JavaScript => "script",
            ScriptLanguage::Css => "style",
        }
    }

    /// File extension of the embedded language.
    pub fn ext(self) -> &'static str {
        match self {
            ScriptLanguage::JavaScript => "js",
            ScriptLanguage::Css => "css",
        }
    }

    /// Leading indent, opening tag, contents and closing tag.
    ///
    /// Free of look-around, so matching stays linear in the document size.
    fn region_pattern(self) -> &'static str {
        match self {
            ScriptLanguage::JavaScript => {
                r#"([ ]*?)(<(?:script)\b(?:"[^"]*"|'[^']*'|\{[^}]*\}|[^'">{}])*>)(.*?)(</script>)"#
            }
            ScriptLanguage::Css => {
                r#"([ ]*?)(<(?:style)\b(?:"[^"]*"|'[^']*'|\{[^}]*\}|[^'">{}])*>)(.*?)(</style>)"#
            }
        }
    }

    fn opener_index(self) -> usize {
        match self {
            ScriptLanguage::JavaScript => 0,
            ScriptLanguage::Css => 1,
        }
    }
}

#[derive(Clone, Debug)]
/// Information passed to the beautifier together with the code.
pub struct Hints {
    pub language: ScriptLanguage,
    /// File extension of the code, such as `js` or `css`.
    pub ext: &'static str,
    /// Beautifier options; `indent_level` differs between the two runs.
    pub options: BeautifierOptions,
}

/// Re-indent every `language` block of `document`.
///
/// Blocks inside a region `unformatted` reports, and blocks without any
/// content, are copied as they are. Errors from `beautifier` are returned
/// as [`FormatError::External`].
pub fn reformat<'d, E, F, U>(
    document: &'d str,
    language: ScriptLanguage,
    options: &BeautifierOptions,
    unformatted: &U,
    mut beautifier: F,
) -> Result<Cow<'d, str>, FormatError<E>>
where
    U: UnformattedBlocks + ?Sized,
    F: for<'a> FnMut(&'a str, Hints) -> Result<Cow<'a, str>, E>,
{
    if !may_contain(document, language) {
        return Ok(Cow::Borrowed(document));
    }

    let pattern = PatternCache::global().compile(
        language.region_pattern(),
        Flags::IGNORE_CASE | Flags::DOT_ALL,
    )?;
    pattern
        .substitute_with(document, |captured| {
            reformat_block(
                document,
                captured,
                language,
                options,
                unformatted,
                &mut beautifier,
            )
        })
        .map(Cow::Owned)
}

fn may_contain(document: &str, language: ScriptLanguage) -> bool {
    helpers::SCRIPT_OPENER_AC.as_ref().is_none_or(|ac| {
        ac.find_iter(document)
            .any(|m| m.pattern().as_usize() == language.opener_index())
    })
}

fn reformat_block<E, F, U>(
    document: &str,
    captured: &Captured<'_>,
    language: ScriptLanguage,
    options: &BeautifierOptions,
    unformatted: &U,
    beautifier: &mut F,
) -> Result<String, FormatError<E>>
where
    U: UnformattedBlocks + ?Sized,
    F: for<'a> FnMut(&'a str, Hints) -> Result<Cow<'a, str>, E>,
{
    let indent = captured.group(1);
    let open_tag = captured.group(2);
    let content = captured.group(3);
    let close_tag = captured.group(4);
    let block = captured.start()..captured.end() - close_tag.len();

    if unformatted.contains(document, block) {
        log::debug!(
            "skipping <{}> at {} inside unformatted block",
            language.tag_name(),
            captured.start()
        );
        return Ok(captured.as_str().to_owned());
    }
    if content.trim().is_empty() {
        return Ok(captured.as_str().to_owned());
    }

    let margin = " ".repeat(indent.len());
    let beautified = beautify(content, language, options, 1, beautifier)?;
    let probe = beautify(content, language, options, 2, beautifier)?;

    let (lines, probe_lines) = (
        helpers::split_lines(&beautified).count(),
        helpers::split_lines(&probe).count(),
    );
    if lines != probe_lines {
        log::warn!(
            "beautifier returned {lines} and {probe_lines} lines for the same <{}> at {}; \
             extra lines are dropped",
            language.tag_name(),
            captured.start()
        );
    }

    let mut output = String::with_capacity(captured.as_str().len() + margin.len() * lines);
    output.push_str(indent);
    output.push_str(open_tag);
    for (line, probe_line) in helpers::split_lines(&beautified).zip(helpers::split_lines(&probe)) {
        output.push('\n');
        if line != probe_line {
            output.push_str(&margin);
        }
        output.push_str(line);
    }
    output.push('\n');
    output.push_str(&margin);
    output.push_str(close_tag);
    Ok(output)
}

fn beautify<'a, E, F>(
    content: &'a str,
    language: ScriptLanguage,
    options: &BeautifierOptions,
    indent_level: usize,
    beautifier: &mut F,
) -> Result<Cow<'a, str>, FormatError<E>>
where
    F: for<'c> FnMut(&'c str, Hints) -> Result<Cow<'c, str>, E>,
{
    let hints = Hints {
        language,
        ext: language.ext(),
        options: BeautifierOptions {
            indent_level,
            ..options.clone()
        },
    };
    beautifier(content, hints).map_err(|error| FormatError::External(error, content.to_owned()))
}
