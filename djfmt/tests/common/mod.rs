use djfmt::script::Hints;
use std::{borrow::Cow, convert::Infallible};

/// Deterministic stand-in for a JavaScript/CSS beautifier.
///
/// Re-indents lines by brace depth starting at `indent_level`, drops
/// leading and trailing blank lines, and copies the continuation lines of
/// template literals verbatim, like a real beautifier does.
pub fn beautify(code: &str, hints: Hints) -> Result<Cow<'_, str>, Infallible> {
    let unit = hints.options.indent_unit();
    let mut depth = 0usize;
    let mut in_template = false;
    let mut lines: Vec<String> = Vec::new();

    for raw in code.lines() {
        if in_template {
            lines.push(raw.to_owned());
            in_template = raw.matches('`').count() % 2 == 0;
            continue;
        }

        let line = raw.trim();
        if line.is_empty() {
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        let leading_close = line.starts_with('}');
        if leading_close {
            depth = depth.saturating_sub(1);
        }
        lines.push(format!(
            "{}{line}",
            unit.repeat(hints.options.indent_level + depth)
        ));
        let opened = line.matches('{').count();
        let closed = line.matches('}').count() - usize::from(leading_close);
        depth = (depth + opened).saturating_sub(closed);
        in_template = line.matches('`').count() % 2 == 1;
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    Ok(Cow::from(lines.join("\n")))
}
