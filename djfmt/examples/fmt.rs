use djfmt::{config::FormatOptions, format_text, script::Hints};
use std::{borrow::Cow, convert::Infallible, env, error::Error, fs, io};

/// Stand-in for a real beautifier: re-indents lines by brace depth.
fn beautify(code: &str, hints: Hints) -> Result<Cow<'_, str>, Infallible> {
    let unit = hints.options.indent_unit();
    let mut depth = hints.options.indent_level;
    let lines = code
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with(['}', ']', ')']) {
                depth = depth.saturating_sub(1);
            }
            let indented = format!("{}{line}", unit.repeat(depth));
            let opened = line.matches(['{', '[', '(']).count();
            let closed = line.matches(['}', ']', ')']).count()
                - usize::from(line.starts_with(['}', ']', ')']));
            depth = (depth + opened).saturating_sub(closed);
            indented
        })
        .collect::<Vec<_>>();
    Ok(Cow::from(lines.join("\n")))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let file_path = env::args().nth(1).ok_or("missing file path")?;
    let code = fs::read_to_string(file_path)?;
    let options = match fs::read_to_string("djfmt.toml") {
        Ok(s) => toml::from_str(&s)?,
        Err(error) => {
            if error.kind() == io::ErrorKind::NotFound {
                FormatOptions::default()
            } else {
                return Err(Box::new(error));
            }
        }
    };

    let formatted = format_text(&code, &options, beautify)?;
    print!("{formatted}");
    Ok(())
}
