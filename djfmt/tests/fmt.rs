mod common;

use djfmt::{config::FormatOptions, format_text};
use insta::{Settings, assert_snapshot, glob};
use std::{fs, path::Path};

#[test]
fn fmt_snapshot() {
    glob!("fmt/**/*.html", |path| {
        let input = fs::read_to_string(path).unwrap();
        let output = run_format_test(path, &input, &Default::default());
        build_settings(path).bind(|| {
            let name = path.file_stem().unwrap().to_str().unwrap();
            assert_snapshot!(name, output);
        });
    });
}

fn run_format_test(path: &Path, input: &str, options: &FormatOptions) -> String {
    let output = format_text(input, options, common::beautify)
        .map_err(|err| format!("failed to format '{}': {:?}", path.display(), err))
        .unwrap();
    let regression_format = format_text(&output, options, common::beautify)
        .map_err(|err| {
            format!(
                "failed to format '{}' in stability test: {:?}",
                path.display(),
                err
            )
        })
        .unwrap();
    similar_asserts::assert_eq!(
        output,
        regression_format,
        "'{}' format is unstable",
        path.display()
    );

    output
}

fn build_settings(path: &Path) -> Settings {
    let mut settings = Settings::clone_current();
    settings.set_snapshot_path(path.parent().unwrap());
    settings.remove_snapshot_suffix();
    settings.set_prepend_module_to_snapshot(false);
    settings.remove_input_file();
    settings.set_omit_expression(true);
    settings.remove_info();
    settings
}

#[cfg(feature = "config_serde")]
#[test]
fn options_from_toml() {
    use djfmt::config::IndentChar;

    let options: FormatOptions = toml::from_str(
        r#"
indentWidth = 2

[script]
formatCss = false
ignoredBlocks = ['<div class="raw">.*?</div>']

[script.js]
indentSize = 3
"#,
    )
    .unwrap();

    assert_eq!(options.layout.indent_width, 2);
    assert!(!options.layout.use_tabs);
    assert!(options.script.format_js);
    assert!(!options.script.format_css);
    assert_eq!(options.js_options().indent_size, 3);
    assert_eq!(options.js_options().indent_char, IndentChar::Space);
    assert_eq!(options.css_options().indent_size, 2);

    let input = "<div class=\"raw\"><script>\nkeep();\n</script></div>\n<script>\nrun();\n</script>\n<style>\na {}\n</style>\n";
    let output = format_text(input, &options, common::beautify).unwrap();
    similar_asserts::assert_eq!(
        output,
        "<div class=\"raw\"><script>\nkeep();\n</script></div>\n<script>\n   run();\n</script>\n<style>\na {}\n</style>\n"
    );
}
