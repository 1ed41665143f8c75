//! Types about configuration.

#[cfg(feature = "config_serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// The whole configuration of djfmt.
pub struct FormatOptions {
    #[cfg_attr(feature = "config_serde", serde(flatten))]
    pub layout: LayoutOptions,
    pub script: ScriptOptions,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Configuration related to layout, such as indentation.
pub struct LayoutOptions {
    /// Indentation width of the surrounding markup.
    pub indent_width: usize,
    pub use_tabs: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
        }
    }
}

impl FormatOptions {
    /// Options for the JavaScript beautifier, derived from the layout unless set explicitly.
    pub fn js_options(&self) -> BeautifierOptions {
        self.script
            .js
            .clone()
            .unwrap_or_else(|| BeautifierOptions::from_layout(&self.layout))
    }

    /// Options for the CSS beautifier, derived from the layout unless set explicitly.
    pub fn css_options(&self) -> BeautifierOptions {
        self.script
            .css
            .clone()
            .unwrap_or_else(|| BeautifierOptions::from_layout(&self.layout))
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Configuration of embedded `<script>` and `<style>` formatting.
pub struct ScriptOptions {
    /// Reformat the contents of `<script>` tags.
    pub format_js: bool,
    /// Reformat the contents of `<style>` tags.
    pub format_css: bool,
    /// Options handed to the JavaScript beautifier.
    pub js: Option<BeautifierOptions>,
    /// Options handed to the CSS beautifier.
    pub css: Option<BeautifierOptions>,
    /// Patterns of regions left untouched.
    /// `None` uses [`IgnoredBlocks::DEFAULT_PATTERNS`](crate::IgnoredBlocks::DEFAULT_PATTERNS).
    pub ignored_blocks: Option<Vec<String>>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            format_js: true,
            format_css: true,
            js: None,
            css: None,
            ignored_blocks: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase", default))]
/// Options understood by an external beautifier.
///
/// The beautifier can't take an arbitrary left margin, only a number of
/// indentation steps (`indent_level`) prepended to every line it reindents.
pub struct BeautifierOptions {
    pub indent_size: usize,
    pub indent_char: IndentChar,
    /// Initial indentation, in steps of `indent_size`.
    pub indent_level: usize,
    pub preserve_newlines: bool,
    pub max_preserve_newlines: usize,
    pub end_with_newline: bool,
}

impl Default for BeautifierOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            indent_char: IndentChar::Space,
            indent_level: 0,
            preserve_newlines: true,
            max_preserve_newlines: 10,
            end_with_newline: false,
        }
    }
}

impl BeautifierOptions {
    pub fn from_layout(layout: &LayoutOptions) -> Self {
        Self {
            indent_size: layout.indent_width,
            indent_char: if layout.use_tabs {
                IndentChar::Tab
            } else {
                IndentChar::Space
            },
            ..Default::default()
        }
    }

    /// One indentation step as text.
    pub fn indent_unit(&self) -> String {
        match self.indent_char {
            IndentChar::Space => " ".repeat(self.indent_size),
            IndentChar::Tab => "\t".to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config_serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_serde", serde(rename_all = "camelCase"))]
pub enum IndentChar {
    #[default]
    Space,
    Tab,
}
