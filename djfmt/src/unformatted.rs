//! Regions of a document that must pass through unmodified.

use crate::{
    error::PatternError,
    pattern::{CompiledPattern, Flags, PatternCache},
};
use std::ops::Range;

/// Decides whether a span of a document lies inside a block excluded from formatting.
pub trait UnformattedBlocks {
    fn contains(&self, document: &str, span: Range<usize>) -> bool;
}

impl<F> UnformattedBlocks for F
where
    F: Fn(&str, Range<usize>) -> bool,
{
    fn contains(&self, document: &str, span: Range<usize>) -> bool {
        self(document, span)
    }
}

/// Unformatted blocks described by patterns.
///
/// A span belongs to a block when the block starts before the span and
/// doesn't end before it.
#[derive(Clone, Debug)]
pub struct IgnoredBlocks {
    patterns: Vec<CompiledPattern>,
}

impl IgnoredBlocks {
    pub const DEFAULT_PATTERNS: [&'static str; 7] = [
        r"<!--\s*djlint:off\s*-->.*?<!--\s*djlint:on\s*-->",
        r"\{#\s*djlint:off\s*#\}.*?\{#\s*djlint:on\s*#\}",
        r"\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\}",
        r"\{%-?\s*verbatim\s*-?%\}.*?\{%-?\s*endverbatim\s*-?%\}",
        r"\{%-?\s*comment\b[^%]*?%\}.*?\{%-?\s*endcomment\s*-?%\}",
        r"<pre\b[^>]*>.*?</pre>",
        r"<textarea\b[^>]*>.*?</textarea>",
    ];

    /// Compile `patterns` through `cache`; they're matched case-insensitively across lines.
    pub fn new<I, S>(patterns: I, cache: &PatternCache) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| cache.compile(pattern.as_ref(), Flags::IGNORE_CASE | Flags::DOT_ALL))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    pub fn with_defaults(cache: &PatternCache) -> Result<Self, PatternError> {
        Self::new(Self::DEFAULT_PATTERNS, cache)
    }

    /// Byte ranges of every ignored block in `document`, in pattern order.
    pub fn regions(&self, document: &str) -> Result<Vec<Range<usize>>, PatternError> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_all(document))
            .map(|captured| captured.map(|captured| captured.range()))
            .collect()
    }
}

impl UnformattedBlocks for IgnoredBlocks {
    fn contains(&self, document: &str, span: Range<usize>) -> bool {
        match self.regions(document) {
            Ok(regions) => regions
                .iter()
                .any(|region| region.start < span.start && span.end <= region.end),
            Err(error) => {
                log::warn!("treating span {span:?} as formattable: {error}");
                false
            }
        }
    }
}
