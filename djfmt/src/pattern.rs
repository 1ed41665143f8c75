//! Compiled pattern cache.
//!
//! Classification and substitution passes apply the same handful of patterns
//! over and over across a document, so compiled patterns are memoized in a
//! bounded LRU cache keyed by pattern source and [`Flags`].
//!
//! Every operation takes a `use_cache` switch: `false` compiles a one-off
//! pattern that never enters the cache.

use crate::error::PatternError;
use fancy_regex::{Captures, Regex, RegexBuilder};
use lru::LruCache;
use parking_lot::Mutex;
use std::{
    borrow::Cow,
    fmt,
    num::NonZeroUsize,
    ops::{BitOr, BitOrAssign, Range},
    sync::{
        Arc, LazyLock,
        atomic::{AtomicUsize, Ordering},
    },
};

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Set of pattern flags, combined with `|`.
pub struct Flags(u8);

impl Flags {
    pub const NONE: Self = Self(0);
    pub const IGNORE_CASE: Self = Self(0b0001);
    pub const MULTILINE: Self = Self(0b0010);
    /// `.` also matches line breaks.
    pub const DOT_ALL: Self = Self(0b0100);
    /// Whitespace and `#` comments in the pattern are ignored.
    pub const VERBOSE: Self = Self(0b1000);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn inline_prefix(self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut prefix = String::from("(?");
        for (flag, c) in [
            (Self::IGNORE_CASE, 'i'),
            (Self::MULTILINE, 'm'),
            (Self::DOT_ALL, 's'),
            (Self::VERBOSE, 'x'),
        ] {
            if self.contains(flag) {
                prefix.push(c);
            }
        }
        prefix.push(')');
        prefix
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({})", self.inline_prefix())
    }
}

/// Backtracking steps allowed for one search. Lazy scans take a step per
/// byte, so this has to cover the largest documents being formatted.
const BACKTRACK_LIMIT: usize = 1 << 30;

struct Compiled {
    source: String,
    flags: Flags,
    regex: Regex,
    /// Same pattern anchored at the start of the text.
    anchored: Regex,
}

fn build(expr: &str, source: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(expr)
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
        .map_err(|error| PatternError::compile(source, error))
}

fn to_captured<'t>(text: &'t str, captures: Option<Captures<'t>>) -> Option<Captured<'t>> {
    captures.map(|captures| Captured {
        text,
        groups: (0..captures.len())
            .map(|i| captures.get(i).map(|m| m.start()..m.end()))
            .collect(),
    })
}

#[derive(Clone)]
/// Shared handle to a compiled pattern.
///
/// Clones are cheap and refer to the same compiled object.
pub struct CompiledPattern(Arc<Compiled>);

impl CompiledPattern {
    /// Compile a pattern without going through any cache.
    pub fn new(pattern: &str, flags: Flags) -> Result<Self, PatternError> {
        let prefix = flags.inline_prefix();
        let regex = build(&format!("{prefix}{pattern}"), pattern)?;
        // a verbose-mode comment runs to the end of the line
        let close = if flags.contains(Flags::VERBOSE) { "\n)" } else { ")" };
        let anchored = build(&format!(r"\A{prefix}(?:{pattern}{close}"), pattern)?;
        Ok(Self(Arc::new(Compiled {
            source: pattern.to_owned(),
            flags,
            regex,
            anchored,
        })))
    }

    /// Source text as given, without flags.
    pub fn as_str(&self) -> &str {
        &self.0.source
    }

    pub fn flags(&self) -> Flags {
        self.0.flags
    }

    /// Whether both handles point at the same compiled object.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn is_match(&self, text: &str) -> Result<bool, PatternError> {
        self.0
            .regex
            .is_match(text)
            .map_err(|error| PatternError::execution(&self.0.source, error))
    }

    /// Leftmost match anywhere in `text`.
    pub fn search<'t>(&self, text: &'t str) -> Result<Option<Captured<'t>>, PatternError> {
        self.search_from(text, 0)
    }

    /// Leftmost match starting at or after byte offset `pos`.
    ///
    /// Look-behind assertions still see the text before `pos`.
    pub fn search_from<'t>(
        &self,
        text: &'t str,
        pos: usize,
    ) -> Result<Option<Captured<'t>>, PatternError> {
        let captures = self
            .0
            .regex
            .captures_from_pos(text, pos)
            .map_err(|error| PatternError::execution(&self.0.source, error))?;
        Ok(to_captured(text, captures))
    }

    /// Match anchored at the beginning of `text`.
    pub fn matches_at_start<'t>(
        &self,
        text: &'t str,
    ) -> Result<Option<Captured<'t>>, PatternError> {
        let captures = self
            .0
            .anchored
            .captures(text)
            .map_err(|error| PatternError::execution(&self.0.source, error))?;
        Ok(to_captured(text, captures))
    }

    /// Iterator over all non-overlapping matches.
    ///
    /// An empty match is reported even right behind a non-empty one, but
    /// never twice at the same offset: `x*` over `abxd` matches at `0..0`,
    /// `1..1`, `2..3`, `3..3` and `4..4`.
    pub fn find_all<'t>(&self, text: &'t str) -> FindAll<'t> {
        FindAll {
            pattern: self.clone(),
            text,
            pos: 0,
            last_empty_at: None,
            done: false,
        }
    }

    /// Replace every match with `template`.
    ///
    /// `$1` or `${1}` expands to a capture group and `$$` to a literal `$`.
    pub fn substitute<'t>(&self, text: &'t str, template: &str) -> Result<Cow<'t, str>, PatternError> {
        self.substitute_n(text, template, 0)
    }

    /// Replace at most `limit` matches; `0` means all of them.
    pub fn substitute_n<'t>(
        &self,
        text: &'t str,
        template: &str,
        limit: usize,
    ) -> Result<Cow<'t, str>, PatternError> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut replaced = 0;
        for captured in self.find_all(text) {
            if limit != 0 && replaced == limit {
                break;
            }
            let captured = captured?;
            output.push_str(&text[last..captured.start()]);
            captured.expand(template, &mut output);
            last = captured.end();
            replaced += 1;
        }
        if replaced == 0 {
            return Ok(Cow::Borrowed(text));
        }
        output.push_str(&text[last..]);
        Ok(Cow::Owned(output))
    }

    /// Replace every match with whatever `replace` returns for it.
    pub fn substitute_with<E, F>(&self, text: &str, mut replace: F) -> Result<String, E>
    where
        E: From<PatternError>,
        F: FnMut(&Captured<'_>) -> Result<String, E>,
    {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for captured in self.find_all(text) {
            let captured = captured?;
            output.push_str(&text[last..captured.start()]);
            output.push_str(&replace(&captured)?);
            last = captured.end();
        }
        output.push_str(&text[last..]);
        Ok(output)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.0.source)
            .field("flags", &self.0.flags)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A match with the byte ranges of its capture groups.
pub struct Captured<'t> {
    text: &'t str,
    groups: Vec<Option<Range<usize>>>,
}

impl<'t> Captured<'t> {
    pub fn start(&self) -> usize {
        self.range().start
    }

    pub fn end(&self) -> usize {
        self.range().end
    }

    /// Byte range of the whole match within the searched text.
    pub fn range(&self) -> Range<usize> {
        self.groups
            .first()
            .cloned()
            .flatten()
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.range()]
    }

    /// Capture group `i`, or `None` if it didn't participate.
    pub fn get(&self, i: usize) -> Option<&'t str> {
        self.group_range(i).map(|range| &self.text[range])
    }

    /// Capture group `i`, empty if it didn't participate.
    pub fn group(&self, i: usize) -> &'t str {
        self.get(i).unwrap_or_default()
    }

    pub fn group_range(&self, i: usize) -> Option<Range<usize>> {
        self.groups.get(i).cloned().flatten()
    }

    /// Number of groups including the whole match.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn expand(&self, template: &str, output: &mut String) {
        let mut rest = template;
        while let Some(dollar) = memchr::memchr(b'$', rest.as_bytes()) {
            output.push_str(&rest[..dollar]);
            rest = &rest[dollar + 1..];
            if let Some(after) = rest.strip_prefix('$') {
                output.push('$');
                rest = after;
                continue;
            }
            let (digits, after) = if let Some(braced) = rest.strip_prefix('{') {
                match braced.split_once('}') {
                    Some((digits, after)) => (digits, after),
                    None => ("", rest),
                }
            } else {
                let end = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                (&rest[..end], &rest[end..])
            };
            match digits.parse::<usize>() {
                Ok(i) => {
                    output.push_str(self.group(i));
                    rest = after;
                }
                Err(_) => output.push('$'),
            }
        }
        output.push_str(rest);
    }
}

/// Iterator over non-overlapping matches, created by [`CompiledPattern::find_all`].
pub struct FindAll<'t> {
    pattern: CompiledPattern,
    text: &'t str,
    pos: usize,
    last_empty_at: Option<usize>,
    done: bool,
}

impl<'t> Iterator for FindAll<'t> {
    type Item = Result<Captured<'t>, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done && self.pos <= self.text.len() {
            let captured = match self.pattern.search_from(self.text, self.pos) {
                Ok(Some(captured)) => captured,
                Ok(None) => break,
                Err(error) => {
                    self.done = true;
                    return Some(Err(error));
                }
            };
            let range = captured.range();
            if range.is_empty() && self.last_empty_at == Some(range.start) {
                self.pos = next_char_boundary(self.text, range.end);
                continue;
            }
            self.pos = range.end;
            self.last_empty_at = range.is_empty().then_some(range.start);
            return Some(Ok(captured));
        }
        self.done = true;
        None
    }
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct PatternKey {
    pattern: String,
    flags: Flags,
}

/// Bounded LRU cache of compiled patterns.
pub struct PatternCache {
    entries: Mutex<LruCache<PatternKey, CompiledPattern>>,
    compiles: AtomicUsize,
}

static GLOBAL: LazyLock<PatternCache> =
    LazyLock::new(|| PatternCache::new(PatternCache::DEFAULT_CAPACITY));

impl PatternCache {
    pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(256).unwrap();

    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            compiles: AtomicUsize::new(0),
        }
    }

    /// Process-wide cache shared by every formatting pass.
    pub fn global() -> &'static PatternCache {
        &GLOBAL
    }

    /// Return the cached pattern for `(pattern, flags)`, compiling it on a miss.
    pub fn compile(&self, pattern: &str, flags: Flags) -> Result<CompiledPattern, PatternError> {
        let key = PatternKey {
            pattern: pattern.to_owned(),
            flags,
        };
        let mut entries = self.entries.lock();
        if let Some(compiled) = entries.get(&key) {
            log::trace!("pattern cache hit: {pattern:?} {flags:?}");
            return Ok(compiled.clone());
        }

        let compiled = CompiledPattern::new(pattern, flags)?;
        self.compiles.fetch_add(1, Ordering::Relaxed);
        log::trace!("compiled pattern {pattern:?} {flags:?}");
        if let Some((evicted, _)) = entries.push(key, compiled.clone()) {
            log::debug!(
                "evicted pattern {:?} {:?} from cache",
                evicted.pattern,
                evicted.flags
            );
        }
        Ok(compiled)
    }

    fn get(&self, pattern: &str, flags: Flags, use_cache: bool) -> Result<CompiledPattern, PatternError> {
        if use_cache {
            self.compile(pattern, flags)
        } else {
            CompiledPattern::new(pattern, flags)
        }
    }

    pub fn search<'t>(
        &self,
        pattern: &str,
        text: &'t str,
        flags: Flags,
        use_cache: bool,
    ) -> Result<Option<Captured<'t>>, PatternError> {
        self.get(pattern, flags, use_cache)?.search(text)
    }

    pub fn search_from<'t>(
        &self,
        pattern: &str,
        text: &'t str,
        pos: usize,
        flags: Flags,
        use_cache: bool,
    ) -> Result<Option<Captured<'t>>, PatternError> {
        self.get(pattern, flags, use_cache)?.search_from(text, pos)
    }

    pub fn matches_at_start<'t>(
        &self,
        pattern: &str,
        text: &'t str,
        flags: Flags,
        use_cache: bool,
    ) -> Result<Option<Captured<'t>>, PatternError> {
        self.get(pattern, flags, use_cache)?.matches_at_start(text)
    }

    pub fn find_all<'t>(
        &self,
        pattern: &str,
        text: &'t str,
        flags: Flags,
        use_cache: bool,
    ) -> Result<FindAll<'t>, PatternError> {
        Ok(self.get(pattern, flags, use_cache)?.find_all(text))
    }

    pub fn substitute<'t>(
        &self,
        pattern: &str,
        template: &str,
        text: &'t str,
        flags: Flags,
        use_cache: bool,
    ) -> Result<Cow<'t, str>, PatternError> {
        self.get(pattern, flags, use_cache)?.substitute(text, template)
    }

    pub fn substitute_n<'t>(
        &self,
        pattern: &str,
        template: &str,
        text: &'t str,
        limit: usize,
        flags: Flags,
        use_cache: bool,
    ) -> Result<Cow<'t, str>, PatternError> {
        self.get(pattern, flags, use_cache)?
            .substitute_n(text, template, limit)
    }

    pub fn substitute_with<E, F>(
        &self,
        pattern: &str,
        text: &str,
        flags: Flags,
        use_cache: bool,
        replace: F,
    ) -> Result<String, E>
    where
        E: From<PatternError>,
        F: FnMut(&Captured<'_>) -> Result<String, E>,
    {
        self.get(pattern, flags, use_cache)?
            .substitute_with(text, replace)
    }

    /// Whether `(pattern, flags)` is cached. Doesn't affect recency.
    pub fn contains(&self, pattern: &str, flags: Flags) -> bool {
        self.entries.lock().contains(&PatternKey {
            pattern: pattern.to_owned(),
            flags,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.lock().cap()
    }

    /// Number of patterns this cache has compiled so far.
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
