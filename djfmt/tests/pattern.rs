use djfmt::{
    PatternError,
    pattern::{CompiledPattern, Flags, PatternCache},
};
use std::num::NonZeroUsize;

fn cache() -> PatternCache {
    PatternCache::default()
}

#[test]
fn same_key_shares_compiled_object() {
    let cache = cache();
    let a = cache.compile(r"\d+", Flags::NONE).unwrap();
    let b = cache.compile(r"\d+", Flags::NONE).unwrap();
    assert!(CompiledPattern::ptr_eq(&a, &b));
    assert_eq!(cache.compile_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn flags_are_part_of_the_key() {
    let cache = cache();
    let plain = cache.compile("abc", Flags::NONE).unwrap();
    let folded = cache.compile("abc", Flags::IGNORE_CASE).unwrap();
    assert!(!CompiledPattern::ptr_eq(&plain, &folded));
    assert_eq!(cache.len(), 2);

    assert!(plain.search("ABC").unwrap().is_none());
    assert_eq!(folded.search("xABC").unwrap().unwrap().start(), 1);
    assert_eq!(folded.as_str(), "abc");
    assert_eq!(folded.flags(), Flags::IGNORE_CASE);
}

#[test]
fn least_recently_used_is_evicted() {
    let cache = cache();
    assert_eq!(cache.capacity().get(), 256);
    for i in 0..256 {
        cache.compile(&format!("p{i}"), Flags::NONE).unwrap();
    }
    assert_eq!(cache.len(), 256);

    cache.compile("p0", Flags::NONE).unwrap();
    cache.compile("p256", Flags::NONE).unwrap();

    assert_eq!(cache.len(), 256);
    assert!(cache.contains("p0", Flags::NONE));
    assert!(!cache.contains("p1", Flags::NONE));
    assert!(cache.contains("p256", Flags::NONE));
    assert_eq!(cache.compile_count(), 257);
}

#[test]
fn small_capacity() {
    let cache = PatternCache::new(NonZeroUsize::new(2).unwrap());
    cache.compile("a", Flags::NONE).unwrap();
    cache.compile("b", Flags::NONE).unwrap();
    cache.compile("c", Flags::NONE).unwrap();
    assert!(!cache.contains("a", Flags::NONE));
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn invalid_pattern_is_not_cached() {
    let cache = cache();
    let error = cache.compile("(", Flags::NONE).unwrap_err();
    assert!(matches!(error, PatternError::Compile { .. }));
    assert_eq!(error.pattern(), "(");
    assert!(cache.is_empty());
    assert_eq!(cache.compile_count(), 0);

    assert!(cache.search("(", "text", Flags::NONE, true).is_err());
}

#[test]
fn uncached_calls_leave_cache_alone() {
    let cache = cache();
    let found = cache.search("b+", "abbc", Flags::NONE, false).unwrap().unwrap();
    assert_eq!(found.as_str(), "bb");
    assert!(cache.is_empty());

    cache.search("b+", "abbc", Flags::NONE, true).unwrap();
    assert!(cache.contains("b+", Flags::NONE));
}

#[test]
fn search_and_groups() {
    let cache = cache();
    let found = cache
        .search(r"(\w+)@(\w+)?(x)?", "mail: joe@host", Flags::NONE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.range(), 6..14);
    assert_eq!(found.group(1), "joe");
    assert_eq!(found.get(2), Some("host"));
    assert_eq!(found.get(3), None);
    assert_eq!(found.group(3), "");
    assert_eq!(found.group_range(1), Some(6..9));
    assert_eq!(found.group_count(), 4);
}

#[test]
fn search_from_sees_text_before_offset() {
    let cache = cache();
    let found = cache
        .search_from(r"(?<=a)b", "abab", 1, Flags::NONE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.start(), 1);

    let found = cache
        .search_from(r"(?<=a)b", "abab", 2, Flags::NONE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.start(), 3);
}

#[test]
fn matches_at_start_is_anchored() {
    let cache = cache();
    assert!(
        cache
            .matches_at_start("b", "ab", Flags::NONE, true)
            .unwrap()
            .is_none()
    );
    let found = cache
        .matches_at_start("a+", "aab", Flags::NONE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.as_str(), "aa");

    // the whole alternation is anchored, not just its first branch
    assert!(
        cache
            .matches_at_start("x|b", "ab", Flags::NONE, true)
            .unwrap()
            .is_none()
    );
    let found = cache
        .matches_at_start("x|a", "ab", Flags::NONE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.range(), 0..1);

    let found = cache
        .matches_at_start("a b  # trailing comment", "abc", Flags::VERBOSE, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.as_str(), "ab");
}

#[test]
fn matches_at_start_ignores_rest_of_text() {
    let cache = cache();
    let text = format!("b{}", "a".repeat(8_000_000));
    assert!(
        cache
            .matches_at_start(r"a+?(?=c)", &text, Flags::NONE, true)
            .unwrap()
            .is_none()
    );
}

#[test]
fn look_around_over_large_text() {
    let cache = cache();
    let text = format!("x{}y", "a".repeat(4_000_000));
    let found = cache
        .search(r"x.*?(?=y)", &text, Flags::DOT_ALL, true)
        .unwrap()
        .unwrap();
    assert_eq!(found.range(), 0..text.len() - 1);

    let unclosed = &text[..text.len() - 1];
    assert!(
        cache
            .search(r"x.*?(?=y)", unclosed, Flags::DOT_ALL, true)
            .unwrap()
            .is_none()
    );
}

#[test]
fn find_all_non_overlapping() {
    let cache = cache();
    let found = cache
        .find_all("a+", "aa b a", Flags::NONE, true)
        .unwrap()
        .map(|captured| captured.map(|captured| captured.range()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(found, [0..2, 5..6]);
}

#[test]
fn find_all_empty_matches() {
    let cache = cache();
    let found = cache
        .find_all("x*", "ab", Flags::NONE, true)
        .unwrap()
        .map(|captured| captured.map(|captured| captured.range()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(found, [0..0, 1..1, 2..2]);

    let found = cache
        .find_all("a*", "baab", Flags::NONE, true)
        .unwrap()
        .map(|captured| captured.map(|captured| captured.range()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(found, [0..0, 1..3, 3..3, 4..4]);
}

#[test]
fn substitute_empty_matches() {
    let cache = cache();
    let replaced = cache
        .substitute("x*", "-", "abxd", Flags::NONE, true)
        .unwrap();
    assert_eq!(replaced, "-a-b--d-");
}

#[test]
fn substitute_templates() {
    let cache = cache();
    let replaced = cache
        .substitute(r"(\w+)=(\w+)", "$2=${1}", "a=b c=d", Flags::NONE, true)
        .unwrap();
    assert_eq!(replaced, "b=a d=c");

    let replaced = cache
        .substitute(r"\d+", "$$", "1 and 22", Flags::NONE, true)
        .unwrap();
    assert_eq!(replaced, "$ and $");

    let replaced = cache
        .substitute_n("o", "0", "foo boo", 2, Flags::NONE, true)
        .unwrap();
    assert_eq!(replaced, "f00 boo");

    let untouched = cache
        .substitute("z", "y", "abc", Flags::NONE, true)
        .unwrap();
    assert!(matches!(untouched, std::borrow::Cow::Borrowed("abc")));
}

#[test]
fn substitute_with_callback() {
    let cache = cache();
    let replaced = cache
        .substitute_with(
            r"\d+",
            "1 2 3",
            Flags::NONE,
            true,
            |captured| -> Result<String, PatternError> {
                let n: u32 = captured.as_str().parse().unwrap_or_default();
                Ok((n * 10).to_string())
            },
        )
        .unwrap();
    assert_eq!(replaced, "10 20 30");
}

#[test]
fn flag_combinations() {
    let cache = cache();
    let dot_all = cache
        .search("a.b", "a\nb", Flags::DOT_ALL, true)
        .unwrap();
    assert!(dot_all.is_some());
    assert!(cache.search("a.b", "a\nb", Flags::NONE, true).unwrap().is_none());

    let multiline = cache
        .find_all("^x", "x\nx", Flags::MULTILINE, true)
        .unwrap()
        .count();
    assert_eq!(multiline, 2);

    let verbose = cache
        .search("a b  # spaced", "ab", Flags::VERBOSE, true)
        .unwrap();
    assert!(verbose.is_some());

    let flags = Flags::IGNORE_CASE | Flags::DOT_ALL;
    assert!(flags.contains(Flags::DOT_ALL));
    assert!(!flags.contains(Flags::MULTILINE));
    assert!(Flags::NONE.is_empty());
}
