use std::cell::RefCell;

use regex::{Regex, RegexBuilder};

use crate::workflow::Matcher;

/// Case-insensitive prefix match, with the query taken as a raw regex fragment.
///
/// The query is not escaped: `"a.c"` also matches `"abc"`, and `"a|b"` matches
/// anything starting with `a` or containing `b`. A query that does not compile
/// matches nothing.
///
/// Patterns use the `regex` crate syntax. Lookaround and backreferences such
/// as `(?=V)` or `(a)\1` are not supported and so match nothing.
///
/// The compiled pattern of the last query is kept, so matching many titles
/// against one query compiles it once.
#[derive(Default)]
pub struct PrefixMatcher {
    last: RefCell<Option<(String, Option<Regex>)>>,
}

impl PrefixMatcher {
    fn pattern(query: &str) -> Option<Regex> {
        let pattern = format!("^{query}.*");

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(err) => {
                log::debug!("query {:?} is not a valid pattern: {}", query, err);
                None
            }
        }
    }
}

impl Matcher for PrefixMatcher {
    fn matches(&self, query: &str, title: &str) -> bool {
        let mut last = self.last.borrow_mut();

        if last.as_ref().map_or(true, |(cached, _)| cached != query) {
            *last = Some((query.to_owned(), Self::pattern(query)));
        }

        last.as_ref()
            .and_then(|(_, regex)| regex.as_ref())
            .is_some_and(|regex| regex.is_match(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(query: &str, title: &str) -> bool {
        PrefixMatcher::default().matches(query, title)
    }

    fn cached_query(matcher: &PrefixMatcher) -> Option<String> {
        matcher.last.borrow().as_ref().map(|(query, _)| query.clone())
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        assert!(matches("abc", "ABCDEF"));
        assert!(matches("ABC", "abcdef"));
        assert!(matches("Vap", "vaportoolbox"));
    }

    #[test]
    fn test_requires_prefix() {
        assert!(!matches("xyz", "abcdef"));
        assert!(!matches("def", "abcdef"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches("", "anything"));
        assert!(matches("", ""));
    }

    #[test]
    fn test_empty_title_only_matches_empty_query() {
        assert!(!matches("a", ""));
    }

    #[test]
    fn test_query_is_not_escaped() {
        assert!(matches("a.c", "abc"));
        assert!(matches("v[ai]", "Vim"));
        assert!(matches("x|b", "abc"));
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        assert!(!matches("(", "(abc"));
    }

    #[test]
    fn test_lookaround_and_backreferences_match_nothing() {
        assert!(!matches("(?=V)", "Vapor"));
        assert!(!matches("(a)\\1", "aab"));
    }

    #[test]
    fn test_pattern_is_reused_for_same_query() {
        let matcher = PrefixMatcher::default();

        assert!(matcher.matches("vap", "Vapor"));
        assert!(!matcher.matches("vap", "Kitura"));
        assert_eq!(cached_query(&matcher).as_deref(), Some("vap"));

        assert!(matcher.matches("kit", "Kitura"));
        assert_eq!(cached_query(&matcher).as_deref(), Some("kit"));
    }

    #[test]
    fn test_invalid_query_is_cached_too() {
        let matcher = PrefixMatcher::default();

        assert!(!matcher.matches("(", "(abc"));
        assert!(!matcher.matches("(", "(def"));
        assert_eq!(cached_query(&matcher).as_deref(), Some("("));
        assert!(matcher.matches("", "abc"));
    }
}
