//! Wildcard matching for separator-joined object paths.
//!
//! Patterns are plain strings in which a wildcard character (`*` by default)
//! matches any run of characters, including the empty run and including path
//! separators, and an optional single-character wildcard (`?` by default)
//! matches exactly one character. Every other character matches itself.
//!
//! Matching is total: any pattern/candidate pair yields a `bool`, so callers
//! filtering serialized output never have to handle a failure.
//!
//! ```
//! use onode_glob::is_match;
//!
//! assert!(is_match("a.*", "a.b.c"));
//! assert!(is_match("a.?", "a.b"));
//! assert!(!is_match("a.?", "a.bc"));
//! ```

use serde::{Deserialize, Serialize};

/// Default multi-character wildcard.
pub const DEFAULT_WILDCARD: char = '*';

/// Default single-character wildcard.
pub const DEFAULT_SINGLE: char = '?';

/// A configured wildcard matcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Matcher {
    /// Character matching any run of characters.
    pub wildcard: char,
    /// Character matching exactly one character, if enabled.
    pub single: Option<char>,
    /// Whether literal characters must match case exactly.
    pub case_sensitive: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            wildcard: DEFAULT_WILDCARD,
            single: Some(DEFAULT_SINGLE),
            case_sensitive: true,
        }
    }
}

impl Matcher {
    /// A matcher that only understands the multi-character wildcard.
    pub fn wildcard_only() -> Self {
        Self {
            single: None,
            ..Self::default()
        }
    }

    /// Returns a copy of this matcher comparing literals case-insensitively.
    pub fn case_insensitive(self) -> Self {
        Self {
            case_sensitive: false,
            ..self
        }
    }

    /// Test `candidate` against `pattern`.
    ///
    /// Uses greedy matching with single-point backtracking to the most
    /// recent wildcard, so the cost is linear for most inputs and quadratic
    /// in the worst case.
    pub fn is_match(&self, pattern: &str, candidate: &str) -> bool {
        let pattern: Vec<char> = pattern.chars().collect();
        let candidate: Vec<char> = candidate.chars().collect();

        let (mut pi, mut ci) = (0, 0);
        // Position of the last wildcard seen and the candidate index it was
        // tried against.
        let mut backtrack: Option<(usize, usize)> = None;

        while ci < candidate.len() {
            if pi < pattern.len() && pattern[pi] == self.wildcard {
                backtrack = Some((pi, ci));
                pi += 1;
            } else if pi < pattern.len() && self.matches_char(pattern[pi], candidate[ci]) {
                pi += 1;
                ci += 1;
            } else if let Some((star, mark)) = backtrack {
                pi = star + 1;
                ci = mark + 1;
                backtrack = Some((star, mark + 1));
            } else {
                return false;
            }
        }

        // Trailing wildcards match the empty run.
        pattern[pi..].iter().all(|&ch| ch == self.wildcard)
    }

    /// Returns `true` if at least one of `patterns` matches `candidate`.
    pub fn matches_any<I, S>(&self, patterns: I, candidate: &str) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .any(|pattern| self.is_match(pattern.as_ref(), candidate))
    }

    fn matches_char(&self, pattern: char, candidate: char) -> bool {
        if self.single == Some(pattern) || pattern == candidate {
            return true;
        }
        !self.case_sensitive && pattern.to_lowercase().eq(candidate.to_lowercase())
    }
}

/// Test `candidate` against `pattern` with the default [`Matcher`].
pub fn is_match(pattern: &str, candidate: &str) -> bool {
    Matcher::default().is_match(pattern, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn literal_patterns() {
        assert!(is_match("a.b", "a.b"));
        assert!(!is_match("a.b", "a.c"));
        assert!(!is_match("a.b", "a.b.c"));
        assert!(!is_match("a.b.c", "a.b"));
    }

    #[test]
    fn empty_inputs() {
        assert!(is_match("", ""));
        assert!(is_match("*", ""));
        assert!(!is_match("", "a"));
        assert!(!is_match("?", ""));
    }

    #[test]
    fn wildcard_spans_separators() {
        assert!(is_match("*", "a.b.c"));
        assert!(is_match("a.*", "a.b.c"));
        assert!(is_match("*.c", "a.b.c"));
        assert!(is_match("a*c", "a.b.c"));
        assert!(!is_match("a.*", "b.a"));
    }

    #[test]
    fn wildcard_matches_empty_run() {
        assert!(is_match("a*", "a"));
        assert!(is_match("*a*", "a"));
        assert!(is_match("a**b", "ab"));
    }

    #[test]
    fn backtracks_past_false_starts() {
        assert!(is_match("*.x", "x.y.x"));
        assert!(is_match("a*b*c", "aXbYbZc"));
        assert!(!is_match("a*b*c", "aXbYbZ"));
    }

    #[test]
    fn single_character_wildcard() {
        assert!(is_match("a.?", "a.b"));
        assert!(!is_match("a.?", "a."));
        assert!(!is_match("a.?", "a.bc"));
        assert!(is_match("??", "é!"));
    }

    #[test]
    fn wildcard_only_treats_question_mark_literally() {
        let m = Matcher::wildcard_only();
        assert!(m.is_match("a?", "a?"));
        assert!(!m.is_match("a?", "ab"));
    }

    #[test]
    fn case_insensitive_matching() {
        let m = Matcher::default().case_insensitive();
        assert!(m.is_match("User.*", "user.name"));
        assert!(!is_match("User.*", "user.name"));
    }

    #[test]
    fn custom_wildcard_characters() {
        let m = Matcher {
            wildcard: '%',
            single: Some('_'),
            case_sensitive: true,
        };
        assert!(m.is_match("a/%", "a/b/c"));
        assert!(m.is_match("a/_", "a/b"));
        assert!(!m.is_match("a/*", "a/b"));
    }

    #[test]
    fn matches_any_pattern() {
        let m = Matcher::default();
        assert!(m.matches_any(["x", "a.*"], "a.b"));
        assert!(!m.matches_any(["x", "y"], "a.b"));
        assert!(!m.matches_any(Vec::<String>::new(), "a.b"));
    }

    #[test]
    fn matcher_config_deserializes_with_defaults() {
        let m: Matcher = serde_json::from_str(r#"{"caseSensitive": false}"#).unwrap();
        assert_eq!(m.wildcard, '*');
        assert_eq!(m.single, Some('?'));
        assert!(!m.case_sensitive);
    }

    proptest! {
        #[test]
        fn literal_string_matches_itself(s in "[a-z.]{0,16}") {
            prop_assert!(is_match(&s, &s));
        }

        #[test]
        fn star_matches_everything(s in "\\PC{0,24}") {
            prop_assert!(is_match("*", &s));
        }

        #[test]
        fn prefix_star_matches_extensions(prefix in "[a-z.]{0,8}", rest in "[a-z.]{0,8}") {
            let pattern = format!("{prefix}*");
            let candidate = format!("{prefix}{rest}");
            prop_assert!(is_match(&pattern, &candidate));
        }
    }
}
