//! SQL-style LIKE patterns.
//!
//! A pattern is classified into one [`LikePattern`] shape by a fixed,
//! priority-ordered dispatch and then compiled into a case-insensitive regex
//! that must match the whole value. Pattern text other than the wildcards
//! that select the shape is matched literally.
//!
//! | Pattern | Shape                 | Matches                                   |
//! |---------|-----------------------|-------------------------------------------|
//! | `%X%`   | `Contains`            | contains `X`                              |
//! | `_X%`   | `SecondCharStartsWith`| `X` starts at the second character       |
//! | `X__%`  | `StartsWithAtLeast`   | starts with `X`, then 2 or more chars     |
//! | `X_%`   | `StartsWithAtLeast`   | starts with `X`, then 1 or more chars     |
//! | `%X`    | `EndsWith`            | ends with `X`                             |
//! | `X%`    | `StartsWith`          | starts with `X`                           |
//! | `X%Y`   | `Surrounds`           | starts with `X` and ends with `Y`         |
//! | other   | `Contains`            | contains the whole pattern                |

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// The shape a LIKE pattern was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikePattern {
    /// Value contains the text anywhere.
    Contains(String),
    /// Value's second character onward starts with the text.
    SecondCharStartsWith(String),
    /// Value starts with `prefix` followed by at least `extra` characters.
    StartsWithAtLeast {
        /// Required prefix.
        prefix: String,
        /// Minimum number of characters after the prefix.
        extra: usize,
    },
    /// Value ends with the text.
    EndsWith(String),
    /// Value starts with the text.
    StartsWith(String),
    /// Value starts with `prefix` and ends with `suffix`.
    Surrounds {
        /// Required prefix.
        prefix: String,
        /// Required suffix.
        suffix: String,
    },
}

impl LikePattern {
    /// Classifies a LIKE pattern. The first matching rule wins.
    pub fn parse(pattern: &str) -> LikePattern {
        let len = pattern.len();
        let inner = || pattern[1..len - 1].to_string();

        if len >= 2 && pattern.starts_with('%') && pattern.ends_with('%') {
            return LikePattern::Contains(inner());
        }
        if len >= 2 && pattern.starts_with('_') && pattern.ends_with('%') {
            return LikePattern::SecondCharStartsWith(inner());
        }
        if let Some(prefix) = pattern.strip_suffix("__%") {
            return LikePattern::StartsWithAtLeast {
                prefix: prefix.to_string(),
                extra: 2,
            };
        }
        if let Some(prefix) = pattern.strip_suffix("_%") {
            return LikePattern::StartsWithAtLeast {
                prefix: prefix.to_string(),
                extra: 1,
            };
        }
        if let Some(suffix) = pattern.strip_prefix('%') {
            if !suffix.contains('%') {
                return LikePattern::EndsWith(suffix.to_string());
            }
        }
        if let Some(prefix) = pattern.strip_suffix('%') {
            if !prefix.contains('%') {
                return LikePattern::StartsWith(prefix.to_string());
            }
        }
        if let Some((prefix, suffix)) = pattern.split_once('%') {
            return LikePattern::Surrounds {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            };
        }
        LikePattern::Contains(pattern.to_string())
    }

    /// Returns the whole-value regex source for this shape.
    pub fn regex_source(&self) -> String {
        match self {
            LikePattern::Contains(text) => format!("^.*{}.*$", regex::escape(text)),
            LikePattern::SecondCharStartsWith(text) => format!("^.{}.*$", regex::escape(text)),
            LikePattern::StartsWithAtLeast { prefix, extra } => {
                format!("^{}.{{{extra},}}$", regex::escape(prefix))
            }
            LikePattern::EndsWith(text) => format!("^.*{}$", regex::escape(text)),
            LikePattern::StartsWith(text) => format!("^{}.*$", regex::escape(text)),
            LikePattern::Surrounds { prefix, suffix } => format!(
                "^{}.*{}$",
                regex::escape(prefix),
                regex::escape(suffix)
            ),
        }
    }

    /// Compiles this shape into a matcher.
    pub fn compile(&self) -> Result<LikeMatcher> {
        let regex = RegexBuilder::new(&self.regex_source())
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(LikeMatcher { regex })
    }
}

/// A compiled LIKE pattern.
///
/// # Example
///
/// ```
/// use recollect::LikeMatcher;
///
/// let matcher = LikeMatcher::new("IK__%").unwrap();
/// assert!(matcher.is_match("IKEA"));
/// assert!(matcher.is_match("ikea"));
/// assert!(!matcher.is_match("IK"));
/// ```
#[derive(Debug, Clone)]
pub struct LikeMatcher {
    regex: Regex,
}

impl LikeMatcher {
    /// Classifies and compiles a LIKE pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        LikePattern::parse(pattern).compile()
    }

    /// Returns `true` if the whole value matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}
