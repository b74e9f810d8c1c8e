//! Pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a raw route pattern into a reusable matcher
//! - Test a canonical key against a compiled pattern
//! - Provide a matcher that never matches, for routes whose pattern failed to compile
//!
//! # Design Decisions
//! - Matching is a search, not a full match: the pattern may occur anywhere in the key
//! - Patterns are compiled once at registration, never on the request path
//! - Compile failures are returned as values; callers decide the policy

use regex::Regex;
use thiserror::Error;

/// Trait for testing canonical keys against a compiled condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the condition is found in the key.
    fn matches(&self, key: &str) -> bool;
}

/// A route pattern that failed to compile.
#[derive(Debug, Error)]
#[error("invalid route pattern `{pattern}`: {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    /// The raw pattern text that was rejected.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Matches keys against a compiled regular expression.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a raw pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|source| PatternError {
                pattern: pattern.to_string(),
                source,
            })
    }
}

impl Matcher for RegexMatcher {
    fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Matches nothing. Stands in for a pattern that could not be compiled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverMatcher;

impl Matcher for NeverMatcher {
    fn matches(&self, _key: &str) -> bool {
        false
    }
}
