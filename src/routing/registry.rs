//! Route registration.
//!
//! # Responsibilities
//! - Compile each pattern exactly once, at registration
//! - Store entries in registration order
//! - Replace the handler when a pattern is registered twice
//! - Apply the configured policy to patterns that do not compile
//!
//! # Design Decisions
//! - Populated before serving, then frozen inside a `Router` (no locks)
//! - Ordered `Vec` so the first match is deterministic across runs
//! - A re-registered pattern keeps the position of its first registration

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{Matcher, NeverMatcher, PatternError, RegexMatcher};

/// What to do with a pattern that fails to compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPatternPolicy {
    /// Keep the route but never match it. The error is logged.
    #[default]
    Disable,
    /// Refuse the registration and return the error to the caller.
    Reject,
}

/// A registered pattern together with its compiled matcher and handler.
pub struct RouteEntry<H> {
    pattern: String,
    matcher: Box<dyn Matcher>,
    handler: H,
}

impl<H> RouteEntry<H> {
    /// The raw pattern text this entry was registered under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns true if the pattern is found in the canonical key.
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }
}

impl<H> std::fmt::Debug for RouteEntry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Ordered set of route entries keyed by raw pattern text.
pub struct Registry<H> {
    entries: Vec<RouteEntry<H>>,
    policy: InvalidPatternPolicy,
}

impl<H> Registry<H> {
    /// Create an empty registry that disables routes with invalid patterns.
    pub fn new() -> Self {
        Self::with_policy(InvalidPatternPolicy::default())
    }

    /// Create an empty registry with an explicit invalid-pattern policy.
    pub fn with_policy(policy: InvalidPatternPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Register `handler` under `pattern`.
    ///
    /// Registering a pattern that is already present replaces its handler.
    /// Returns an error only under [`InvalidPatternPolicy::Reject`]; in that
    /// case the registry is left unchanged.
    pub fn add(&mut self, pattern: impl Into<String>, handler: H) -> Result<(), PatternError> {
        let pattern = pattern.into();
        let matcher: Box<dyn Matcher> = match RegexMatcher::compile(&pattern) {
            Ok(matcher) => Box::new(matcher),
            Err(err) => match self.policy {
                InvalidPatternPolicy::Reject => return Err(err),
                InvalidPatternPolicy::Disable => {
                    tracing::warn!(
                        pattern = %pattern,
                        error = %err,
                        "Route pattern failed to compile, route disabled"
                    );
                    Box::new(NeverMatcher)
                }
            },
        };

        if let Some(existing) = self.entries.iter_mut().find(|e| e.pattern == pattern) {
            tracing::debug!(pattern = %pattern, "Replacing handler for duplicate pattern");
            existing.matcher = matcher;
            existing.handler = handler;
        } else {
            tracing::debug!(pattern = %pattern, position = self.entries.len(), "Route registered");
            self.entries.push(RouteEntry {
                pattern,
                matcher,
                handler,
            });
        }

        Ok(())
    }

    /// First entry, in registration order, whose pattern is found in `key`.
    pub fn find(&self, key: &str) -> Option<&RouteEntry<H>> {
        self.entries.iter().find(|entry| entry.matches(key))
    }

    /// Look up an entry by its raw pattern text.
    pub fn get(&self, pattern: &str) -> Option<&RouteEntry<H>> {
        self.entries.iter().find(|entry| entry.pattern == pattern)
    }

    /// Raw patterns in matching order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> InvalidPatternPolicy {
        self.policy
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .field("policy", &self.policy)
            .finish()
    }
}
