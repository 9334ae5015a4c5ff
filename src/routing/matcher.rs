//! Path matching rules.
//!
//! # Responsibilities
//! - Match a request path exactly
//! - Match a request path by suffix (e.g. `.html`)
//! - Combine exact paths with OR semantics (an endpoint plus its aliases)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Rules see the full request target, query string included
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against a rule.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path satisfies this rule.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches paths ending with a suffix.
#[derive(Debug, Clone)]
pub struct SuffixPathMatcher {
    suffix: String,
}

impl SuffixPathMatcher {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Matcher for SuffixPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyOfMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyOfMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Any of the given exact paths.
    pub fn exact_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            paths
                .into_iter()
                .map(|p| Box::new(ExactPathMatcher::new(p)) as Box<dyn Matcher>)
                .collect(),
        )
    }
}

impl Matcher for AnyOfMatcher {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/api/v1/getAllStatus");
        assert!(matcher.matches("/api/v1/getAllStatus"));
        assert!(!matcher.matches("/api/v1/getAllStatus/"));
        assert!(!matcher.matches("/API/v1/getAllStatus")); // Case sensitive
        assert!(!matcher.matches("/prefix/api/v1/getAllStatus"));
    }

    #[test]
    fn test_suffix_matcher() {
        let matcher = SuffixPathMatcher::new(".html");
        assert!(matcher.matches("/index.html"));
        assert!(matcher.matches("/deep/dir/page.html"));
        assert!(!matcher.matches("/index.htm"));
        assert!(!matcher.matches("/index.html.bak"));
    }

    #[test]
    fn test_any_of_matcher() {
        let matcher = AnyOfMatcher::exact_paths(["/api/v1/healthcheck", "/api/v1/healtcheck"]);
        assert!(matcher.matches("/api/v1/healthcheck"));
        assert!(matcher.matches("/api/v1/healtcheck"));
        assert!(!matcher.matches("/api/v1/health"));

        let empty = AnyOfMatcher::new(Vec::new());
        assert!(!empty.matches("/"));
    }
}
