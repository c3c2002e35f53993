use crate::security::{ALLOWED_FRAGMENTS, DENYLIST_PATTERNS};
use regex::RegexSet;
use std::sync::LazyLock;

static DENYLIST: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(DENYLIST_PATTERNS).expect("invalid denylist pattern")
});

/// Outcome of classifying one candidate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationVerdict {
    pub is_safe: bool,
    pub matched_denylist_pattern: Option<&'static str>,
}

impl ClassificationVerdict {
    fn safe() -> Self {
        Self {
            is_safe: true,
            matched_denylist_pattern: None,
        }
    }

    fn denied(pattern: &'static str) -> Self {
        Self {
            is_safe: false,
            matched_denylist_pattern: Some(pattern),
        }
    }

    fn not_allowlisted() -> Self {
        Self {
            is_safe: false,
            matched_denylist_pattern: None,
        }
    }
}

/// Textual allow/deny classifier for model-proposed commands
///
/// The denylist always wins: a command that matches any denylist pattern is
/// unsafe even if it also contains an allowlisted verb. Without a denylist
/// hit, at least one allowlisted fragment must be present.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a candidate command
    pub fn classify(&self, command: &str) -> ClassificationVerdict {
        let lowered = command.to_lowercase();

        // Lowest index wins so the reported pattern is stable
        if let Some(index) = DENYLIST.matches(&lowered).iter().next() {
            let pattern = DENYLIST_PATTERNS[index];
            tracing::debug!(command, pattern, "command matched denylist");
            return ClassificationVerdict::denied(pattern);
        }

        if !ALLOWED_FRAGMENTS.iter().any(|f| lowered.contains(f)) {
            tracing::debug!(command, "command has no allowlisted fragment");
            return ClassificationVerdict::not_allowlisted();
        }

        ClassificationVerdict::safe()
    }

    /// Convenience wrapper returning only the safe/unsafe bit
    pub fn is_safe(&self, command: &str) -> bool {
        self.classify(command).is_safe
    }
}
