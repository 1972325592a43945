//! Version-capturing line patterns.
//!
//! A [`Pattern`] is a regular expression with a named `version` group. It is
//! applied to one line of tool output at a time and yields the dot-decimal
//! version it captured, if any.

use std::sync::Arc;

use regex::Regex;

use crate::version::Version;

/// Name of the capture group holding the version number.
pub const VERSION_GROUP: &str = "version";

/// Error returned when a pattern cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("regex error: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("pattern `{0}` has no `(?P<version>...)` capture group")]
    MissingVersionGroup(String),
}

/// A compiled pattern ready for matching.
///
/// Cloning is a reference-count increment.
#[derive(Clone)]
pub struct Pattern {
    regex: Arc<Regex>,
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.src()).finish()
    }
}

impl Pattern {
    /// Compile `src`.
    ///
    /// Matching is case-sensitive, `^`/`$` anchor to the line being matched,
    /// and the pattern must contain a `version` group.
    pub fn new(src: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(src)?;
        if !regex.capture_names().flatten().any(|n| n == VERSION_GROUP) {
            return Err(PatternError::MissingVersionGroup(src.to_owned()));
        }
        Ok(Self {
            regex: Arc::new(regex),
        })
    }

    /// The original source string.
    pub fn src(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if this pattern matches `line`.
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// The version captured from `line`.
    ///
    /// `None` if the pattern does not match, or if it matches but the captured
    /// text is not a dot-decimal version (`14.`, `1..2`).
    pub fn version_in(&self, line: &str) -> Option<Version> {
        let caps = self.regex.captures(line)?;
        Version::parse(caps.name(VERSION_GROUP)?.as_str()).ok()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
