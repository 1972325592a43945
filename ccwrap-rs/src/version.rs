//! Dot-decimal version numbers.
//!
//! A [`Version`] is an ordered sequence of non-negative integers, written as
//! `1`, `14.0.6`, `1022.1`, … Versions of different lengths are compared as if
//! the shorter one were padded with trailing zeroes, so:
//!
//! | Comparison      | Result |
//! |-----------------|--------|
//! | `1.2` vs `1.1.3` | greater |
//! | `1.2` vs `1.2.0` | equal   |
//! | `1.2` vs `1.2.3` | less    |
//!
//! Equality follows the same rule, which means two versions can compare equal
//! while rendering differently (`1.2` and `1.2.0`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// A version number in dot-decimal notation.
#[derive(Debug, Clone, Default)]
pub struct Version(Vec<u64>);

impl Version {
    /// Build a version from its components.
    pub fn new(components: impl Into<Vec<u64>>) -> Self {
        Version(components.into())
    }

    /// Parse a version number such as `14.0.6`.
    ///
    /// Fails on the empty string and on any component that is not a run of
    /// ASCII digits (so `1..2`, `1.`, `+1` and `1.x` are all rejected).
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        if text.is_empty() {
            return Err(VersionError::Empty);
        }
        let components = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidComponent {
                        component: part.to_owned(),
                        version: text.to_owned(),
                    });
                }
                part.parse::<u64>().map_err(|_| VersionError::InvalidComponent {
                    component: part.to_owned(),
                    version: text.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Version(components))
    }

    /// The individual components, without any padding.
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
