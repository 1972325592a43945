//! The ordered list of identification-line matchers.
//!
//! Order matters: within one stream and one family the first matcher that
//! matches any line wins. A vendor build whose line is also matched by a
//! generic upstream pattern (Apple Clang and Clang) must therefore be listed
//! first.

use std::sync::LazyLock;

use crate::pattern::{Pattern, PatternError};

use super::{Family, ToolName};

/// A standard stream a tool writes its identification line to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        })
    }
}

/// Recognises one tool's identification line on one stream.
#[derive(Debug, Clone)]
pub struct Matcher {
    pub name: ToolName,
    pub stream: Stream,
    pub pattern: Pattern,
}

impl Matcher {
    pub fn family(&self) -> Family {
        self.name.family()
    }
}

/// An immutable, ordered set of [`Matcher`]s.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    matchers: Vec<Matcher>,
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    let builder = Registry::builder()
        // stderr
        .matcher(
            Stream::Stderr,
            ToolName::Gcc,
            r"^gcc (?:version|\(GCC\)) (?P<version>[\d.]+)",
        )
        .and_then(|b| {
            b.matcher(
                Stream::Stderr,
                ToolName::AppleClang,
                r"^Apple clang version (?P<version>[\d.]+)",
            )
        })
        .and_then(|b| {
            b.matcher(
                Stream::Stderr,
                ToolName::Clang,
                r"^(?:[[:print:]]+ )?clang version (?P<version>[\d.]+)",
            )
        })
        // Xcode 15.0 to 15.2 report the project as `dyld`.
        .and_then(|b| {
            b.matcher(
                Stream::Stderr,
                ToolName::AppleLd,
                r"^@\(#\)PROGRAM:[[:print:]]+?\s+PROJECT:(?:dy)?ld-(?P<version>[\d.]+)$",
            )
        })
        .and_then(|b| {
            b.matcher(
                Stream::Stderr,
                ToolName::Ld64,
                r"^@\(#\)PROGRAM:[[:print:]]+?\s+PROJECT:ld64-(?P<version>[\d.]+)$",
            )
        })
        // stdout
        .and_then(|b| {
            b.matcher(
                Stream::Stdout,
                ToolName::GnuLd,
                r"^GNU ld \(.*\) (?P<version>[\d.]+)$",
            )
        })
        .and_then(|b| {
            b.matcher(
                Stream::Stdout,
                ToolName::Lld,
                r"^(?:[[:print:]]+ )?LLD (?P<version>[\d.]+).* \(compatible with GNU linkers\)$",
            )
        })
        // gold prints the binutils version in parentheses, then its own.
        .and_then(|b| {
            b.matcher(
                Stream::Stdout,
                ToolName::Gold,
                r"^GNU gold \(.*\) (?P<version>[\d.]+)$",
            )
        });
    builder
        .expect("builtin matcher patterns are valid")
        .build()
});

impl Registry {
    /// The matchers for every tool this crate supports.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every matcher, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.matchers.iter()
    }

    /// The matchers for `family` on `stream`, in declaration order.
    pub fn matchers(&self, stream: Stream, family: Family) -> impl Iterator<Item = &Matcher> {
        self.matchers
            .iter()
            .filter(move |m| m.stream == stream && m.family() == family)
    }
}

/// Builds a [`Registry`], preserving the order matchers are added in.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    matchers: Vec<Matcher>,
}

impl RegistryBuilder {
    /// Append a matcher for `name` on `stream`.
    ///
    /// `pattern` must contain a `version` capture group.
    pub fn matcher(
        mut self,
        stream: Stream,
        name: ToolName,
        pattern: &str,
    ) -> Result<Self, PatternError> {
        let pattern = Pattern::new(pattern)?;
        self.matchers.push(Matcher {
            name,
            stream,
            pattern,
        });
        Ok(self)
    }

    /// Append every matcher of `registry`, keeping its order.
    pub fn extend(mut self, registry: &Registry) -> Self {
        self.matchers.extend(registry.iter().cloned());
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            matchers: self.matchers,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
