//! Compiler and linker identification.
//!
//! Every supported tool prints an identification line when invoked with `-v`.
//! The [`Registry`] lists, per output stream, the pattern that recognises each
//! tool's line; the functions in [`identify`] run a tool and classify what it
//! printed.
//!
//! | Tool        | Family   | Expression identifier |
//! |-------------|----------|-----------------------|
//! | GCC         | compiler | `gcc`                 |
//! | Clang       | compiler | `clang`               |
//! | Apple Clang | compiler | `aclang`              |
//! | GNU ld      | linker   | `gnuld`               |
//! | GNU gold    | linker   | `gold`                |
//! | LLD         | linker   | `lld`                 |
//! | ld64        | linker   | `ld64`                |
//! | Apple ld    | linker   | `appleld`             |

pub mod identify;
pub mod registry;

use std::fmt;
use std::str::FromStr;

use crate::error::CliError;
use crate::version::Version;

pub use identify::{identify_compiler, identify_linker, CommandProbe, Identifier, Probe};
pub use registry::{Matcher, Registry, Stream};

/// Where users are asked to send the output of a tool that was not recognised:
/// the package's `repository` URL when the manifest declares one.
pub const REPORT_TO: &str = if env!("CARGO_PKG_REPOSITORY").is_empty() {
    "the ccwrap issue tracker"
} else {
    env!("CARGO_PKG_REPOSITORY")
};

/// A family of tools that can be identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Compiler,
    Linker,
}

impl Family {
    /// The command-line mode selecting this family (`cc` or `ld`).
    pub fn mode(self) -> &'static str {
        match self {
            Family::Compiler => "cc",
            Family::Linker => "ld",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Compiler => "C/C++ compiler",
            Family::Linker => "linker",
        })
    }
}

impl FromStr for Family {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cc" => Ok(Family::Compiler),
            "ld" => Ok(Family::Linker),
            other => Err(CliError::UnknownMode(other.to_owned())),
        }
    }
}

/// A compiler or linker this crate knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// The GNU Compiler Collection.
    Gcc,
    /// The LLVM C language family frontend, from any vendor but Apple.
    Clang,
    /// Apple's build of Clang, shipped with Xcode. Versioned independently of
    /// upstream Clang.
    AppleClang,
    /// The GNU linker from binutils.
    GnuLd,
    /// GNU gold, versioned independently of the binutils it ships in.
    Gold,
    /// The LLVM linker.
    Lld,
    /// Apple's classic linker (`ld-classic` from Xcode 15).
    Ld64,
    /// Apple's linker introduced in Xcode 15 (briefly `ld-prime`/`dyld`).
    AppleLd,
}

impl ToolName {
    pub const ALL: [ToolName; 8] = [
        ToolName::Gcc,
        ToolName::Clang,
        ToolName::AppleClang,
        ToolName::GnuLd,
        ToolName::Gold,
        ToolName::Lld,
        ToolName::Ld64,
        ToolName::AppleLd,
    ];

    pub fn family(self) -> Family {
        match self {
            ToolName::Gcc | ToolName::Clang | ToolName::AppleClang => Family::Compiler,
            ToolName::GnuLd
            | ToolName::Gold
            | ToolName::Lld
            | ToolName::Ld64
            | ToolName::AppleLd => Family::Linker,
        }
    }

    /// Human-readable name, as used when reporting an identified tool.
    pub fn display_name(self) -> &'static str {
        match self {
            ToolName::Gcc => "GCC",
            ToolName::Clang => "Clang",
            ToolName::AppleClang => "Apple Clang",
            ToolName::GnuLd => "GNU ld",
            ToolName::Gold => "GNU gold",
            ToolName::Lld => "LLD",
            ToolName::Ld64 => "ld64",
            ToolName::AppleLd => "Apple ld",
        }
    }

    /// The identifier bound to this tool's version in expressions.
    pub fn identifier(self) -> &'static str {
        match self {
            ToolName::Gcc => "gcc",
            ToolName::Clang => "clang",
            ToolName::AppleClang => "aclang",
            ToolName::GnuLd => "gnuld",
            ToolName::Gold => "gold",
            ToolName::Lld => "lld",
            ToolName::Ld64 => "ld64",
            ToolName::AppleLd => "appleld",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A specific version of a compiler or linker.
///
/// Only the dot-decimal part of a version is kept, so development builds that
/// differ by commit hash are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: ToolName,
    pub version: Version,
}

impl Tool {
    pub fn new(name: ToolName, version: Version) -> Self {
        Tool { name, version }
    }

    pub fn family(&self) -> Family {
        self.name.family()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_display() {
        let t = Tool::new(ToolName::AppleClang, Version::new([15, 0, 0]));
        assert_eq!(t.to_string(), "Apple Clang 15.0.0");
        assert_eq!(t.family(), Family::Compiler);
    }

    #[test]
    fn identifiers_are_unique() {
        let ids: HashSet<_> = ToolName::ALL.iter().map(|n| n.identifier()).collect();
        assert_eq!(ids.len(), ToolName::ALL.len());
    }

    #[test]
    fn families() {
        let compilers: Vec<_> = ToolName::ALL
            .into_iter()
            .filter(|n| n.family() == Family::Compiler)
            .collect();
        assert_eq!(
            compilers,
            vec![ToolName::Gcc, ToolName::Clang, ToolName::AppleClang]
        );
    }

    #[test]
    fn mode_round_trip() {
        for family in [Family::Compiler, Family::Linker] {
            assert_eq!(family.mode().parse::<Family>().unwrap(), family);
        }
        assert!(matches!("as".parse::<Family>(), Err(CliError::UnknownMode(m)) if m == "as"));
    }

    #[test]
    fn report_to_follows_the_manifest() {
        let repository = env!("CARGO_PKG_REPOSITORY");
        if repository.is_empty() {
            assert_eq!(REPORT_TO, "the ccwrap issue tracker");
        } else {
            assert_eq!(REPORT_TO, repository);
        }
    }
}
