//! Command-line argument parsing and tool re-execution.
//!
//! Usage:
//!   ccwrap cc <compiler> [<arg>...]
//!   ccwrap ld <linker> [<arg>...]
//!
//! Nothing after the tool path is interpreted by ccwrap; options such as `-v`
//! belong to the tool.

use std::process::Command;

use crate::error::CliError;
use crate::toolchain::Family;

pub const USAGE: &str = "Usage: ccwrap [cc|ld] [TOOL_PATH] [TOOL_ARGS]...";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Which family of tool is being wrapped (`cc` or `ld`).
    pub mode: Family,
    /// Path to the compiler or linker, absolute, relative or a bare name to be
    /// looked up in `PATH`.
    pub tool: String,
    /// Arguments for the tool, possibly templated.
    pub tool_args: Vec<String>,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`].
pub fn parse_args() -> Result<CliArgs, CliError> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, CliError> {
    let (mode, rest) = argv.split_first().ok_or(CliError::Missing("tool mode"))?;
    let mode: Family = mode.parse()?;
    let (tool, tool_args) = rest.split_first().ok_or(CliError::Missing("tool path"))?;
    if tool.is_empty() {
        return Err(CliError::Missing("tool path"));
    }
    Ok(CliArgs {
        mode,
        tool: tool.clone(),
        tool_args: tool_args.to_vec(),
    })
}

// ── Execution ─────────────────────────────────────────────────────────────────

/// `tool` followed by `args`, space-separated, for logging.
pub fn command_line(tool: &str, args: &[String]) -> String {
    std::iter::once(tool)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace the current process with `tool`.
///
/// Only returns on failure. A bare `tool` name is looked up in `PATH`.
#[cfg(unix)]
pub fn exec_tool(tool: &str, args: &[String]) -> Result<i32, CliError> {
    use std::os::unix::process::CommandExt;

    let source = Command::new(tool).args(args).exec();
    Err(CliError::Exec {
        tool: tool.to_owned(),
        source,
    })
}

/// Run `tool` to completion and return its exit status.
#[cfg(not(unix))]
pub fn exec_tool(tool: &str, args: &[String]) -> Result<i32, CliError> {
    let status = Command::new(tool)
        .args(args)
        .status()
        .map_err(|source| CliError::Exec {
            tool: tool.to_owned(),
            source,
        })?;
    Ok(status.code().unwrap_or(1))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn compiler_mode() {
        let a = parse_argv(&argv(&["cc", "/usr/bin/gcc", "-c", "x.c"])).unwrap();
        assert_eq!(a.mode, Family::Compiler);
        assert_eq!(a.tool, "/usr/bin/gcc");
        assert_eq!(a.tool_args, argv(&["-c", "x.c"]));
    }

    #[test]
    fn linker_mode_without_args() {
        let a = parse_argv(&argv(&["ld", "ld.lld"])).unwrap();
        assert_eq!(a.mode, Family::Linker);
        assert!(a.tool_args.is_empty());
    }

    #[test]
    fn tool_options_are_not_ours() {
        let a = parse_argv(&argv(&["cc", "clang", "-v", "--help", "--", "{{ gcc ? '-g' }}"])).unwrap();
        assert_eq!(a.tool_args, argv(&["-v", "--help", "--", "{{ gcc ? '-g' }}"]));
    }

    #[test]
    fn missing_arguments() {
        assert!(matches!(parse_argv(&[]), Err(CliError::Missing("tool mode"))));
        assert!(matches!(parse_argv(&argv(&["cc"])), Err(CliError::Missing("tool path"))));
        assert!(matches!(parse_argv(&argv(&["ld", ""])), Err(CliError::Missing("tool path"))));
    }

    #[test]
    fn unknown_mode() {
        assert!(matches!(
            parse_argv(&argv(&["as", "/usr/bin/as"])),
            Err(CliError::UnknownMode(m)) if m == "as"
        ));
        assert!(parse_argv(&argv(&["CC", "gcc"])).is_err());
    }

    #[test]
    fn command_line_joins() {
        assert_eq!(command_line("gcc", &argv(&["-c", "x.c"])), "gcc -c x.c");
        assert_eq!(command_line("ld", &[]), "ld");
    }

    #[test]
    fn exec_failure_is_reported() {
        let err = exec_tool("/nonexistent/ccwrap-test-tool", &[]).unwrap_err();
        assert!(matches!(&err, CliError::Exec { tool, .. } if tool == "/nonexistent/ccwrap-test-tool"));
        assert!(err.to_string().starts_with("failed to run `/nonexistent/ccwrap-test-tool`: "));
    }
}
