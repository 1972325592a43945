//! Error types for ccwrap.
//!
//! Each layer has its own enum; [`Error`] wraps all of them for callers that
//! drive the whole pipeline (the templater and the binary).

use crate::expr::parse::BinOp;
use crate::toolchain::Family;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to evaluate expression `{expression}`: {source}")]
    Expr {
        expression: String,
        #[source]
        source: ExprError,
    },

    #[error(transparent)]
    Identify(#[from] IdentifyError),

    #[error(transparent)]
    Cli(#[from] CliError),
}

/// A version number that is not in dot-decimal notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version number must not be empty")]
    Empty,

    #[error("invalid component `{component}` in version number `{version}`")]
    InvalidComponent { component: String, version: String },
}

/// Failure to parse or evaluate an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// A malformed expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected {found} at offset {offset}; expected {expected}")]
    Unexpected {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("string literal cannot be empty (at offset {offset})")]
    EmptyString { offset: usize },

    #[error("invalid escape sequence `\\{ch}` in string literal at offset {offset}")]
    InvalidEscape { ch: char, offset: usize },

    #[error("integer `{text}` at offset {offset} is too large for a version number")]
    IntegerOverflow { text: String, offset: usize },

    #[error("comparison operators cannot be chained (`{op}` at offset {offset}); use parentheses")]
    ChainedComparison { op: BinOp, offset: usize },

    #[error("expression is nested too deeply at offset {offset}")]
    TooDeep { offset: usize },
}

/// Which side of a binary operator an operand sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Left => "left-hand",
            Side::Right => "right-hand",
        })
    }
}

/// An operand or result of the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("operand to ! must be a boolean expression or a version, not {found}")]
    NotOperand { found: &'static str },

    #[error("{side} operand to {op} must be a boolean expression or a version, not {found}")]
    LogicOperand {
        side: Side,
        op: BinOp,
        found: &'static str,
    },

    #[error("{side} operand to {op} must be a version, not {found}")]
    CompareOperand {
        side: Side,
        op: BinOp,
        found: &'static str,
    },

    #[error("condition of ? must be a boolean expression or a version, not {found}")]
    Condition { found: &'static str },

    #[error("expression must evaluate to string or string array, not {found}")]
    ResultType { found: &'static str },
}

/// Failure to identify a compiler or linker.
#[derive(Debug, thiserror::Error)]
pub enum IdentifyError {
    #[error("execute {path}: {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to identify {family}; please report the output of `{command}` to {report}",
        report = crate::toolchain::REPORT_TO
    )]
    Unidentified { family: Family, command: String },
}

/// Command-line usage and tool re-execution errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("expected tool mode `cc` or `ld`, got `{0}`")]
    UnknownMode(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("failed to run `{tool}`: {source}")]
    Exec {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}
