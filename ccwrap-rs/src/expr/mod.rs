//! The argument expression language.
//!
//! An expression decides which arguments to pass to a compiler or linker,
//! depending on which tools were detected.
//!
//! # Types
//!
//! - nil, the value of an identifier that is not bound
//! - [`Version`](crate::version::Version) numbers in dot-decimal notation
//!   (`1`, `1.5`, `14.0.6`)
//! - booleans, produced by the comparison and logical operators
//! - strings, in single or double quotes (`'-Wall'`, `"-Wall"`); empty strings
//!   are not allowed
//! - string arrays (`['-a', "-b"]`, `[]`)
//!
//! Identifiers (`gcc`, `ld64`, …) are bound to the version of the tool they
//! name if that tool was detected, and are nil otherwise. Nil is false in a
//! boolean context and any version is true, `0` included.
//!
//! # Operators
//!
//! From tightest to loosest binding:
//!
//! | Operator | Operands | Result |
//! |----------|----------|--------|
//! | `!` | nil, boolean or version | boolean |
//! | `==` `!=` `<` `<=` `>` `>=` | nil or version (nil sorts below every version) | boolean |
//! | `&&` | nil, boolean or version | boolean |
//! | `\|\|` | nil, boolean or version | boolean |
//! | `? :` | condition, then any two values | the selected value |
//!
//! The `:` branch may be left out; a false condition then yields `[]`.
//! Parentheses override precedence.
//!
//! The whole expression must evaluate to a string (one argument) or a string
//! array (zero or more arguments).
//!
//! ```rust
//! use ccwrap::expr::{evaluate, Environment};
//! use ccwrap::version::Version;
//!
//! let env = Environment::new().with("clang", Version::new([14, 0, 0]));
//! let args = evaluate(
//!     r#"gcc || (clang && clang <= 15) ? "-fmodules-ts" : "-std=c++20""#,
//!     &env,
//! )
//! .unwrap();
//! assert_eq!(args, vec!["-fmodules-ts"]);
//! ```

pub mod eval;
pub mod parse;
pub mod value;

pub use eval::{eval_expr, Bindings, Environment};
pub use parse::{parse_expr, BinOp, Expr};
pub use value::Value;

use crate::error::ExprError;

/// Parse and evaluate an expression, returning the arguments it contributes.
pub fn evaluate(src: &str, env: &dyn Bindings) -> Result<Vec<String>, ExprError> {
    let expr = parse_expr(src)?;
    let value = eval_expr(&expr, env)?;
    tracing::trace!(expression = src, result = %value, "evaluated expression");
    Ok(value.into_args()?)
}
