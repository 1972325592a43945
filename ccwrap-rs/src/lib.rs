//! ccwrap: a C/C++ compiler and linker wrapper.
//!
//! ccwrap is invoked as `ccwrap cc <compiler> <args>...` or
//! `ccwrap ld <linker> <args>...`. Arguments of the form `{{ <expression> }}`
//! are evaluated against the identity of the tool being wrapped and replaced
//! by the arguments they produce, so one command line can serve GCC, Clang and
//! Apple's toolchain alike:
//!
//! ```text
//! ccwrap cc c++ -o example '{{ gcc || (clang && clang <= 15) ? "-fmodules-ts" : "-std=c++20" }}' example.cc
//! ccwrap ld ld '{{ appleld ? (appleld >= 1022.1 ? "-ld_classic" : "-ld64") }}' a.o b.o -o example
//! ```
//!
//! Diagnostics go to stderr at `warn` by default. Run with `CCWRAP_LOG=info`
//! to see the identified compiler and linker and the final command line.
//!
//! | Module       | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`version`]   | dot-decimal version numbers                           |
//! | [`expr`]      | the expression language: parser, values, evaluator    |
//! | [`pattern`]   | version-capturing line patterns                       |
//! | [`toolchain`] | supported tools, matcher registry, identification     |
//! | [`template`]  | expansion of templated arguments                      |
//! | [`cli`]       | argument parsing and re-execution of the wrapped tool |

pub mod cli;
pub mod error;
pub mod expr;
pub mod pattern;
pub mod template;
pub mod toolchain;
pub mod version;

pub use error::Error;
pub use expr::evaluate;
pub use toolchain::{identify_compiler, identify_linker, Family, Tool, ToolName};
pub use version::Version;
