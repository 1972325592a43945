//! Argument templating.
//!
//! An argument of the form `{{ <expression> }}` is replaced by the arguments
//! the expression evaluates to; every other argument passes through untouched.
//! The tool is identified the first time an expression is seen, and not at all
//! when there are none.

use tracing::debug;

use crate::error::{Error, IdentifyError};
use crate::expr::{evaluate, Environment};
use crate::toolchain::{CommandProbe, Family, Identifier, Probe};

pub const EXPR_PREFIX: &str = "{{ ";
pub const EXPR_SUFFIX: &str = " }}";

/// The expression inside `arg`, if it is a templated argument.
///
/// The delimiters may not overlap, so `{{ }}` is passed through verbatim while
/// `{{  }}` is an (empty, and therefore invalid) expression.
pub fn expression_of(arg: &str) -> Option<&str> {
    arg.strip_prefix(EXPR_PREFIX)?.strip_suffix(EXPR_SUFFIX)
}

/// Templates the arguments of one invocation of a compiler or linker.
pub struct Templater<'r, P> {
    identifier: Identifier<'r, P>,
    mode: Family,
    tool: String,
    env: Option<Environment>,
}

impl Templater<'static, CommandProbe> {
    /// A templater that runs `tool` to identify it.
    pub fn new(mode: Family, tool: impl Into<String>) -> Self {
        Self::with_identifier(Identifier::default(), mode, tool)
    }
}

impl<'r, P: Probe> Templater<'r, P> {
    pub fn with_identifier(
        identifier: Identifier<'r, P>,
        mode: Family,
        tool: impl Into<String>,
    ) -> Self {
        Templater {
            identifier,
            mode,
            tool: tool.into(),
            env: None,
        }
    }

    /// The bindings expressions were evaluated against, once the tool has been
    /// identified.
    pub fn environment(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Replace every templated argument in `args` by its expansion.
    ///
    /// Fails on the first expression that does not parse or evaluate; no
    /// partial result is returned.
    pub fn expand(&mut self, args: &[String]) -> Result<Vec<String>, Error> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            let Some(src) = expression_of(arg) else {
                out.push(arg.clone());
                continue;
            };
            let env = self.identified(args)?;
            let expanded = evaluate(src, env).map_err(|source| Error::Expr {
                expression: src.to_owned(),
                source,
            })?;
            debug!(expression = src, ?expanded, "expanded argument");
            out.extend(expanded);
        }
        Ok(out)
    }

    fn identified(&mut self, args: &[String]) -> Result<&Environment, IdentifyError> {
        match self.env {
            Some(ref env) => Ok(env),
            None => {
                let env = self.identify(args)?;
                Ok(self.env.insert(env))
            }
        }
    }

    fn identify(&self, args: &[String]) -> Result<Environment, IdentifyError> {
        Ok(match self.mode {
            Family::Compiler => {
                let (compiler, linker) = self.identifier.identify_compiler(&self.tool, args)?;
                Environment::from_tools(Some(&compiler), Some(&linker))
            }
            Family::Linker => {
                let linker = self.identifier.identify_linker(&self.tool)?;
                Environment::from_tools(None, Some(&linker))
            }
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
