//! Expression evaluator and the environment it runs against.

use std::collections::HashMap;

use crate::error::{EvalError, Side};
use crate::toolchain::Tool;
use crate::version::Version;

use super::parse::{BinOp, Expr};
use super::value::Value;

// ── Bindings ──────────────────────────────────────────────────────────────────

/// Identifier lookup used by the evaluator.
///
/// An identifier that is not bound evaluates to nil; it is never an error, so
/// expressions can mention tools this build does not know how to detect.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<&Version>;
}

/// The identifiers bound for one invocation: one per detected tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, Version>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the identifiers for an identified compiler and/or linker.
    pub fn from_tools(compiler: Option<&Tool>, linker: Option<&Tool>) -> Self {
        let mut env = Self::new();
        for tool in compiler.into_iter().chain(linker) {
            env.bind(tool.name.identifier(), tool.version.clone());
        }
        env
    }

    pub fn bind(&mut self, name: &str, version: Version) {
        self.vars.insert(name.to_owned(), version);
    }

    /// Builder-style [`bind`](Self::bind).
    pub fn with(mut self, name: &str, version: Version) -> Self {
        self.bind(name, version);
        self
    }

}

impl Bindings for Environment {
    fn lookup(&self, name: &str) -> Option<&Version> {
        self.vars.get(name)
    }
}

impl Bindings for HashMap<String, Version> {
    fn lookup(&self, name: &str) -> Option<&Version> {
        self.get(name)
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

/// Evaluate an [`Expr`] AST node against the given bindings.
pub fn eval_expr(expr: &Expr, env: &dyn Bindings) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),

        Expr::Var(name) => Ok(env.lookup(name).cloned().into()),

        Expr::Not(inner) => {
            let v = eval_expr(inner, env)?;
            match v.truthiness() {
                Some(b) => Ok(Value::Bool(!b)),
                None => Err(EvalError::NotOperand {
                    found: v.type_name(),
                }),
            }
        }

        Expr::Binary(op, lhs, rhs) => {
            // Both sides are always evaluated, left first.
            let l = eval_expr(lhs, env)?;
            let r = eval_expr(rhs, env)?;
            eval_binop(*op, &l, &r)
        }

        Expr::Ternary(cond, then, otherwise) => {
            let c = eval_expr(cond, env)?;
            let Some(taken) = c.truthiness() else {
                return Err(EvalError::Condition {
                    found: c.type_name(),
                });
            };
            match (taken, otherwise) {
                (true, _) => eval_expr(then, env),
                (false, Some(otherwise)) => eval_expr(otherwise, env),
                // `cond ? value` contributes nothing when `cond` is false.
                (false, None) => Ok(Value::List(Vec::new())),
            }
        }
    }
}

fn eval_binop(op: BinOp, l: &Value, r: &Value) -> Result<Value, EvalError> {
    let result = match op {
        BinOp::And | BinOp::Or => {
            let a = logic_operand(op, Side::Left, l)?;
            let b = logic_operand(op, Side::Right, r)?;
            if op == BinOp::And {
                a && b
            } else {
                a || b
            }
        }
        _ => {
            let a = compare_operand(op, Side::Left, l)?;
            let b = compare_operand(op, Side::Right, r)?;
            compare(op, a, b)
        }
    };
    Ok(Value::Bool(result))
}

/// Apply a comparison operator. Nil orders before every version.
fn compare(op: BinOp, a: Option<&Version>, b: Option<&Version>) -> bool {
    match op {
        BinOp::Eq => a == b,
        BinOp::Ne => a != b,
        BinOp::Lt => a < b,
        BinOp::Le => a <= b,
        BinOp::Gt => a > b,
        _ => a >= b,
    }
}

fn logic_operand(op: BinOp, side: Side, v: &Value) -> Result<bool, EvalError> {
    v.truthiness().ok_or_else(|| EvalError::LogicOperand {
        side,
        op,
        found: v.type_name(),
    })
}

fn compare_operand(op: BinOp, side: Side, v: &Value) -> Result<Option<&Version>, EvalError> {
    v.as_comparable().ok_or_else(|| EvalError::CompareOperand {
        side,
        op,
        found: v.type_name(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
