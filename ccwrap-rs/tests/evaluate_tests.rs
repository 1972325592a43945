//! End-to-end expression scenarios: source text in, tool arguments out.

use ccwrap::error::{EvalError, ExprError, ParseError, Side};
use ccwrap::expr::{evaluate, parse_expr, BinOp, Environment};
use ccwrap::version::Version;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn v(s: &str) -> Version {
    s.parse().unwrap()
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn eval(src: &str, env: &Environment) -> Vec<String> {
    evaluate(src, env).unwrap_or_else(|e| panic!("{src}: {e}"))
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn werror_only_with_gcc() {
    let src = r#"gcc ? "-Werror" : []"#;
    assert_eq!(
        eval(src, &Environment::new().with("gcc", v("9.4.0"))),
        args(&["-Werror"])
    );
    assert_eq!(
        eval(src, &Environment::new().with("clang", v("17.0.6"))),
        Vec::<String>::new()
    );
}

#[test]
fn modules_flag_by_compiler_version() {
    let src = r#"gcc || (clang && clang <= 15) ? "-fmodules-ts" : "-std=c++20""#;
    let cases = [
        ("clang", "14.0.0", "-fmodules-ts"),
        ("clang", "15", "-fmodules-ts"),
        ("clang", "16.0.0", "-std=c++20"),
        ("gcc", "13.2.0", "-fmodules-ts"),
        ("aclang", "15.0.0", "-std=c++20"),
    ];
    for (name, version, expected) in cases {
        let env = Environment::new().with(name, v(version));
        assert_eq!(eval(src, &env), args(&[expected]), "{name} {version}");
    }
}

#[test]
fn apple_ld_classic_flag() {
    let src = r#"appleld ? (appleld >= 1022.1 ? "-ld_classic" : "-ld64")"#;
    let cases = [
        (Some("1015.7"), vec!["-ld64"]),
        (Some("1022.1"), vec!["-ld_classic"]),
        (Some("1053.12"), vec!["-ld_classic"]),
        (None, vec![]),
    ];
    for (version, expected) in cases {
        let mut env = Environment::new().with("gnuld", v("2.38"));
        if let Some(version) = version {
            env = Environment::new().with("appleld", v(version));
        }
        assert_eq!(eval(src, &env), args(&expected), "{version:?}");
    }
}

#[test]
fn result_shapes() {
    let env = Environment::new();
    assert_eq!(eval("'-a'", &env), args(&["-a"]));
    assert_eq!(eval(r#"["-a", '-b']"#, &env), args(&["-a", "-b"]));
    assert_eq!(eval("[]", &env), Vec::<String>::new());
    assert_eq!(eval("0 > 1 ? 'y'", &env), Vec::<String>::new());
    assert_eq!(eval("1 > 0 ? 'y'", &env), args(&["y"]));
    // Arguments are passed through verbatim, spaces and all.
    assert_eq!(eval(r#"'-DNAME="a b"'"#, &env), args(&["-DNAME=\"a b\""]));
}

#[test]
fn zero_is_a_detected_version() {
    let env = Environment::new().with("lld", v("0"));
    assert_eq!(eval("lld ? 'yes' : 'no'", &env), args(&["yes"]));
    assert_eq!(eval("!!lld ? 'yes' : 'no'", &env), args(&["yes"]));
    assert_eq!(eval("gold ? 'yes' : 'no'", &env), args(&["no"]));
}

#[test]
fn precedence() {
    let env = Environment::new().with("gcc", v("12"));
    // `!` binds tighter than `<`: `(!gcc) < 1` is `false < 1`, a type error.
    assert!(evaluate("!gcc < 1 ? 'x'", &env).is_err());
    assert_eq!(eval("!(gcc < 1) ? 'x'", &env), args(&["x"]));
    // `&&` binds tighter than `||`.
    assert_eq!(eval("gcc || clang && clang < 1 ? 'x'", &env), args(&["x"]));
    assert_eq!(
        eval("(gcc || clang) && clang < 1 ? 'x' : 'y'", &env),
        args(&["x"])
    );
    assert_eq!(
        eval("(gcc || clang) && gcc < 1 ? 'x' : 'y'", &env),
        args(&["y"])
    );
}

#[test]
fn parsed_expression_is_reusable() {
    let expr = parse_expr("gold >= 1.16 ? '--threads'").unwrap();
    for (version, expected) in [("1.15", 0), ("1.16", 1)] {
        let env = Environment::new().with("gold", v(version));
        let value = ccwrap::expr::eval_expr(&expr, &env).unwrap();
        assert_eq!(value.into_args().unwrap().len(), expected);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn type_errors_name_the_side() {
    let env = Environment::new();
    assert_eq!(
        evaluate("'2' == 2", &env),
        Err(ExprError::Eval(EvalError::CompareOperand {
            side: Side::Left,
            op: BinOp::Eq,
            found: "string",
        }))
    );
    let err = evaluate("2 == '2'", &env).unwrap_err();
    assert_eq!(
        err.to_string(),
        "right-hand operand to == must be a version, not string"
    );
    let err = evaluate("gcc && ['x']", &env).unwrap_err();
    assert_eq!(
        err.to_string(),
        "right-hand operand to && must be a boolean expression or a version, not string array"
    );
}

#[test]
fn result_must_be_string_or_array() {
    let env = Environment::new().with("gcc", v("9"));
    for (src, found) in [("gcc", "version"), ("clang", "nil"), ("1 < 2", "boolean")] {
        assert_eq!(
            evaluate(src, &env),
            Err(ExprError::Eval(EvalError::ResultType { found })),
            "{src}"
        );
    }
}

#[test]
fn parse_errors() {
    let env = Environment::new();
    let cases = [
        "",
        "gcc ?",
        "gcc ? : 'x'",
        "('x'",
        "['a',]",
        "[,'a']",
        "['a' 'b']",
        "[1]",
        "1.",
        "'unterminated",
        "''",
        "gcc = 1",
        "gcc & clang",
        "1 < 2 < 3",
        "'x' 'y'",
        "gcc $ 1",
    ];
    for src in cases {
        assert!(
            matches!(evaluate(src, &env), Err(ExprError::Parse(_))),
            "{src:?} should not parse"
        );
    }
}

#[test]
fn parse_error_offsets() {
    assert_eq!(
        parse_expr("gcc ?").unwrap_err(),
        ParseError::Unexpected {
            found: "end of input".to_owned(),
            expected: "a version number, string, array, identifier or `(`",
            offset: 5,
        }
    );
    assert!(matches!(
        parse_expr("''"),
        Err(ParseError::EmptyString { offset: 0 })
    ));
}

#[test]
fn deeply_nested_expressions_are_rejected() {
    let env = Environment::new().with("gcc", v("12"));
    for src in [
        format!("{}'x'{}", "(".repeat(100_000), ")".repeat(100_000)),
        format!("{}gcc ? 'x'", "!".repeat(100_000)),
        format!("{}'x'", "gcc ? ".repeat(100_000)),
    ] {
        assert!(
            matches!(
                evaluate(&src, &env),
                Err(ExprError::Parse(ParseError::TooDeep { .. }))
            ),
            "{}...",
            &src[..16]
        );
    }
}
