use std::cmp::Ordering;

use proptest::prelude::*;

use ccwrap::error::ParseError;
use ccwrap::expr::parse::MAX_DEPTH;
use ccwrap::expr::{evaluate, parse_expr, Environment};
use ccwrap::toolchain::identify::{classify, linker_args};
use ccwrap::toolchain::Registry;
use ccwrap::version::Version;

fn version() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..2000, 1..6)
}

/// Pad both component lists with zeroes to the same length.
fn padded(a: &[u64], b: &[u64]) -> (Vec<u64>, Vec<u64>) {
    let n = a.len().max(b.len());
    let pad = |v: &[u64]| {
        let mut v = v.to_vec();
        v.resize(n, 0);
        v
    };
    (pad(a), pad(b))
}

proptest! {
    /// The parser returns Ok or Err on any input, never panics.
    #[test]
    fn parser_does_not_panic(s in "\\PC*") {
        let _ = parse_expr(&s);
    }

    /// Same, on inputs drawn from the expression alphabet, which reach much
    /// deeper into the grammar than arbitrary text does.
    #[test]
    fn evaluator_does_not_panic(
        s in r#"([ !=<>&|?:()\[\],.'"a-z0-9]|gcc|clang|lld){0,40}"#,
        gcc in prop::option::of(version()),
    ) {
        let mut env = Environment::new();
        if let Some(gcc) = gcc {
            env.bind("gcc", Version::new(gcc));
        }
        let _ = evaluate(&s, &env);
    }

    /// Nesting is accepted up to the limit and rejected past it, whatever
    /// mix of `!` and `(` builds it.
    #[test]
    fn nesting_depth_is_bounded(layers in prop::collection::vec(any::<bool>(), 0..2 * MAX_DEPTH)) {
        let mut src = String::new();
        for &paren in &layers {
            src.push(if paren { '(' } else { '!' });
        }
        src.push_str("gcc");
        for _ in layers.iter().filter(|&&paren| paren) {
            src.push(')');
        }
        let parsed = parse_expr(&src);
        if layers.len() <= MAX_DEPTH {
            prop_assert!(parsed.is_ok(), "{:?}", parsed);
        } else {
            prop_assert!(matches!(parsed, Err(ParseError::TooDeep { .. })), "{:?}", parsed);
        }
    }

    #[test]
    fn version_display_round_trips(components in version()) {
        let v = Version::new(components.clone());
        let parsed: Version = v.to_string().parse().unwrap();
        prop_assert_eq!(parsed.components(), &components[..]);
    }

    /// Ordering is the lexicographic order of the zero-padded components.
    #[test]
    fn version_order_is_padded_lexicographic(a in version(), b in version()) {
        let (pa, pb) = padded(&a, &b);
        prop_assert_eq!(Version::new(a).cmp(&Version::new(b)), pa.cmp(&pb));
    }

    #[test]
    fn version_order_is_antisymmetric(a in version(), b in version()) {
        let (va, vb) = (Version::new(a), Version::new(b));
        prop_assert_eq!(va.cmp(&vb), vb.cmp(&va).reverse());
        prop_assert_eq!(va == vb, va.cmp(&vb) == Ordering::Equal);
    }

    #[test]
    fn trailing_zeroes_do_not_matter(a in version(), zeroes in 0usize..4) {
        let mut longer = a.clone();
        longer.extend(std::iter::repeat(0).take(zeroes));
        prop_assert_eq!(Version::new(a), Version::new(longer));
    }

    /// Comparisons in the expression language agree with `Version`'s order.
    #[test]
    fn comparison_operators_agree_with_ord(a in version(), b in version()) {
        let (va, vb) = (Version::new(a), Version::new(b));
        let env = Environment::new().with("a", va.clone()).with("b", vb.clone());
        let ord = va.cmp(&vb);
        for (op, expected) in [
            ("==", ord == Ordering::Equal),
            ("!=", ord != Ordering::Equal),
            ("<", ord == Ordering::Less),
            ("<=", ord != Ordering::Greater),
            (">", ord == Ordering::Greater),
            (">=", ord != Ordering::Less),
        ] {
            let got = evaluate(&format!("a {op} b ? 'y' : 'n'"), &env).unwrap();
            prop_assert_eq!(got == ["y"], expected, "a {} b", op);
        }
    }

    /// Filtering keeps a subsequence of the original arguments.
    #[test]
    fn linker_args_is_a_subsequence(
        args in prop::collection::vec(r"-B|-B[a-z/]{1,4}|-fuse-ld=[a-z]{1,4}|--ld-path=/[a-z]{1,4}|-[a-zA-Z]{1,4}|[a-z.]{1,6}", 0..10)
    ) {
        let kept = linker_args(&args);
        let mut rest = args.iter();
        for k in &kept {
            prop_assert!(rest.any(|a| a == k), "{:?} not a subsequence of {:?}", kept, args);
        }
    }

    /// Classification accepts any bytes.
    #[test]
    fn classify_does_not_panic(
        out in prop::collection::vec(any::<u8>(), 0..256),
        err in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let _ = classify(Registry::builtin(), &out, &err);
    }
}
