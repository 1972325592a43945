use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ccwrap::expr::{eval_expr, evaluate, parse_expr, Environment};
use ccwrap::toolchain::identify::classify;
use ccwrap::toolchain::Registry;
use ccwrap::version::Version;

const MODULES: &str = r#"gcc || (clang && clang <= 15) ? "-fmodules-ts" : "-std=c++20""#;
const APPLE_LD: &str = r#"appleld ? (appleld >= 1022.1 ? "-ld_classic" : "-ld64")"#;

const CLANG_STDERR: &str = "\
Ubuntu clang version 14.0.0-1ubuntu1.1
Target: x86_64-pc-linux-gnu
Thread model: posix
InstalledDir: /usr/bin
Found candidate GCC installation: /usr/bin/../lib/gcc/x86_64-linux-gnu/12
Selected GCC installation: /usr/bin/../lib/gcc/x86_64-linux-gnu/12
 \"/usr/bin/ld\" -z relro --hash-style=gnu --build-id --eh-frame-hdr -m elf_x86_64 -v
/usr/bin/ld: cannot find crt1.o: No such file or directory
clang: error: linker command failed with exit code 1 (use -v to see invocation)
";

fn bench_expr(c: &mut Criterion) {
    let env = Environment::new()
        .with("clang", Version::new([14, 0, 0]))
        .with("lld", Version::new([14, 0, 0]));

    let mut g = c.benchmark_group("expr");

    g.bench_function("parse_modules", |b| {
        b.iter(|| parse_expr(black_box(MODULES)))
    });
    g.bench_function("evaluate_modules", |b| {
        b.iter(|| evaluate(black_box(MODULES), &env))
    });
    let parsed = parse_expr(APPLE_LD).unwrap();
    g.bench_function("eval_preparsed_apple_ld", |b| {
        b.iter(|| eval_expr(black_box(&parsed), &env))
    });

    g.finish();
}

fn bench_classify(c: &mut Criterion) {
    let registry = Registry::builtin();
    let stdout = "GNU ld (GNU Binutils for Ubuntu) 2.38\n";

    let mut g = c.benchmark_group("classify");

    g.bench_function("clang_gnu_ld", |b| {
        b.iter(|| {
            classify(
                registry,
                black_box(stdout.as_bytes()),
                black_box(CLANG_STDERR.as_bytes()),
            )
        })
    });
    let unknown = CLANG_STDERR.replace("clang version", "cc version");
    g.bench_function("unrecognised", |b| {
        b.iter(|| classify(registry, b"", black_box(unknown.as_bytes())))
    });

    g.finish();
}

criterion_group!(benches, bench_expr, bench_classify);
criterion_main!(benches);
