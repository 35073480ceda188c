use criterion::{Criterion, criterion_group, criterion_main};
use mstyle::{AnalyzeOptions, analyze};
use std::collections::HashMap;
use std::hint::black_box;

fn generate_small_source() -> String {
    "x = 1;\ny = 2;\nz = x + y;\n\nfunction out = add(a, b)\nout = a + b;\nend\n".to_string()
}

fn generate_large_source() -> String {
    let mut content = String::with_capacity(20_000);
    content.push_str("% Copyright 2024 Example Corp\n\n");
    for i in 0..50 {
        content.push_str(&format!("function out_{i} = compute_{i}(a, b)\n"));
        content.push_str("if a > b\n");
        content.push_str("out = a - b;\n");
        content.push_str("else\n");
        content.push_str("out = b - a;\n");
        content.push_str("end\n");
        for j in 0..5 {
            content.push_str(&format!("v{j} = out_{i} + {j};\n"));
        }
        content.push_str("end\n\n");
    }
    content
}

fn generate_dirty_source() -> String {
    let mut content = String::new();
    content.push_str("\n");
    for i in 0..20 {
        content.push_str(&format!("x{i}=1;   \n"));
    }
    content.push_str("\n\n\ny = f( 1 , 2 );\n");
    content.push_str("\tz = 3;\n");
    content
}

fn bench_lint_single_small(c: &mut Criterion) {
    let content = generate_small_source();
    c.bench_function("lint_single_small", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().with_string("bench.m", content.clone());
            black_box(analyze(&options).unwrap())
        })
    });
}

fn bench_lint_single_large(c: &mut Criterion) {
    let content = generate_large_source();
    c.bench_function("lint_single_large", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().with_string("bench.m", content.clone());
            black_box(analyze(&options).unwrap())
        })
    });
}

fn bench_lint_with_fixes(c: &mut Criterion) {
    let content = generate_dirty_source();
    c.bench_function("lint_with_fixes", |b| {
        b.iter(|| {
            let options = AnalyzeOptions::new().with_string("bench.m", content.clone());
            black_box(analyze(&options).unwrap())
        })
    });
}

fn bench_lint_multi_files(c: &mut Criterion) {
    let content = generate_small_source();
    let strings: HashMap<String, String> = (0..20)
        .map(|i| (format!("file_{i}.m"), content.clone()))
        .collect();

    c.bench_function("lint_multi_files_20", |b| {
        b.iter(|| {
            let mut options = AnalyzeOptions::new();
            for (name, src) in &strings {
                options = options.with_string(name.clone(), src.clone());
            }
            black_box(analyze(&options).unwrap())
        })
    });
}

#[cfg(feature = "async")]
fn bench_lint_async_multi_files(c: &mut Criterion) {
    let content = generate_small_source();
    let strings: HashMap<String, String> = (0..20)
        .map(|i| (format!("file_{i}.m"), content.clone()))
        .collect();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    c.bench_function("lint_async_multi_files_20", |b| {
        b.iter(|| {
            let mut options = AnalyzeOptions::new();
            for (name, src) in &strings {
                options = options.with_string(name.clone(), src.clone());
            }
            black_box(rt.block_on(mstyle::engine::analyze_async(&options)).unwrap())
        })
    });
}

#[cfg(not(feature = "async"))]
criterion_group!(
    benches,
    bench_lint_single_small,
    bench_lint_single_large,
    bench_lint_with_fixes,
    bench_lint_multi_files
);

#[cfg(feature = "async")]
criterion_group!(
    benches,
    bench_lint_single_small,
    bench_lint_single_large,
    bench_lint_with_fixes,
    bench_lint_multi_files,
    bench_lint_async_multi_files
);

criterion_main!(benches);
