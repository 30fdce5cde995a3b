// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use taptally_tap::TapParser;

/// Build TAP output with `count` results and a sprinkling of diagnostics
fn sample_output(count: usize) -> String {
    let mut output = format!("1..{count}\n");
    for i in 1..=count {
        match i % 10 {
            0 => output.push_str(&format!("not ok {i} - flaky # TODO investigate\n")),
            5 => output.push_str(&format!("# diagnostic for {i}\nok {i} - with notes\n")),
            7 => output.push_str(&format!("not ok {i} - broken # exit status 1\n")),
            _ => output.push_str(&format!("ok {i} - case {i}\n")),
        }
    }
    output
}

fn parse_benchmarks(c: &mut Criterion) {
    let parser = TapParser::new().expect("Failed to compile grammars");

    let mut group = c.benchmark_group("parse");
    for count in [10, 100, 1000] {
        let output = sample_output(count);
        group.throughput(Throughput::Bytes(output.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &output, |b, output| {
            b.iter(|| {
                parser
                    .parse(std::hint::black_box(output.as_bytes()), std::io::sink())
                    .expect("Should parse")
            })
        });
    }
    group.finish();

    c.bench_function("compile_grammars", |b| {
        b.iter(|| TapParser::new().expect("Failed to compile grammars"))
    });
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
