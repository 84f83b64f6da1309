//! Parser benchmarks — checks the linear-time-scan claim holds at the
//! grammar layer, not just the lexer. Run with `cargo bench --package
//! tonel-par`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tonel_par::Parser;

fn parse_ok(source: &str) {
    Parser::new(source).unwrap().parse_sequence().unwrap();
}

fn bench_cascade_and_keyword_chain(c: &mut Criterion) {
    let source = "OrderedCollection new add: 1; add: 2; add: 3; addAll: #(4 5 6); yourself";
    let mut group = c.benchmark_group("parser_small");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("cascade_and_keyword_chain", |b| b.iter(|| parse_ok(black_box(source))));
    group.finish();
}

fn bench_large_literal_array(c: &mut Criterion) {
    let mut source = String::from("^ #(");
    for i in 0..2000 {
        source.push_str(&format!("item{i} "));
    }
    source.push(')');

    let mut group = c.benchmark_group("parser_large");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("large_literal_array", |b| b.iter(|| parse_ok(black_box(&source))));
    group.finish();
}

criterion_group!(benches, bench_cascade_and_keyword_chain, bench_large_literal_array);
criterion_main!(benches);
