//! Lexer benchmarks — checks the linear-time-scan claim holds.
//! Run with `cargo bench --package tonel-lex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tonel_lex::Lexer;

fn token_count(source: &str) -> usize {
    Lexer::tokenize(source).map(|tokens| tokens.len()).unwrap_or(0)
}

fn bench_small_method_body(c: &mut Criterion) {
    let source = " | r | r := (a | b). ^ r ";
    let mut group = c.benchmark_group("lexer_small");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("pipe_disambiguation", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_large_literal_array(c: &mut Criterion) {
    let mut source = String::from(" ^ #(");
    for i in 0..2000 {
        source.push_str(&format!("item{i} "));
    }
    source.push(')');

    let mut group = c.benchmark_group("lexer_large");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("large_literal_array", |b| b.iter(|| token_count(black_box(&source))));
    group.finish();
}

criterion_group!(benches, bench_small_method_body, bench_large_literal_array);
criterion_main!(benches);
