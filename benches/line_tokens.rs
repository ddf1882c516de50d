//! Line token lookup and expansion benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use line_tokens::{ColorId, LineTokens, TokenMetadata};
use std::hint::black_box;

const TOKEN_COUNTS: [usize; 3] = [16, 1_000, 10_000];

/// A line with `tokens` four-byte tokens, like a minified bundle.
fn build_line(tokens: usize) -> LineTokens {
    let text = "ab=1".repeat(tokens);
    let records = (0..tokens).map(|i| {
        let meta = TokenMetadata::default().with_foreground(ColorId::new((i % 64) as u16));
        (i * 4, meta)
    });
    LineTokens::from_tokens(records, text)
}

fn bench_find_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_tokens_find_index");
    for count in TOKEN_COUNTS {
        let line = build_line(count);
        let probes: Vec<usize> = (0..64).map(|i| (i * 7919) % line.line_len()).collect();
        group.bench_with_input(BenchmarkId::new("tokens", count), &line, |b, line| {
            b.iter(|| {
                for &offset in &probes {
                    black_box(line.find_token_index_at_offset(black_box(offset)).ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_cursor_walk(c: &mut Criterion) {
    let line = build_line(10_000);
    let mut group = c.benchmark_group("line_tokens_cursor_walk");
    group.bench_function("in_place", |b| {
        b.iter(|| {
            let mut cursor = line.first_token().expect("non-empty line");
            let mut total = cursor.len();
            while let Some(token) = cursor.next() {
                total += token.len();
            }
            black_box(total)
        });
    });
    group.bench_function("iterator", |b| {
        b.iter(|| black_box(line.iter().map(|t| t.len()).sum::<usize>()));
    });
    group.finish();
}

fn bench_inflate(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_tokens_inflate");
    for count in TOKEN_COUNTS {
        let line = build_line(count);
        group.bench_with_input(BenchmarkId::new("alloc", count), &line, |b, line| {
            b.iter(|| black_box(line.inflate()));
        });
        let mut out = Vec::new();
        group.bench_with_input(BenchmarkId::new("reuse", count), &line, |b, line| {
            b.iter(|| {
                line.inflate_into(&mut out);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

fn bench_slice_viewport(c: &mut Criterion) {
    let line = build_line(10_000);
    let width = 120;
    let mut out = Vec::new();
    c.bench_function("line_tokens_slice_viewport wrap=120", |b| {
        b.iter(|| {
            let mut start = 0;
            while start < line.line_len() {
                let end = start + width;
                line.slice_and_inflate_into(start, end, -(start as isize), &mut out);
                black_box(out.len());
                start = end;
            }
        });
    });
}

criterion_group!(
    benches,
    bench_find_token,
    bench_cursor_walk,
    bench_inflate,
    bench_slice_viewport
);
criterion_main!(benches);
