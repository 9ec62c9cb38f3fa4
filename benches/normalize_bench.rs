// benches/normalize_bench.rs
#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use strtidy::{Tidy, match_case, normalize_whitespace, proper_case, squish};

// ── Real-world samples: scraped titles, CSV cells, form input ────────────────
const SAMPLES: &[&str] = &[
    // 1. Spacing around punctuation all over the place
    " a ,b c( 1 ) d&e -- f g /h .",
    // 2. Already normalized → zero-copy fast path
    "a, b c (1) d & e--f g/h.",
    // 3. Mixed ASCII whitespace
    "   hello\tworld  \n\r   ",
    // 4. Unicode whitespace soup
    "hello\u{00A0}\u{2003}\u{3000}world\u{2009}\u{202F}test",
    // 5. Title-ish text
    "the lord OF the rings ,part one",
    // 6. Edge cases
    "",
    "unchanged",
];

fn bench_free_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("free_functions");

    for &input in SAMPLES {
        group.throughput(Throughput::Bytes(input.len() as u64));

        group.bench_with_input(BenchmarkId::new("squish", format!("{input:.40}")), input, |b, i| {
            b.iter(|| squish(black_box(i)));
        });
        group.bench_with_input(
            BenchmarkId::new("normalize_whitespace", format!("{input:.40}")),
            input,
            |b, i| b.iter(|| normalize_whitespace(black_box(i))),
        );
        group.bench_with_input(
            BenchmarkId::new("proper_case", format!("{input:.40}")),
            input,
            |b, i| b.iter(|| proper_case(black_box(i))),
        );
        group.bench_with_input(
            BenchmarkId::new("match_case", format!("{input:.40}")),
            input,
            |b, i| b.iter(|| match_case(black_box(i), "Ab")),
        );
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let tidy = Tidy::standard();

    // Long input stresses the replacement rules
    let long = SAMPLES[0].repeat(1_000);
    group.throughput(Throughput::Bytes(long.len() as u64));
    group.bench_function("standard/long", |b| {
        b.iter_batched(
            || long.as_str(),
            |text| tidy.apply(black_box(text)).map(|out| out.len()),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_free_functions, bench_pipeline);
criterion_main!(benches);
