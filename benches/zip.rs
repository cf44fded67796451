//! The binary merge-join is a load-bearing performance property: every
//! two-operand operator rides it. This bench keeps it honest against the
//! general re-derive-every-breakpoint path on long timelines.

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tempora::zip::{zip2, zip_many};
use tempora::{logic, Knowable, Timeline};

fn long_boolean_timeline(breakpoints: usize, phase: usize) -> Timeline<bool> {
    let mut t = Timeline::known(false);
    let mut day = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    for i in 0..breakpoints {
        day += chrono::Duration::days(1 + ((i * 7 + phase) % 23) as i64);
        t.push(day, Knowable::Known(i % 2 == 0)).unwrap();
    }
    t
}

fn bench_zip_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip/binary_vs_general");
    for &len in &[100usize, 1_000, 10_000] {
        let a = long_boolean_timeline(len, 0);
        let b = long_boolean_timeline(len, 11);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("merge_join", len), &len, |bench, _| {
            bench.iter(|| zip2(&a, &b).len());
        });
        group.bench_with_input(BenchmarkId::new("general", len), &len, |bench, _| {
            bench.iter(|| zip_many(&[&a, &b]).len());
        });
    }
    group.finish();
}

fn bench_conjunction(c: &mut Criterion) {
    let mut group = c.benchmark_group("logic/and");
    for &len in &[1_000usize, 10_000] {
        let a = long_boolean_timeline(len, 0);
        let b = long_boolean_timeline(len, 5);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("time_varying", len), &len, |bench, _| {
            bench.iter(|| logic::and(&a, &b).len());
        });
    }

    // The eternal short-circuit never touches the long operand.
    let long = long_boolean_timeline(10_000, 0);
    let eternal_false = Timeline::known(false);
    group.bench_function("eternal_false_short_circuit", |bench| {
        bench.iter(|| logic::and(&eternal_false, &long).len());
    });
    group.finish();
}

criterion_group!(benches, bench_zip_paths, bench_conjunction);
criterion_main!(benches);
