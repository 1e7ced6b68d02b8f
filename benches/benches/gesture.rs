// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use peruse_gesture::{GestureClassifier, GestureSequence, GestureTable};

/// A zig-zag path sampled every pixel: right, down, left, down, ...
fn zigzag(samples: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(samples);
    let mut p = Point::new(0.0, 0.0);
    for i in 0..samples {
        match (i / 80) % 4 {
            0 => p.x += 1.0,
            2 => p.x -= 1.0,
            _ => p.y += 1.0,
        }
        points.push(p);
    }
    points
}

fn bench_classifier_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/feed");

    for samples in [64usize, 512, 4_096] {
        let path = zigzag(samples);
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &path, |b, path| {
            b.iter(|| {
                let mut classifier = GestureClassifier::new(30.0, 30.0);
                classifier.reset(Point::ZERO);
                for &p in path {
                    black_box(classifier.feed(p));
                }
                black_box(classifier.finish())
            });
        });
    }

    group.finish();
}

fn bench_table_lookup(c: &mut Criterion) {
    let mut table = GestureTable::new();
    for key in ["DC", "UC", "LC", "RC", "DRC", "ULC", "LRLC", "UDUDC"] {
        if let Ok(sequence) = key.parse::<GestureSequence>() {
            table.insert(sequence, key);
        }
    }
    let wanted: GestureSequence = "LRLC".parse().unwrap();

    c.bench_function("gesture/lookup", |b| {
        b.iter(|| black_box(table.lookup(black_box(&wanted))));
    });
}

criterion_group!(benches, bench_classifier_feed, bench_table_lookup);
criterion_main!(benches);
