// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use peruse_input::{ActionBindingTable, InputChord, Modifiers, MouseButtons};
use peruse_interaction::WindowState;
use peruse_interaction::config::{DragConfig, NScrollConfig};
use peruse_interaction::drag::{
    DragContext, DragEffect, DragEngine, NScrollDirection, ReadingDirection, n_scroll,
};
use peruse_view::{Transform, ViewLayout};

fn bench_drag_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/drag_to");
    let bindings = ActionBindingTable::new();
    let config = DragConfig::default();
    let layout = ViewLayout::new(Size::new(1920.0, 1080.0), Size::new(4000.0, 3000.0));

    let actions = [
        ("pan", Modifiers::empty()),
        ("rotate", Modifiers::SHIFT),
        ("scale", Modifiers::CONTROL),
    ];
    for (name, modifiers) in actions {
        let chord = InputChord::new(MouseButtons::PRIMARY, modifiers);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                let mut transform = Transform::IDENTITY;
                let mut engine = DragEngine::new();
                let origin = Point::new(1200.0, 540.0);
                let begin = DragContext {
                    transform,
                    layout,
                    config: &config,
                    bindings: &bindings,
                    window_state: WindowState::Normal,
                    window_position: Point::ZERO,
                };
                engine.begin(&begin, origin, origin, chord);
                for i in 0..256 {
                    let t = f64::from(i) * 0.05;
                    let p = Point::new(1200.0 + 200.0 * t.sin(), 540.0 + 150.0 * t.cos());
                    let cx = DragContext { transform, ..begin };
                    if let Some(DragEffect::Transform(next)) = engine.drag_to(&cx, p, p) {
                        transform = next;
                    }
                }
                engine.end();
                black_box(transform)
            });
        });
    }

    group.finish();
}

fn bench_n_scroll(c: &mut Criterion) {
    let layout = ViewLayout::new(Size::new(1920.0, 1080.0), Size::new(5000.0, 7000.0));
    let params = NScrollConfig::default();

    c.bench_function("drag/n_scroll_walk", |b| {
        b.iter(|| {
            // Walk the whole page in reading order.
            let mut transform = Transform::IDENTITY;
            let mut steps = 0;
            loop {
                let delta = n_scroll(
                    &transform,
                    &layout,
                    NScrollDirection::Forward,
                    ReadingDirection::LeftToRight,
                    &params,
                );
                if delta == kurbo::Vec2::ZERO || steps == 1_000 {
                    break;
                }
                transform.position += delta;
                steps += 1;
            }
            black_box((transform, steps))
        });
    });
}

criterion_group!(benches, bench_drag_to, bench_n_scroll);
criterion_main!(benches);
