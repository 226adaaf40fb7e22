// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flowboard::render::{hit_test, render_canvas, CanvasOptions};
use flowboard::viewport::{ScreenPoint, Viewport};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `render.canvas`, `render.hit_test`
// - Case IDs are the fixture ids (`small`, `medium`, `large`).
fn benches_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render.canvas");
    let options =
        CanvasOptions { selected: Some(fixtures::node_id(3)), ..CanvasOptions::default() };
    for case in fixtures::Case::ALL {
        let graph = fixtures::graph(case);
        let mut viewport = Viewport::new();
        viewport.set_zoom_percent(60);
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let canvas =
                    render_canvas(black_box(&graph), black_box(&viewport), &options, 200, 60);
                black_box(canvas.get(10, 10).map(|cell| cell.ch))
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.hit_test");
    for case in fixtures::Case::ALL {
        let graph = fixtures::graph(case);
        let viewport = Viewport::new();
        let points = (0..64)
            .map(|idx| ScreenPoint::new(f64::from(idx) * 37.0, f64::from(idx % 16) * 41.0))
            .collect::<Vec<_>>();
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                points
                    .iter()
                    .map(|point| hit_test(black_box(&graph), &viewport, *point))
                    .filter(|target| target.node_id().is_some())
                    .count()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benches_render);
criterion_main!(benches);
