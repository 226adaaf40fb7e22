// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use flowboard::model::NodePatch;
use flowboard::ops::{apply_ops, Delta, GraphOp};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `ops.drag`, `ops.delete`, `ops.update`
// - Case IDs are the fixture ids (`small`, `medium`, `large`).
fn checksum_delta(delta: &Delta) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(delta.added_nodes.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(delta.removed_nodes.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(delta.updated_nodes.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(delta.added_connections.len() as u64);
    acc.wrapping_mul(131).wrapping_add(delta.removed_connections.len() as u64)
}

/// A drag gesture: sixty position updates of one node.
fn drag_ops(count: usize) -> Vec<GraphOp> {
    let node_id = fixtures::node_id(count / 2);
    (0..60)
        .map(|step| GraphOp::MoveNode {
            node_id: node_id.clone(),
            x: 100.0 + f64::from(step) * 4.0,
            y: 80.0 + f64::from(step) * 2.0,
        })
        .collect()
}

fn benches_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.drag");
    for case in fixtures::Case::ALL {
        let graph = fixtures::graph(case);
        let ops = drag_ops(case.node_count());
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| black_box(checksum_delta(&apply_ops(&mut graph, black_box(&ops)))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ops.delete");
    for case in fixtures::Case::ALL {
        let graph = fixtures::graph(case);
        let ops = vec![GraphOp::DeleteNode { node_id: fixtures::node_id(case.node_count() / 2) }];
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| black_box(checksum_delta(&apply_ops(&mut graph, black_box(&ops)))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ops.update");
    for case in fixtures::Case::ALL {
        let graph = fixtures::graph(case);
        let ops = (0..case.node_count())
            .step_by(3)
            .map(|idx| GraphOp::UpdateNode {
                node_id: fixtures::node_id(idx),
                patch: NodePatch::name(format!("Renamed {idx}")),
            })
            .collect::<Vec<_>>();
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| black_box(checksum_delta(&apply_ops(&mut graph, black_box(&ops)))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, benches_ops);
criterion_main!(benches);
