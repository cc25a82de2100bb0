// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gesture solves on populated models.

use bento_model::{BentoModel, DefaultItem, ResizeAnchor};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};

fn populated(cols: usize, rows: usize) -> BentoModel<DefaultItem> {
    let mut model = BentoModel::new(Size::new(cols as f64 * 110.0, rows as f64 * 110.0));
    for row in 0..rows {
        for col in 0..cols {
            let x0 = col as f64 * 110.0;
            let y0 = row as f64 * 110.0;
            let _ = model.insert_item(DefaultItem::with_frame(Rect::from_origin_size(
                (x0, y0),
                Size::new(100.0, 100.0),
            )));
        }
    }
    model
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_frame");
    for &n in &[4usize, 8, 16] {
        let model = populated(n, n);
        let id = model.items()[0].id();
        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("crowded_{n}x{n}"), |b| {
            b.iter_batched(
                || model_clone(&model),
                |mut m| {
                    // Pushes the top-left item into its neighbor's gap.
                    let _ = m.drag_item(id, Vec2::new(55.0, 0.0));
                    m.end_drag(id);
                    black_box(m.items().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_resize_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_cascade");
    for &chain in &[4usize, 16, 48] {
        let model = populated(chain, 1);
        let id = model.items()[0].id();
        group.throughput(Throughput::Elements(chain as u64));
        group.bench_function(format!("chain_{chain}"), |b| {
            b.iter_batched(
                || model_clone(&model),
                |mut m| {
                    // Grow far enough to compress the whole row.
                    let _ = m.resize_item(id, Vec2::new(1.0e6, 0.0), ResizeAnchor::BottomTrailing);
                    m.end_resize(id);
                    black_box(m.items()[0].frame().x1);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn model_clone(model: &BentoModel<DefaultItem>) -> BentoModel<DefaultItem> {
    let mut out = BentoModel::new(model.container_size());
    for item in model.items() {
        let _ = out.insert_item(item.clone());
    }
    out
}

criterion_group!(benches, bench_drag, bench_resize_cascade);
criterion_main!(benches);
