// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Occupancy grid queries against a flat linear scan over the same entries.

use bento_index::{OccupancyGrid, Region};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_lattice_entries(n: usize, cell: f64, gap: f64) -> Vec<(u64, Region)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * (cell + gap);
            let y0 = y as f64 * (cell + gap);
            out.push(((y * n + x) as u64, Region::from_xywh(x0, y0, cell, cell)));
        }
    }
    out
}

fn gen_random_entries(count: usize, extent: f64, w: f64, h: f64) -> Vec<(u64, Region)> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for i in 0..count {
        let x0 = rng.next_f64() * (extent - w).max(1.0);
        let y0 = rng.next_f64() * (extent - h).max(1.0);
        out.push((i as u64, Region::from_xywh(x0, y0, w, h)));
    }
    out
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild_full");
    for &n in &[8usize, 16, 32] {
        let entries = gen_lattice_entries(n, 100.0, 10.0);
        let extent = n as f64 * 110.0;
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("lattice_n{n}"), |b| {
            b.iter_batched(
                OccupancyGrid::<u64>::new,
                |mut grid| {
                    grid.rebuild_full(extent, extent, 30.0, 30.0, entries.iter().copied());
                    black_box(grid.rows());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hinder_band_query");
    for &count in &[64usize, 256, 1024] {
        let entries = gen_random_entries(count, 2000.0, 120.0, 90.0);
        let mut grid = OccupancyGrid::new();
        grid.rebuild_full(2000.0, 2000.0, 30.0, 30.0, entries.iter().copied());
        // A trailing-side band like the one a drag clamp issues.
        let band = Region::new(400.0, 300.0, 2000.0, 400.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("grid_n{count}"), |b| {
            b.iter(|| {
                let hits = grid.ids_in(black_box(band));
                black_box(hits.len());
            })
        });
        group.bench_function(format!("linear_n{count}"), |b| {
            b.iter(|| {
                let hits = entries
                    .iter()
                    .filter(|(_, r)| r.intersects(black_box(&band)))
                    .count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_region");
    let entries = gen_random_entries(1024, 2000.0, 120.0, 90.0);
    group.bench_function("move_one_item", |b| {
        b.iter_batched(
            || {
                let mut grid = OccupancyGrid::new();
                grid.rebuild_full(2000.0, 2000.0, 30.0, 30.0, entries.iter().copied());
                grid
            },
            |mut grid| {
                let mut moved = entries.clone();
                moved[0].1 = Region::from_xywh(900.0, 900.0, 120.0, 90.0);
                let dirty = entries[0].1.union(&moved[0].1).inflate(10.0, 10.0);
                let in_sync = grid.refresh_region(dirty, moved);
                black_box(in_sync);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("full_rebuild_equivalent", |b| {
        b.iter_batched(
            || {
                let mut grid = OccupancyGrid::new();
                grid.rebuild_full(2000.0, 2000.0, 30.0, 30.0, entries.iter().copied());
                grid
            },
            |mut grid| {
                grid.rebuild_full(2000.0, 2000.0, 30.0, 30.0, entries.iter().copied());
                black_box(grid.rows());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_query, bench_refresh);
criterion_main!(benches);
