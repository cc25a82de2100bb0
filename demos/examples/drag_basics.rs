// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag an item around a small layout and watch snapping and clamping.
//!
//! Run with: `cargo run -p bento_demos --example drag_basics`

use bento_model::{BentoItem, BentoModel, DefaultItem};
use kurbo::{Size, Vec2};

fn dump(model: &BentoModel<DefaultItem>, label: &str) {
    println!("{label}:");
    for item in model.items() {
        let f = item.frame();
        println!(
            "  {}  ({:6.1}, {:6.1}) {:5.1} x {:5.1}",
            item.id(),
            f.x0,
            f.y0,
            f.width(),
            f.height()
        );
    }
    for guide in model.active_guides() {
        println!("  guide {:?} = {}", guide.axis, guide.value);
    }
}

fn main() {
    let mut model: BentoModel<DefaultItem> = BentoModel::new(Size::new(600.0, 400.0));
    for _ in 0..3 {
        let _ = model.insert_item(DefaultItem::new(Size::new(120.0, 120.0)));
    }
    dump(&model, "auto-placed");

    let Some(id) = model.items().first().map(BentoItem::id) else {
        return;
    };

    // Push the first item into its neighbor: it stops one gap short.
    let _ = model.drag_item(id, Vec2::new(200.0, 0.0));
    dump(&model, "dragged right, clamped by the neighbor");

    // Move it below the row; the trailing edge snaps to a guide.
    let _ = model.drag_item(id, Vec2::new(104.0, 150.0));
    dump(&model, "dragged below, snapped to an edge guide");
    model.end_drag(id);

    let _ = model.undo();
    dump(&model, "after undo");
}
