// Copyright 2025 the Bento Grid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize the head of a row and watch compression cascade down the chain.
//!
//! Run with: `cargo run -p bento_demos --example resize_cascade`

use bento_model::{BentoItem, BentoModel, DefaultItem, ResizeAnchor};
use kurbo::{Rect, Size, Vec2};

fn dump(model: &BentoModel<DefaultItem>, label: &str) {
    println!("{label}:");
    for item in model.items() {
        let f = item.frame();
        println!("  {}  x {:6.1}..{:6.1}", item.id(), f.x0, f.x1);
    }
}

fn main() {
    let mut model: BentoModel<DefaultItem> = BentoModel::new(Size::new(480.0, 200.0));
    for n in 0..3 {
        let x0 = f64::from(n) * 110.0;
        let _ = model.insert_item(DefaultItem::with_frame(Rect::new(x0, 0.0, x0 + 100.0, 100.0)));
    }
    dump(&model, "row of three");

    let Some(id) = model.items().first().map(BentoItem::id) else {
        return;
    };

    // Grow well past the available slack: the chain compresses to minimum
    // sizes and the growth clamps at what the wall leaves over.
    let _ = model.resize_item(id, Vec2::new(1000.0, 0.0), ResizeAnchor::BottomTrailing);
    dump(&model, "grown into the chain");

    // Walking the gesture back releases the compressed neighbors.
    let _ = model.resize_item(id, Vec2::new(20.0, 0.0), ResizeAnchor::BottomTrailing);
    dump(&model, "eased off");
    model.end_resize(id);

    let _ = model.undo();
    dump(&model, "after undo");
}
