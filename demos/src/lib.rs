// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.
//!
//! Run a demo with `RUST_LOG=debug cargo run -p understory_demos --example <name>` to see the
//! toolkit's own log lines next to the demo output.

use understory_widget_tree::{DrawOp, RecordingSurface};

/// Install `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Print every recorded draw operation, one per line.
pub fn print_ops(surface: &RecordingSurface) {
    for op in &surface.ops {
        match op {
            DrawOp::Clip(rect) => println!("  clip   {rect:?}"),
            DrawOp::NoClip => println!("  noclip"),
            DrawOp::Fill(rect, color) => println!("  fill   {rect:?} {color:?}"),
            DrawOp::Stroke(rect, color, width) => {
                println!("  stroke {rect:?} {color:?} {width}");
            }
            DrawOp::Text { text, origin, .. } => println!("  text   {text:?} at {origin:?}"),
        }
    }
}
