// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// thriftgenie-enhance: the photo enhancement engine.
//
// Provides automatic enhancement (lighting correction, background
// replacement), manual brightness/contrast/saturation adjustments and web
// optimisation over encoded image buffers, plus an async facade for callers
// running on tokio.

pub mod engine;
pub mod pipeline;
pub mod raster;
pub mod task;

// Re-export the entry points so callers can use `thriftgenie_enhance::enhance` etc.
pub use engine::{
    DEFAULT_WEB_MAX_WIDTH, apply_custom_adjustments, enhance, inspect, optimize_for_web,
};
pub use pipeline::encode::{PRIMARY_JPEG_QUALITY, WEB_JPEG_QUALITY};
pub use raster::ImageProcessor;
