// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subject-over-backdrop compositing.
//
// No segmentation happens here. The subject is assumed to be roughly centred,
// so its alpha is scaled by a fixed elliptical matte: fully opaque in the
// middle, feathering to fully transparent at the frame edge. The result is
// laid over the backdrop with normal "over" blending. Parts of a subject far
// from the centre fade into the backdrop.

use image::{DynamicImage, RgbaImage, imageops};

/// Normalised elliptical radius inside which the subject stays opaque.
const MATTE_INNER: f32 = 0.70;
/// Normalised elliptical radius at and beyond which the backdrop shows through.
const MATTE_OUTER: f32 = 1.0;

/// Matte opacity in `0.0..=1.0` at pixel `(x, y)` of a `width` x `height` frame.
pub fn subject_matte(x: u32, y: u32, width: u32, height: u32) -> f32 {
    let nx = (x as f32 + 0.5) / width.max(1) as f32 * 2.0 - 1.0;
    let ny = (y as f32 + 0.5) / height.max(1) as f32 * 2.0 - 1.0;
    let distance = (nx * nx + ny * ny).sqrt();
    if distance <= MATTE_INNER {
        1.0
    } else if distance >= MATTE_OUTER {
        0.0
    } else {
        // Smoothstep for a soft edge without a visible ring.
        let t = (MATTE_OUTER - distance) / (MATTE_OUTER - MATTE_INNER);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Lay `subject` over `backdrop` through the centred matte.
///
/// Both must have the same dimensions; the backdrop is returned with the
/// subject blended in.
pub fn composite_over(mut backdrop: RgbaImage, subject: &DynamicImage) -> RgbaImage {
    let (width, height) = backdrop.dimensions();
    let mut layer = subject.to_rgba8();
    for (x, y, pixel) in layer.enumerate_pixels_mut() {
        let matte = subject_matte(x, y, width, height);
        pixel.0[3] = (f32::from(pixel.0[3]) * matte).round() as u8;
    }
    imageops::overlay(&mut backdrop, &layer, 0, 0);
    backdrop
}
