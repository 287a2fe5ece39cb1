// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoded-image primitives shared by the enhancement stages: tone curves,
// channel statistics, sharpening and the chainable processor.

pub mod processor;
pub mod sharpen;
pub mod stats;
pub mod tone;

pub use processor::ImageProcessor;
pub use sharpen::Sharpen;
pub use stats::ChannelStats;
pub use tone::ToneOps;

use image::DynamicImage;

/// Rewrite the colour channels of every pixel, keeping the alpha layout.
///
/// Images with alpha come back as RGBA8 with alpha untouched; everything
/// else comes back as RGB8.
pub(crate) fn map_rgb(
    image: &DynamicImage,
    mut f: impl FnMut(u32, u32, [u8; 3]) -> [u8; 3],
) -> DynamicImage {
    if image.color().has_alpha() {
        let mut rgba = image.to_rgba8();
        for (x, y, pixel) in rgba.enumerate_pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let [r, g, b] = f(x, y, [r, g, b]);
            pixel.0 = [r, g, b, a];
        }
        DynamicImage::ImageRgba8(rgba)
    } else {
        let mut rgb = image.to_rgb8();
        for (x, y, pixel) in rgb.enumerate_pixels_mut() {
            pixel.0 = f(x, y, pixel.0);
        }
        DynamicImage::ImageRgb8(rgb)
    }
}
