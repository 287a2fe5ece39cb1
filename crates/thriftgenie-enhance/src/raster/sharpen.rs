// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unsharp masking with a fixed Gaussian kernel.

use image::{DynamicImage, Rgb32FImage};
use imageproc::filter::gaussian_blur_f32;

use super::map_rgb;

/// Differences below this (in 8-bit levels) count as flat areas.
const FLAT_THRESHOLD: f32 = 2.0;

/// Fixed sharpening presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharpen {
    /// sigma 1.0, flat gain 1.0, edge gain 2.0. Used before compositing.
    Standard,
    /// sigma 1.5, flat gain 1.0, edge gain 3.0. Used on the transparent path.
    Strong,
}

impl Sharpen {
    /// `(sigma, flat_gain, edge_gain)` for this preset.
    pub fn parameters(self) -> (f32, f32, f32) {
        match self {
            Sharpen::Standard => (1.0, 1.0, 2.0),
            Sharpen::Strong => (1.5, 1.0, 3.0),
        }
    }
}

/// Apply an unsharp mask to the colour channels of `image`.
///
/// Each channel moves away from its Gaussian-blurred value by the preset's
/// gain: the flat gain where the difference is below [`FLAT_THRESHOLD`],
/// the edge gain elsewhere. Alpha is untouched.
pub fn unsharp_mask(image: &DynamicImage, preset: Sharpen) -> DynamicImage {
    let (sigma, flat_gain, edge_gain) = preset.parameters();
    // Blur in float so a flat region stays exactly flat.
    let blurred: Rgb32FImage = gaussian_blur_f32(&image.to_rgb32f(), sigma);

    map_rgb(image, |x, y, rgb| {
        let soft = blurred.get_pixel(x, y).0;
        let mut out = [0u8; 3];
        for i in 0..3 {
            let detail = f32::from(rgb[i]) - soft[i] * 255.0;
            let gain = if detail.abs() < FLAT_THRESHOLD {
                flat_gain
            } else {
                edge_gain
            };
            out[i] = (f32::from(rgb[i]) + gain * detail).round().clamp(0.0, 255.0) as u8;
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn uniform_image_is_unchanged() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([120, 80, 40])));
        let out = unsharp_mask(&img, Sharpen::Strong).to_rgb8();
        for pixel in out.pixels() {
            for (got, want) in pixel.0.iter().zip([120u8, 80, 40]) {
                assert!(got.abs_diff(want) <= 1, "got {got}, want {want}");
            }
        }
    }

    #[test]
    fn edges_gain_contrast() {
        let img = RgbImage::from_fn(20, 20, |x, _| {
            if x < 10 { Rgb([60, 60, 60]) } else { Rgb([180, 180, 180]) }
        });
        let out = unsharp_mask(&DynamicImage::ImageRgb8(img), Sharpen::Standard).to_rgb8();
        // Dark side of the edge gets darker, bright side brighter.
        assert!(out.get_pixel(9, 10).0[0] < 60);
        assert!(out.get_pixel(10, 10).0[0] > 180);
    }

    #[test]
    fn alpha_is_preserved() {
        let img = RgbaImage::from_fn(8, 8, |x, y| Rgba([(x * 30) as u8, 100, (y * 30) as u8, 77]));
        let out = unsharp_mask(&DynamicImage::ImageRgba8(img), Sharpen::Standard);
        assert!(out.color().has_alpha());
        assert_eq!(out.get_pixel(3, 3).0[3], 77);
    }
}
