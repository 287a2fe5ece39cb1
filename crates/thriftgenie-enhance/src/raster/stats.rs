// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-channel statistics used to drive automatic corrections.

use image::DynamicImage;
use thriftgenie_core::error::{Result, ThriftGenieError};

/// Mean value of each colour channel on a 0..=255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub pixel_count: u64,
}

impl ChannelStats {
    /// Mean of the three channel means.
    pub fn average_brightness(&self) -> f64 {
        (self.red + self.green + self.blue) / 3.0
    }
}

/// Compute channel means over every pixel of `image`.
///
/// Alpha is ignored. Fails with [`ThriftGenieError::EmptyImage`] when the
/// image has no pixels.
pub fn channel_stats(image: &DynamicImage) -> Result<ChannelStats> {
    let rgb = image.to_rgb8();
    let pixel_count = u64::from(rgb.width()) * u64::from(rgb.height());
    if pixel_count == 0 {
        return Err(ThriftGenieError::EmptyImage);
    }

    let mut sums = [0u64; 3];
    for pixel in rgb.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }

    let count = pixel_count as f64;
    Ok(ChannelStats {
        red: sums[0] as f64 / count,
        green: sums[1] as f64 / count,
        blue: sums[2] as f64 / count,
        pixel_count,
    })
}
