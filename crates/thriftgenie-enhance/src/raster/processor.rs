// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: modulation, linear contrast, gamma, sharpening and
// proportional downscaling of in-memory images.

use image::DynamicImage;
use image::imageops::FilterType;
use thriftgenie_core::error::{Result, ThriftGenieError};
use tracing::{debug, info, instrument};

use super::sharpen::{Sharpen, unsharp_mask};
use super::tone::ToneOps;
use super::map_rgb;
use crate::pipeline::encode;

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&upload)?
///     .modulate(1.05, 1.2)
///     .sharpen(Sharpen::Standard)
///     .to_jpeg_bytes(90)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, WebP, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| ThriftGenieError::Decode(err.to_string()))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Evaluate a chain of tone operations in one pass, rounding once.
    pub fn apply_tone(self, ops: &ToneOps) -> Self {
        if ops.is_empty() {
            return self;
        }
        let image = map_rgb(&self.image, |_, _, rgb| ops.apply_u8(rgb));
        Self { image }
    }

    /// Multiply brightness and saturation by the given factors (1.0 = no-op).
    #[instrument(skip(self))]
    pub fn modulate(self, brightness: f32, saturation: f32) -> Self {
        self.apply_tone(&ToneOps::new().modulate(brightness, saturation))
    }

    /// Linear contrast around mid-grey: `v * m + (128 - 128 * m)`.
    #[instrument(skip(self))]
    pub fn linear_contrast(self, multiplier: f32) -> Self {
        self.apply_tone(&ToneOps::new().linear(multiplier))
    }

    /// Gamma correction; values above 1.0 lift midtones.
    #[instrument(skip(self))]
    pub fn gamma(self, gamma: f32) -> Self {
        self.apply_tone(&ToneOps::new().gamma(gamma))
    }

    /// Unsharp mask with one of the fixed presets.
    #[instrument(skip(self))]
    pub fn sharpen(self, preset: Sharpen) -> Self {
        Self {
            image: unsharp_mask(&self.image, preset),
        }
    }

    /// Downscale to `max_width` keeping the aspect ratio. Never upscales.
    ///
    /// Uses Lanczos3 filtering for high-quality downscaling.
    #[instrument(skip(self))]
    pub fn fit_width(self, max_width: u32) -> Self {
        let (width, height) = (self.image.width(), self.image.height());
        if width <= max_width || max_width == 0 {
            return self;
        }
        info!(from_w = width, from_h = height, max_width, "Resizing image");
        let new_height = ((u64::from(height) * u64::from(max_width) + u64::from(width) / 2)
            / u64::from(width))
        .max(1) as u32;
        let resized = self
            .image
            .resize_exact(max_width, new_height, FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode as progressive JPEG at `quality` (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        encode::encode_jpeg(&self.image, quality)
    }
}
