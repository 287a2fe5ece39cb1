// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background replacement.
//
// Each backdrop style gets its own colour treatment and sharpening preset
// before the subject is composited over a synthesised canvas. The `None`
// style skips compositing entirely and keeps an alpha channel.

pub mod canvas;
pub mod composite;

use image::DynamicImage;
use thriftgenie_core::BackgroundType;
use thriftgenie_core::error::{Result, ThriftGenieError};
use tracing::{debug, info, instrument};

use super::best_effort;
use crate::raster::{ImageProcessor, Sharpen};

/// Per-style colour treatment applied before compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Treatment {
    pub brightness: f32,
    pub saturation: f32,
    pub sharpen: Sharpen,
}

impl Treatment {
    pub fn for_background(background: BackgroundType) -> Self {
        let (brightness, saturation, sharpen) = match background {
            BackgroundType::White => (1.0, 1.2, Sharpen::Standard),
            BackgroundType::Gradient => (1.0, 1.15, Sharpen::Standard),
            BackgroundType::Lifestyle => (1.05, 1.2, Sharpen::Standard),
            BackgroundType::None => (1.0, 1.1, Sharpen::Strong),
        };
        Self {
            brightness,
            saturation,
            sharpen,
        }
    }
}

/// Fallible background replacement.
pub fn try_process_background(
    image: &DynamicImage,
    background: BackgroundType,
) -> Result<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ThriftGenieError::EmptyImage);
    }

    let treatment = Treatment::for_background(background);
    debug!(?treatment, "Background treatment");
    let subject = ImageProcessor::from_dynamic(image.clone())
        .modulate(treatment.brightness, treatment.saturation)
        .sharpen(treatment.sharpen)
        .into_dynamic();

    let backdrop = match background {
        BackgroundType::White => canvas::white_canvas(width, height),
        BackgroundType::Gradient => canvas::gradient_canvas(width, height),
        BackgroundType::Lifestyle => canvas::lifestyle_canvas(width, height),
        BackgroundType::None => return Ok(DynamicImage::ImageRgba8(subject.to_rgba8())),
    };

    let merged = composite::composite_over(backdrop, &subject);
    Ok(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(merged).to_rgb8()))
}

/// Best-effort background replacement: any failure returns `image` unchanged.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn process_background(image: DynamicImage, background: BackgroundType) -> DynamicImage {
    info!(%background, "Replacing background");
    best_effort("background", image, |img| try_process_background(img, background))
}
