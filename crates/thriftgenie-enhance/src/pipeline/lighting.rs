// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Automatic lighting correction.
//
// The average brightness of the photo picks a brightness delta and a contrast
// multiplier; a fixed saturation boost and midtone gamma lift always apply.

use image::DynamicImage;
use thriftgenie_core::error::Result;
use tracing::{debug, info, instrument};

use super::best_effort;
use crate::raster::stats::channel_stats;
use crate::raster::{ImageProcessor, ToneOps};

/// Photos darker than this (0-255 average) are brightened.
pub const DARK_THRESHOLD: f64 = 80.0;
/// Photos brighter than this are toned down.
pub const BRIGHT_THRESHOLD: f64 = 180.0;
/// Largest brightness increase, in percent.
pub const MAX_BRIGHTEN: f64 = 30.0;
/// Largest brightness decrease, in percent (negative).
pub const MAX_DARKEN: f64 = -20.0;

const DARK_GAIN: f64 = 0.5;
const BRIGHT_GAIN: f64 = 0.3;
const DARK_CONTRAST: f32 = 1.10;
const BRIGHT_CONTRAST: f32 = 1.05;
const SATURATION_BOOST: f32 = 1.10;
const MIDTONE_GAMMA: f32 = 1.1;

/// Corrections chosen for one photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPlan {
    /// Brightness change in percent.
    pub brightness_delta: f64,
    /// Linear contrast multiplier around mid-grey.
    pub contrast: f32,
}

impl LightingPlan {
    /// Piecewise rule on the average brightness (0-255).
    pub fn from_average(average: f64) -> Self {
        if average < DARK_THRESHOLD {
            Self {
                brightness_delta: ((DARK_THRESHOLD - average) * DARK_GAIN).min(MAX_BRIGHTEN),
                contrast: DARK_CONTRAST,
            }
        } else if average > BRIGHT_THRESHOLD {
            Self {
                brightness_delta: ((BRIGHT_THRESHOLD - average) * BRIGHT_GAIN).max(MAX_DARKEN),
                contrast: BRIGHT_CONTRAST,
            }
        } else {
            Self {
                brightness_delta: 0.0,
                contrast: 1.0,
            }
        }
    }

    /// Brightness multiplier, `1 + delta / 100`.
    pub fn brightness_factor(&self) -> f32 {
        (1.0 + self.brightness_delta / 100.0) as f32
    }

    /// Modulate, then contrast, then gamma, evaluated in one pass.
    pub fn tone_ops(&self) -> ToneOps {
        ToneOps::new()
            .modulate(self.brightness_factor(), SATURATION_BOOST)
            .linear(self.contrast)
            .gamma(MIDTONE_GAMMA)
    }
}

/// Measure `image` and decide its correction.
pub fn plan_lighting(image: &DynamicImage) -> Result<LightingPlan> {
    let stats = channel_stats(image)?;
    let average = stats.average_brightness();
    let plan = LightingPlan::from_average(average);
    debug!(
        average,
        brightness_delta = plan.brightness_delta,
        contrast = plan.contrast,
        "Lighting plan"
    );
    Ok(plan)
}

/// Fallible lighting correction.
pub fn try_correct_lighting(image: &DynamicImage) -> Result<DynamicImage> {
    let plan = plan_lighting(image)?;
    Ok(ImageProcessor::from_dynamic(image.clone())
        .apply_tone(&plan.tone_ops())
        .into_dynamic())
}

/// Best-effort lighting correction: any failure returns `image` unchanged.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn correct_lighting(image: DynamicImage) -> DynamicImage {
    info!("Applying lighting correction");
    best_effort("lighting", image, try_correct_lighting)
}
