// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Public entry points over encoded byte buffers.
//
// `enhance` and `optimize_for_web` never fail: whatever goes wrong, the
// caller gets a usable image back (at worst its own input). Manual
// adjustments are an explicit user action, so their errors propagate.

use std::time::Instant;

use thriftgenie_core::error::{Result, ThriftGenieError};
use thriftgenie_core::{CustomAdjustments, EnhancementOptions, ImageInfo, OutputFormat};
use tracing::{debug, info, instrument};

use crate::pipeline::background::process_background;
use crate::pipeline::best_effort;
use crate::pipeline::encode::{self, PRIMARY_JPEG_QUALITY, WEB_JPEG_QUALITY};
use crate::pipeline::lighting::correct_lighting;
use crate::raster::{ImageProcessor, ToneOps};

/// Width cap used by web optimisation when the caller has no preference.
pub const DEFAULT_WEB_MAX_WIDTH: u32 = 1200;

/// Run the automatic pipeline: lighting, then background, then encode.
///
/// Undecodable input and encoder failures return `data` unchanged.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn enhance(data: &[u8], options: &EnhancementOptions) -> Vec<u8> {
    best_effort("enhance", data.to_vec(), |bytes| try_enhance(bytes, options))
}

/// Fallible form of [`enhance`].
pub fn try_enhance(data: &[u8], options: &EnhancementOptions) -> Result<Vec<u8>> {
    let started = Instant::now();
    let processor = ImageProcessor::from_bytes(data)?;
    info!(
        width = processor.width(),
        height = processor.height(),
        format = ?image::guess_format(data).ok(),
        has_alpha = processor.as_dynamic().color().has_alpha(),
        "Enhancing image"
    );

    if options.is_noop() {
        debug!("No automatic stages requested; re-encoding only");
    }

    let mut image = processor.into_dynamic();
    if options.correct_lighting {
        image = correct_lighting(image);
    }
    if let Some(background) = options.effective_background() {
        image = process_background(image, background);
    }

    let format = OutputFormat::for_options(options);
    let output = encode::encode(&image, format, PRIMARY_JPEG_QUALITY)?;
    info!(
        output_len = output.len(),
        format = format.mime_type(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Enhancement complete"
    );
    Ok(output)
}

/// Apply manual brightness, contrast and saturation deltas and re-encode as
/// JPEG.
///
/// Brightness and saturation share one modulate step; contrast is a linear
/// stretch around mid-grey. Zero values skip their step.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn apply_custom_adjustments(data: &[u8], adjustments: &CustomAdjustments) -> Result<Vec<u8>> {
    adjustments.validate()?;

    let mut ops = ToneOps::new();
    if adjustments.brightness != 0 || adjustments.saturation != 0 {
        ops = ops.modulate(
            adjustments.brightness_factor(),
            adjustments.saturation_factor(),
        );
    }
    if adjustments.contrast != 0 {
        ops = ops.linear(adjustments.contrast_factor());
    }
    debug!(steps = ops.ops().len(), "Custom adjustment plan");

    let output = ImageProcessor::from_bytes(data)?
        .apply_tone(&ops)
        .to_jpeg_bytes(PRIMARY_JPEG_QUALITY)?;
    info!(output_len = output.len(), "Custom adjustments applied");
    Ok(output)
}

/// Downscale to at most `max_width` pixels wide and re-encode as JPEG for
/// the web. Any failure returns `data` unchanged.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn optimize_for_web(data: &[u8], max_width: u32) -> Vec<u8> {
    best_effort("web optimisation", data.to_vec(), |bytes| {
        try_optimize_for_web(bytes, max_width)
    })
}

/// Fallible form of [`optimize_for_web`].
pub fn try_optimize_for_web(data: &[u8], max_width: u32) -> Result<Vec<u8>> {
    if max_width == 0 {
        return Err(ThriftGenieError::InvalidWidth(max_width));
    }
    let output = ImageProcessor::from_bytes(data)?
        .fit_width(max_width)
        .to_jpeg_bytes(WEB_JPEG_QUALITY)?;
    info!(
        input_len = data.len(),
        output_len = output.len(),
        "Web optimisation complete"
    );
    Ok(output)
}

/// Decode `data` far enough to describe it.
pub fn inspect(data: &[u8]) -> Result<ImageInfo> {
    let format = image::guess_format(data)
        .ok()
        .map(|f| format!("{f:?}").to_lowercase());
    let processor = ImageProcessor::from_bytes(data)?;
    let color = processor.as_dynamic().color();
    Ok(ImageInfo {
        width: processor.width(),
        height: processor.height(),
        format,
        color: format!("{color:?}"),
        has_alpha: color.has_alpha(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 200) as u8 + 20, (y % 200) as u8 + 20, 90])
        }));
        encode::encode_jpeg(&img, 95).unwrap()
    }

    #[test]
    fn inspect_reports_format_and_size() {
        let info = inspect(&jpeg(30, 20)).unwrap();
        assert_eq!((info.width, info.height), (30, 20));
        assert_eq!(info.format.as_deref(), Some("jpeg"));
        assert!(!info.has_alpha);
    }

    #[test]
    fn inspect_rejects_garbage() {
        assert!(matches!(inspect(b"nope"), Err(ThriftGenieError::Decode(_))));
    }

    #[test]
    fn out_of_range_adjustment_is_rejected_before_decoding() {
        let err = apply_custom_adjustments(b"not an image", &CustomAdjustments::new(0, 51, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            ThriftGenieError::InvalidAdjustment { name: "contrast", value: 51 }
        ));
    }

    #[test]
    fn zero_width_returns_input() {
        let input = jpeg(16, 16);
        assert_eq!(optimize_for_web(&input, 0), input);
        assert!(matches!(
            try_optimize_for_web(&input, 0),
            Err(ThriftGenieError::InvalidWidth(0))
        ));
    }

    #[test]
    fn noop_options_still_reencode() {
        let out = enhance(&jpeg(24, 24), &EnhancementOptions::default());
        let info = inspect(&out).unwrap();
        assert_eq!((info.width, info.height), (24, 24));
        assert_eq!(info.format.as_deref(), Some("jpeg"));
    }
}
