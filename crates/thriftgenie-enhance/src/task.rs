// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async facade over the engine.
//
// Each call moves its buffer onto tokio's blocking pool so pixel work never
// stalls the async runtime.

use std::sync::Arc;

use thriftgenie_core::error::{Result, ThriftGenieError};
use thriftgenie_core::{CustomAdjustments, EnhancementOptions};
use tokio::task::{JoinError, spawn_blocking};
use tracing::warn;

use crate::engine;

/// [`engine::enhance`] on the blocking pool. A panicked task yields the input.
pub async fn enhance(data: Vec<u8>, options: EnhancementOptions) -> Vec<u8> {
    let data = Arc::new(data);
    let input = Arc::clone(&data);
    let joined = spawn_blocking(move || engine::enhance(&input, &options)).await;
    or_input("enhance", joined, data)
}

/// [`engine::apply_custom_adjustments`] on the blocking pool.
pub async fn apply_custom_adjustments(
    data: Vec<u8>,
    adjustments: CustomAdjustments,
) -> Result<Vec<u8>> {
    spawn_blocking(move || engine::apply_custom_adjustments(&data, &adjustments))
        .await
        .map_err(|err| ThriftGenieError::Task(format!("adjustment task failed: {err}")))?
}

/// [`engine::optimize_for_web`] on the blocking pool. A panicked task yields
/// the input.
pub async fn optimize_for_web(data: Vec<u8>, max_width: u32) -> Vec<u8> {
    let data = Arc::new(data);
    let input = Arc::clone(&data);
    let joined = spawn_blocking(move || engine::optimize_for_web(&input, max_width)).await;
    or_input("web optimisation", joined, data)
}

fn or_input(
    stage: &'static str,
    joined: std::result::Result<Vec<u8>, JoinError>,
    input: Arc<Vec<u8>>,
) -> Vec<u8> {
    match joined {
        Ok(output) => output,
        Err(err) => {
            warn!(stage, error = %err, "blocking task failed; keeping input unchanged");
            Arc::unwrap_or_clone(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn jpeg() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([60, 70, 80])));
        crate::pipeline::encode::encode_jpeg(&img, 90).unwrap()
    }

    #[tokio::test]
    async fn enhance_runs_off_the_runtime() {
        let options = EnhancementOptions {
            correct_lighting: true,
            ..Default::default()
        };
        let out = enhance(jpeg(), options).await;
        let info = engine::inspect(&out).unwrap();
        assert_eq!((info.width, info.height), (40, 30));
    }

    #[tokio::test]
    async fn garbage_passes_through() {
        let garbage = b"garbage".to_vec();
        assert_eq!(optimize_for_web(garbage.clone(), 100).await, garbage);
        assert_eq!(enhance(garbage.clone(), EnhancementOptions::default()).await, garbage);
    }

    #[tokio::test]
    async fn adjustment_errors_propagate() {
        let result = apply_custom_adjustments(b"garbage".to_vec(), CustomAdjustments::new(10, 0, 0)).await;
        assert!(matches!(result, Err(ThriftGenieError::Decode(_))));
    }
}
