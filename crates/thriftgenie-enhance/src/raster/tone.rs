// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel tone operations: modulation, linear contrast, gamma.
//
// Operations are recorded in a `ToneOps` list and evaluated together in
// `f32`, so a chain of adjustments is quantised to 8 bits only once.

/// Rec.601 luma weights, used as the neutral axis for saturation changes.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Mid-grey pivot for the linear contrast transform.
const MID_GREY: f32 = 128.0;

/// A single tone operation on an RGB triple in the 0..=255 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneOp {
    /// Multiply all channels by `brightness`, then scale chroma by `saturation`.
    Modulate { brightness: f32, saturation: f32 },
    /// `v * multiplier + (128 - 128 * multiplier)`.
    Linear { multiplier: f32 },
    /// `255 * (v / 255)^(1 / gamma)`; values above 1.0 lift midtones.
    Gamma { gamma: f32 },
}

impl ToneOp {
    fn apply(self, rgb: [f32; 3]) -> [f32; 3] {
        let out = match self {
            ToneOp::Modulate {
                brightness,
                saturation,
            } => {
                let scaled = rgb.map(|c| c * brightness);
                let luma = scaled
                    .iter()
                    .zip(LUMA_WEIGHTS)
                    .map(|(c, w)| c * w)
                    .sum::<f32>();
                scaled.map(|c| luma + (c - luma) * saturation)
            }
            ToneOp::Linear { multiplier } => {
                let offset = MID_GREY - MID_GREY * multiplier;
                rgb.map(|c| c * multiplier + offset)
            }
            ToneOp::Gamma { gamma } => {
                let exponent = 1.0 / gamma;
                rgb.map(|c| 255.0 * (c.clamp(0.0, 255.0) / 255.0).powf(exponent))
            }
        };
        out.map(|c| c.clamp(0.0, 255.0))
    }
}

/// An ordered list of tone operations evaluated in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToneOps {
    ops: Vec<ToneOp>,
}

impl ToneOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modulate(mut self, brightness: f32, saturation: f32) -> Self {
        self.ops.push(ToneOp::Modulate {
            brightness,
            saturation,
        });
        self
    }

    pub fn linear(mut self, multiplier: f32) -> Self {
        self.ops.push(ToneOp::Linear { multiplier });
        self
    }

    pub fn gamma(mut self, gamma: f32) -> Self {
        self.ops.push(ToneOp::Gamma { gamma });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[ToneOp] {
        &self.ops
    }

    /// Evaluate every operation in order, in floating point.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        self.ops.iter().fold(rgb, |acc, op| op.apply(acc))
    }

    /// Evaluate on an 8-bit pixel, rounding once at the end.
    pub fn apply_u8(&self, rgb: [u8; 3]) -> [u8; 3] {
        self.apply(rgb.map(f32::from)).map(|c| c.round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_is_identity() {
        let ops = ToneOps::new();
        assert!(ops.is_empty());
        assert_eq!(ops.apply_u8([12, 130, 250]), [12, 130, 250]);
    }

    #[test]
    fn linear_contrast_pivots_on_mid_grey() {
        let ops = ToneOps::new().linear(1.5);
        assert_eq!(ops.apply_u8([128, 128, 128]), [128, 128, 128]);
        // 100 * 1.5 + (128 - 192) = 86
        assert_eq!(ops.apply_u8([100, 100, 100]), [86, 86, 86]);
        assert_eq!(ops.apply_u8([250, 250, 250]), [255, 255, 255]);
    }

    #[test]
    fn gamma_above_one_lifts_midtones_and_keeps_endpoints() {
        let ops = ToneOps::new().gamma(1.1);
        let [mid, _, _] = ops.apply_u8([128, 128, 128]);
        assert!(mid > 128);
        assert_eq!(ops.apply_u8([0, 0, 0]), [0, 0, 0]);
        assert_eq!(ops.apply_u8([255, 255, 255]), [255, 255, 255]);
    }

    #[test]
    fn saturation_leaves_greys_alone() {
        let ops = ToneOps::new().modulate(1.0, 1.5);
        assert_eq!(ops.apply_u8([90, 90, 90]), [90, 90, 90]);
    }

    #[test]
    fn saturation_spreads_channels_apart() {
        let ops = ToneOps::new().modulate(1.0, 1.2);
        let [r, g, b] = ops.apply_u8([180, 120, 90]);
        assert!(r > 180);
        assert!(b < 90);
        assert!(g.abs_diff(120) < 10);
    }

    #[test]
    fn brightness_multiplies_channels() {
        let ops = ToneOps::new().modulate(1.2, 1.0);
        assert_eq!(ops.apply_u8([50, 100, 200]), [60, 120, 240]);
    }

    #[test]
    fn chain_runs_in_insertion_order() {
        let ops = ToneOps::new().modulate(2.0, 1.0).linear(0.5);
        assert_eq!(ops.ops().len(), 2);
        // (40 * 2) * 0.5 + 64 = 104, not (40 * 0.5 + 64) * 2 = 168
        assert_eq!(ops.apply_u8([40, 40, 40]), [104, 104, 104]);
    }
}
