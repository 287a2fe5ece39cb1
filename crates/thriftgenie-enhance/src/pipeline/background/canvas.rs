// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backdrop synthesis. Every canvas is opaque and sized to the source photo.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{Blend, draw_filled_circle_mut};

const WHITE: [u8; 3] = [255, 255, 255];

/// Top-left colour of the diagonal gradient (#f8f9fa).
const GRADIENT_START: [u8; 3] = [0xf8, 0xf9, 0xfa];

/// Radial stops of the lifestyle backdrop: offset, colour, opacity.
/// Each stop is laid over white, so lower opacity reads as paler.
const LIFESTYLE_STOPS: [(f32, [u8; 3], f32); 3] = [
    (0.0, [0xfe, 0xf7, 0xed], 1.0),
    (0.5, [0xfe, 0xd7, 0xaa], 0.8),
    (1.0, [0xf9, 0x73, 0x16], 0.3),
];

/// Centre of the lifestyle glow as a fraction of width and height.
const LIFESTYLE_CENTRE: (f32, f32) = (0.5, 0.3);
/// Radius of the lifestyle glow as a fraction of width and height.
const LIFESTYLE_RADIUS: f32 = 0.7;

/// Translucent white highlight discs: centre (fractions), radius (fraction of
/// the normalised diagonal), opacity.
const LIFESTYLE_HIGHLIGHTS: [((f32, f32), f32, f32); 2] = [
    ((0.2, 0.2), 0.15, 0.10),
    ((0.8, 0.7), 0.20, 0.05),
];

/// Solid white backdrop.
pub fn white_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, opaque(WHITE))
}

/// Diagonal gradient from near-white at the top-left to white at the
/// bottom-right.
pub fn gradient_canvas(width: u32, height: u32) -> RgbaImage {
    let span_x = width.saturating_sub(1).max(1) as f32;
    let span_y = height.saturating_sub(1).max(1) as f32;
    RgbaImage::from_fn(width, height, |x, y| {
        let t = (x as f32 / span_x + y as f32 / span_y) / 2.0;
        opaque(lerp_rgb(GRADIENT_START, WHITE, t))
    })
}

/// Warm radial glow with two soft highlight discs.
pub fn lifestyle_canvas(width: u32, height: u32) -> RgbaImage {
    let (cx, cy) = (
        LIFESTYLE_CENTRE.0 * width as f32,
        LIFESTYLE_CENTRE.1 * height as f32,
    );
    let (rx, ry) = (
        (LIFESTYLE_RADIUS * width as f32).max(1.0),
        (LIFESTYLE_RADIUS * height as f32).max(1.0),
    );

    let glow = RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - cx) / rx;
        let dy = (y as f32 + 0.5 - cy) / ry;
        let t = (dx * dx + dy * dy).sqrt().min(1.0);
        let (colour, opacity) = radial_stop(t);
        opaque(lerp_rgb(WHITE, colour, opacity))
    });

    let diagonal = ((width as f32).powi(2) + (height as f32).powi(2)).sqrt() / std::f32::consts::SQRT_2;
    let mut canvas = Blend(glow);
    for ((fx, fy), fr, opacity) in LIFESTYLE_HIGHLIGHTS {
        let centre = (
            (fx * width as f32).round() as i32,
            (fy * height as f32).round() as i32,
        );
        let radius = (fr * diagonal).round() as i32;
        let alpha = (opacity * 255.0).round() as u8;
        draw_filled_circle_mut(&mut canvas, centre, radius, Rgba([255, 255, 255, alpha]));
    }
    canvas.0
}

/// Colour and opacity at offset `t` along the lifestyle stops.
fn radial_stop(t: f32) -> ([u8; 3], f32) {
    for pair in LIFESTYLE_STOPS.windows(2) {
        let (start, c0, a0) = pair[0];
        let (end, c1, a1) = pair[1];
        if t <= end {
            let local = ((t - start) / (end - start)).clamp(0.0, 1.0);
            return (lerp_rgb(c0, c1, local), a0 + (a1 - a0) * local);
        }
    }
    let (_, colour, opacity) = LIFESTYLE_STOPS[LIFESTYLE_STOPS.len() - 1];
    (colour, opacity)
}

fn lerp_rgb(from: [u8; 3], to: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for i in 0..3 {
        let (a, b) = (f32::from(from[i]), f32::from(to[i]));
        out[i] = (a + (b - a) * t).round() as u8;
    }
    out
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}
