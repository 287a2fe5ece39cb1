// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for ThriftGenie.

use thiserror::Error;

/// Top-level error type for all ThriftGenie operations.
#[derive(Debug, Error)]
pub enum ThriftGenieError {
    // -- Image errors --
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("image has no pixels")]
    EmptyImage,

    #[error("{name} adjustment {value} is outside the range -50..=50")]
    InvalidAdjustment { name: &'static str, value: i32 },

    #[error("invalid maximum width: {0}")]
    InvalidWidth(u32),

    #[error("invalid enhancement option: {0}")]
    InvalidOption(String),

    // -- Media / transport helpers --
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("background task failed: {0}")]
    Task(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ThriftGenieError>;
