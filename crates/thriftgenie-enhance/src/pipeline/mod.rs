// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement stages (lighting, background) and the output encoders they feed.
//
// Automatic stages are total: a stage that fails internally logs the error
// and hands its input back unchanged.

pub mod background;
pub mod encode;
pub mod lighting;

use thriftgenie_core::error::Result;
use tracing::warn;

/// Run a fallible stage; on error, log it and return `input` untouched.
pub(crate) fn best_effort<T>(stage: &'static str, input: T, f: impl FnOnce(&T) -> Result<T>) -> T {
    match f(&input) {
        Ok(output) => output,
        Err(err) => {
            warn!(stage, error = %err, "stage failed; keeping input unchanged");
            input
        }
    }
}
