// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// thriftgenie-cli: argument definitions, input handling and command runners
// behind the `thriftgenie` binary.

pub mod args;
pub mod commands;
pub mod input;
