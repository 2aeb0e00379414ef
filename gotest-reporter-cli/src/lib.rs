// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line frontend for gotest-reporter.
//!
//! Hosts that are not written in Rust can drive the GoLand reporter by writing their notifications
//! as JSON lines and piping them to `gotest-reporter replay`.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::ReporterExitCode;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
