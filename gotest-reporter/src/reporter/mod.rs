// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report host notifications as output.
//!
//! The main types here are the [`Reporter`] capability, the [`ReporterList`] that dispatches to
//! several reporters in order, and the [`GoTestCompatibleReporter`] that writes the line protocol.

mod gotest;
mod imp;

pub use gotest::*;
pub use imp::*;
