// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Report the progress of a hierarchical test run (suite, nested groups, leaf specs) as the flat,
//! line-oriented text that `go test -v` produces.
//!
//! IDE test-runner front ends such as GoLand parse `=== RUN` and `--- PASS:` markers to build their
//! test tree. The [`GoTestCompatibleReporter`](reporter::GoTestCompatibleReporter) translates host
//! notifications into exactly those markers:
//!
//! ```text
//! === RUN   A test 1 passes
//! --- PASS: A test 1 passes (0.0s)
//! ```
//!
//! Whether the reporter is active at all is decided once at startup, see [`activation`].

pub mod activation;
pub mod config;
pub mod errors;
pub mod events;
pub mod names;
pub mod reporter;
pub mod test2json;
