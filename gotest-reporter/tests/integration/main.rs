// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run fixture suites through a minimal host and compare the exact text
//! written by the GoLand reporter.

mod fixtures;
mod golden;
