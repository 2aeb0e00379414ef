// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `gotest-reporter` runs.
///
/// Unknown/unexpected failures, including a spec reported with an unknown state, result in exit
/// code 101 (the exit code of a panicking Rust program).
pub enum ReporterExitCode {}

impl ReporterExitCode {
    /// No errors occurred and every replayed spec passed, was skipped, or is pending.
    pub const OK: i32 = 0;

    /// One or more replayed specs failed.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// The config file or the input could not be read or parsed.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing data to stdout produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
