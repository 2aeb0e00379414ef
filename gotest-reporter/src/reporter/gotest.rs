// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output compatible with `go test -v`.
//!
//! GoLand runs tests through `go test -json`, which pipes the human-readable `go test -v` output
//! through `test2json`. That converter only understands two markers per test:
//!
//! * `=== RUN   <name>` when a test starts.
//! * `--- <STATUS>: <name> (<seconds>s)` when it ends, with `PASS`, `FAIL` or `SKIP` as status.
//!
//! Each marker is preceded by an empty line, so it starts at the beginning of a line even if
//! another reporter has left a partial one.

use super::Reporter;
use crate::{
    errors::WriteEventError,
    events::{SetupSummary, SpecSummary, SuiteConfig, SuiteSummary},
};
use std::{
    fmt,
    io::{self, Write},
    time::Duration,
};
use swrite::{SWrite, swrite};
use tracing::debug;

/// A reporter that writes `go test -v` compatible markers for every spec.
///
/// Suite-level notifications are accepted and produce no output.
pub struct GoTestCompatibleReporter<W> {
    writer: W,
}

impl GoTestCompatibleReporter<io::Stdout> {
    /// Creates a reporter that writes to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> GoTestCompatibleReporter<W> {
    /// Creates a reporter that writes to `writer`.
    ///
    /// Every marker is flushed as soon as it is written.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_marker(&mut self, marker: &str) -> Result<(), WriteEventError> {
        self.writer
            .write_all(marker.as_bytes())
            .map_err(WriteEventError::Io)?;
        self.writer.flush().map_err(WriteEventError::Io)
    }
}

impl<W> fmt::Debug for GoTestCompatibleReporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoTestCompatibleReporter")
            .finish_non_exhaustive()
    }
}

impl<W: Write> Reporter for GoTestCompatibleReporter<W> {
    fn suite_will_begin(
        &mut self,
        _config: &SuiteConfig,
        _summary: &SuiteSummary,
    ) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn before_suite_did_run(&mut self, _setup: &SetupSummary) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn spec_will_run(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError> {
        let name = spec.component_texts.display_name();
        let mut marker = String::new();
        swrite!(marker, "\n=== RUN   {}\n", name.escaped());

        debug!(target: "gotest_reporter::marker", "RUN {name}");
        self.write_marker(&marker)
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError> {
        let name = spec.component_texts.display_name();
        // A spec without a known outcome must not be reported as anything.
        let Some(outcome) = spec.state.outcome() else {
            panic!("unknown spec state `{}` for spec `{name}`", spec.state);
        };

        let mut marker = String::new();
        swrite!(
            marker,
            "\n--- {}: {} ({})\n",
            outcome.status_token(),
            name.escaped(),
            GoTestDuration(spec.run_time),
        );

        debug!(
            target: "gotest_reporter::marker",
            "{} {name} after {:?}",
            outcome.status_token(),
            spec.run_time,
        );
        self.write_marker(&marker)
    }

    fn after_suite_did_run(&mut self, _setup: &SetupSummary) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn suite_did_end(&mut self, _summary: &SuiteSummary) -> Result<(), WriteEventError> {
        Ok(())
    }
}

/// Displays a duration as whole seconds and a millisecond remainder, for example `2.350s`.
///
/// The remainder is not zero-padded: 1005 milliseconds are displayed as `1.5s`. Consumers that
/// match on the exact text of existing output depend on this form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GoTestDuration(pub Duration);

impl fmt::Display for GoTestDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0.as_millis();
        write!(f, "{}.{}s", millis / 1000, millis % 1000)
    }
}
