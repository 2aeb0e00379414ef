// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of `go test -v` text into per-test JSON records.
//!
//! This mirrors what the downstream consumer does with the markers written by
//! [`GoTestCompatibleReporter`](crate::reporter::GoTestCompatibleReporter): every line becomes an
//! `output` record attributed to the current test, and each marker additionally produces a `run`,
//! `pass`, `fail` or `skip` record. As in Go's `test2json`, a `pass`, `fail` or `skip` record is
//! held back until the next `=== RUN` marker, a bare `PASS` or `FAIL` summary line, or the end of
//! input, so output following a completion marker is still attributed to that test first.

use regex::Regex;
use serde::Serialize;
use std::{borrow::Cow, sync::LazyLock};

const RUN_PREFIX: &str = "=== RUN   ";
const SUMMARY_LINES: [&str; 2] = ["PASS", "FAIL"];

/// The kind of a [`TestJsonEntry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// A test started running.
    Run,
    /// A line of output.
    Output,
    /// A test passed.
    Pass,
    /// A test failed.
    Fail,
    /// A test was skipped.
    Skip,
}

impl Action {
    fn from_status_token(token: &str) -> Option<Self> {
        match token {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "SKIP" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// A single record, serialized with Go's field names.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestJsonEntry {
    /// What happened.
    pub action: Action,

    /// The test this record belongs to, or empty for output before the first test.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub test: String,

    /// The output line, including its trailing newline, for [`Action::Output`] records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Elapsed seconds, for `pass`, `fail` and `skip` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<f64>,
}

impl TestJsonEntry {
    fn output(test: &str, line: &str) -> Self {
        Self {
            action: Action::Output,
            test: test.to_owned(),
            output: Some(line.to_owned()),
            elapsed: None,
        }
    }

    fn action(action: Action, test: &str, elapsed: Option<f64>) -> Self {
        Self {
            action,
            test: test.to_owned(),
            output: None,
            elapsed,
        }
    }

    /// Serializes this record as a single line of JSON, without a trailing newline.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).expect("TestJsonEntry always serializes")
    }
}

/// A line-by-line converter from `go test -v` text to [`TestJsonEntry`] records.
#[derive(Debug, Default)]
pub struct Test2Json {
    current_test: String,
    pending_report: Option<TestJsonEntry>,
    entries: Vec<TestJsonEntry>,
}

impl Test2Json {
    /// Creates a new converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts an entire block of text.
    pub fn convert(text: &str) -> Vec<TestJsonEntry> {
        let mut converter = Self::new();
        for line in text.split_inclusive('\n') {
            converter.push_line(line);
        }
        converter.finish()
    }

    /// Processes a single line, which may or may not include its trailing newline.
    pub fn push_line(&mut self, line: &str) {
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some(name) = content.strip_prefix(RUN_PREFIX) {
            self.flush_report();
            self.current_test = name.to_owned();
            self.entries
                .push(TestJsonEntry::action(Action::Run, name, None));
            self.entries.push(TestJsonEntry::output(name, line));
        } else if let Some((action, name, elapsed)) = parse_completion(content) {
            self.flush_report();
            self.current_test = name.to_owned();
            self.entries.push(TestJsonEntry::output(name, line));
            self.pending_report = Some(TestJsonEntry::action(action, name, elapsed));
        } else {
            if SUMMARY_LINES.contains(&content) {
                self.flush_report();
            }
            self.entries
                .push(TestJsonEntry::output(&self.current_test, line));
        }
    }

    fn flush_report(&mut self) {
        if let Some(report) = self.pending_report.take() {
            self.entries.push(report);
        }
    }

    /// Returns the records produced so far, not including a held-back completion record.
    pub fn entries(&self) -> &[TestJsonEntry] {
        &self.entries
    }

    /// Consumes the converter, returning every record.
    pub fn finish(mut self) -> Vec<TestJsonEntry> {
        self.flush_report();
        self.entries
    }
}

/// Parses `--- PASS: <name> (<seconds>s)`.
///
/// The duration group is found from the end of the line, so a name may itself contain `(`.
fn parse_completion(content: &str) -> Option<(Action, &str, Option<f64>)> {
    let rest = content.strip_prefix("--- ")?;
    let (token, rest) = rest.split_once(": ")?;
    let action = Action::from_status_token(token)?;

    let Some(open) = rest.rfind(" (") else {
        return Some((action, rest, None));
    };
    let elapsed = rest[open + 2..]
        .strip_suffix("s)")
        .and_then(|seconds| seconds.parse().ok());
    match elapsed {
        Some(elapsed) => Some((action, &rest[..open], Some(elapsed))),
        None => Some((action, rest, None)),
    }
}

/// Groups consecutive records that belong to the same test.
pub fn group_by_test(entries: &[TestJsonEntry]) -> Vec<&[TestJsonEntry]> {
    entries.chunk_by(|a, b| a.test == b.test).collect()
}

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d+\.\d+(s|ms| seconds)\b").expect("duration regex is valid")
});

/// Replaces every rendered duration in `text` with the placeholder `TIME`.
///
/// Used to compare output across runs, where timings differ.
pub fn normalize_durations(text: &str) -> Cow<'_, str> {
    DURATION_REGEX.replace_all(text, "TIME")
}
