// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifications fired by the host test framework.
//!
//! Events are produced by the host's tree walker and consumed by a
//! [`Reporter`](crate::reporter::Reporter). All types deserialize from JSON so that hosts in other
//! processes can replay them.

use crate::names::TestPath;
use serde::Deserialize;
use std::{fmt, time::Duration};

/// The host's state for a single spec.
///
/// This is a superset of [`RunOutcome`]: the host tracks why a spec failed or did not run, while
/// the line protocol only distinguishes pass, fail and skip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecState {
    /// The host never assigned a state. Reporting such a spec is a contract violation.
    Invalid,
    /// The spec is marked pending and was not run.
    Pending,
    /// The spec was skipped, either by focus/filtering or at runtime.
    Skipped,
    /// The spec ran and passed.
    Passed,
    /// An assertion in the spec failed.
    Failed,
    /// The spec panicked.
    Panicked,
    /// The spec exceeded its time limit.
    Timedout,
}

impl SpecState {
    /// Returns true if this state is one of the host's failure states.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Panicked | Self::Timedout)
    }

    /// Maps this state to the outcome reported on the line protocol.
    ///
    /// Returns `None` for [`SpecState::Invalid`].
    pub fn outcome(self) -> Option<RunOutcome> {
        match self {
            Self::Passed => Some(RunOutcome::Passed),
            Self::Failed | Self::Panicked | Self::Timedout => Some(RunOutcome::Failed),
            Self::Skipped | Self::Pending => Some(RunOutcome::Skipped),
            Self::Invalid => None,
        }
    }
}

impl fmt::Display for SpecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Invalid => "invalid",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Panicked => "panicked",
            Self::Timedout => "timedout",
        };
        f.write_str(s)
    }
}

/// The outcome of a completed spec, as reported on the line protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The spec passed.
    Passed,
    /// The spec failed.
    Failed,
    /// The spec was skipped or is pending.
    Skipped,
}

impl RunOutcome {
    /// Returns the status token used in completion markers.
    pub fn status_token(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// The failure message and location of a failed spec.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SpecFailure {
    /// The failure text produced by the host's assertion library.
    pub message: String,
    /// The source location of the failure, if known.
    #[serde(default)]
    pub location: Option<String>,
}

/// A snapshot of a single spec, passed with spec-level notifications.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SpecSummary {
    /// The texts of every container the spec is nested in, suite root first, spec text last.
    pub component_texts: TestPath,

    /// The spec's state. For [`SpecEvent::SpecWillRun`] this is typically
    /// [`SpecState::Invalid`], since the spec has not run yet.
    #[serde(default = "default_state")]
    pub state: SpecState,

    /// How long the spec took to run.
    #[serde(default, with = "humantime_serde")]
    pub run_time: Duration,

    /// Failure information, if the spec failed.
    #[serde(default)]
    pub failure: Option<SpecFailure>,
}

fn default_state() -> SpecState {
    SpecState::Invalid
}

impl SpecSummary {
    /// Creates a summary for a spec that is about to run.
    pub fn will_run(component_texts: TestPath) -> Self {
        Self {
            component_texts,
            state: SpecState::Invalid,
            run_time: Duration::ZERO,
            failure: None,
        }
    }

    /// Creates a summary for a spec that completed in `state` after `run_time`.
    pub fn completed(component_texts: TestPath, state: SpecState, run_time: Duration) -> Self {
        Self {
            component_texts,
            state,
            run_time,
            failure: None,
        }
    }
}

/// Which suite-level setup node a [`SetupSummary`] describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SetupKind {
    /// A node that runs before any spec.
    BeforeSuite,
    /// A node that runs after every spec.
    AfterSuite,
}

/// A snapshot of a suite-level setup node.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SetupSummary {
    /// The kind of setup node.
    pub kind: SetupKind,

    /// The node's state.
    pub state: SpecState,

    /// How long the node took to run.
    #[serde(default, with = "humantime_serde")]
    pub run_time: Duration,
}

/// A snapshot of the whole suite.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuiteSummary {
    /// The suite root label.
    pub suite_description: String,
    /// True if no spec failed.
    pub suite_succeeded: bool,
    /// The total number of specs in the suite.
    pub number_of_total_specs: usize,
    /// The number of specs selected to run.
    pub number_of_specs_that_will_be_run: usize,
    /// The number of specs that passed.
    pub number_of_passed_specs: usize,
    /// The number of specs that failed.
    pub number_of_failed_specs: usize,
    /// The number of pending specs.
    pub number_of_pending_specs: usize,
    /// The number of skipped specs.
    pub number_of_skipped_specs: usize,
    /// How long the suite took to run.
    #[serde(with = "humantime_serde")]
    pub run_time: Duration,
}

/// Host configuration passed when a suite begins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// The seed used for ordering specs.
    pub random_seed: i64,
    /// True if every spec, not only top-level containers, was shuffled.
    pub randomize_all_specs: bool,
}

/// A single host notification.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SpecEvent {
    /// The suite is about to begin.
    SuiteWillBegin {
        /// Host configuration.
        #[serde(default)]
        config: SuiteConfig,
        /// The suite summary so far.
        #[serde(default)]
        summary: SuiteSummary,
    },

    /// The before-suite node ran.
    BeforeSuiteDidRun {
        /// The setup summary.
        setup: SetupSummary,
    },

    /// A spec is about to run.
    SpecWillRun {
        /// The spec summary.
        spec: SpecSummary,
    },

    /// A spec completed.
    SpecDidComplete {
        /// The spec summary, including its final state.
        spec: SpecSummary,
    },

    /// The after-suite node ran.
    AfterSuiteDidRun {
        /// The setup summary.
        setup: SetupSummary,
    },

    /// The suite ended.
    SuiteDidEnd {
        /// The final suite summary.
        #[serde(default)]
        summary: SuiteSummary,
    },
}
