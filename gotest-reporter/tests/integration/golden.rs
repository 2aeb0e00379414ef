// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{FixtureSuite, SharedBuffer, formatting_suite, mixed_suite, two_groups};
use gotest_reporter::{
    activation::Activation,
    config::{ActivationConfig, ActivationMode},
    errors::WriteEventError,
    events::{SetupSummary, SpecState, SpecSummary, SuiteConfig, SuiteSummary},
    reporter::{Reporter, ReporterList, goland_reporters},
    test2json::{Action, Test2Json, group_by_test, normalize_durations},
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::{ffi::OsString, io::Write};

fn run_goland(suite: &FixtureSuite, activation: Activation) -> (SuiteSummary, String) {
    let buffer = SharedBuffer::default();
    let mut reporters = goland_reporters(activation, || buffer.clone());
    let summary = suite.run(&mut reporters).expect("writing to a buffer succeeds");
    (summary, buffer.contents())
}

#[test]
fn passing_groups() {
    let (summary, output) = run_goland(&two_groups(|_, _| SpecState::Passed), Activation::Enabled);

    assert!(summary.suite_succeeded);
    assert_eq!(
        output,
        indoc! {"

            === RUN   A test 1 passes

            --- PASS: A test 1 passes (0.0s)

            === RUN   A test 2 passes

            --- PASS: A test 2 passes (0.0s)

            === RUN   B test 1 passes

            --- PASS: B test 1 passes (0.0s)

            === RUN   B test 2 passes

            --- PASS: B test 2 passes (0.0s)
        "}
    );
}

#[test]
fn one_failing_spec() {
    let suite = two_groups(|group, spec| {
        if group == "B" && spec == "test 1 passes" {
            SpecState::Failed
        } else {
            SpecState::Passed
        }
    });
    let (summary, output) = run_goland(&suite, Activation::Enabled);

    assert!(!summary.suite_succeeded);
    assert_eq!(summary.number_of_failed_specs, 1);
    assert!(output.contains("\n--- FAIL: B test 1 passes (0.0s)\n"));
    assert!(!output.contains("--- PASS: B test 1 passes"));

    let lines: Vec<_> = output.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(
        lines,
        [
            "=== RUN   A test 1 passes",
            "--- PASS: A test 1 passes (0.0s)",
            "=== RUN   A test 2 passes",
            "--- PASS: A test 2 passes (0.0s)",
            "=== RUN   B test 1 passes",
            "--- FAIL: B test 1 passes (0.0s)",
            "=== RUN   B test 2 passes",
            "--- PASS: B test 2 passes (0.0s)",
        ]
    );
}

#[test]
fn parentheses_in_ancestor_are_escaped() {
    let (_, output) = run_goland(&formatting_suite(), Activation::Enabled);

    assert_eq!(
        output,
        indoc! {r"

            === RUN   FORMATTING this \(level) has parenthesis test 1 passes

            --- PASS: FORMATTING this \(level) has parenthesis test 1 passes (0.0s)

            === RUN   FORMATTING this \(level) has parenthesis test 2 passes

            --- PASS: FORMATTING this \(level) has parenthesis test 2 passes (0.0s)

            === RUN   FORMATTING this /level/ has slashes test 1 passes

            --- PASS: FORMATTING this /level/ has slashes test 1 passes (0.0s)

            === RUN   FORMATTING this /level/ has slashes test 2 passes

            --- PASS: FORMATTING this /level/ has slashes test 2 passes (0.0s)
        "}
    );
}

#[test]
fn mixed_outcomes_with_timings() {
    let (summary, output) = run_goland(&mixed_suite(), Activation::Enabled);

    assert_eq!(summary.number_of_passed_specs, 1);
    assert_eq!(summary.number_of_failed_specs, 2);
    assert_eq!(summary.number_of_pending_specs, 1);
    assert_eq!(summary.number_of_skipped_specs, 1);

    assert_eq!(
        output,
        indoc! {"

            === RUN   level 1 A test 1 fails

            --- FAIL: level 1 A test 1 fails (0.12s)

            === RUN   level 1 A test 2 passes

            --- PASS: level 1 A test 2 passes (1.5s)

            === RUN   level 1 B test 1 is pending

            --- SKIP: level 1 B test 1 is pending (0.0s)

            === RUN   level 1 B test 2 panics

            --- FAIL: level 1 B test 2 panics (2.340s)

            === RUN   level 1 B test 3 is skipped

            --- SKIP: level 1 B test 3 is skipped (0.0s)
        "}
    );

    assert_eq!(
        normalize_durations(&output)
            .lines()
            .filter(|line| line.starts_with("---"))
            .collect::<Vec<_>>(),
        [
            "--- FAIL: level 1 A test 1 fails (TIME)",
            "--- PASS: level 1 A test 2 passes (TIME)",
            "--- SKIP: level 1 B test 1 is pending (TIME)",
            "--- FAIL: level 1 B test 2 panics (TIME)",
            "--- SKIP: level 1 B test 3 is skipped (TIME)",
        ]
    );
}

#[test]
fn consumer_reconstructs_each_test() {
    let (_, output) = run_goland(&mixed_suite(), Activation::Enabled);
    let entries = Test2Json::convert(&output);
    let groups = group_by_test(&entries);

    // The leading empty line belongs to no test.
    assert_eq!(groups.len(), 6);
    assert_eq!(groups[0].len(), 1);
    assert_eq!(groups[0][0].test, "");

    let summary: Vec<_> = groups[1..]
        .iter()
        .map(|group| {
            let actions: Vec<_> = group
                .iter()
                .map(|entry| entry.action)
                .filter(|action| *action != Action::Output)
                .collect();
            (group[0].test.as_str(), actions)
        })
        .collect();

    assert_eq!(
        summary,
        [
            ("level 1 A test 1 fails", vec![Action::Run, Action::Fail]),
            ("level 1 A test 2 passes", vec![Action::Run, Action::Pass]),
            ("level 1 B test 1 is pending", vec![Action::Run, Action::Skip]),
            ("level 1 B test 2 panics", vec![Action::Run, Action::Fail]),
            ("level 1 B test 3 is skipped", vec![Action::Run, Action::Skip]),
        ]
    );

    let elapsed: Vec<_> = entries.iter().filter_map(|entry| entry.elapsed).collect();
    assert_eq!(elapsed, [0.12, 1.5, 0.0, 2.34, 0.0]);
}

#[test]
fn run_marker_precedes_completion_marker() {
    let (_, output) = run_goland(&formatting_suite(), Activation::Enabled);
    let lines: Vec<_> = output.lines().collect();

    for (index, line) in lines.iter().enumerate() {
        if let Some(name) = line.strip_prefix("=== RUN   ") {
            let completion = lines
                .iter()
                .position(|other| other.starts_with("--- ") && other.contains(name))
                .expect("every started spec completes");
            assert!(index < completion, "RUN for `{name}` precedes its completion");
        }
    }
}

#[test]
fn deactivated_writes_nothing() {
    let config = ActivationConfig {
        mode: ActivationMode::Auto,
        ..Default::default()
    };
    let activation =
        Activation::detect_with(&config, |_| Some(OsString::from("com.apple.Terminal")));
    assert_eq!(activation, Activation::Disabled);

    for suite in [
        two_groups(|_, _| SpecState::Failed),
        formatting_suite(),
        mixed_suite(),
    ] {
        let (_, output) = run_goland(&suite, activation);
        assert_eq!(output, "", "no bytes are written when deactivated");
    }
}

/// Writes a progress dot without a trailing newline after each passing spec, the way a
/// human-readable reporter might.
struct DotReporter {
    out: SharedBuffer,
}

impl Reporter for DotReporter {
    fn suite_will_begin(
        &mut self,
        _config: &SuiteConfig,
        summary: &SuiteSummary,
    ) -> Result<(), WriteEventError> {
        write!(self.out, "Running Suite: {}", summary.suite_description).map_err(WriteEventError::Io)
    }

    fn before_suite_did_run(&mut self, _setup: &SetupSummary) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn spec_will_run(&mut self, _spec: &SpecSummary) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn spec_did_complete(&mut self, _spec: &SpecSummary) -> Result<(), WriteEventError> {
        write!(self.out, "•").map_err(WriteEventError::Io)
    }

    fn after_suite_did_run(&mut self, _setup: &SetupSummary) -> Result<(), WriteEventError> {
        Ok(())
    }

    fn suite_did_end(&mut self, _summary: &SuiteSummary) -> Result<(), WriteEventError> {
        Ok(())
    }
}

#[test]
fn markers_start_on_their_own_line_after_other_reporters() {
    let buffer = SharedBuffer::default();
    let mut reporters = ReporterList::new();
    reporters.push(DotReporter {
        out: buffer.clone(),
    });
    reporters.extend(goland_reporters(Activation::Enabled, || buffer.clone()));

    two_groups(|_, _| SpecState::Passed)
        .run(&mut reporters)
        .unwrap();

    let output = buffer.contents();
    assert!(output.starts_with("Running Suite: Suite\n=== RUN   A test 1 passes\n"));
    assert!(output.contains("•\n--- PASS: A test 1 passes (0.0s)\n"));

    let entries = Test2Json::convert(&output);
    let actions: Vec<_> = entries
        .iter()
        .filter(|entry| entry.action != Action::Output)
        .map(|entry| (entry.action, entry.test.as_str()))
        .collect();
    assert_eq!(
        actions,
        [
            (Action::Run, "A test 1 passes"),
            (Action::Pass, "A test 1 passes"),
            (Action::Run, "A test 2 passes"),
            (Action::Pass, "A test 2 passes"),
            (Action::Run, "B test 1 passes"),
            (Action::Pass, "B test 1 passes"),
            (Action::Run, "B test 2 passes"),
            (Action::Pass, "B test 2 passes"),
        ]
    );
}
