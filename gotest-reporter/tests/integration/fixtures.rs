// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use gotest_reporter::{
    errors::WriteEventError,
    events::{SetupKind, SetupSummary, SpecState, SpecSummary, SuiteConfig, SuiteSummary},
    names::TestPath,
    reporter::Reporter,
};
use std::{cell::RefCell, io, rc::Rc, time::Duration};

/// A node in a fixture suite.
pub(crate) enum Node {
    Container { text: &'static str, children: Vec<Node> },
    Spec { text: &'static str, state: SpecState, run_time: Duration },
}

pub(crate) fn describe(text: &'static str, children: Vec<Node>) -> Node {
    Node::Container { text, children }
}

pub(crate) fn it(text: &'static str, state: SpecState) -> Node {
    it_took(text, state, Duration::ZERO)
}

pub(crate) fn it_took(text: &'static str, state: SpecState, run_time: Duration) -> Node {
    Node::Spec {
        text,
        state,
        run_time,
    }
}

/// A fixture suite, walked depth-first in declaration order like a host with randomization off.
pub(crate) struct FixtureSuite {
    pub(crate) description: &'static str,
    pub(crate) nodes: Vec<Node>,
}

impl FixtureSuite {
    /// Runs every spec, firing the full sequence of host notifications at `reporter`.
    pub(crate) fn run(&self, reporter: &mut dyn Reporter) -> Result<SuiteSummary, WriteEventError> {
        let mut specs = Vec::new();
        let root = TestPath::new([self.description]);
        for node in &self.nodes {
            collect_specs(node, &root, &mut specs);
        }

        let mut summary = SuiteSummary {
            suite_description: self.description.to_owned(),
            number_of_total_specs: specs.len(),
            number_of_specs_that_will_be_run: specs.len(),
            ..Default::default()
        };
        let config = SuiteConfig {
            random_seed: 1234,
            randomize_all_specs: false,
        };
        let setup = |kind| SetupSummary {
            kind,
            state: SpecState::Passed,
            run_time: Duration::ZERO,
        };

        reporter.suite_will_begin(&config, &summary)?;
        reporter.before_suite_did_run(&setup(SetupKind::BeforeSuite))?;

        for (path, state, run_time) in specs {
            reporter.spec_will_run(&SpecSummary::will_run(path.clone()))?;

            match state {
                SpecState::Passed => summary.number_of_passed_specs += 1,
                SpecState::Pending => summary.number_of_pending_specs += 1,
                SpecState::Skipped => summary.number_of_skipped_specs += 1,
                state if state.is_failure() => summary.number_of_failed_specs += 1,
                _ => {}
            }
            summary.run_time += run_time;

            reporter.spec_did_complete(&SpecSummary::completed(path, state, run_time))?;
        }

        reporter.after_suite_did_run(&setup(SetupKind::AfterSuite))?;
        summary.suite_succeeded = summary.number_of_failed_specs == 0;
        reporter.suite_did_end(&summary)?;

        Ok(summary)
    }
}

fn collect_specs(node: &Node, parent: &TestPath, out: &mut Vec<(TestPath, SpecState, Duration)>) {
    match node {
        Node::Container { text, children } => {
            let path = parent.child(*text);
            for child in children {
                collect_specs(child, &path, out);
            }
        }
        Node::Spec {
            text,
            state,
            run_time,
        } => out.push((parent.child(*text), *state, *run_time)),
    }
}

/// A writer whose contents remain readable after it has been moved into a reporter.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is valid UTF-8")
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Two groups `A` and `B` with two passing specs each, directly under the suite root.
pub(crate) fn two_groups(state_for: impl Fn(&str, &str) -> SpecState) -> FixtureSuite {
    let group = |name: &'static str| {
        describe(
            name,
            vec![
                it("test 1 passes", state_for(name, "test 1 passes")),
                it("test 2 passes", state_for(name, "test 2 passes")),
            ],
        )
    };
    FixtureSuite {
        description: "Suite",
        nodes: vec![group("A"), group("B")],
    }
}

pub(crate) fn formatting_suite() -> FixtureSuite {
    FixtureSuite {
        description: "Formatting Suite",
        nodes: vec![describe(
            "FORMATTING",
            vec![
                describe(
                    "this (level) has parenthesis",
                    vec![
                        it("test 1 passes", SpecState::Passed),
                        it("test 2 passes", SpecState::Passed),
                    ],
                ),
                describe(
                    "this /level/ has slashes",
                    vec![
                        it("test 1 passes", SpecState::Passed),
                        it("test 2 passes", SpecState::Passed),
                    ],
                ),
            ],
        )],
    }
}

pub(crate) fn mixed_suite() -> FixtureSuite {
    FixtureSuite {
        description: "Mixed Suite",
        nodes: vec![describe(
            "level 1",
            vec![
                describe(
                    "A",
                    vec![
                        it_took("test 1 fails", SpecState::Failed, Duration::from_millis(12)),
                        it_took("test 2 passes", SpecState::Passed, Duration::from_millis(1005)),
                    ],
                ),
                describe(
                    "B",
                    vec![
                        it("test 1 is pending", SpecState::Pending),
                        it_took("test 2 panics", SpecState::Panicked, Duration::from_millis(2340)),
                        it("test 3 is skipped", SpecState::Skipped),
                    ],
                ),
            ],
        )],
    }
}
