// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::GoTestCompatibleReporter;
use crate::{
    activation::Activation,
    errors::WriteEventError,
    events::{SetupSummary, SpecEvent, SpecSummary, SuiteConfig, SuiteSummary},
};
use std::{fmt, io::Write};

/// A consumer of host notifications.
///
/// The host calls these methods on the thread that drives spec execution, in order: suite begin,
/// before-suite, then a will-run/did-complete pair per spec, after-suite, and suite end.
pub trait Reporter {
    /// Called once before any spec runs.
    fn suite_will_begin(
        &mut self,
        config: &SuiteConfig,
        summary: &SuiteSummary,
    ) -> Result<(), WriteEventError>;

    /// Called after the before-suite node ran.
    fn before_suite_did_run(&mut self, setup: &SetupSummary) -> Result<(), WriteEventError>;

    /// Called immediately before a spec runs.
    fn spec_will_run(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError>;

    /// Called after a spec finished, with its final state and run time.
    fn spec_did_complete(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError>;

    /// Called after the after-suite node ran.
    fn after_suite_did_run(&mut self, setup: &SetupSummary) -> Result<(), WriteEventError>;

    /// Called once after every spec ran.
    fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<(), WriteEventError>;

    /// Forwards `event` to the matching method.
    fn report_event(&mut self, event: &SpecEvent) -> Result<(), WriteEventError> {
        match event {
            SpecEvent::SuiteWillBegin { config, summary } => self.suite_will_begin(config, summary),
            SpecEvent::BeforeSuiteDidRun { setup } => self.before_suite_did_run(setup),
            SpecEvent::SpecWillRun { spec } => self.spec_will_run(spec),
            SpecEvent::SpecDidComplete { spec } => self.spec_did_complete(spec),
            SpecEvent::AfterSuiteDidRun { setup } => self.after_suite_did_run(setup),
            SpecEvent::SuiteDidEnd { summary } => self.suite_did_end(summary),
        }
    }
}

/// An ordered list of reporters, invoked in registration order.
///
/// `ReporterList` is itself a [`Reporter`], so it can be handed to a host that accepts a single
/// one. Dispatch stops at the first reporter that returns an error.
#[derive(Default)]
pub struct ReporterList<'a> {
    reporters: Vec<Box<dyn Reporter + 'a>>,
}

impl<'a> ReporterList<'a> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reporter to the end of the list.
    pub fn push(&mut self, reporter: impl Reporter + 'a) -> &mut Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    /// Appends every reporter in `other`, preserving their order.
    pub fn extend(&mut self, other: ReporterList<'a>) -> &mut Self {
        self.reporters.extend(other.reporters);
        self
    }

    /// Returns the number of registered reporters.
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Returns true if no reporters are registered.
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    fn for_each(
        &mut self,
        mut f: impl FnMut(&mut (dyn Reporter + 'a)) -> Result<(), WriteEventError>,
    ) -> Result<(), WriteEventError> {
        for reporter in &mut self.reporters {
            f(reporter.as_mut())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ReporterList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterList")
            .field("len", &self.reporters.len())
            .finish_non_exhaustive()
    }
}

impl Reporter for ReporterList<'_> {
    fn suite_will_begin(
        &mut self,
        config: &SuiteConfig,
        summary: &SuiteSummary,
    ) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.suite_will_begin(config, summary))
    }

    fn before_suite_did_run(&mut self, setup: &SetupSummary) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.before_suite_did_run(setup))
    }

    fn spec_will_run(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.spec_will_run(spec))
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.spec_did_complete(spec))
    }

    fn after_suite_did_run(&mut self, setup: &SetupSummary) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.after_suite_did_run(setup))
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) -> Result<(), WriteEventError> {
        self.for_each(|reporter| reporter.suite_did_end(summary))
    }
}

/// Returns the GoLand reporters for this run.
///
/// If `activation` is [`Activation::Disabled`], the list is empty and `make_writer` is never
/// called.
pub fn goland_reporters<'a, W, F>(activation: Activation, make_writer: F) -> ReporterList<'a>
where
    W: Write + 'a,
    F: FnOnce() -> W,
{
    let mut reporters = ReporterList::new();
    if activation.is_enabled() {
        reporters.push(GoTestCompatibleReporter::new(make_writer()));
    }
    reporters
}

/// Returns the GoLand reporters for this run, writing to standard output.
pub fn goland_stdout_reporters(activation: Activation) -> ReporterList<'static> {
    let mut reporters = ReporterList::new();
    if activation.is_enabled() {
        reporters.push(GoTestCompatibleReporter::stdout());
    }
    reporters
}
