// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, ReporterExitCode,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gotest_reporter::{
    activation::Activation,
    config::{ActivationMode, ReporterConfig},
    errors::EventParseError,
    events::SpecEvent,
    reporter::{Reporter, goland_reporters},
    test2json::Test2Json,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    time::Duration,
};
use tracing::{debug, info};

/// Replays test events as go test compatible output for GoLand.
///
/// Events are read as JSON lines, one host notification per line.
#[derive(Debug, Parser)]
#[command(version)]
pub struct App {
    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Command,
}

impl App {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self, writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Replay(opts) => opts.exec(writer),
            Command::Convert(opts) => opts.exec(writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay JSON-lines events through the GoLand reporter
    Replay(ReplayOpts),

    /// Convert go test -v text into test2json records
    ///
    /// This follows the per-test attribution GoLand performs on the reporter's output, and is
    /// useful for checking what the IDE will display.
    Convert(ConvertOpts),
}

#[derive(Debug, Args)]
struct InputOpts {
    /// Read from this file instead of standard input
    #[arg(long, short, value_name = "PATH")]
    input: Option<Utf8PathBuf>,
}

impl InputOpts {
    fn path(&self) -> Option<&Utf8Path> {
        self.input.as_deref()
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path).map_err(|err| ExpectedError::InputReadError {
                    path: Some(path.clone()),
                    err,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

#[derive(Debug, Args)]
struct ReplayOpts {
    #[command(flatten)]
    input: InputOpts,

    /// Config file [default: .config/gotest-reporter.toml]
    #[arg(long, value_name = "PATH", env = "GOTEST_REPORTER_CONFIG")]
    config_file: Option<Utf8PathBuf>,

    /// Override the activation mode from the config file
    #[arg(long, value_enum, value_name = "WHEN", env = "GOTEST_REPORTER_ACTIVATION")]
    activation: Option<ActivationArg>,
}

impl ReplayOpts {
    fn exec(self, writer: &mut OutputWriter) -> Result<i32> {
        let config = match &self.config_file {
            Some(path) => ReporterConfig::from_file(path)?,
            None => ReporterConfig::from_file_if_exists(Utf8Path::new(ReporterConfig::CONFIG_PATH))?,
        };

        let mut activation_config = config.activation;
        if let Some(activation) = self.activation {
            activation_config.mode = activation.into();
        }
        let activation = Activation::detect(&activation_config);

        let input = self.input.open()?;
        replay_events(input, self.input.path(), activation, writer)
    }
}

/// The `--activation` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ActivationArg {
    Auto,
    Always,
    Never,
}

impl From<ActivationArg> for ActivationMode {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::Auto => ActivationMode::Auto,
            ActivationArg::Always => ActivationMode::Always,
            ActivationArg::Never => ActivationMode::Never,
        }
    }
}

#[derive(Debug, Default)]
struct ReplayStats {
    events: usize,
    specs: usize,
    failed: usize,
    suite_run_time: Option<Duration>,
}

fn replay_events(
    input: impl BufRead,
    path: Option<&Utf8Path>,
    activation: Activation,
    writer: &mut OutputWriter,
) -> Result<i32> {
    let stdout = writer.stdout_writer();
    let mut reporters = goland_reporters(activation, move || stdout);
    let mut stats = ReplayStats::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.map_err(|err| ExpectedError::InputReadError {
            path: path.map(ToOwned::to_owned),
            err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let event: SpecEvent =
            serde_json::from_str(&line).map_err(|err| ExpectedError::EventParseError {
                path: path.map(ToOwned::to_owned),
                err: EventParseError {
                    line_number: index + 1,
                    err,
                },
            })?;

        stats.events += 1;
        match &event {
            SpecEvent::SpecDidComplete { spec } => {
                stats.specs += 1;
                if spec.state.is_failure() {
                    stats.failed += 1;
                }
            }
            SpecEvent::SuiteDidEnd { summary } => stats.suite_run_time = Some(summary.run_time),
            _ => {}
        }

        reporters.report_event(&event)?;
    }

    debug!("replayed {} events", stats.events);
    if let Some(run_time) = stats.suite_run_time {
        info!(
            "{} specs completed, {} failed, suite ran for {}",
            stats.specs,
            stats.failed,
            humantime::format_duration(run_time),
        );
    }

    if stats.failed > 0 {
        Ok(ReporterExitCode::TEST_RUN_FAILED)
    } else {
        Ok(ReporterExitCode::OK)
    }
}

#[derive(Debug, Args)]
struct ConvertOpts {
    #[command(flatten)]
    input: InputOpts,
}

impl ConvertOpts {
    fn exec(self, writer: &mut OutputWriter) -> Result<i32> {
        let input = self.input.open()?;
        convert_text(input, self.input.path(), writer)?;
        Ok(ReporterExitCode::OK)
    }
}

fn convert_text(
    mut input: impl BufRead,
    path: Option<&Utf8Path>,
    writer: &mut OutputWriter,
) -> Result<()> {
    let mut converter = Test2Json::new();
    let mut line = String::new();
    loop {
        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|err| ExpectedError::InputReadError {
                path: path.map(ToOwned::to_owned),
                err,
            })?;
        if read == 0 {
            break;
        }
        converter.push_line(&line);
    }

    let mut stdout = writer.stdout_writer();
    for entry in converter.finish() {
        writeln!(stdout, "{}", entry.to_json_line())
            .map_err(|err| ExpectedError::WriteOutputError { err })?;
    }
    stdout
        .flush()
        .map_err(|err| ExpectedError::WriteOutputError { err })
}
