// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ReporterExitCode,
    output::{NO_HEADING_TARGET, StderrStyles},
};
use camino::{Utf8Path, Utf8PathBuf};
use gotest_reporter::errors::{ConfigParseError, EventParseError, WriteEventError};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that is expected to happen in normal operation, such as a malformed input line.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("input read error")]
    InputReadError {
        /// The input file, or `None` for standard input.
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
    #[error("event parse error")]
    EventParseError {
        /// The input file, or `None` for standard input.
        path: Option<Utf8PathBuf>,
        #[source]
        err: EventParseError,
    },
    #[error("error writing event")]
    WriteEventError {
        #[from]
        err: WriteEventError,
    },
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. }
            | Self::InputReadError { .. }
            | Self::EventParseError { .. } => ReporterExitCode::SETUP_ERROR,
            Self::WriteEventError { .. } | Self::WriteOutputError { .. } => {
                ReporterExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::ConfigParseError { err } => {
                tracing::error!(
                    "failed to parse config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::InputReadError { path, err } => {
                tracing::error!(
                    "failed to read input from {}",
                    display_input(path.as_deref(), styles)
                );
                Some(err as &dyn Error)
            }
            Self::EventParseError { path, err } => {
                tracing::error!(
                    "failed to parse event on line {} of {}",
                    err.line_number.style(styles.bold),
                    display_input(path.as_deref(), styles),
                );
                Some(&err.err as &dyn Error)
            }
            Self::WriteEventError { err } => {
                tracing::error!("failed to write event to stdout");
                err.source()
            }
            Self::WriteOutputError { err } => {
                tracing::error!("failed to write output to stdout");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

fn display_input(path: Option<&Utf8Path>, styles: &StderrStyles) -> String {
    match path {
        Some(path) => format!("`{}`", path.style(styles.bold)),
        None => "standard input".to_owned(),
    }
}
