// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by gotest-reporter.

use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

/// An error that occurred while writing a protocol line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteEventError {
    /// An error occurred while writing the event to the provided output.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),
}

/// An error that occurred while reading or parsing a configuration file.
#[derive(Debug, Error)]
#[error("failed to parse config at `{config_file}`")]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the path to the config file, or `<inline>` for configs parsed from strings.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error that occurred.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of [`ConfigParseError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// The config file could not be read.
    #[error("error reading config file")]
    Read(#[source] std::io::Error),

    /// The config file is not valid TOML, or does not match the expected schema.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),
}

/// An error that occurred while parsing a line of replayed events.
#[derive(Debug, Error)]
#[error("failed to parse event on line {line_number}")]
pub struct EventParseError {
    /// The 1-based line number.
    pub line_number: usize,

    /// The underlying error.
    #[source]
    pub err: serde_json::Error,
}

/// Displays an error along with its chain of sources, one per line.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: std::error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E> fmt::Display for DisplayErrorChain<E>
where
    E: std::error::Error,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut current = self.error.source();
        while let Some(error) = current {
            write!(f, "\n  caused by:\n  - {error}")?;
            current = error.source();
        }

        Ok(())
    }
}
