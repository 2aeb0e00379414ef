// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for gotest-reporter.
//!
//! Configuration is read from a TOML file, by default `.config/gotest-reporter.toml`. Every key is
//! optional:
//!
//! ```toml
//! [activation]
//! mode = "auto"
//! env-var = "XPC_SERVICE_NAME"
//! ```

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::Utf8Path;
use serde::Deserialize;

/// The environment variable inspected in [`ActivationMode::Auto`] unless overridden.
///
/// GoLand on macOS launches test processes through a launchd service whose name contains
/// `goland`.
pub const DEFAULT_ENV_VAR: &str = "XPC_SERVICE_NAME";

/// Top-level reporter configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReporterConfig {
    /// Controls whether the GoLand reporter is registered.
    pub activation: ActivationConfig,
}

impl ReporterConfig {
    /// The default location of the config file, relative to the working directory.
    pub const CONFIG_PATH: &'static str = ".config/gotest-reporter.toml";

    /// Reads and parses the config file at `path`.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigParseError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|error| ConfigParseError::new(path, ConfigParseErrorKind::Read(error)))?;
        Self::parse(path, &contents)
    }

    /// Reads the config file at `path` if it exists, returning the default config otherwise.
    pub fn from_file_if_exists(path: &Utf8Path) -> Result<Self, ConfigParseError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("config file {path} not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses a config from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigParseError> {
        Self::parse(Utf8Path::new("<inline>"), contents)
    }

    fn parse(path: &Utf8Path, contents: &str) -> Result<Self, ConfigParseError> {
        toml::from_str(contents).map_err(|error| ConfigParseError::new(path, error.into()))
    }
}

/// The `[activation]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ActivationConfig {
    /// How activation is decided.
    pub mode: ActivationMode,

    /// The environment variable inspected in [`ActivationMode::Auto`].
    pub env_var: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            mode: ActivationMode::Auto,
            env_var: DEFAULT_ENV_VAR.to_owned(),
        }
    }
}

/// How the activation flag is decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationMode {
    /// Activate if the configured environment variable identifies GoLand.
    #[default]
    Auto,
    /// Always activate.
    Always,
    /// Never activate.
    Never,
}
