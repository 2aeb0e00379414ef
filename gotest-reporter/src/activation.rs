// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deciding whether the GoLand reporter is active.
//!
//! The decision is made exactly once, at process start, and the resulting [`Activation`] value is
//! passed into reporter construction. Nothing in this crate reads the environment after that.

use crate::config::{ActivationConfig, ActivationMode};
use std::ffi::OsString;
use tracing::debug;

/// The substring that identifies a GoLand test invocation.
pub const GOLAND_MARKER: &str = "goland";

/// Returns true if `value` contains [`GOLAND_MARKER`].
///
/// The match is a case-sensitive substring match.
pub fn should_activate(value: &str) -> bool {
    value.contains(GOLAND_MARKER)
}

/// Whether the GoLand reporter should be registered for this run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Activation {
    /// The reporter is registered and writes protocol lines.
    Enabled,
    /// The reporter is not constructed and produces no output.
    Disabled,
}

impl Activation {
    /// Decides activation from the process environment.
    pub fn detect(config: &ActivationConfig) -> Self {
        Self::detect_with(config, |name| std::env::var_os(name))
    }

    /// Decides activation, looking up environment variables through `lookup`.
    pub fn detect_with(
        config: &ActivationConfig,
        lookup: impl FnOnce(&str) -> Option<OsString>,
    ) -> Self {
        let activation = match config.mode {
            ActivationMode::Always => Self::Enabled,
            ActivationMode::Never => Self::Disabled,
            ActivationMode::Auto => match lookup(&config.env_var) {
                // Invalid UTF-8 sequences are replaced, leaving any marker bytes intact.
                Some(value) => Self::from_bool(should_activate(&value.to_string_lossy())),
                None => {
                    debug!("{} is not set", config.env_var);
                    Self::Disabled
                }
            },
        };

        debug!(
            "GoLand reporter {} (mode: {:?})",
            if activation.is_enabled() { "enabled" } else { "disabled" },
            config.mode,
        );
        activation
    }

    /// Converts a boolean into an `Activation`.
    pub fn from_bool(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    /// Returns true if the reporter is enabled.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}
