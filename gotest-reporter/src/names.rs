// Copyright (c) The gotest-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derivation of flat display names from nested test paths.
//!
//! A hierarchical host describes each leaf spec by the texts of every container it is nested in,
//! for example `["Passing Suite", "level 1", "A", "test 1 passes"]`. Line-oriented consumers only
//! understand a single name per test, so the path is flattened into a [`DisplayName`]: every
//! fragment after the suite root, joined with a single space.

use serde::Deserialize;
use std::fmt;

/// The ordered text fragments describing a spec's position in the nesting hierarchy.
///
/// Fragment 0 is the suite root label; it never contributes to the [`DisplayName`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TestPath {
    fragments: Vec<String>,
}

impl TestPath {
    /// Creates a new `TestPath` from fragments ordered outermost first.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with `fragment` appended as the innermost level.
    pub fn child(&self, fragment: impl Into<String>) -> Self {
        let mut fragments = self.fragments.clone();
        fragments.push(fragment.into());
        Self { fragments }
    }

    /// Returns the fragments, outermost first.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns the number of fragments, including the suite root.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the path has no fragments at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Resolves the display name for this path.
    pub fn display_name(&self) -> DisplayName {
        DisplayName(resolve(&self.fragments))
    }
}

/// Joins every fragment after the suite root with a single space.
///
/// Fragments are not trimmed, so internal and edge whitespace is preserved. A path consisting of
/// only the root (or no fragments at all) resolves to the empty string.
pub fn resolve<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut name = String::new();
    for (index, fragment) in fragments.iter().skip(1).enumerate() {
        if index > 0 {
            name.push(' ');
        }
        name.push_str(fragment.as_ref());
    }
    name
}

/// The flat name of a spec, as derived from its [`TestPath`].
///
/// The [`Display`](fmt::Display) implementation prints the name verbatim. Use
/// [`escaped`](Self::escaped) for text that is written to the line protocol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Returns the unescaped name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a wrapper that displays this name with protocol escaping applied.
    pub fn escaped(&self) -> EscapedName<'_> {
        EscapedName(&self.0)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Displays a joined name with every `(` prefixed by a backslash.
///
/// Consumers of the line protocol treat an unescaped `(` as the start of the trailing duration
/// group, so any parenthesis in a name would truncate it.
#[derive(Clone, Copy, Debug)]
pub struct EscapedName<'a>(&'a str);

impl fmt::Display for EscapedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let mut start = 0;

        for (i, byte) in s.bytes().enumerate() {
            if byte != b'(' {
                continue;
            }
            if start < i {
                f.write_str(&s[start..i])?;
            }
            f.write_str("\\(")?;
            start = i + 1;
        }

        if start != s.len() {
            f.write_str(&s[start..])?;
        }

        Ok(())
    }
}
