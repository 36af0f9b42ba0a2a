// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for registry compilation.
//!
//! Parse-level failures abort a run immediately. Unresolvable references and
//! boundary misses are not errors at all and never show up here.

use std::path::PathBuf;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while compiling a registry into a loader header.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on \"{}\": {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The registry document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// An element the parser must read lacks a required attribute or child.
    #[error("Malformed registry: <{element}> is missing {missing}")]
    MalformedRegistry {
        /// Tag (and identifying name, when known) of the offending element.
        element: String,
        /// The attribute or child that was expected.
        missing: &'static str,
    },

    /// A template refers to a placeholder the assembler does not know.
    #[error("Unknown template placeholder: {{_{0}_}}")]
    UnknownPlaceholder(String),

    /// A template contains a `{_` with no matching `_}`.
    #[error("Unterminated template placeholder at byte {0}")]
    UnterminatedPlaceholder(usize),

    /// The requested version is outside the supported set.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// The requested profile is outside the supported set.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// A path given on the command line does not satisfy its constraints.
    #[error("{reason}: {}", path.display())]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Failed to load or look up symbols in a shared library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),

    /// Failed to serialize the binding surface.
    #[error("Serializing binding surface: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(element: impl Into<String>, missing: &'static str) -> Self {
        Error::MalformedRegistry {
            element: element.into(),
            missing,
        }
    }
}
