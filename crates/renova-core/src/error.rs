// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Renova reporting toolkit.

use thiserror::Error;

/// The primary error type used across the Renova core and client crates.
#[derive(Debug, Error)]
pub enum RenovaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A caller passed an out-of-contract value (zero page, unknown column key).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend rejected a request or the transport failed.
    #[error("api error: {message}")]
    Api {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a body that matches none of the known
    /// success envelopes.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A spreadsheet export failed. Transient; never invalidates report state.
    #[error("export failed: {message}")]
    Export {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
