// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for gateway operations.

use thiserror::Error;

/// Errors that can occur while talking to the remote data gateway.
///
/// `MissingColumn` and `MissingTable` are the optional-schema subset: callers
/// with a documented fallback recover from them locally and never surface
/// them to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request could not be sent or the connection failed.
    #[error("Gateway request failed: {0}")]
    RequestFailed(String),
    /// The gateway answered with a non-success status.
    #[error("Gateway responded with status {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The error message from the response body.
        message: String,
    },
    /// A referenced column does not exist in this deployment's schema.
    #[error("Column '{0}' does not exist in this deployment")]
    MissingColumn(String),
    /// A referenced table does not exist in this deployment's schema.
    #[error("Table '{0}' does not exist in this deployment")]
    MissingTable(String),
    /// A single-row request matched no rows.
    #[error("No rows matched the request")]
    RowNotFound,
    /// The response body could not be decoded.
    #[error("Failed to decode gateway response: {0}")]
    Decode(String),
    /// The gateway client was configured incorrectly.
    #[error("Invalid gateway configuration: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Returns whether this error reports an absent optional column.
    #[must_use]
    pub const fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn(_))
    }

    /// Returns whether this error reports an absent optional table.
    #[must_use]
    pub const fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable(_))
    }

    /// Returns whether this error reports an empty single-row result.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RowNotFound)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
