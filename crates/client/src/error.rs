// ExpressionUtils - Rust client for the KBase ExpressionUtils service
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types returned by the ExpressionUtils client.
//!
//! Every failure falls into one of two families: the HTTP transport could not
//! complete the round trip ([`ClientError::Transport`]), or the JSON-RPC layer
//! reported a problem (everything else). Nothing is retried or translated; the
//! caller receives exactly what went wrong.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Convenience alias used throughout the client crate.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors produced by [`crate::ExpressionUtilsClient`] and [`crate::JsonRpcCaller`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request could not be encoded or a response could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a JSON-RPC error object.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// The call was refused locally before any I/O took place.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The response carried neither an error nor a usable `result`.
    #[error("the server returned no result for {method}")]
    MissingResult {
        /// Fully qualified JSON-RPC method name
        method: String,
    },

    /// The service answered with an HTTP status the protocol does not expect.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, for diagnostics
        body: String,
    },

    /// The configured service URL could not be parsed.
    #[error("invalid service URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },
}

impl ClientError {
    /// Returns `true` for failures of the HTTP round trip itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the server-side fault, if this error carries one.
    pub fn as_server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Server(err) => Some(err),
            _ => None,
        }
    }
}

/// A JSON-RPC error object as reported by the service.
///
/// KBase services put the remote stack trace under `error`; some
/// implementations use `data` instead, and a few send both. Null members
/// decode to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerError {
    /// Error class name, e.g. `JSONRPCError`
    #[serde(default = "unknown_name", deserialize_with = "name_or_unknown")]
    pub name: String,
    /// Numeric error code
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    /// Human-readable message
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Remote stack trace (KBase `error` member)
    #[serde(default)]
    pub error: Option<Value>,
    /// Additional error payload (`data` member)
    #[serde(default)]
    pub data: Option<Value>,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

fn name_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_name))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ServerError {
    /// Error used when a response holds neither `result` nor `error`.
    pub fn unknown() -> Self {
        Self {
            name: unknown_name(),
            code: 0,
            message: "An unknown server error occurred".to_string(),
            error: None,
            data: None,
        }
    }

    /// The error payload, `error` first and `data` otherwise.
    pub fn details(&self) -> Option<&Value> {
        self.error.as_ref().filter(|v| !v.is_null()).or(self.data.as_ref())
    }

    /// The remote stack trace, when the service sent one as a string.
    pub fn trace(&self) -> Option<&str> {
        self.details().and_then(Value::as_str)
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (code {})", self.name, self.message, self.code)
    }
}

impl std::error::Error for ServerError {}
