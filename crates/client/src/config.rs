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

//! Client configuration.
//!
//! [`ClientConfig`] collects everything the caller reads on each request. It is
//! plain serde data so applications can keep it in a TOML file, and it doubles
//! as a builder:
//!
//! ```rust
//! use expression_utils_client::ClientConfig;
//!
//! let config = ClientConfig::new("https://kbase.us/services/service_wizard")
//!     .with_token("AUTH_TOKEN")
//!     .with_read_timeout_ms(30_000)
//!     .with_service_version("release");
//! assert!(config.token.is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Connection settings for [`crate::ExpressionUtilsClient`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service endpoint
    pub url: String,
    /// Authorization token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Read timeout in milliseconds; `None` or `0` disables it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_ms: Option<u64>,
    /// Allow sending the token over plain `http://`
    pub insecure_http_allowed: bool,
    /// Trust every TLS certificate, including self-signed ones
    pub trust_all_ssl_certificates: bool,
    /// Send request bodies chunked instead of with a `Content-Length`
    pub streaming_mode: bool,
    /// Service version forwarded as `context.service_ver`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration for `url` with every other setting at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    /// Sets the authorization token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the read timeout in milliseconds.
    pub fn with_read_timeout_ms(mut self, milliseconds: u64) -> Self {
        self.read_timeout_ms = Some(milliseconds);
        self
    }

    /// Allows or forbids sending credentials over plain HTTP.
    pub fn with_insecure_http_allowed(mut self, allowed: bool) -> Self {
        self.insecure_http_allowed = allowed;
        self
    }

    /// Trusts every TLS certificate when `trust_all` is set.
    pub fn with_all_ssl_certificates_trusted(mut self, trust_all: bool) -> Self {
        self.trust_all_ssl_certificates = trust_all;
        self
    }

    /// Turns streaming mode on or off.
    pub fn with_streaming_mode(mut self, streaming: bool) -> Self {
        self.streaming_mode = streaming;
        self
    }

    /// Pins the service version.
    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// The effective read timeout, treating zero as "no timeout".
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

// Hand-written so the token never reaches logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("insecure_http_allowed", &self.insecure_http_allowed)
            .field("trust_all_ssl_certificates", &self.trust_all_ssl_certificates)
            .field("streaming_mode", &self.streaming_mode)
            .field("service_version", &self.service_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://example.org/services/expression");
        assert_eq!(config.url, "https://example.org/services/expression");
        assert!(config.token.is_none());
        assert!(config.read_timeout().is_none());
        assert!(!config.insecure_http_allowed);
        assert!(!config.trust_all_ssl_certificates);
        assert!(!config.streaming_mode);
        assert!(config.service_version.is_none());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        assert!(ClientConfig::new("u").with_read_timeout_ms(0).read_timeout().is_none());
        assert_eq!(
            ClientConfig::new("u").with_read_timeout_ms(1500).read_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("u").with_token("very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"url": "https://x", "streaming_mode": true}"#).unwrap();
        assert_eq!(config, ClientConfig::new("https://x").with_streaming_mode(true));
    }
}
