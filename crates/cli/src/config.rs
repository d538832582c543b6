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

//! Configuration file handling for the command-line client
//!
//! Settings live in `~/.expression-utils.toml` and use the same keys as
//! [`ClientConfig`]:
//!
//! ```toml
//! url = "https://kbase.us/services/service_wizard"
//! token = "..."
//! read_timeout_ms = 30000
//! insecure_http_allowed = false
//! trust_all_ssl_certificates = false
//! streaming_mode = false
//! service_version = "release"
//! ```
//!
//! Command-line flags and environment variables override the file.

use expression_utils_client::ClientConfig;
use eyre::{Context, Result};
use std::{fs, path::PathBuf};
use tracing::debug;

/// File name of the per-user configuration in the home directory
pub const CONFIG_FILE_NAME: &str = ".expression-utils.toml";

/// Values given on the command line (or through the environment)
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Service endpoint
    pub url: Option<String>,
    /// Authorization token
    pub token: Option<String>,
    /// Read timeout in milliseconds
    pub read_timeout_ms: Option<u64>,
    /// Allow tokens over plain http
    pub insecure_http: bool,
    /// Trust every TLS certificate
    pub trust_all_certs: bool,
    /// Send request bodies chunked
    pub streaming: bool,
    /// Pinned service version
    pub service_version: Option<String>,
}

/// Get the default config file path (~/.expression-utils.toml)
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
    Ok(home.join(CONFIG_FILE_NAME))
}

/// Load the client configuration
///
/// An explicit `path` must exist. Without one, the default file is read when
/// present; otherwise every setting starts at its default.
pub fn load(path: Option<PathBuf>) -> Result<ClientConfig> {
    let (path, required) = match path {
        Some(path) => (path, true),
        None => (default_config_path()?, false),
    };

    if !required && !path.exists() {
        debug!("No config file at {path:?}, using defaults");
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;
    let config: ClientConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

    debug!("Loaded configuration from {path:?}");
    Ok(config)
}

/// Apply command-line overrides on top of a loaded configuration
pub fn apply_overrides(mut config: ClientConfig, overrides: Overrides) -> ClientConfig {
    if let Some(url) = overrides.url {
        config.url = url;
    }
    if let Some(token) = overrides.token {
        config.token = Some(token);
    }
    if let Some(timeout) = overrides.read_timeout_ms {
        config.read_timeout_ms = Some(timeout);
    }
    if let Some(version) = overrides.service_version {
        config.service_version = Some(version);
    }
    config.insecure_http_allowed |= overrides.insecure_http;
    config.trust_all_ssl_certificates |= overrides.trust_all_certs;
    config.streaming_mode |= overrides.streaming;
    config
}
