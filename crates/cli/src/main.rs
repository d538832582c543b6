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

//! expression-utils - command-line client for the KBase ExpressionUtils service
//!
//! Calls one remote method per invocation and prints its result as JSON.

use clap::Parser;
use expression_utils_client::{ExpressionUtilsClient, RpcContext};
use eyre::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

mod commands;
mod config;

use commands::{parse_json_arg, Commands};
use config::Overrides;

/// Command-line interface for ExpressionUtils
#[derive(Debug, Parser)]
#[command(name = "expression-utils")]
#[command(about = "Command-line client for the KBase ExpressionUtils service")]
#[command(version)]
pub struct Cli {
    /// Service endpoint URL
    #[arg(long, global = true, env = "EXPRESSION_UTILS_URL")]
    pub url: Option<String>,

    /// Authorization token
    #[arg(long, global = true, env = "KB_AUTH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (default: ~/.expression-utils.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read timeout in milliseconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Allow the token to be sent over plain http
    #[arg(long, global = true)]
    pub insecure_http: bool,

    /// Accept any TLS certificate
    #[arg(long, global = true)]
    pub trust_all_certs: bool,

    /// Send request bodies chunked
    #[arg(long, global = true)]
    pub streaming: bool,

    /// Service version to request from the dispatcher
    #[arg(long, global = true)]
    pub service_version: Option<String>,

    /// Call context as JSON, or @FILE to read it from a file
    #[arg(long, global = true, value_name = "JSON|@FILE")]
    pub context: Option<String>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            token: self.token.clone(),
            read_timeout_ms: self.timeout_ms,
            insecure_http: self.insecure_http,
            trust_all_certs: self.trust_all_certs,
            streaming: self.streaming,
            service_version: self.service_version.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        let level = match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }
    expression_utils_common::init_logging("expression-utils", false)?;

    let config = config::apply_overrides(config::load(cli.config.clone())?, cli.overrides());
    debug!("Client configuration: {config:?}");
    if config.url.is_empty() {
        eyre::bail!("No service URL given (use --url, EXPRESSION_UTILS_URL or the config file)");
    }

    let context: Option<RpcContext> = cli
        .context
        .as_deref()
        .map(parse_json_arg::<RpcContext>)
        .transpose()
        .wrap_err("Invalid --context")?;

    let client = ExpressionUtilsClient::from_config(config)?;
    info!("Calling {} on {}", cli.command.method(), client.url());

    let result = cli
        .command
        .execute(&client, context.as_ref())
        .await
        .wrap_err_with(|| format!("{} failed", cli.command.method()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
