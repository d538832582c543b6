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

//! Subcommand execution
//!
//! Each data subcommand reads its parameter object from `--params`, which is
//! either a literal JSON document or `@path` naming a file holding one.

use clap::{Args, Subcommand};
use expression_utils_client::{
    types::{
        DownloadExpressionParams, ExportParams, GetEnhancedFemParams, GetExprMatrixParams,
        UploadExpressionParams,
    },
    ExpressionUtilsClient, RpcContext,
};
use eyre::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fs;

/// Parameter object of a data subcommand
#[derive(Debug, Clone, Args)]
pub struct ParamsArgs {
    /// Parameters as JSON, or @FILE to read them from a file
    #[arg(long, value_name = "JSON|@FILE")]
    pub params: String,
}

/// Available commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Upload expression files as a workspace object
    Upload(ParamsArgs),
    /// Download an expression object into a local directory
    Download(ParamsArgs),
    /// Export an expression object to a shock node
    Export(ParamsArgs),
    /// Build FPKM and TPM expression matrices from an expression set
    GetExpressionMatrix(ParamsArgs),
    /// Fetch an enhanced filtered expression matrix
    GetEnhancedFem(ParamsArgs),
    /// Report the service status
    Status,
}

impl Commands {
    /// Name of the remote method the command calls
    pub fn method(&self) -> &'static str {
        use expression_utils_client::client::methods;
        match self {
            Self::Upload(_) => methods::UPLOAD_EXPRESSION,
            Self::Download(_) => methods::DOWNLOAD_EXPRESSION,
            Self::Export(_) => methods::EXPORT_EXPRESSION,
            Self::GetExpressionMatrix(_) => methods::GET_EXPRESSION_MATRIX,
            Self::GetEnhancedFem(_) => methods::GET_ENHANCED_FILTERED_EXPRESSION_MATRIX,
            Self::Status => methods::STATUS,
        }
    }

    /// Run the command and return its result as JSON
    pub async fn execute(
        &self,
        client: &ExpressionUtilsClient,
        context: Option<&RpcContext>,
    ) -> Result<Value> {
        match self {
            Self::Upload(args) => {
                let params: UploadExpressionParams = args.parse()?;
                to_json(client.upload_expression_with_context(&params, context).await?)
            }
            Self::Download(args) => {
                let params: DownloadExpressionParams = args.parse()?;
                to_json(client.download_expression_with_context(&params, context).await?)
            }
            Self::Export(args) => {
                let params: ExportParams = args.parse()?;
                to_json(client.export_expression_with_context(&params, context).await?)
            }
            Self::GetExpressionMatrix(args) => {
                let params: GetExprMatrixParams = args.parse()?;
                to_json(client.get_expression_matrix_with_context(&params, context).await?)
            }
            Self::GetEnhancedFem(args) => {
                let params: GetEnhancedFemParams = args.parse()?;
                to_json(
                    client
                        .get_enhanced_filtered_expression_matrix_with_context(&params, context)
                        .await?,
                )
            }
            Self::Status => Ok(Value::Object(client.status_with_context(context).await?)),
        }
    }
}

impl ParamsArgs {
    /// Decode the parameter object
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        parse_json_arg(&self.params).wrap_err("Invalid --params")
    }
}

/// Decode a JSON argument given inline or as `@path`
pub fn parse_json_arg<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let text = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file: {path}"))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).wrap_err("Failed to parse JSON")
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_params() {
        let params: ExportParams = parse_json_arg(r#"{"source_ref": "1/2/3"}"#).unwrap();
        assert_eq!(params.source_ref.as_deref(), Some("1/2/3"));
    }

    #[test]
    fn test_params_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"fem_object_ref": "ws/fem", "extra": true}}"#).unwrap();

        let arg = format!("@{}", file.path().display());
        let params: GetEnhancedFemParams = parse_json_arg(&arg).unwrap();
        assert_eq!(params.fem_object_ref.as_deref(), Some("ws/fem"));
        assert_eq!(params.additional_properties.get("extra"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_invalid_params() {
        assert!(parse_json_arg::<ExportParams>("{not json").is_err());
        assert!(parse_json_arg::<ExportParams>("@/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_method_names() {
        let args = ParamsArgs { params: "{}".to_string() };
        assert_eq!(Commands::GetExpressionMatrix(args.clone()).method(), "get_expressionMatrix");
        assert_eq!(
            Commands::GetEnhancedFem(args).method(),
            "get_enhancedFilteredExpressionMatrix"
        );
        assert_eq!(Commands::Status.method(), "status");
    }
}
