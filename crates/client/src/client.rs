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

//! Typed client for the ExpressionUtils service.
//!
//! Every method wraps its parameter in a one-element argument list, calls
//! `ExpressionUtils.<method>` through the shared [`JsonRpcCaller`] and returns
//! the first element of the result list.
//!
//! ```rust,no_run
//! use expression_utils_client::{types::ExportParams, ClientConfig, ExpressionUtilsClient};
//!
//! # async fn run() -> expression_utils_client::Result<()> {
//! let client = ExpressionUtilsClient::from_config(
//!     ClientConfig::new("https://kbase.us/services/service_wizard").with_token("AUTH_TOKEN"),
//! )?;
//!
//! let output = client
//!     .export_expression(&ExportParams::default().with_source_ref("my_ws/my_expression"))
//!     .await?;
//! println!("shock node: {:?}", output.shock_id);
//! # Ok(())
//! # }
//! ```

use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::{
    caller::{Auth, JsonRpcCaller},
    context::RpcContext,
    error::{ClientError, Result},
    types::{
        DownloadExpressionOutput, DownloadExpressionParams, ExportOutput, ExportParams,
        GetEnhancedFemOutput, GetEnhancedFemParams, GetExprMatrixOutput, GetExprMatrixParams,
        ServiceStatus, UploadExpressionOutput, UploadExpressionParams,
    },
    ClientConfig,
};

/// Module name prefixed to every method on the wire.
pub const SERVICE_NAME: &str = "ExpressionUtils";

/// Wire names of the service methods.
pub mod methods {
    /// `upload_expression`
    pub const UPLOAD_EXPRESSION: &str = "upload_expression";
    /// `download_expression`
    pub const DOWNLOAD_EXPRESSION: &str = "download_expression";
    /// `export_expression`
    pub const EXPORT_EXPRESSION: &str = "export_expression";
    /// `get_expressionMatrix`
    pub const GET_EXPRESSION_MATRIX: &str = "get_expressionMatrix";
    /// `get_enhancedFilteredExpressionMatrix`
    pub const GET_ENHANCED_FILTERED_EXPRESSION_MATRIX: &str =
        "get_enhancedFilteredExpressionMatrix";
    /// `status`
    pub const STATUS: &str = "status";
}

/// Client for the ExpressionUtils service.
#[derive(Debug, Clone)]
pub struct ExpressionUtilsClient {
    caller: JsonRpcCaller,
}

impl ExpressionUtilsClient {
    /// Creates a client for `url` without credentials.
    ///
    /// Only [`ExpressionUtilsClient::status`] can be called without a token.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(url))
    }

    /// Creates a client for `url` that authenticates with `token`.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(url).with_token(token))
    }

    /// Creates a client from a full configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self { caller: JsonRpcCaller::new(config)? })
    }

    /// The service endpoint.
    pub fn url(&self) -> &Url {
        self.caller.url()
    }

    /// The token sent with each request, if any.
    pub fn token(&self) -> Option<&str> {
        self.caller.config().token.as_deref()
    }

    /// The configured read timeout in milliseconds, if any.
    pub fn read_timeout_ms(&self) -> Option<u64> {
        self.caller.config().read_timeout_ms
    }

    /// The configured read timeout, `None` when reads never time out.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.caller.config().read_timeout()
    }

    /// Whether credentials may travel over plain HTTP.
    pub fn is_insecure_http_connection_allowed(&self) -> bool {
        self.caller.config().insecure_http_allowed
    }

    /// Whether every TLS certificate is trusted.
    pub fn is_all_ssl_certificates_trusted(&self) -> bool {
        self.caller.config().trust_all_ssl_certificates
    }

    /// Whether request bodies are sent chunked.
    pub fn is_streaming_mode_on(&self) -> bool {
        self.caller.config().streaming_mode
    }

    /// The pinned service version, if any.
    pub fn service_version(&self) -> Option<&str> {
        self.caller.config().service_version.as_deref()
    }

    /// Pins (or unpins) the service version for subsequent calls.
    pub fn set_service_version(&mut self, version: Option<String>) {
        self.caller.set_service_version(version);
    }

    /// Uploads an expression from a directory on the service host.
    pub async fn upload_expression(
        &self,
        params: &UploadExpressionParams,
    ) -> Result<UploadExpressionOutput> {
        self.upload_expression_with_context(params, None).await
    }

    /// [`Self::upload_expression`] with an explicit call context.
    pub async fn upload_expression_with_context(
        &self,
        params: &UploadExpressionParams,
        context: Option<&RpcContext>,
    ) -> Result<UploadExpressionOutput> {
        self.call_with_params(methods::UPLOAD_EXPRESSION, params, context).await
    }

    /// Downloads an expression's files into a directory on the service host.
    pub async fn download_expression(
        &self,
        params: &DownloadExpressionParams,
    ) -> Result<DownloadExpressionOutput> {
        self.download_expression_with_context(params, None).await
    }

    /// [`Self::download_expression`] with an explicit call context.
    pub async fn download_expression_with_context(
        &self,
        params: &DownloadExpressionParams,
        context: Option<&RpcContext>,
    ) -> Result<DownloadExpressionOutput> {
        self.call_with_params(methods::DOWNLOAD_EXPRESSION, params, context).await
    }

    /// Looks up the Shock node holding an expression's files, for in-narrative downloaders.
    pub async fn export_expression(&self, params: &ExportParams) -> Result<ExportOutput> {
        self.export_expression_with_context(params, None).await
    }

    /// [`Self::export_expression`] with an explicit call context.
    pub async fn export_expression_with_context(
        &self,
        params: &ExportParams,
        context: Option<&RpcContext>,
    ) -> Result<ExportOutput> {
        self.call_with_params(methods::EXPORT_EXPRESSION, params, context).await
    }

    /// Builds FPKM and TPM expression matrices from an expression set.
    pub async fn get_expression_matrix(
        &self,
        params: &GetExprMatrixParams,
    ) -> Result<GetExprMatrixOutput> {
        self.get_expression_matrix_with_context(params, None).await
    }

    /// [`Self::get_expression_matrix`] with an explicit call context.
    pub async fn get_expression_matrix_with_context(
        &self,
        params: &GetExprMatrixParams,
        context: Option<&RpcContext>,
    ) -> Result<GetExprMatrixOutput> {
        self.call_with_params(methods::GET_EXPRESSION_MATRIX, params, context).await
    }

    /// Fetches a filtered expression matrix prepared for viewing.
    pub async fn get_enhanced_filtered_expression_matrix(
        &self,
        params: &GetEnhancedFemParams,
    ) -> Result<GetEnhancedFemOutput> {
        self.get_enhanced_filtered_expression_matrix_with_context(params, None).await
    }

    /// [`Self::get_enhanced_filtered_expression_matrix`] with an explicit call context.
    pub async fn get_enhanced_filtered_expression_matrix_with_context(
        &self,
        params: &GetEnhancedFemParams,
        context: Option<&RpcContext>,
    ) -> Result<GetEnhancedFemOutput> {
        self.call_with_params(methods::GET_ENHANCED_FILTERED_EXPRESSION_MATRIX, params, context)
            .await
    }

    /// Reports the service's state and version. Does not require a token.
    pub async fn status(&self) -> Result<ServiceStatus> {
        self.status_with_context(None).await
    }

    /// [`Self::status`] with an explicit call context.
    pub async fn status_with_context(&self, context: Option<&RpcContext>) -> Result<ServiceStatus> {
        self.call_first(methods::STATUS, &[], Auth::Optional, context).await
    }

    async fn call_with_params<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
        context: Option<&RpcContext>,
    ) -> Result<R> {
        let args = [serde_json::to_value(params)?];
        self.call_first(method, &args, Auth::Required, context).await
    }

    async fn call_first<R: DeserializeOwned>(
        &self,
        method: &str,
        args: &[Value],
        auth: Auth,
        context: Option<&RpcContext>,
    ) -> Result<R> {
        let method = qualified_method(method);
        let results = self.caller.call(&method, args, auth, context).await?;
        results.into_iter().next().ok_or(ClientError::MissingResult { method })
    }
}

/// `ExpressionUtils.<method>`
pub fn qualified_method(method: &str) -> String {
    format!("{SERVICE_NAME}.{method}")
}
