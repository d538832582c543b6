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

//! Generic JSON-RPC caller shared by every service method.
//!
//! The caller speaks the KBase flavour of JSON-RPC 1.1: a POST whose body is
//! `{"version": "1.1", "method": ..., "params": [...], "id": ..., "context": ...}`.
//! Results come back as a list under `result`; faults come back as an `error`
//! object, usually with HTTP status 500.
//!
//! No retries are attempted. Whatever the transport or the server reports is
//! handed back to the caller as a [`ClientError`].

use futures::stream;
use reqwest::{header, Body, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{
    context::RpcContext,
    error::{ClientError, Result, ServerError},
    ClientConfig,
};

/// Protocol version written into every request.
pub const JSON_RPC_VERSION: &str = "1.1";

/// Size of the chunks a request body is cut into in streaming mode.
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Whether a method may be called without a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// The call fails locally when no token is configured
    Required,
    /// The token is sent when configured, otherwise the call goes out anonymously
    Optional,
}

/// Outgoing request envelope
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    version: &'static str,
    method: &'a str,
    params: &'a [Value],
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<RpcContext>,
}

/// Incoming response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ServerError>,
}

/// Sends JSON-RPC requests to a single service endpoint.
#[derive(Debug, Clone)]
pub struct JsonRpcCaller {
    http: reqwest::Client,
    url: Url,
    config: ClientConfig,
}

impl JsonRpcCaller {
    /// Creates a caller from `config`.
    ///
    /// Fails with [`ClientError::InvalidUrl`] when the URL does not parse and
    /// with [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(|e| ClientError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.read_timeout() {
            builder = builder.read_timeout(timeout);
        }
        if config.trust_all_ssl_certificates {
            warn!(url = %url, "TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        debug!(url = %url, "Created JSON-RPC caller");
        Ok(Self { http, url, config })
    }

    /// The service endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The configuration this caller was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Pins (or unpins) the service version for subsequent calls.
    pub fn set_service_version(&mut self, version: Option<String>) {
        self.config.service_version = version;
    }

    /// Calls `method` with positional `params` and decodes `result` as a list of `R`.
    ///
    /// # Arguments
    /// * `method` - Fully qualified method name, e.g. `ExpressionUtils.status`
    /// * `params` - Positional arguments
    /// * `auth` - Whether the call needs a token
    /// * `context` - Optional per-call context
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: &[Value],
        auth: Auth,
        context: Option<&RpcContext>,
    ) -> Result<Vec<R>> {
        self.check_auth(method, auth)?;

        let request = self.build_request(method, params, context);
        let payload = serde_json::to_vec(&request)?;

        debug!(
            method,
            url = %self.url,
            id = %request.id,
            bytes = payload.len(),
            "Sending JSON-RPC request"
        );

        let mut builder =
            self.http.post(self.url.clone()).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = &self.config.token {
            builder = builder.header(header::AUTHORIZATION, token.as_str());
        }
        let builder = if self.config.streaming_mode {
            builder.body(streaming_body(&payload))
        } else {
            builder.body(payload)
        };

        let response = builder.send().await.map_err(|e| {
            error!(method, "JSON-RPC request failed: {e}");
            ClientError::from(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        let result = decode_response(method, status, &body)?;
        let values = serde_json::from_value(result)?;

        debug!(method, "JSON-RPC request successful");
        Ok(values)
    }

    fn check_auth(&self, method: &str, auth: Auth) -> Result<()> {
        match &self.config.token {
            None if auth == Auth::Required => Err(ClientError::Unauthorized(format!(
                "{method} requires authentication but no token was configured"
            ))),
            Some(_) if self.url.scheme() == "http" && !self.config.insecure_http_allowed => {
                Err(ClientError::Unauthorized(
                    "refusing to send a token over insecure http; use https or allow insecure \
                     http connections"
                        .to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    fn build_request<'a>(
        &self,
        method: &'a str,
        params: &'a [Value],
        context: Option<&RpcContext>,
    ) -> RpcRequest<'a> {
        let context = match &self.config.service_version {
            Some(version) => Some(RpcContext::with_service_version(context, version)),
            None => context.cloned(),
        };

        RpcRequest {
            version: JSON_RPC_VERSION,
            method,
            params,
            id: rand::random::<u64>().to_string(),
            context,
        }
    }
}

/// Wraps `payload` in a chunked body so no `Content-Length` is sent.
fn streaming_body(payload: &[u8]) -> Body {
    let chunks: Vec<std::io::Result<Vec<u8>>> =
        payload.chunks(STREAM_CHUNK_SIZE).map(|chunk| Ok(chunk.to_vec())).collect();
    Body::wrap_stream(stream::iter(chunks))
}

/// Turns an HTTP status and body into the `result` value or an error.
fn decode_response(method: &str, status: StatusCode, body: &[u8]) -> Result<Value> {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        if let Ok(RpcResponse { error: Some(err), .. }) = serde_json::from_slice(body) {
            warn!(method, code = err.code, "Server reported an error: {}", err.message);
            return Err(err.into());
        }
    }

    if !status.is_success() {
        warn!(method, status = status.as_u16(), "Unexpected HTTP status");
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let response: RpcResponse = serde_json::from_slice(body)?;
    if let Some(err) = response.error {
        warn!(method, code = err.code, "Server reported an error: {}", err.message);
        return Err(err.into());
    }

    match response.result {
        Some(Value::Null) | None => Err(ServerError::unknown().into()),
        Some(result) => Ok(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caller(config: ClientConfig) -> JsonRpcCaller {
        JsonRpcCaller::new(config).unwrap()
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = JsonRpcCaller::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { ref url, .. } if url == "not a url"));
    }

    #[test]
    fn test_request_envelope() {
        let caller = caller(ClientConfig::new("https://example.org/services"));
        let params = [json!({"source_ref": "1/2/3"})];

        let request = caller.build_request("ExpressionUtils.export_expression", &params, None);
        let encoded = serde_json::to_value(&request).unwrap();

        assert_eq!(encoded["version"], "1.1");
        assert_eq!(encoded["method"], "ExpressionUtils.export_expression");
        assert_eq!(encoded["params"], json!([{"source_ref": "1/2/3"}]));
        assert!(encoded["id"].is_string());
        assert!(encoded.get("context").is_none());
    }

    #[test]
    fn test_request_ids_differ() {
        let caller = caller(ClientConfig::new("https://example.org/services"));
        let a = caller.build_request("m", &[], None);
        let b = caller.build_request("m", &[], None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_service_version_goes_into_context() {
        let caller = caller(
            ClientConfig::new("https://example.org/services").with_service_version("dev"),
        );
        let context = RpcContext::default().with_run_id("r1");

        let request = caller.build_request("m", &[], Some(&context));
        let encoded = serde_json::to_value(&request).unwrap();

        assert_eq!(encoded["context"], json!({"run_id": "r1", "service_ver": "dev"}));
    }

    #[test]
    fn test_missing_token_fails_for_required_auth() {
        let caller = caller(ClientConfig::new("https://example.org/services"));

        assert!(matches!(
            caller.check_auth("ExpressionUtils.upload_expression", Auth::Required),
            Err(ClientError::Unauthorized(_))
        ));
        assert!(caller.check_auth("ExpressionUtils.status", Auth::Optional).is_ok());
    }

    #[test]
    fn test_token_over_plain_http() {
        let config = ClientConfig::new("http://localhost:5000").with_token("t");
        assert!(matches!(
            caller(config.clone()).check_auth("m", Auth::Optional),
            Err(ClientError::Unauthorized(_))
        ));
        assert!(caller(config.with_insecure_http_allowed(true))
            .check_auth("m", Auth::Required)
            .is_ok());
    }

    #[test]
    fn test_decode_success() {
        let body = br#"{"version": "1.1", "id": "1", "result": [{"obj_ref": "1/2/3"}]}"#;
        let result = decode_response("m", StatusCode::OK, body).unwrap();
        assert_eq!(result, json!([{"obj_ref": "1/2/3"}]));
    }

    #[test]
    fn test_decode_server_fault_on_500() {
        let body = br#"{"version": "1.1", "error": {"name": "JSONRPCError", "code": -32000,
            "message": "source_ref parameter is required", "error": "trace"}}"#;
        let err = decode_response("m", StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();

        let server = err.as_server_error().unwrap();
        assert_eq!(server.code, -32000);
        assert_eq!(server.message, "source_ref parameter is required");
        assert_eq!(server.trace(), Some("trace"));
    }

    #[test]
    fn test_decode_fault_with_data_and_error_members() {
        let body = json!({
            "version": "1.1",
            "error": {
                "name": "JSONRPCError",
                "code": -32000,
                "message": "boom",
                "data": {"x": 1},
                "error": "trace"
            }
        })
        .to_string();
        let err = decode_response("m", StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes())
            .unwrap_err();

        let server = err.as_server_error().expect("fault should decode as a server error");
        assert_eq!(server.name, "JSONRPCError");
        assert_eq!(server.code, -32000);
        assert_eq!(server.message, "boom");
        assert_eq!(server.trace(), Some("trace"));
        assert_eq!(server.data, Some(json!({"x": 1})));
    }

    #[test]
    fn test_decode_fault_with_null_message() {
        let body = br#"{"error": {"name": "JSONRPCError", "code": -32603, "message": null}}"#;
        let err = decode_response("m", StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        let server = err.as_server_error().expect("fault should decode as a server error");
        assert_eq!(server.code, -32603);
        assert!(server.message.is_empty());
    }

    #[test]
    fn test_decode_server_fault_on_200() {
        let body =
            br#"{"error": {"name": "JSONRPCError", "code": -32601, "message": "no such method"}}"#;
        let err = decode_response("m", StatusCode::OK, body).unwrap_err();
        assert_eq!(err.as_server_error().map(|e| e.code), Some(-32601));
    }

    #[test]
    fn test_decode_500_without_error_object() {
        let err = decode_response("m", StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>")
            .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedStatus { status: 500, .. }));
    }

    #[test]
    fn test_decode_unexpected_status() {
        let err = decode_response("m", StatusCode::BAD_GATEWAY, b"bad gateway").unwrap_err();
        match err {
            ClientError::UnexpectedStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_result() {
        let err = decode_response("m", StatusCode::OK, br#"{"version": "1.1"}"#).unwrap_err();
        assert_eq!(err.as_server_error(), Some(&ServerError::unknown()));
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = decode_response("m", StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }
}
