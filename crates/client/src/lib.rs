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

//! ExpressionUtils Client - typed access to the KBase ExpressionUtils service
//!
//! The service uploads, downloads and exports RNA-seq expression objects and
//! builds expression matrices from them. This crate does none of that work
//! itself; it sends the requests and decodes the answers.
//!
//! # Components
//!
//! - [`ExpressionUtilsClient`] - one async method per service operation
//! - [`JsonRpcCaller`] - the shared JSON-RPC 1.1 transport over HTTP(S)
//! - [`types`] - request and result types with an extensibility bag for
//!   members the schema does not declare
//! - [`ClientConfig`] - endpoint, token, timeout and TLS settings
//! - [`ClientError`] - transport and RPC failures, propagated unchanged

#[macro_use]
pub mod types;

/// Generic JSON-RPC transport shared by every service method
pub mod caller;
/// Typed service client
pub mod client;
/// Connection settings
pub mod config;
/// Optional per-call context
pub mod context;
/// Error types
pub mod error;

pub use caller::{Auth, JsonRpcCaller};
pub use client::{ExpressionUtilsClient, SERVICE_NAME};
pub use config::ClientConfig;
pub use context::{MethodCall, RpcContext};
pub use error::{ClientError, Result, ServerError};
