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

//! Per-call JSON-RPC context.
//!
//! KBase services accept an optional `context` member next to `params`. It
//! carries the call stack of the job that issued the request and, when the
//! client pins one, the requested service version under `service_ver`.

use serde::{Deserialize, Serialize};

use crate::types::PropertyMap;

/// Key under which the pinned service version travels inside the context.
pub const SERVICE_VERSION_KEY: &str = "service_ver";

/// Optional context attached to a single request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcContext {
    /// Methods that led to this call, outermost first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_stack: Option<Vec<MethodCall>>,
    /// Identifier of the run this call belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(RpcContext { call_stack: Vec<MethodCall>, run_id: String });

impl RpcContext {
    /// Returns a copy of `context` (or an empty one) with `service_ver` set.
    pub(crate) fn with_service_version(context: Option<&Self>, version: &str) -> Self {
        let mut context = context.cloned().unwrap_or_default();
        context.additional_properties.insert(SERVICE_VERSION_KEY.to_string(), version.into());
        context
    }
}

/// One frame of an [`RpcContext`] call stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Timestamp of the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Fully qualified method name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Job that made the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(MethodCall { time: String, method: String, job_id: String });
