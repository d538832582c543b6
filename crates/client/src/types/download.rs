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

//! Parameters and results of `download_expression` and `export_expression`.

use serde::{Deserialize, Serialize};

use super::PropertyMap;

/// Input of `download_expression`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadExpressionParams {
    /// Reference of the expression object, `workspace_id_or_name/object_id_or_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(DownloadExpressionParams { source_ref: String });

/// Result of `download_expression`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadExpressionOutput {
    /// Directory on the service host the files were unpacked into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_dir: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(DownloadExpressionOutput { destination_dir: String });

/// Input of `export_expression`, used by in-narrative downloaders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    /// Reference of the expression object, `workspace_id_or_name/object_id_or_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(ExportParams { source_ref: String });

/// Result of `export_expression`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportOutput {
    /// Shock node id of the packed expression files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shock_id: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(ExportOutput { shock_id: String });
