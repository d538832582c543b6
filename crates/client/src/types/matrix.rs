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

//! Parameters and results of the expression matrix calls.

use serde::{Deserialize, Serialize};

use super::{ExpressionMatrix, PropertyMap};

/// Input of `get_expressionMatrix`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetExprMatrixParams {
    /// Workspace the matrices are saved into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    /// Base name of the output matrix objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_obj_name: Option<String>,
    /// Reference of the source expression set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expressionset_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(GetExprMatrixParams {
    workspace_name: String,
    output_obj_name: String,
    expressionset_ref: String,
});

/// Result of `get_expressionMatrix`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetExprMatrixOutput {
    /// Reference of the FPKM matrix
    #[serde(rename = "exprMatrix_FPKM_ref", default, skip_serializing_if = "Option::is_none")]
    pub expr_matrix_fpkm_ref: Option<String>,
    /// Reference of the TPM matrix
    #[serde(rename = "exprMatrix_TPM_ref", default, skip_serializing_if = "Option::is_none")]
    pub expr_matrix_tpm_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(GetExprMatrixOutput { expr_matrix_fpkm_ref: String, expr_matrix_tpm_ref: String });

/// Input of `get_enhancedFilteredExpressionMatrix`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEnhancedFemParams {
    /// Reference of the filtered expression matrix to enhance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fem_object_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(GetEnhancedFemParams { fem_object_ref: String });

/// Result of `get_enhancedFilteredExpressionMatrix`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEnhancedFemOutput {
    /// The matrix, prepared for viewing
    #[serde(rename = "enhanced_FEM", default, skip_serializing_if = "Option::is_none")]
    pub enhanced_fem: Option<ExpressionMatrix>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(GetEnhancedFemOutput { enhanced_fem: ExpressionMatrix });
