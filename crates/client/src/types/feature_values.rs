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

//! Matrix types owned by the KBaseFeatureValues service.
//!
//! `get_enhancedFilteredExpressionMatrix` returns an [`ExpressionMatrix`]
//! defined by that service's schema; the types are reproduced here so the
//! result can be decoded without another client crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PropertyMap;

/// A [`FloatMatrix2D`] of expression values with normalization metadata.
///
/// Rows map to features and columns to conditions, so
/// `data.values[feature][condition]` holds one measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionMatrix {
    /// Short description of the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value type: level, ratio or log-ratio
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub matrix_type: Option<String>,
    /// Value scale: raw, ln, log2 or log10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    /// mean_center, median_center, mode_center or zscore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_normalization: Option<String>,
    /// mean_center, median_center, mode_center or zscore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_normalization: Option<String>,
    /// Reference of the genome the features belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_ref: Option<String>,
    /// Row id to genome feature id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_mapping: Option<BTreeMap<String, String>>,
    /// Reference of the condition set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditionset_ref: Option<String>,
    /// Column id to condition id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_mapping: Option<BTreeMap<String, String>>,
    /// The values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FloatMatrix2D>,
    /// Quality-control report attached by the producer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(ExpressionMatrix {
    description: String,
    matrix_type: String,
    scale: String,
    row_normalization: String,
    col_normalization: String,
    genome_ref: String,
    feature_mapping: BTreeMap<String, String>,
    conditionset_ref: String,
    condition_mapping: BTreeMap<String, String>,
    data: FloatMatrix2D,
    report: AnalysisReport,
});

/// A labelled 2D matrix stored row-major as `values[row][col]`.
///
/// Missing measurements are encoded as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatMatrix2D {
    /// Unique row ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_ids: Option<Vec<String>>,
    /// Unique column ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_ids: Option<Vec<String>>,
    /// Row-major values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<Option<f64>>>>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(FloatMatrix2D {
    row_ids: Vec<String>,
    col_ids: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
});

/// Informational messages, warnings and errors from quality-control checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Kind of check the producer detected
    #[serde(rename = "checkTypeDetected", default, skip_serializing_if = "Option::is_none")]
    pub check_type_detected: Option<String>,
    /// Check that was applied
    #[serde(rename = "checkUsed", default, skip_serializing_if = "Option::is_none")]
    pub check_used: Option<String>,
    /// One description per check
    #[serde(rename = "checkDescriptions", default, skip_serializing_if = "Option::is_none")]
    pub check_descriptions: Option<Vec<String>>,
    /// KBase booleans (0 or 1), one per entry of `check_descriptions`
    #[serde(rename = "checkResults", default, skip_serializing_if = "Option::is_none")]
    pub check_results: Option<Vec<i64>>,
    /// Informational messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
    /// Warnings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    /// Errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(AnalysisReport {
    check_type_detected: String,
    check_used: String,
    check_descriptions: Vec<String>,
    check_results: Vec<i64>,
    messages: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
});
