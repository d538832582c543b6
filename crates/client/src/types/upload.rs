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

//! Parameters and result of `upload_expression`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PropertyMap;

/// Input of `upload_expression`.
///
/// The service's schema changed several times; this type carries every field
/// any revision accepted. Current servers read `destination_ref`, `source_dir`,
/// `alignment_ref` and the optional metadata below. The fields marked *legacy*
/// belong to the first revision (which took `mapped_rnaseq_alignment` instead
/// of `alignment_ref`) and are only sent when set.
///
/// Object references have the form `workspace_id_or_name/object_id_or_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadExpressionParams {
    /// Reference of the expression object to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_ref: Option<String>,
    /// Directory holding the files to upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    /// Reference of the RNA-seq alignment the expression was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_ref: Option<String>,
    /// Genome reference, overriding the one recorded on the alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_ref: Option<String>,
    /// Identifier of the genome annotation used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<String>,
    /// Path of a BAM file to use instead of downloading the alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bam_file_path: Option<String>,
    /// KBase boolean (0 or 1): also upload transcript-level expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcripts: Option<i64>,
    /// Data quality level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_level: Option<i64>,
    /// Median of the original expression values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_median: Option<f64>,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sequencing platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Origin of the data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Date the data was produced by the external source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_source_date: Option<String>,
    /// Free-text processing notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_comments: Option<String>,

    /// Experimental condition (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Assembly or genome the alignment was built against (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_or_genome_ref: Option<String>,
    /// Annotation reference (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_ref: Option<String>,
    /// Read sample id to alignment reference (legacy, superseded by `alignment_ref`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_rnaseq_alignment: Option<BTreeMap<String, String>>,
    /// Tool that produced the expression values (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
    /// Version of `tool_used` (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
    /// Command-line options passed to `tool_used` (legacy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_opts: Option<BTreeMap<String, String>>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(UploadExpressionParams {
    destination_ref: String,
    source_dir: String,
    alignment_ref: String,
    genome_ref: String,
    annotation_id: String,
    bam_file_path: String,
    transcripts: i64,
    data_quality_level: i64,
    original_median: f64,
    description: String,
    platform: String,
    source: String,
    external_source_date: String,
    processing_comments: String,
    condition: String,
    assembly_or_genome_ref: String,
    annotation_ref: String,
    mapped_rnaseq_alignment: BTreeMap<String, String>,
    tool_used: String,
    tool_version: String,
    tool_opts: BTreeMap<String, String>,
});

impl UploadExpressionParams {
    /// Sets `transcripts` from a Rust `bool`.
    pub fn with_transcripts_flag(self, transcripts: bool) -> Self {
        self.with_transcripts(i64::from(transcripts))
    }
}

/// Result of `upload_expression`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadExpressionOutput {
    /// Versioned reference of the saved expression object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obj_ref: Option<String>,

    /// Members not declared above
    #[serde(flatten)]
    pub additional_properties: PropertyMap,
}

impl_dto!(UploadExpressionOutput { obj_ref: String });

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let params = UploadExpressionParams::default()
            .with_destination_ref("ws/expr")
            .with_source_dir("/kb/module/work/tmp/stringtie")
            .with_alignment_ref("ws/alignment");

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "destination_ref": "ws/expr",
                "source_dir": "/kb/module/work/tmp/stringtie",
                "alignment_ref": "ws/alignment"
            })
        );
    }

    #[test]
    fn test_legacy_revision_decodes() {
        let params: UploadExpressionParams = serde_json::from_value(json!({
            "destination_ref": "1/2",
            "source_dir": "/tmp/in",
            "condition": "heat",
            "assembly_or_genome_ref": "1/3",
            "mapped_rnaseq_alignment": {"sample_1": "1/4"},
            "tool_used": "cufflinks",
            "tool_version": "2.2.1",
            "tool_opts": {"-p": "4"}
        }))
        .unwrap();

        assert_eq!(params.condition.as_deref(), Some("heat"));
        let alignments = params.mapped_rnaseq_alignment.as_ref().unwrap();
        assert_eq!(alignments.get("sample_1").map(String::as_str), Some("1/4"));
        assert_eq!(params.tool_opts.as_ref().map(BTreeMap::len), Some(1));
        assert!(params.alignment_ref.is_none());
        assert!(params.additional_properties.is_empty());
    }

    #[test]
    fn test_transcripts_flag_is_kbase_boolean() {
        let params = UploadExpressionParams::default().with_transcripts_flag(true);
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"transcripts": 1}));
    }
}
