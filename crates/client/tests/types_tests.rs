//! Serialization tests for the service data types

use std::collections::BTreeMap;

use expression_utils_client::types::{
    AdditionalProperties, AnalysisReport, DownloadExpressionOutput, DownloadExpressionParams,
    ExportOutput, ExportParams, ExpressionMatrix, FloatMatrix2D, GetEnhancedFemOutput,
    GetEnhancedFemParams, GetExprMatrixOutput, GetExprMatrixParams, UploadExpressionOutput,
    UploadExpressionParams,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

/// Encodes `value` to a string and decodes it again.
fn reencode<T: Serialize + DeserializeOwned>(value: &T) -> T {
    let text = serde_json::to_string(value).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Decodes `input` as `T`, encodes it again and checks nothing was lost.
fn assert_lossless<T: Serialize + DeserializeOwned>(input: Value) -> T {
    let decoded: T = serde_json::from_value(input.clone()).unwrap();
    assert_eq!(serde_json::to_value(&decoded).unwrap(), input);
    decoded
}

#[test]
fn test_upload_params_every_field_survives() {
    let params = UploadExpressionParams::default()
        .with_destination_ref("ws/expr")
        .with_source_dir("/data/in")
        .with_alignment_ref("ws/align")
        .with_genome_ref("ws/genome")
        .with_annotation_id("ws/gff")
        .with_bam_file_path("/data/in/accepted_hits.bam")
        .with_transcripts(0)
        .with_data_quality_level(3)
        .with_original_median(12.75)
        .with_description("heat shock, 30 min")
        .with_platform("Illumina")
        .with_source("JGI")
        .with_external_source_date("2017-03-01")
        .with_processing_comments("trimmed")
        .with_condition("heat")
        .with_assembly_or_genome_ref("ws/assembly")
        .with_annotation_ref("ws/annotation")
        .with_mapped_rnaseq_alignment(BTreeMap::from([("s1".to_string(), "ws/a1".to_string())]))
        .with_tool_used("stringtie")
        .with_tool_version("1.3.3")
        .with_tool_opts(BTreeMap::from([("-p".to_string(), "8".to_string())]));

    assert_eq!(reencode(&params), params);
}

#[test]
fn test_outputs_survive() {
    let upload = UploadExpressionOutput::default().with_obj_ref("1/2/3");
    assert_eq!(reencode(&upload), upload);

    let download = DownloadExpressionOutput::default().with_destination_dir("/tmp/d");
    assert_eq!(reencode(&download), download);

    let export = ExportOutput::default().with_shock_id("node-1");
    assert_eq!(reencode(&export), export);
}

#[test]
fn test_request_params_survive() {
    let download = DownloadExpressionParams::default()
        .with_source_ref("ws/expr")
        .with_additional_property("downloadCounts", true);
    assert_eq!(reencode(&download), download);

    let export = ExportParams::default().with_source_ref("12/34/5");
    assert_eq!(reencode(&export), export);

    let fem = GetEnhancedFemParams::default().with_fem_object_ref("ws/filtered_fem");
    assert_eq!(reencode(&fem), fem);

    let matrix = GetExprMatrixParams::default()
        .with_workspace_name("my_ws")
        .with_output_obj_name("matrix")
        .with_expressionset_ref("ws/set");
    assert_eq!(reencode(&matrix), matrix);
}

#[test]
fn test_matrix_output_survives() {
    let output = GetExprMatrixOutput::default()
        .with_expr_matrix_fpkm_ref("ws/matrix_FPKM")
        .with_expr_matrix_tpm_ref("ws/matrix_TPM");
    assert_eq!(reencode(&output), output);

    let decoded: GetExprMatrixOutput = assert_lossless(json!({
        "exprMatrix_FPKM_ref": "1/2/3",
        "exprMatrix_TPM_ref": "1/4/3"
    }));
    assert_eq!(decoded.expr_matrix_tpm_ref.as_deref(), Some("1/4/3"));
}

#[test]
fn test_unknown_members_are_kept_at_every_level() {
    let input = json!({
        "enhanced_FEM": {
            "type": "level",
            "scale": "raw",
            "data": {
                "row_ids": ["g1"],
                "col_ids": ["c1"],
                "values": [[0.5]],
                "row_labels": ["first gene"]
            },
            "report": {
                "checkTypeDetected": "auto",
                "checkResults": [1, 0],
                "reviewer": "qc-bot"
            },
            "schema_version": 2
        },
        "elapsed_ms": 812
    });

    let output: GetEnhancedFemOutput = assert_lossless(input);

    assert_eq!(output.additional_properties()["elapsed_ms"], json!(812));
    let matrix = output.enhanced_fem.as_ref().unwrap();
    assert_eq!(matrix.additional_properties()["schema_version"], json!(2));
    let data = matrix.data.as_ref().unwrap();
    assert_eq!(data.additional_properties()["row_labels"], json!(["first gene"]));
    let report = matrix.report.as_ref().unwrap();
    assert_eq!(report.check_results, Some(vec![1, 0]));
    assert_eq!(report.additional_properties()["reviewer"], json!("qc-bot"));
}

#[test]
fn test_absent_fields_are_not_emitted() {
    let empty = serde_json::to_value(ExpressionMatrix::default()).unwrap();
    assert_eq!(empty, json!({}));

    let partial = GetExprMatrixParams::default().with_workspace_name("my_ws");
    assert_eq!(serde_json::to_value(&partial).unwrap(), json!({"workspace_name": "my_ws"}));
}

#[test]
fn test_full_expression_matrix_survives() {
    let matrix = ExpressionMatrix::default()
        .with_description("filtered")
        .with_matrix_type("log-ratio")
        .with_scale("log2")
        .with_row_normalization("mean_center")
        .with_col_normalization("zscore")
        .with_genome_ref("1/2/3")
        .with_feature_mapping(BTreeMap::from([("r1".to_string(), "gene_1".to_string())]))
        .with_conditionset_ref("1/4/1")
        .with_condition_mapping(BTreeMap::from([("c1".to_string(), "heat".to_string())]))
        .with_data(
            FloatMatrix2D::default()
                .with_row_ids(vec!["r1".to_string()])
                .with_col_ids(vec!["c1".to_string(), "c2".to_string()])
                .with_values(vec![vec![Some(-1.5), None]]),
        )
        .with_report(
            AnalysisReport::default()
                .with_check_used("none")
                .with_check_descriptions(vec!["range".to_string()])
                .with_messages(vec!["ok".to_string()])
                .with_warnings(Vec::<String>::new())
                .with_errors(Vec::<String>::new()),
        )
        .with_additional_property("owner", "someone");

    assert_eq!(reencode(&matrix), matrix);
}
