//! Integration tests for request extraction and classification
//!
//! These tests run raw requests through the whole shaping pipeline:
//! - Parameter sources merge with body over query string precedence
//! - Contiguous indexed payloads become batches
//! - Uploads bind into declared variables
//! - Persisted queries resolve through the provider chain

use graphql_bridge::prelude::*;
use serde_json::json;

fn shape(raw: &RawRequest) -> ExecutionRequest {
    let extractor = RequestParamExtractor::new();
    let classifier = RequestClassifier::new(Arc::new(NoQueryProvider));
    classifier.classify(&extractor.extract(raw)).unwrap()
}

fn single(request: ExecutionRequest) -> SingleRequest {
    match request {
        ExecutionRequest::Single(single) => single,
        other => panic!("expected single request, got {:?}", other),
    }
}

// =============================================================================
// Single and Batch Shapes
// =============================================================================

mod shape_tests {
    use super::*;

    #[test]
    fn test_get_request_with_variables() {
        let raw = RawRequest::new()
            .with_query("query", "query ($id: String!) { node(id: $id) { title } }")
            .with_query("variables", r#"{"id": "1"}"#);

        let request = single(shape(&raw));
        assert_eq!(request.query, "query ($id: String!) { node(id: $id) { title } }");
        assert_eq!(request.variables["id"], Value::from("1"));
        assert!(!request.persisted);
    }

    #[test]
    fn test_post_json_single() {
        let raw = RawRequest::new().with_raw_body(r#"{"query": "{ node(id: 1){ title } }"}"#);

        assert_eq!(
            shape(&raw),
            ExecutionRequest::Single(SingleRequest {
                query: "{ node(id: 1){ title } }".to_string(),
                variables: Map::new(),
                persisted: false,
            })
        );
    }

    #[test]
    fn test_post_indexed_batch() {
        let raw =
            RawRequest::new().with_raw_body(r#"{"0": {"query":"{a}"}, "1": {"query":"{b}"}}"#);

        assert_eq!(
            shape(&raw),
            ExecutionRequest::Batch {
                queries: vec![
                    Value::from(json!({"query": "{a}"})),
                    Value::from(json!({"query": "{b}"})),
                ]
            }
        );
    }

    #[test]
    fn test_post_array_batch() {
        let raw = RawRequest::new().with_raw_body(r#"[{"query":"q1"},{"query":"q2"}]"#);

        let ExecutionRequest::Batch { queries } = shape(&raw) else {
            panic!("expected batch");
        };
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1], Value::from(json!({"query": "q2"})));
    }

    #[test]
    fn test_gap_falls_back_to_empty_single() {
        let raw =
            RawRequest::new().with_raw_body(r#"{"0": {"query":"{a}"}, "2": {"query":"{c}"}}"#);

        assert_eq!(shape(&raw), ExecutionRequest::Single(SingleRequest::empty()));
    }

    #[test]
    fn test_body_wins_over_query_string() {
        let raw = RawRequest::new()
            .with_query("query", "qA")
            .with_raw_body(r#"{"query": "qB"}"#);

        let params = RequestParamExtractor::new().extract(&raw);
        assert_eq!(params["query"], Value::from("qB"));
        assert_eq!(single(shape(&raw)).query, "qB");
    }

    #[test]
    fn test_malformed_body_degrades_to_empty_single() {
        let raw = RawRequest::new().with_raw_body("{ this is not json");

        assert_eq!(shape(&raw), ExecutionRequest::Single(SingleRequest::empty()));
    }

    #[test]
    fn test_extract_and_classify_is_pure() {
        let raw = RawRequest::new()
            .with_query("variables", r#"{"x": 1}"#)
            .with_raw_body(r#"[{"query":"{a}"},{"query":"{b}","variables":{"y":2}}]"#);

        assert_eq!(shape(&raw), shape(&raw));
    }
}

// =============================================================================
// File Uploads
// =============================================================================

mod upload_tests {
    use super::*;

    #[test]
    fn test_multipart_single_upload() {
        let file = UploadedFile::new("0", "%PDF-1.4").with_file_name("report.pdf");
        let raw = RawRequest::new()
            .with_body_field(
                "operations",
                r#"{"query": "mutation ($file: Upload!) { upload(file: $file) }", "variables": {"file": null}}"#,
            )
            .with_body_field("map", r#"{"0": ["variables.file"]}"#)
            .with_file("0", file.clone());

        let request = single(shape(&raw));
        assert_eq!(request.query, "mutation ($file: Upload!) { upload(file: $file) }");
        assert_eq!(request.variables["file"], Value::File(file));
    }

    #[test]
    fn test_multipart_batch_upload() {
        let first = UploadedFile::new("0", "a").with_file_name("a.txt");
        let second = UploadedFile::new("1", "b").with_file_name("b.txt");
        let raw = RawRequest::new()
            .with_body_field(
                "operations",
                r#"[
                    {"query": "mutation ($f: Upload!) { one(f: $f) }", "variables": {"f": null}},
                    {"query": "mutation ($f: [Upload!]!) { many(f: $f) }", "variables": {"f": [null]}}
                ]"#,
            )
            .with_body_field("map", r#"{"0": ["0.variables.f"], "1": ["1.variables.f.0"]}"#)
            .with_file("0", first.clone())
            .with_file("1", second.clone());

        let ExecutionRequest::Batch { queries } = shape(&raw) else {
            panic!("expected batch");
        };
        assert_eq!(queries[0].get_path(&["variables", "f"]), Some(&Value::File(first)));
        assert_eq!(
            queries[1].get_path(&["variables", "f", "0"]),
            Some(&Value::File(second))
        );
    }

    #[test]
    fn test_upload_to_undeclared_variable_is_skipped() {
        let raw = RawRequest::new()
            .with_body_field("operations", r#"{"query": "{ a }", "variables": {"file": null}}"#)
            .with_body_field("map", r#"{"0": "variables.missing"}"#)
            .with_file("0", UploadedFile::new("0", "x"));

        let request = single(shape(&raw));
        assert_eq!(Value::Map(request.variables), Value::from(json!({"file": null})));
    }
}

// =============================================================================
// Persisted Queries
// =============================================================================

mod persisted_query_tests {
    use super::*;

    #[test]
    fn test_persisted_query_via_chain() {
        let mut queries = InMemoryQueryProvider::default();
        queries.insert("menus:all", "{ menus { id } }");
        let classifier = RequestClassifier::new(Arc::new(
            ChainQueryProvider::new()
                .with_provider(NoQueryProvider)
                .with_provider(queries),
        ));

        let raw = RawRequest::new()
            .with_query("queryId", "menus:all")
            .with_query("variables", r#"{"limit": 5}"#);
        let params = RequestParamExtractor::new().extract(&raw);

        let request = single(classifier.classify(&params).unwrap());
        assert_eq!(request.query, "{ menus { id } }");
        assert!(request.persisted);
        assert_eq!(request.variables["limit"], Value::from(json!(5)));
    }

    #[test]
    fn test_unknown_query_id_falls_back() {
        let classifier = RequestClassifier::new(Arc::new(InMemoryQueryProvider::default()));
        let params = RequestParamExtractor::new()
            .extract(&RawRequest::new().with_query("queryId", "missing"));

        assert_eq!(
            classifier.classify(&params).unwrap(),
            ExecutionRequest::Single(SingleRequest::empty())
        );
    }
}
