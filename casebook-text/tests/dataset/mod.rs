use casebook_text::dataset::{build, build_source, DatasetOptions};
use casebook_text::DatasetError;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
}

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_overrides_merge_in_name_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "colors_ja.json", &json!({"colors.blue": "蓝", "colors.red": "红"}));
    write(dir.path(), "colors_ja.additional.json", &json!({"colors.red": "赤"}));
    write(dir.path(), "colors_ja.additional2.json", &json!({"colors.red": "红色", "colors.green": "绿"}));

    let (data, report) = build_source(dir.path(), "colors_ja").unwrap();

    assert_eq!(data["colors.red"], json!("红色"));
    assert_eq!(data["colors.green"], json!("绿"));
    assert_eq!(report.entries, 3);
    assert_eq!(
        report.merged,
        vec!["colors_ja.additional.json".to_string(), "colors_ja.additional2.json".to_string()]
    );
}

#[test]
fn test_malformed_override_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "illustrators_ja.json", &json!({"a": "A"}));
    fs::write(dir.path().join("illustrators_ja.additional.json"), "{ not json").unwrap();

    let (data, report) = build_source(dir.path(), "illustrators_ja").unwrap();

    assert_eq!(data, json!({"a": "A"}));
    assert!(report.merged.is_empty());
    assert_eq!(report.skipped, vec!["illustrators_ja.additional.json".to_string()]);
}

#[test]
fn test_malformed_base_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("types_ja.json"), "[1, 2").unwrap();

    let err = build_source(dir.path(), "types_ja").unwrap_err();
    assert!(matches!(err, DatasetError::Parse { .. }));
}

#[test]
fn test_missing_base_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = build_source(dir.path(), "types_ja").unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}

#[test]
fn test_base_must_be_an_object() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "types_ja.json", &json!(["a"]));
    let err = build_source(dir.path(), "types_ja").unwrap_err();
    assert!(matches!(err, DatasetError::NotAnObject(_)));
}

#[test]
fn test_cards_get_version_data() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "cards_ja.json",
        &json!({
            "CT-D01-001": {"card_id": "0001", "title": "江户川柯南"},
            "CT-P01-101": {"card_id": "0001", "title": "江户川柯南"},
        }),
    );
    write(
        dir.path(),
        "cards_ja.additional.json",
        &json!({"CT-D01-001": {"feature": "[登场时]"}}),
    );

    let (data, _) = build_source(dir.path(), "cards_ja").unwrap();

    assert_eq!(data["CT-D01-001"]["feature"], json!("[登场时]"));
    assert_eq!(data["CT-D01-001"]["is_primary"], json!(true));
    assert_eq!(data["CT-P01-101"]["is_primary"], json!(false));
    assert_eq!(data["CT-P01-101"]["other_versions"], json!(["CT-D01-001"]));
}

#[test]
fn test_products_are_sorted_without_promo() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "products_ja.json",
        &json!({"products.CT-P02": "2", "products.PRカード": "PR", "products.CT-D01": "1"}),
    );

    let (data, _) = build_source(dir.path(), "products_ja").unwrap();
    assert_eq!(keys(&data), vec!["products.CT-D01", "products.CT-P02"]);
}

#[test]
fn test_types_drop_null_and_keep_order() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "types_ja.json",
        &json!({"types.character": "角色", "types.null": "", "types.event": "事件", "types.case": "案件"}),
    );

    let (data, _) = build_source(dir.path(), "types_ja").unwrap();
    assert_eq!(keys(&data), vec!["types.character", "types.event", "types.case"]);
}

#[test]
fn test_build_writes_every_source() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(source.path(), "colors_ja.json", &json!({"colors.blue": "蓝"}));
    write(source.path(), "types_ja.json", &json!({"types.null": "", "types.event": "事件"}));

    let options = DatasetOptions {
        source_dir: source.path().to_path_buf(),
        out_dir: out.path().join("data"),
        sources: vec!["colors_ja".to_string(), "types_ja".to_string()],
        pretty: true,
    };
    let reports = build(&options).unwrap();

    assert_eq!(reports.len(), 2);
    let written = fs::read_to_string(out.path().join("data/types_ja.json")).unwrap();
    assert!(written.contains('\n'));
    let written: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(written, json!({"types.event": "事件"}));
}

#[test]
fn test_build_compact_output() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(source.path(), "colors_ja.json", &json!({"colors.blue": "蓝"}));

    let options = DatasetOptions {
        source_dir: source.path().to_path_buf(),
        out_dir: out.path().to_path_buf(),
        sources: vec!["colors_ja".to_string()],
        pretty: false,
    };
    build(&options).unwrap();

    let written = fs::read_to_string(out.path().join("colors_ja.json")).unwrap();
    assert_eq!(written, r#"{"colors.blue":"蓝"}"#);
}
