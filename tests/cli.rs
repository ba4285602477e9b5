//! CLI 集成测试

use std::fs;

use assert_cmd::Command;

#[test]
fn test_cli_annotates_document_and_writes_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.html");
    let output = dir.path().join("sheet.i18n.html");
    let mapping = dir.path().join("translations.json");

    fs::write(
        &input,
        r#"<div class="x"><span>Damage</span><span title="@{dmg}">5</span></div>"#,
    )
    .unwrap();

    Command::cargo_bin("sheetloc")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--mapping")
        .arg(&mapping)
        .arg("--no-metadata")
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains(r#"i18n="damage""#));
    assert!(html.contains(r#"title="@{dmg}""#));

    let mapping_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&mapping).unwrap()).unwrap();
    assert_eq!(mapping_json["damage"], "Damage");
    assert_eq!(mapping_json.as_object().unwrap().len(), 1);
}

#[test]
fn test_cli_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("earthdawn.html");
    let mapping = dir.path().join("translations.json");

    fs::write(&input, "<div><span>Damage</span></div>").unwrap();

    Command::cargo_bin("sheetloc")
        .unwrap()
        .arg(&input)
        .arg("--mapping")
        .arg(&mapping)
        .assert()
        .success();

    let derived = dir.path().join("earthdawn.i18n.html");
    assert!(derived.exists());

    // 默认开启元数据注释
    let html = fs::read_to_string(&derived).unwrap();
    assert!(html.starts_with("<!-- Localized from earthdawn.html at "));
}

#[test]
fn test_cli_missing_input_fails() {
    Command::cargo_bin("sheetloc")
        .unwrap()
        .arg("no-such-sheet.html")
        .assert()
        .failure();
}

#[test]
fn test_cli_rejects_unknown_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.html");
    fs::write(&input, "<div><span>Damage</span></div>").unwrap();

    Command::cargo_bin("sheetloc")
        .unwrap()
        .arg(&input)
        .arg("--encoding")
        .arg("not-a-real-encoding")
        .assert()
        .failure();
}
