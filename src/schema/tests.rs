// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::load::{SchemaDir, SchemaLocation, load_schema, parse_schema};
use super::{ConnectionSchema, Task, TaskTable};
use crate::error::{SchemaError, SmbError};
use crate::utility::encoding::Encoding;

const SETTINGS: &str = r#"{
  "otherTool": { "enabled": true },
  "connectSchema": {
    "components": { "nas": "10.0.0.5", "port": 445, "flag": true, "pwd": null },
    "tasks": {
      "zeta": { "comp": "${nas}" },
      "alpha": { "comp": "${nas}", "available": false, "pwd": null }
    }
  }
}"#;

fn schema_error(err: SmbError) -> SchemaError {
    match err {
        SmbError::Schema(e) => *e,
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_deserialize_keeps_declaration_order() {
    let schema = parse_schema(SETTINGS, "connectSchema", "<test>").unwrap();

    assert_eq!(schema.tasks.names().collect::<Vec<_>>(), ["zeta", "alpha"]);
    assert_eq!(schema.components["port"].as_deref(), Some("445"));
    assert_eq!(schema.components["flag"].as_deref(), Some("true"));
    assert_eq!(schema.components["pwd"], None);

    let alpha = schema.tasks.get("alpha").unwrap();
    assert!(!alpha.available);
    assert_eq!(alpha.pwd, "");
    assert_eq!(alpha.share, None);
    assert!(schema.tasks.get("zeta").unwrap().available);
}

#[test]
fn test_deserialize_defaults_and_resources_alias() {
    let schema: ConnectionSchema = serde_json::from_str("{}").unwrap();
    assert!(schema.components.is_empty());
    assert!(schema.tasks.is_empty());

    let schema: ConnectionSchema =
        serde_json::from_str(r#"{ "resources": { "old": { "comp": "legacy" } } }"#).unwrap();
    assert_eq!(schema.tasks.get("old").unwrap().comp, "legacy");
}

#[test]
fn test_deserialize_rejects_structured_components() {
    let err = serde_json::from_str::<ConnectionSchema>(r#"{ "components": { "a": [1] } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("component 'a'"), "{err}");
}

#[test]
fn test_deserialize_available_only_false_disables() {
    let schema: ConnectionSchema = serde_json::from_str(
        r#"{
            "tasks": {
                "nulled": { "available": null, "comp": "x" },
                "texty": { "available": "no", "comp": "y" },
                "off": { "available": false, "comp": "z" }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(schema.tasks.names().collect::<Vec<_>>(), ["nulled", "texty", "off"]);
    assert!(schema.tasks.get("nulled").unwrap().available);
    assert!(schema.tasks.get("texty").unwrap().available);
    assert!(!schema.tasks.get("off").unwrap().available);
}

#[test]
fn test_task_table_insert_replaces_in_place() {
    let mut table: TaskTable = [("a", Task::default()), ("b", Task::default())]
        .into_iter()
        .collect();
    table.insert(
        "a",
        Task {
            comp: "replaced".to_string(),
            ..Task::default()
        },
    );

    assert_eq!(table.len(), 2);
    assert_eq!(table.names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(table.get("a").unwrap().comp, "replaced");
}

#[test]
fn test_task_debug_masks_password() {
    let task = Task {
        pwd: "hunter2".to_string(),
        ..Task::default()
    };
    let rendered = format!("{task:?}");
    assert!(!rendered.contains("hunter2"), "{rendered}");
    assert!(rendered.contains("****"), "{rendered}");
}

#[test]
fn test_parse_schema_errors() {
    let err = schema_error(parse_schema("{", "connectSchema", "s.json").unwrap_err());
    assert!(matches!(err, SchemaError::Parse { .. }));

    let err = schema_error(parse_schema("{}", "connectSchema", "s.json").unwrap_err());
    insta::assert_snapshot!(err, @"property 'connectSchema' not found in 's.json'");

    let err = parse_schema(r#"{ "connectSchema": null }"#, "connectSchema", "s.json")
        .unwrap_err();
    assert!(matches!(schema_error(err), SchemaError::MissingProperty { .. }));

    let err = parse_schema(r#"{ "connectSchema": { "tasks": [] } }"#, "connectSchema", "s.json")
        .unwrap_err();
    assert!(err.is_invalid_argument(), "{err}");
}

#[test]
fn test_schema_dir_parse_and_display() {
    assert_eq!("portable".parse::<SchemaDir>().unwrap(), SchemaDir::Portable);
    assert_eq!("UserProfile".parse::<SchemaDir>().unwrap(), SchemaDir::UserProfile);
    assert_eq!(
        "D:/settings".parse::<SchemaDir>().unwrap(),
        SchemaDir::Path(PathBuf::from("D:/settings"))
    );
    assert!("".parse::<SchemaDir>().is_err());
    assert_eq!(SchemaDir::UserProfile.to_string(), "userProfile");
}

#[test]
fn test_schema_dir_portable_is_under_cwd() {
    let dir = SchemaDir::Portable.resolve().unwrap();
    assert_eq!(dir, std::env::current_dir().unwrap().join(".wsh"));
}

#[test]
fn test_load_schema_from_directory() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("settings.json"), SETTINGS).unwrap();

    let location = SchemaLocation::builder()
        .dir(SchemaDir::Path(temp.path().to_path_buf()))
        .build();
    assert_eq!(location.path().unwrap(), temp.path().join("settings.json"));

    let schema = load_schema(&location).unwrap();
    assert_eq!(schema.tasks.len(), 2);
}

#[test]
fn test_load_schema_custom_property_and_utf16() {
    let temp = tempfile::tempdir().unwrap();
    let text = r#"{ "mySchema": { "tasks": { "t": { "comp": "ファイル" } } } }"#;
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    let file = temp.path().join("wide.json");
    std::fs::write(&file, bytes).unwrap();

    let location = SchemaLocation::builder()
        .file(file.to_string_lossy().into_owned())
        .property("mySchema")
        .encoding(Encoding::Utf16Le)
        .build();

    let schema = load_schema(&location).unwrap();
    assert_eq!(schema.tasks.get("t").unwrap().comp, "ファイル");
}

#[test]
fn test_load_schema_tolerates_utf8_bom() {
    let temp = tempfile::tempdir().unwrap();
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(SETTINGS.as_bytes());
    std::fs::write(temp.path().join("settings.json"), bytes).unwrap();

    let location = SchemaLocation::builder()
        .dir(SchemaDir::Path(temp.path().to_path_buf()))
        .build();
    assert!(load_schema(&location).is_ok());
}

#[test]
fn test_load_schema_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let location = SchemaLocation::builder()
        .dir(SchemaDir::Path(temp.path().to_path_buf()))
        .file("absent.json")
        .build();

    let err = schema_error(load_schema(&location).unwrap_err());
    assert!(matches!(err, SchemaError::Read { .. }));
}
