use serde::Serialize;
use serde_json::json;
use spanql::prelude::*;
use spanql::{encode_row, insert, update};

#[derive(Serialize)]
struct Album {
    #[serde(rename = "AlbumId")]
    id: i64,
    #[serde(rename = "AlbumTitle")]
    title: String,
}

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn json_objects_are_records() {
    let sql = insert("Albums", ["AlbumId", "AlbumTitle"])
        .values([
            json!({"AlbumTitle": "Total Junk", "AlbumId": 1}),
            json!({"AlbumId": 2, "AlbumTitle": null}),
        ])
        .sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO Albums (AlbumId, AlbumTitle) VALUES (1, "Total Junk"), (2, NULL)"#
    );
}

#[test]
fn serialized_structs_can_be_inserted() {
    let albums = [
        Album {
            id: 1,
            title: "Go, Go, Go".to_string(),
        },
        Album {
            id: 2,
            title: "Green".to_string(),
        },
    ];
    let rows: Vec<serde_json::Value> = albums
        .iter()
        .map(|a| serde_json::to_value(a).unwrap())
        .collect();
    let sql = insert("Albums", ["AlbumId", "AlbumTitle"])
        .values(&rows)
        .sql()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO Albums (AlbumId, AlbumTitle) VALUES (1, "Go, Go, Go"), (2, "Green")"#
    );
}

#[test]
fn json_arrays_are_sequences() {
    let row = encode_row(&cols(&["a", "b", "c"]), json!([1, "two", 3.5])).unwrap();
    assert_eq!(row.len(), 3);

    let sql = insert("t", ["a", "b", "c"])
        .values([json!([1, "two", 3.5])])
        .sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO t (a, b, c) VALUES (1, "two", 3.5)"#);
}

#[test]
fn json_scalars_are_not_rows() {
    let err = encode_row(&cols(&["a"]), json!(42)).unwrap_err();
    assert_eq!(err, SqlError::InvalidRowShape("number".to_string()));

    let err = insert("t", ["a"]).values([json!("x")]).sql().unwrap_err();
    assert_eq!(err, SqlError::InvalidRowShape("string".to_string()));
}

#[test]
fn missing_json_key_is_column_not_found() {
    let err = insert("t", ["a", "b"])
        .values([json!({"a": 1})])
        .sql()
        .unwrap_err();
    assert_eq!(
        err,
        SqlError::ColumnNotFound {
            column: "b".to_string(),
            record_type: "JSON object".to_string(),
        }
    );
}

#[test]
fn nested_json_values_are_unsupported() {
    let err = insert("t", ["a"])
        .values([json!({"a": [1, 2]})])
        .sql()
        .unwrap_err();
    assert_eq!(err, SqlError::UnsupportedType("array".to_string()));

    let err = update("t")
        .set("a", json!({"k": 1}))
        .and_where(bool_lit(true))
        .sql()
        .unwrap_err();
    assert_eq!(err, SqlError::UnsupportedType("object".to_string()));
    assert!(err.is_encoding());
}
