//! Behavior tests for `synchronize` against the in-memory database.

use record_core::{Record, Value};
use schema_sync::testing::{MemoryDatabase, Statement, StatementKind};
use schema_sync::{synchronize, Column, ColumnType, ExecutionError, SyncError};

fn record(fields: &[(&str, Value)]) -> Record {
    fields
        .iter()
        .fold(Record::builder(), |b, (name, value)| {
            b.field(*name, value.clone())
        })
        .build()
        .unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn declared_types(db: &MemoryDatabase, table: &str) -> Vec<(String, String)> {
    db.schema(table)
        .unwrap()
        .columns
        .into_iter()
        .map(|c| (c.name, c.declared_type))
        .collect()
}

#[tokio::test]
async fn test_first_record_creates_table_and_columns() {
    let db = MemoryDatabase::new();
    let input = record(&[("name", text("Alice")), ("age", Value::Int(30))]);

    let persisted = synchronize(&db, "events", input.clone()).await.unwrap();

    assert_eq!(persisted, input);
    assert_eq!(
        declared_types(&db, "events"),
        vec![
            ("id".to_string(), "int".to_string()),
            ("created".to_string(), "datetime".to_string()),
            ("name".to_string(), "varchar(255)".to_string()),
            ("age".to_string(), "int".to_string()),
        ]
    );
    assert_eq!(db.rows("events"), vec![input]);
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn test_null_field_is_dropped() {
    let db = MemoryDatabase::new();
    synchronize(
        &db,
        "events",
        record(&[("name", text("Alice")), ("age", Value::Int(30))]),
    )
    .await
    .unwrap();
    db.clear_statements();

    let persisted = synchronize(
        &db,
        "events",
        record(&[("name", text("Bob")), ("age", Value::Null)]),
    )
    .await
    .unwrap();

    assert_eq!(persisted, record(&[("name", text("Bob"))]));
    assert_eq!(db.count_statements(StatementKind::AddColumns), 0);
    assert_eq!(db.rows("events")[1], record(&[("name", text("Bob"))]));
}

#[tokio::test]
async fn test_null_field_never_creates_column() {
    let db = MemoryDatabase::new();

    let persisted = synchronize(
        &db,
        "events",
        record(&[("name", text("Ann")), ("nickname", Value::Null)]),
    )
    .await
    .unwrap();

    assert!(!persisted.contains("nickname"));
    assert!(!db.schema("events").unwrap().contains("nickname"));
}

#[tokio::test]
async fn test_reserved_field_rejected_before_any_statement() {
    let db = MemoryDatabase::new();

    for reserved in ["id", "created", "modified"] {
        let err = synchronize(
            &db,
            "events",
            record(&[(reserved, Value::Int(5)), ("name", text("Eve"))]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SyncError::ReservedColumn { ref column } if column == reserved));
    }

    assert!(db.statements().is_empty());
    assert!(db.table_names().is_empty());
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn test_reserved_field_rejected_even_when_null() {
    let db = MemoryDatabase::new();

    let err = synchronize(
        &db,
        "events",
        record(&[("id", Value::Null), ("name", text("Eve"))]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SyncError::ReservedColumn { .. }));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn test_type_conflict_with_existing_column() {
    let db = MemoryDatabase::new();
    db.create_table("events");
    db.add_column("events", "age", "int(11)");

    let err = synchronize(&db, "events", record(&[("age", text("old"))]))
        .await
        .unwrap_err();

    match err {
        SyncError::TypeConflict {
            column,
            desired,
            existing,
        } => {
            assert_eq!(column, "age");
            assert_eq!(desired, "VARCHAR(255)");
            assert_eq!(existing, "int(11)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(db.count_statements(StatementKind::AddColumns), 0);
    assert_eq!(db.count_statements(StatementKind::Insert), 0);
    assert!(db.rows("events").is_empty());
    assert_eq!(db.open_connections(), 0);

    // Same field as an integer is fine.
    synchronize(&db, "events", record(&[("age", Value::Int(41))]))
        .await
        .unwrap();
    assert_eq!(db.rows("events").len(), 1);
}

#[tokio::test]
async fn test_case_variant_field_conflicts_with_live_column() {
    let db = MemoryDatabase::new();
    db.create_table("events");
    db.add_column("events", "age", "int");

    let err = synchronize(&db, "events", record(&[("Age", text("old"))]))
        .await
        .unwrap_err();

    match err {
        SyncError::TypeConflict {
            column,
            desired,
            existing,
        } => {
            assert_eq!(column, "Age");
            assert_eq!(desired, "VARCHAR(255)");
            assert_eq!(existing, "int");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(db.count_statements(StatementKind::AddColumns), 0);
    assert!(db.rows("events").is_empty());

    // A compatible case variant writes into the existing column.
    synchronize(&db, "events", record(&[("AGE", Value::Int(41))]))
        .await
        .unwrap();
    assert_eq!(db.count_statements(StatementKind::AddColumns), 0);
    assert_eq!(
        db.schema("events").unwrap().column_names(),
        vec!["id", "created", "age"]
    );
    assert_eq!(db.rows("events").len(), 1);
}

#[tokio::test]
async fn test_fields_differing_only_in_case_rejected() {
    let db = MemoryDatabase::new();

    let err = synchronize(
        &db,
        "events",
        record(&[("Name", text("a")), ("name", text("b"))]),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        SyncError::ColumnNameCollision { ref column, ref other } if column == "Name" && other == "name"
    ));
    assert!(db.statements().is_empty());
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn test_reserved_name_in_other_case_rejected() {
    let db = MemoryDatabase::new();

    let err = synchronize(&db, "events", record(&[("ID", Value::Int(5))]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::ReservedColumn { ref column } if column == "ID"));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn test_float_outside_float_range_rejected() {
    let db = MemoryDatabase::new();

    let err = synchronize(&db, "events", record(&[("loss", Value::Float(1e300))]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::UnsupportedType { ref field, .. } if field == "loss"));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn test_new_field_added_in_single_statement() {
    let db = MemoryDatabase::new();
    db.create_table("events");
    db.add_column("events", "name", "varchar(255)");
    db.add_column("events", "age", "int");

    let input = record(&[
        ("name", text("Carl")),
        ("age", Value::Int(40)),
        ("active", Value::Bool(true)),
    ]);
    synchronize(&db, "events", input.clone()).await.unwrap();

    let adds: Vec<Statement> = db
        .statements()
        .into_iter()
        .filter(|s| s.kind() == StatementKind::AddColumns)
        .collect();
    assert_eq!(
        adds,
        vec![Statement::AddColumns {
            table: "events".to_string(),
            columns: vec![Column::new("active", ColumnType::TinyInt)],
        }]
    );
    assert_eq!(db.rows("events"), vec![input]);
}

#[tokio::test]
async fn test_repeated_shape_evolves_once() {
    let db = MemoryDatabase::new();

    for i in 0..5 {
        synchronize(
            &db,
            "events",
            record(&[("step", Value::Int(i)), ("loss", Value::Float(0.5))]),
        )
        .await
        .unwrap();
    }

    assert_eq!(db.count_statements(StatementKind::CreateTable), 5);
    assert_eq!(db.count_statements(StatementKind::AddColumns), 1);
    assert_eq!(db.rows("events").len(), 5);
}

#[tokio::test]
async fn test_column_order_independence() {
    let db = MemoryDatabase::new();

    synchronize(
        &db,
        "events",
        record(&[("a", Value::Int(1)), ("b", text("x"))]),
    )
    .await
    .unwrap();
    synchronize(
        &db,
        "events",
        record(&[
            ("c", Value::Bool(false)),
            ("b", text("y")),
            ("a", Value::Int(2)),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(
        db.schema("events").unwrap().column_names(),
        vec!["id", "created", "a", "b", "c"]
    );
    assert_eq!(db.rows("events").len(), 2);
}

#[tokio::test]
async fn test_unsupported_value_rejected_before_any_statement() {
    let db = MemoryDatabase::new();

    let err = synchronize(
        &db,
        "events",
        record(&[("name", text("x")), ("big", Value::Int(i64::MAX))]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SyncError::UnsupportedType { ref field, .. } if field == "big"));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn test_empty_table_name_rejected() {
    let db = MemoryDatabase::new();

    let err = synchronize(&db, "", record(&[("name", text("x"))]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::InvalidTableName { .. }));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn test_insert_failure_keeps_schema_but_no_row() {
    let db = MemoryDatabase::new();
    db.fail_next(
        StatementKind::Insert,
        ExecutionError::Rejected("Lock wait timeout exceeded".to_string()),
    );

    let err = synchronize(&db, "events", record(&[("name", text("x"))]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Execution(ExecutionError::Rejected(_))
    ));
    assert!(db.schema("events").unwrap().contains("name"));
    assert!(db.rows("events").is_empty());
    assert_eq!(db.count_statements(StatementKind::Commit), 0);
    assert_eq!(db.count_statements(StatementKind::Rollback), 1);
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn test_commit_failure_discards_row() {
    let db = MemoryDatabase::new();
    db.fail_next(
        StatementKind::Commit,
        ExecutionError::Rejected("Lost connection".to_string()),
    );

    let err = synchronize(&db, "events", record(&[("name", text("x"))]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Execution(_)));
    assert!(db.rows("events").is_empty());
    assert_eq!(db.open_connections(), 0);

    // The next call goes through on the already-evolved table.
    synchronize(&db, "events", record(&[("name", text("y"))]))
        .await
        .unwrap();
    assert_eq!(db.rows("events"), vec![record(&[("name", text("y"))])]);
}

#[tokio::test]
async fn test_racing_first_writer_is_benign() {
    let db = MemoryDatabase::new();
    db.create_table("events");
    // Another caller adds `score` after our describe, before our ALTER.
    db.before_next_add_columns(|db| db.add_column("events", "score", "int"));

    let persisted = synchronize(&db, "events", record(&[("score", Value::Int(7))]))
        .await
        .unwrap();

    assert_eq!(persisted, record(&[("score", Value::Int(7))]));
    assert_eq!(
        db.schema("events").unwrap().column_names(),
        vec!["id", "created", "score"]
    );
    assert_eq!(db.rows("events").len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_add_column_once() {
    let db = MemoryDatabase::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                synchronize(&db, "scores", record(&[("score", Value::Int(i))])).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(
        db.schema("scores").unwrap().column_names(),
        vec!["id", "created", "score"]
    );
    assert_eq!(db.rows("scores").len(), 8);
    assert_eq!(db.open_connections(), 0);
}
