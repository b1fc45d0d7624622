use std::path::Path;

use plotify_api::db::{self, Database};
use plotify_api::models::AggregationRow;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};

async fn seed(path: &Path) {
    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("open seed db");
    let statements = [
        "CREATE TABLE class(id INTEGER PRIMARY KEY, teacher_name TEXT NOT NULL)",
        "CREATE TABLE student(name TEXT PRIMARY KEY, class_id INTEGER NOT NULL)",
        "CREATE TABLE student_attribute(student_name TEXT NOT NULL, attribute TEXT NOT NULL)",
        "INSERT INTO class(id, teacher_name) VALUES (1, 'Tycho Brahe'), (2, 'Albert Einstein')",
        "INSERT INTO student(name, class_id) VALUES ('ann', 1), ('bob', 2), ('cat', 2)",
        "INSERT INTO student_attribute(student_name, attribute) VALUES
            ('ann', 'With a disability'), ('bob', 'ESL'), ('cat', 'ESL'), ('cat', 'Gifted')",
    ];
    for stmt in statements {
        sqlx::query(stmt).execute(&mut conn).await.expect("seed statement");
    }
    conn.close().await.expect("close seed db");
}

#[tokio::test]
async fn aggregation_is_ordered_by_teacher_then_attribute() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("school.db");
    seed(&path).await;

    let database = Database::new(&path);
    let mut conn = database.connect().await.expect("connect");

    let attrs: Vec<String> = db::list_attributes(&mut conn)
        .await
        .expect("attributes")
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(attrs, vec!["ESL", "Gifted", "With a disability"]);

    let rows = db::aggregate(&mut conn, None).await.expect("aggregate");
    assert_eq!(
        rows,
        vec![
            AggregationRow::new("Albert Einstein", 2, "ESL"),
            AggregationRow::new("Albert Einstein", 1, "Gifted"),
            AggregationRow::new("Tycho Brahe", 1, "With a disability"),
        ]
    );

    let filtered = db::aggregate(&mut conn, Some("ESL")).await.expect("aggregate");
    assert_eq!(filtered, vec![AggregationRow::new("Albert Einstein", 2, "ESL")]);

    let none = db::aggregate(&mut conn, Some("Unknown")).await.expect("aggregate");
    assert!(none.is_empty());

    db::close(conn).await;
}

#[tokio::test]
async fn connections_are_read_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("school.db");
    seed(&path).await;

    let mut conn = Database::new(&path).connect().await.expect("connect");
    let write = sqlx::query("INSERT INTO class(id, teacher_name) VALUES (9, 'Intruder')")
        .execute(&mut conn)
        .await;
    assert!(write.is_err(), "writes must be rejected on a read-only connection");
    db::close(conn).await;
}
