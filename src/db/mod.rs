// src/db/mod.rs

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{query_as, ConnectOptions, Connection};

use crate::error::AppError;
use crate::models::{AggregationRow, Attribute};

/// Read-only handle description for the reporting database. Cheap to clone;
/// nothing is opened until [`Database::connect`].
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true)
            .create_if_missing(false);
        Self { options }
    }

    /// Opens a fresh read-only connection. Callers own it for the length of a
    /// request; it is closed when dropped.
    pub async fn connect(&self) -> Result<SqliteConnection, AppError> {
        self.options.connect().await.map_err(AppError::StorageUnavailable)
    }
}

/// Closes a request-scoped connection. Errors are logged, not returned.
pub async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close sqlite connection");
    }
}

pub async fn list_attributes(conn: &mut SqliteConnection) -> Result<Vec<Attribute>, AppError> {
    query_as::<_, Attribute>(
        r#"SELECT DISTINCT attribute AS name FROM student_attribute ORDER BY name"#,
    )
    .fetch_all(conn)
    .await
    .map_err(AppError::QueryFailure)
}

pub async fn aggregate(
    conn: &mut SqliteConnection,
    filter: Option<&str>,
) -> Result<Vec<AggregationRow>, AppError> {
    let rows = if let Some(attribute) = filter {
        query_as::<_, AggregationRow>(
            r#"
            SELECT cl.teacher_name AS teacher_name, COUNT(*) AS count, at.attribute AS attribute
            FROM class AS cl
            INNER JOIN student AS st ON cl.id = st.class_id
            INNER JOIN student_attribute AS at ON st.name = at.student_name
            WHERE at.attribute = ?1
            GROUP BY cl.teacher_name, at.attribute
            ORDER BY cl.teacher_name, at.attribute
            "#,
        )
        .bind(attribute)
        .fetch_all(conn)
        .await
    } else {
        query_as::<_, AggregationRow>(
            r#"
            SELECT cl.teacher_name AS teacher_name, COUNT(*) AS count, at.attribute AS attribute
            FROM class AS cl
            INNER JOIN student AS st ON cl.id = st.class_id
            INNER JOIN student_attribute AS at ON st.name = at.student_name
            GROUP BY cl.teacher_name, at.attribute
            ORDER BY cl.teacher_name, at.attribute
            "#,
        )
        .fetch_all(conn)
        .await
    };
    rows.map_err(AppError::QueryFailure)
}
