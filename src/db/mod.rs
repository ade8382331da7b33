use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use crate::models::Document;

/// Open (creating if needed) the SQLite database behind `url` and make sure
/// the documents table exists.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS documents (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               kind TEXT NOT NULL,
               body TEXT NOT NULL,
               created_at TEXT NOT NULL
           )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(r#"CREATE INDEX IF NOT EXISTS idx_documents_kind ON documents (kind, id)"#)
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert one document of the given kind and return its generated id.
pub async fn create_document(
    pool: &SqlitePool,
    kind: &str,
    document: &Document,
) -> Result<String, sqlx::Error> {
    let body = serde_json::to_string(document).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    let created_at = chrono::Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"INSERT INTO documents (kind, body, created_at) VALUES (?, ?, ?)"#
    )
    .bind(kind)
    .bind(body)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid().to_string())
}

/// Documents of `kind` whose top-level fields equal every entry in `filter`,
/// oldest first, at most `limit` of them. Each carries its id as `_id`.
pub async fn list_documents(
    pool: &SqlitePool,
    kind: &str,
    filter: &Document,
    limit: u32,
) -> Result<Vec<Document>, sqlx::Error> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, body FROM documents WHERE kind = ");
    query.push_bind(kind);
    for (field, value) in filter {
        query
            .push(" AND json_extract(body, ")
            .push_bind(json_path(field))
            .push(") IS json_extract(")
            .push_bind(value.to_string())
            .push(", '$')");
    }
    query.push(" ORDER BY id LIMIT ").push_bind(i64::from(limit));

    let rows: Vec<(i64, String)> = query.build_query_as().fetch_all(pool).await?;

    rows.into_iter()
        .map(|(id, body)| -> Result<Document, sqlx::Error> {
            let mut document: Document =
                serde_json::from_str(&body).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            document.insert("_id".to_string(), id.to_string().into());
            Ok(document)
        })
        .collect()
}

/// Distinct record kinds currently stored.
pub async fn collection_names(pool: &SqlitePool, limit: u32) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"SELECT DISTINCT kind FROM documents ORDER BY kind LIMIT ?"#
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

/// File stem of the main database, or None for in-memory databases.
pub async fn database_name(pool: &SqlitePool) -> Result<Option<String>, sqlx::Error> {
    let databases = sqlx::query_as::<_, (i64, String, String)>(r#"PRAGMA database_list"#)
        .fetch_all(pool)
        .await?;

    Ok(databases
        .into_iter()
        .find(|(_, name, _)| name == "main")
        .and_then(|(_, _, file)| {
            Path::new(&file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        }))
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

/// Single-connection in-memory pool; every connection to `sqlite::memory:`
/// is its own database, so the pool must never open a second one.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
