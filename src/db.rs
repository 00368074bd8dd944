use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::models::Visitor;

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Ensure data directory exists
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// All visitors, newest first. Rows sharing a timestamp come back in reverse
/// insertion order.
pub async fn list_visitors<'e, E>(executor: E) -> Result<Vec<Visitor>, sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    sqlx::query_as(
        "SELECT id, name, email, created_at FROM visitors ORDER BY created_at DESC, rowid DESC",
    )
    .fetch_all(executor)
    .await
}

pub async fn insert_visitor<'e, E>(executor: E, visitor: &Visitor) -> Result<(), sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    sqlx::query("INSERT INTO visitors (id, name, email, created_at) VALUES (?, ?, ?, ?)")
        .bind(&visitor.id)
        .bind(&visitor.name)
        .bind(&visitor.email)
        .bind(&visitor.created_at)
        .execute(executor)
        .await?;

    Ok(())
}
