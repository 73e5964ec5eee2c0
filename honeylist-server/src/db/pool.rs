//! SQLite connection pool and schema management

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

/// Default maximum connections for the pool.
/// Kept low for single-operator usage.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open (creating if needed) the SQLite database at `path`.
///
/// The parent directory is created when missing.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Path::new("listings.db")).await?;
/// ```
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(path, DEFAULT_MAX_CONNECTIONS).await
}

/// Open the SQLite database with a custom connection limit.
pub async fn create_pool_with_options(
    path: &Path,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create the `listings` table, upgrading tables made by the older
/// eight-column setup (no `image_gallery`) in place.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            price TEXT,
            beds TEXT,
            baths TEXT,
            description TEXT,
            image TEXT,
            contact_email TEXT,
            image_gallery TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    let columns = sqlx::query("PRAGMA table_info(listings)")
        .fetch_all(pool)
        .await?;
    let has_gallery = columns
        .iter()
        .any(|c| c.get::<String, _>("name") == "image_gallery");

    if !has_gallery {
        tracing::info!("Adding image_gallery column to listings");
        sqlx::query("ALTER TABLE listings ADD COLUMN image_gallery TEXT")
            .execute(pool)
            .await?;
    }

    tracing::info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_missing_parent_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("listings.db");

        let pool = create_pool(&path).await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let temp = TempDir::new().unwrap();
        let pool = create_pool(&temp.path().join("listings.db")).await.unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM listings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn upgrades_legacy_table() {
        let temp = TempDir::new().unwrap();
        let pool = create_pool(&temp.path().join("listings.db")).await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE listings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                price TEXT,
                beds TEXT,
                baths TEXT,
                description TEXT,
                image TEXT,
                contact_email TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO listings (title) VALUES ('Legacy')")
            .execute(&pool)
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();

        let (title, gallery): (String, Option<String>) =
            sqlx::query_as("SELECT title, image_gallery FROM listings")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(title, "Legacy");
        assert_eq!(gallery, None);
    }
}
