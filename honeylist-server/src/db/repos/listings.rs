//! Listing repository
//!
//! Every method acquires a connection from the pool for the length of a
//! single statement. Update and delete report rows affected and are
//! no-ops for unknown ids.

use sqlx::SqlitePool;

use crate::models::{Listing, ListingUpdate, NewListing};

/// Text columns may be NULL in rows written by older tooling.
const SELECT_LISTING: &str = r#"
    SELECT
        id,
        title,
        COALESCE(price, '') AS price,
        COALESCE(beds, '') AS beds,
        COALESCE(baths, '') AS baths,
        COALESCE(description, '') AS description,
        COALESCE(image, '') AS image,
        COALESCE(contact_email, '') AS contact_email,
        COALESCE(image_gallery, '') AS image_gallery
    FROM listings
"#;

/// Listing repository
pub struct ListingRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListingRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All listings in storage order.
    pub async fn list(&self) -> Result<Vec<Listing>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Listing>(SELECT_LISTING)
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Listing>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query_as::<_, Listing>(&format!("{SELECT_LISTING} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Insert a listing, returning its assigned id.
    pub async fn insert(&self, listing: &NewListing) -> Result<i64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO listings
                (title, price, beds, baths, description, image, contact_email, image_gallery)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&listing.input.title)
        .bind(&listing.input.price)
        .bind(&listing.input.beds)
        .bind(&listing.input.baths)
        .bind(&listing.input.description)
        .bind(&listing.image)
        .bind(&listing.contact_email)
        .bind(&listing.image_gallery)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite the editable columns. `image` and `contact_email` are left alone.
    pub async fn update(&self, id: i64, update: &ListingUpdate) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(
            r#"
            UPDATE listings
            SET title = ?, price = ?, beds = ?, baths = ?, description = ?, image_gallery = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.input.title)
        .bind(&update.input.price)
        .bind(&update.input.beds)
        .bind(&update.input.baths)
        .bind(&update.input.description)
        .bind(&update.image_gallery)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Cheap query confirming the table is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1 FROM listings LIMIT 1")
            .fetch_optional(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("DELETE FROM listings WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
