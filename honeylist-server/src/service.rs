//! Listing service - create, read, update and delete over the repository
//! and the upload store

use sqlx::SqlitePool;
use tracing::info;

use crate::db::ListingRepo;
use crate::error::{ServerError, ServerResult};
use crate::models::{join_gallery, Listing, ListingInput, ListingUpdate, NewListing};
use crate::uploads::{IncomingFile, UploadStore};

/// Listing operations shared by every request handler
#[derive(Clone)]
pub struct ListingService {
    pool: SqlitePool,
    uploads: UploadStore,
}

impl ListingService {
    pub fn new(pool: SqlitePool, uploads: UploadStore) -> Self {
        Self { pool, uploads }
    }

    fn repo(&self) -> ListingRepo<'_> {
        ListingRepo::new(&self.pool)
    }

    /// Store uploads and insert a new listing, returning its id.
    pub async fn create(&self, input: ListingInput, files: &[IncomingFile]) -> ServerResult<i64> {
        let stored = self.uploads.save_all(files).await?;
        let listing = NewListing::from_uploads(input, &stored);
        let id = self.repo().insert(&listing).await?;

        info!(id, images = stored.len(), "created listing");
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> ServerResult<Listing> {
        self.repo()
            .get(id)
            .await?
            .ok_or(ServerError::NotFound { id })
    }

    pub async fn list(&self) -> ServerResult<Vec<Listing>> {
        Ok(self.repo().list().await?)
    }

    /// Overwrite the text fields of an existing listing.
    ///
    /// Supplying at least one named file replaces the gallery with the new
    /// uploads; otherwise the current gallery is kept. The primary image and
    /// contact email never change here.
    pub async fn update(
        &self,
        id: i64,
        input: ListingInput,
        files: &[IncomingFile],
    ) -> ServerResult<()> {
        let current = self.get(id).await?;

        let image_gallery = if files.iter().any(|f| !f.is_unset()) {
            join_gallery(&self.uploads.save_all(files).await?)
        } else {
            current.image_gallery
        };

        let affected = self
            .repo()
            .update(id, &ListingUpdate { input, image_gallery })
            .await?;

        info!(id, affected, "updated listing");
        Ok(())
    }

    pub async fn ping(&self) -> ServerResult<()> {
        Ok(self.repo().ping().await?)
    }

    /// Remove a listing. Unknown ids succeed without effect.
    pub async fn delete(&self, id: i64) -> ServerResult<()> {
        let affected = self.repo().delete(id).await?;
        info!(id, affected, "deleted listing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use crate::models::PLACEHOLDER_IMAGE;
    use crate::uploads::UploadPolicy;
    use tempfile::TempDir;

    async fn test_service(temp: &TempDir) -> ListingService {
        let pool = create_pool(&temp.path().join("listings.db")).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let uploads = UploadStore::new(
            temp.path().join("uploads"),
            UploadPolicy { max_bytes: 1024 },
        );
        ListingService::new(pool, uploads)
    }

    fn input(title: &str) -> ListingInput {
        ListingInput {
            title: title.to_string(),
            price: "450k".to_string(),
            beds: "4".to_string(),
            baths: "".to_string(),
            description: "South facing".to_string(),
        }
    }

    #[tokio::test]
    async fn create_derives_email_and_placeholder() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let id = service.create(input("Sea View"), &[]).await.unwrap();
        let listing = service.get(id).await.unwrap();

        assert_eq!(listing.contact_email, "honey-seaview@fake.ie");
        assert_eq!(listing.image, PLACEHOLDER_IMAGE);
        assert_eq!(listing.image_gallery, "");
    }

    #[tokio::test]
    async fn create_with_two_files_builds_gallery() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let files = vec![
            IncomingFile::new("front.jpg", b"front".to_vec()),
            IncomingFile::new("garden.png", b"garden".to_vec()),
        ];
        let id = service.create(input("Cottage"), &files).await.unwrap();
        let listing = service.get(id).await.unwrap();

        assert_eq!(
            listing.gallery(),
            vec!["/static/uploads/front.jpg", "/static/uploads/garden.png"]
        );
        assert_eq!(listing.image, "/static/uploads/front.jpg");
        assert!(temp.path().join("uploads/garden.png").exists());
    }

    #[tokio::test]
    async fn create_then_get_round_trips_text() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let given = ListingInput {
            title: "Loft, 2nd floor".into(),
            price: "POA".into(),
            beds: "2 + box room".into(),
            baths: "1.5".into(),
            description: "Line one\nLine two".into(),
        };
        let id = service.create(given.clone(), &[]).await.unwrap();
        let listing = service.get(id).await.unwrap();

        assert_eq!(listing.title, given.title);
        assert_eq!(listing.price, given.price);
        assert_eq!(listing.beds, given.beds);
        assert_eq!(listing.baths, given.baths);
        assert_eq!(listing.description, given.description);
    }

    #[tokio::test]
    async fn update_without_files_keeps_gallery() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let id = service
            .create(input("Barn"), &[IncomingFile::new("a.jpg", b"a".to_vec())])
            .await
            .unwrap();
        service
            .update(id, input("Barn Conversion"), &[IncomingFile::new("", Vec::new())])
            .await
            .unwrap();

        let listing = service.get(id).await.unwrap();
        assert_eq!(listing.title, "Barn Conversion");
        assert_eq!(listing.image_gallery, "/static/uploads/a.jpg");
    }

    #[tokio::test]
    async fn update_with_files_replaces_gallery() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let id = service
            .create(input("Barn"), &[IncomingFile::new("a.jpg", b"a".to_vec())])
            .await
            .unwrap();
        service
            .update(
                id,
                input("Barn"),
                &[
                    IncomingFile::new("b.jpg", b"b".to_vec()),
                    IncomingFile::new("c.jpg", b"c".to_vec()),
                ],
            )
            .await
            .unwrap();

        let listing = service.get(id).await.unwrap();
        assert_eq!(
            listing.image_gallery,
            "/static/uploads/b.jpg,/static/uploads/c.jpg"
        );
        // primary image is not refreshed by an edit
        assert_eq!(listing.image, "/static/uploads/a.jpg");
        assert_eq!(listing.contact_email, "honey-barn@fake.ie");
    }

    #[tokio::test]
    async fn rejected_update_upload_keeps_listing() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let id = service
            .create(input("Barn"), &[IncomingFile::new("a.jpg", b"a".to_vec())])
            .await
            .unwrap();
        let err = service
            .update(
                id,
                input("Renamed"),
                &[IncomingFile::new("setup.exe", b"MZ".to_vec())],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Upload(_)));

        let listing = service.get(id).await.unwrap();
        assert_eq!(listing.title, "Barn");
        assert_eq!(listing.image_gallery, "/static/uploads/a.jpg");
        assert!(!temp.path().join("uploads/setup.exe").exists());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let err = service.update(99, input("Ghost"), &[]).await.unwrap_err();
        assert!(matches!(err, ServerError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn delete_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let service = test_service(&temp).await;

        let id = service.create(input("Gone Soon"), &[]).await.unwrap();
        service.delete(id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        service.delete(id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(
            service.get(id).await,
            Err(ServerError::NotFound { .. })
        ));
    }
}
