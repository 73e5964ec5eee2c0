//! Listing record and the fields derived from it
//!
//! A listing's contact email and primary image are never supplied by the
//! user. They are synthesized here from the title and the stored uploads.

use sqlx::FromRow;

/// Primary image used when a listing is created without uploads.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/default.jpg";

const EMAIL_PREFIX: &str = "honey-";
const EMAIL_DOMAIN: &str = "fake.ie";
const GALLERY_SEPARATOR: char = ',';

/// Listing row as stored in the `listings` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub beds: String,
    pub baths: String,
    pub description: String,
    pub image: String,
    pub contact_email: String,
    pub image_gallery: String,
}

impl Listing {
    /// Gallery paths in upload order. Empty when nothing was uploaded.
    pub fn gallery(&self) -> Vec<&str> {
        self.image_gallery
            .split(GALLERY_SEPARATOR)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// User-editable text fields, taken from the create and edit forms as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingInput {
    pub title: String,
    pub price: String,
    pub beds: String,
    pub baths: String,
    pub description: String,
}

/// Full row for insertion
#[derive(Debug, Clone)]
pub struct NewListing {
    pub input: ListingInput,
    pub image: String,
    pub contact_email: String,
    pub image_gallery: String,
}

impl NewListing {
    /// Derive the synthetic fields from the input and the stored upload paths.
    pub fn from_uploads(input: ListingInput, stored: &[String]) -> Self {
        let image = stored
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Self {
            contact_email: contact_email(&input.title),
            image_gallery: join_gallery(stored),
            image,
            input,
        }
    }
}

/// Columns an edit may overwrite. `image` and `contact_email` are not among them.
#[derive(Debug, Clone)]
pub struct ListingUpdate {
    pub input: ListingInput,
    pub image_gallery: String,
}

/// Placeholder contact address: lower-cased title with spaces removed.
pub fn contact_email(title: &str) -> String {
    let local = title.to_lowercase().replace(' ', "");
    format!("{EMAIL_PREFIX}{local}@{EMAIL_DOMAIN}")
}

pub fn join_gallery(paths: &[String]) -> String {
    paths.join(&GALLERY_SEPARATOR.to_string())
}
