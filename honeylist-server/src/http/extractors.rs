//! Custom Axum extractors

use axum::extract::{FromRequest, Multipart, Request};

use crate::error::ServerError;
use crate::models::ListingInput;
use crate::uploads::IncomingFile;

/// Multipart field carrying uploaded images
const IMAGES_FIELD: &str = "images";

/// Create/edit form submission.
///
/// Text fields that are absent stay empty; unknown fields are ignored.
/// Every `images` part is kept, including unset inputs with an empty
/// filename, so the service can tell "no files chosen" apart.
#[derive(Debug, Default)]
pub struct ListingForm {
    pub input: ListingInput,
    pub files: Vec<IncomingFile>,
}

impl<S> FromRequest<S> for ListingForm
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = ListingForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "title" => form.input.title = field.text().await?,
                "price" => form.input.price = field.text().await?,
                "beds" => form.input.beds = field.text().await?,
                "baths" => form.input.baths = field.text().await?,
                "description" => form.input.description = field.text().await?,
                IMAGES_FIELD => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?.to_vec();
                    form.files.push(IncomingFile {
                        filename,
                        content_type,
                        bytes,
                    });
                }
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}
