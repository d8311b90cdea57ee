// Screen endpoints

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ImageUpload, ScreenRecord, ScreenStats};

impl ApiClient {
    /// Aggregate status counts.
    ///
    /// `GET /api/screens/stats`
    pub async fn screen_stats(&self) -> Result<ScreenStats, Error> {
        self.get("/api/screens/stats").await
    }

    /// Every screen of the tenant.
    ///
    /// `GET /api/screens`
    pub async fn list_screens(&self) -> Result<Vec<ScreenRecord>, Error> {
        debug!("listing screens");
        self.get("/api/screens").await
    }

    /// Register a screen with its display image.
    ///
    /// `POST /api/screens` as `multipart/form-data` with `name` and `image`.
    pub async fn create_screen(&self, name: &str, image: &ImageUpload) -> Result<(), Error> {
        debug!(name, file = %image.file_name, bytes = image.len(), "uploading screen");
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().text("name", name.to_owned()).part("image", part);
        self.post_multipart("/api/screens", form).await
    }
}
