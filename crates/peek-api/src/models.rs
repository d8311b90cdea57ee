// Wire types for the Peek REST API.
//
// Field names follow the backend's JSON exactly. Interpretation
// (status enums, timestamps) happens in peek-core.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use secrecy::SecretString;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Backend ids arrive as strings or integers depending on the collection.
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

// ── Auth ────────────────────────────────────────────────────────────

/// Organization + owner registration payload.
///
/// The password is kept secret in memory and only exposed while the
/// request body is serialized.
pub struct Registration {
    pub name: String,
    pub description: Option<String>,
    pub owner_email: String,
    pub owner_password: SecretString,
    pub owner_full_name: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("owner_email", &self.owner_email)
            .field("owner_full_name", &self.owner_full_name)
            .finish_non_exhaustive()
    }
}

/// Tenant record returned by a successful registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tenant {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Account as reported by `/api/auth/me` and `/api/auth/users`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload for inviting another user into the caller's tenant.
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: SecretString,
    pub role: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// ── Screens ─────────────────────────────────────────────────────────

/// Screen as listed by `GET /api/screens`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreenRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_check: Option<String>,
    /// Milliseconds.
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// Aggregate counts from `GET /api/screens/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenStats {
    pub total_screens: u64,
    pub online_screens: u64,
    pub offline_screens: u64,
    pub error_screens: u64,
}

/// Binary image part of a screen upload.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Wrap in-memory bytes, guessing the MIME type from the file name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Read an image from disk.
    pub async fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn screen_id_accepts_numbers() {
        let screen: ScreenRecord = serde_json::from_value(json!({
            "id": 42,
            "name": "Lobby",
            "status": "online"
        }))
        .unwrap();
        assert_eq!(screen.id, "42");
        assert!(screen.image_url.is_none());
    }

    #[test]
    fn stats_missing_fields_default_to_zero() {
        let stats: ScreenStats = serde_json::from_value(json!({ "totalScreens": 3 })).unwrap();
        assert_eq!(stats.total_screens, 3);
        assert_eq!(stats.error_screens, 0);
    }

    #[test]
    fn upload_guesses_mime_from_extension() {
        let png = ImageUpload::from_bytes("lobby.png", vec![1_u8, 2, 3]);
        assert_eq!(png.mime, "image/png");
        assert_eq!(png.len(), 3);

        let unknown = ImageUpload::from_bytes("blob", Vec::<u8>::new());
        assert_eq!(unknown.mime, "application/octet-stream");
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn upload_from_missing_path_is_io_error() {
        let err = ImageUpload::from_path(Path::new("/nonexistent/lobby.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
