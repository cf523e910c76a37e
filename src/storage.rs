//! Stores rendered newsletter pages on disk and hands out shareable URLs.

use std::path::PathBuf;
use tokio::fs;
use url::Url;
use uuid::Uuid;

use crate::errors::NewsletterError;

/// Location of one stored newsletter page.
#[derive(Debug, Clone)]
pub struct StoredNewsletter {
    pub id: String,
    pub url: String,
    pub path: PathBuf,
}

/// File-backed newsletter store: one `<uuid>.html` per page, served back by
/// id under `<base_url>/n/<id>`.
pub struct NewsletterStore {
    dir: PathBuf,
    base_url: String,
}

impl NewsletterStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }

    /// Persist rendered HTML under a fresh id and return its shareable URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage directory cannot be created, the
    /// file cannot be written, or the configured base URL is not a URL.
    pub async fn save(&self, html: &str) -> Result<StoredNewsletter, NewsletterError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| NewsletterError::StorageError(format!("create storage dir: {e}")))?;

        let id = Uuid::new_v4().to_string();
        let path = self.dir.join(format!("{id}.html"));
        fs::write(&path, html)
            .await
            .map_err(|e| NewsletterError::StorageError(format!("write newsletter: {e}")))?;

        let url = self.url_for(&id)?;
        Ok(StoredNewsletter { id, url, path })
    }

    /// Load a stored page by id. Unknown or malformed ids come back as
    /// `Ok(None)`.
    pub async fn load(&self, id: &str) -> Result<Option<String>, NewsletterError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        let path = self.dir.join(format!("{id}.html"));
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NewsletterError::StorageError(format!(
                "read newsletter: {e}"
            ))),
        }
    }

    fn url_for(&self, id: &str) -> Result<String, NewsletterError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| NewsletterError::StorageError(format!("invalid base url: {e}")))?;
        let url = base
            .join(&format!("n/{id}"))
            .map_err(|e| NewsletterError::StorageError(format!("build newsletter url: {e}")))?;
        Ok(url.to_string())
    }
}

/// Ids are served straight from the filesystem, so only the plain UUID shape
/// (hex digits and dashes) is accepted. Anything else could walk the path.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}
