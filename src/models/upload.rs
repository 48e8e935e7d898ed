//! A local file chosen for upload.

use bytes::Bytes;
use std::{io, path::Path};
use tokio::fs;

/// File contents plus the metadata sent with the multipart `file` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent to the server; becomes the object key.
    pub name: String,

    /// Guessed MIME type, if the extension is known.
    pub content_type: Option<String>,

    /// Whole payload. Uploads are single-part.
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no usable file name", path.display()),
                )
            })?;
        let bytes = fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The file picked by the user but not yet uploaded.
///
/// Cleared after every completed upload attempt and replaced on re-selection.
#[derive(Clone, Debug, Default)]
pub struct SelectedUpload {
    pub pending_file: Option<UploadFile>,
}
