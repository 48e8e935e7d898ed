//! src/services/remote.rs
//!
//! Client side of the remote object service. `ObjectService` is the seam the
//! controller talks to; `HttpObjectService` implements it over HTTP with the
//! `{ success, ... }` envelope contract:
//!
//! - `GET    /files`
//! - `POST   /upload` (multipart, field `file`)
//! - `GET    /download/{key}`
//! - `DELETE /delete/{key}`
//!
//! Responses are classified here, so callers only ever see `OperationError`.

use crate::{
    errors::{OperationError, OperationKind, OperationResult},
    models::{
        envelope::{ListEnvelope, StatusEnvelope},
        object::ObjectRecord,
        upload::UploadFile,
    },
};
use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{
    Client, Response, Url,
    multipart::{Form, Part},
};
use tracing::{debug, warn};

/// Characters left unescaped in a key path segment (the `encodeURIComponent` set).
const KEY_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a key for use as a single path segment.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_SEGMENT_ENCODE_SET).to_string()
}

/// Remote catalog operations as seen by the controller.
#[async_trait]
pub trait ObjectService: Send + Sync {
    /// Fetch the full listing, in server order.
    async fn list(&self) -> OperationResult<Vec<ObjectRecord>>;

    /// Upload a single file. Returns the server's optional message.
    async fn upload(&self, file: &UploadFile) -> OperationResult<Option<String>>;

    /// Fetch an object's raw bytes.
    async fn download(&self, key: &str) -> OperationResult<Bytes>;

    async fn delete(&self, key: &str) -> OperationResult<()>;

    /// Locator of an object's content. Pure; issues no request.
    fn resource_url(&self, key: &str) -> String;
}

/// `ObjectService` backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpObjectService {
    client: Client,
    base_url: String,
}

impl HttpObjectService {
    pub fn new(endpoint: &Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &Url) -> Self {
        Self {
            client,
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a `{ success, message?, error? }` body and classify it.
    async fn read_status(
        kind: OperationKind,
        response: Response,
    ) -> OperationResult<StatusEnvelope> {
        let status = response.status();
        let envelope: StatusEnvelope = response.json().await.map_err(|err| {
            warn!(?kind, %status, error = %err, "unreadable response envelope");
            OperationError::network(kind)
        })?;

        if envelope.is_success() {
            Ok(envelope)
        } else {
            debug!(?kind, %status, error = ?envelope.error, "server reported failure");
            Err(OperationError::server(kind, envelope.error))
        }
    }
}

fn transport_error(kind: OperationKind, err: reqwest::Error) -> OperationError {
    warn!(?kind, error = %err, "request failed");
    OperationError::network(kind)
}

#[async_trait]
impl ObjectService for HttpObjectService {
    async fn list(&self) -> OperationResult<Vec<ObjectRecord>> {
        let kind = OperationKind::List;
        let response = self
            .client
            .get(self.url("/files"))
            .send()
            .await
            .map_err(|err| transport_error(kind, err))?;

        let status = response.status();
        let envelope: ListEnvelope = response.json().await.map_err(|err| {
            warn!(%status, error = %err, "unreadable listing envelope");
            OperationError::network(kind)
        })?;

        if !envelope.is_success() {
            debug!(%status, error = ?envelope.error, "listing refused");
            return Err(OperationError::server(kind, envelope.error));
        }

        let Some(files) = envelope.files else {
            warn!(%status, "listing envelope has no files array");
            return Err(OperationError::network(kind));
        };
        debug!(count = files.len(), "listing received");
        Ok(files)
    }

    async fn upload(&self, file: &UploadFile) -> OperationResult<Option<String>> {
        let kind = OperationKind::Upload;
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        let part = match file.content_type.as_deref() {
            Some(mime) => part.mime_str(mime).map_err(|err| transport_error(kind, err))?,
            None => part,
        };
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| transport_error(kind, err))?;

        let envelope = Self::read_status(kind, response).await?;
        Ok(envelope.message)
    }

    async fn download(&self, key: &str) -> OperationResult<Bytes> {
        let kind = OperationKind::Download;
        let response = self
            .client
            .get(self.resource_url(key))
            .send()
            .await
            .map_err(|err| transport_error(kind, err))?;

        let status = response.status();
        if status.is_success() {
            return response
                .bytes()
                .await
                .map_err(|err| transport_error(kind, err));
        }

        // Failed downloads carry a JSON `{ error }` body instead of content.
        let envelope: StatusEnvelope = response.json().await.map_err(|err| {
            warn!(key, %status, error = %err, "unreadable download error body");
            OperationError::network(kind)
        })?;
        debug!(key, %status, error = ?envelope.error, "download refused");
        Err(OperationError::server(kind, envelope.error))
    }

    async fn delete(&self, key: &str) -> OperationResult<()> {
        let kind = OperationKind::Delete;
        let response = self
            .client
            .delete(self.url(&format!("/delete/{}", encode_key(key))))
            .send()
            .await
            .map_err(|err| transport_error(kind, err))?;

        Self::read_status(kind, response).await.map(|_| ())
    }

    fn resource_url(&self, key: &str) -> String {
        self.url(&format!("/download/{}", encode_key(key)))
    }
}
