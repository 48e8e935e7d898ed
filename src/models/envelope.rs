//! Wire envelopes returned by the remote service.
//!
//! Every JSON response follows `{ success: boolean, ... }`. A missing or
//! false `success` is a failure; only an explicit `true` counts as success.
//! A successful listing must also carry `files`; without it the body is
//! treated as unreadable.

use crate::models::object::ObjectRecord;
use serde::Deserialize;

/// `GET /files` response body.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub files: Option<Vec<ObjectRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body shared by `POST /upload`, `DELETE /delete/{key}` and download errors.
#[derive(Debug, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ListEnvelope {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

impl StatusEnvelope {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}
