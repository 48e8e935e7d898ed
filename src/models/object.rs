//! Represents one object as reported by the remote listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single remote object within the catalog snapshot.
///
/// Records are owned by the catalog store and replaced wholesale on every
/// refresh. Other components refer to an object by its `key` only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    /// Object key; doubles as display name and addressing path.
    pub key: String,

    /// Last modification time, as reported by the origin.
    pub last_modified: DateTime<Utc>,

    /// Size in bytes.
    pub size: u64,

    /// Opaque content fingerprint. Displayed, never parsed.
    #[serde(default)]
    pub etag: String,
}
