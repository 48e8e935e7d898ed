//! Local persistence of downloaded objects.

use bytes::Bytes;
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::debug;
use uuid::Uuid;

/// File name a key is saved under: its last path segment, or a
/// placeholder when that segment is empty or a relative component.
pub fn local_file_name(key: &str) -> String {
    match key.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name.to_string(),
        _ => "download".to_string(),
    }
}

/// Write `bytes` into `dir` under the key's file name.
///
/// - Writes to a temporary file first and fsyncs it.
/// - Renames into place, replacing an existing file of the same name.
/// - Removes the temporary file on any error.
pub async fn save_download(dir: &Path, key: &str, bytes: &Bytes) -> io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let target = dir.join(local_file_name(key));
    let tmp_path = dir.join(format!(".tmp-{}", Uuid::new_v4()));

    if let Err(err) = write_synced(&tmp_path, bytes).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp_path, &target).await {
        if err.kind() == ErrorKind::AlreadyExists {
            fs::remove_file(&target).await?;
            fs::rename(&tmp_path, &target).await?;
        } else {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err);
        }
    }

    debug!(key, path = %target.display(), size = bytes.len(), "download saved");
    Ok(target)
}

async fn write_synced(path: &Path, bytes: &Bytes) -> io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}
