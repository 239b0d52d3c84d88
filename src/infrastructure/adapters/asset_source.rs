//! Static file access for the dashboard

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::shared::error::AppResult;

/// Where dashboard files come from
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Whole file contents, `None` if there is no readable regular file
    async fn read(&self, path: &Path) -> AppResult<Option<Vec<u8>>>;
}

/// Reads assets from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAssetSource;

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn read(&self, path: &Path) -> AppResult<Option<Vec<u8>>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                debug!(path = %path.display(), "Asset not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
