//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the media root exists so uploaded assets can be served.
/// A missing directory is created; failure to create it is fatal.
pub async fn ensure_media_root(media_root: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(media_root).await.is_ok() {
        return Ok(());
    }
    warn!(%media_root, "media root not found; creating it");
    tokio::fs::create_dir_all(media_root)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {media_root}: {e}"))?;
    info!(%media_root, "media root created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_media_root() {
        let dir = std::env::temp_dir().join(format!("showcase-media-{}", std::process::id()));
        let path = dir.to_string_lossy().to_string();
        let _ = tokio::fs::remove_dir_all(&dir).await;

        ensure_media_root(&path).await.unwrap();
        assert!(tokio::fs::metadata(&dir).await.unwrap().is_dir());

        // second call is a no-op
        ensure_media_root(&path).await.unwrap();
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
