// src/core/fs_ops.rs
//! File system helpers shared by the store and the pipeline export

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::info;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists. An empty path means the working directory.
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() || path.exists() {
            return Ok(());
        }

        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        info!("Created directory: {}", path.display());
        Ok(())
    }

    /// Write file, creating parent directories as needed
    pub async fn write_file_safe(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_path_is_noop() {
        FsOps::ensure_dir_exists(Path::new("")).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_creates_parents() {
        let root = std::env::temp_dir().join(format!("jobscout-fs-{}", std::process::id()));
        let target = root.join("nested").join("out.csv");

        FsOps::write_file_safe(&target, b"a,b\n").await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"a,b\n");

        std::fs::remove_dir_all(&root).unwrap();
    }
}
