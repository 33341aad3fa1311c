use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

use super::Storage;
use crate::name::PasteName;

/// Stores each paste as a single file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the storage directory, creating it if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir: PathBuf = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
            info!("created pastes directory {}", dir.display());
        }

        if !dir.is_dir() {
            bail!("{} is not a directory", dir.display());
        }

        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &PasteName) -> PathBuf {
        self.dir.join(name.file_name())
    }
}

impl Storage for FileStorage {
    async fn get_or_create(&mut self, name: &PasteName) -> crate::ApiResult<String> {
        let path = self.path_of(name);

        if !fs::try_exists(&path).await? {
            info!("new paste: name='{name}'");
        }

        // append so that an existing paste is never truncated
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(fs::read_to_string(&path).await?)
    }

    async fn put(&mut self, name: &PasteName, content: &str) -> crate::ApiResult<()> {
        let path = self.path_of(name);
        // fixed length so that any name that fits on disk can also be saved
        let tmp_path = self.dir.join(format!(".{}.tmp", Uuid::new_v4()));

        info!("saving paste: name='{name}', size={size}", size = content.len());

        let written = async {
            let mut file = fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.sync_all().await?;
            fs::rename(&tmp_path, &path).await
        }
        .await;

        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                warn!("failed to remove {}: {cleanup}", tmp_path.display());
            }
            return Err(err.into());
        }

        Ok(())
    }
}
