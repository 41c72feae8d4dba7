//! Line-per-name file store
//!
//! Format: UTF-8, one name per line, `\n` terminated. A trailing `\r` on a
//! line is tolerated on load so hand-edited files still round-trip.
//!
//! An append that failed mid-write can leave an unterminated tail. The next
//! append terminates it first, so the fragment loads as its own line and never
//! swallows a committed name.

use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::ports::outbound::NameStore;

/// Default location of the name file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/users.txt";

/// Append-only file of registered names
#[derive(Clone, Debug)]
pub struct FileNameStore {
    path: PathBuf,
}

impl FileNameStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the backing file
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// `true` if the file is non-empty and its last byte is not `\n`
    async fn has_unterminated_tail(file: &mut File) -> std::io::Result<bool> {
        if file.metadata().await?.len() == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1)).await?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await?;
        Ok(last[0] != b'\n')
    }

    fn parse(contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for FileNameStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[async_trait]
impl NameStore for FileNameStore {
    async fn load_all(&self) -> Result<Vec<String>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No existing name file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::unavailable("load", e)),
        };

        let names = Self::parse(&contents);
        info!(path = %self.path.display(), count = names.len(), "Loaded names from file");
        Ok(names)
    }

    async fn append(&self, name: &str) -> Result<(), StoreError> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::unavailable("create data directory", e))?;

        let existed = fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::unavailable("stat", e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::unavailable("open", e))?;

        let mut line = String::with_capacity(name.len() + 2);
        if Self::has_unterminated_tail(&mut file)
            .await
            .map_err(|e| StoreError::unavailable("inspect tail", e))?
        {
            warn!(path = %self.path.display(), "Terminating partial line left by an earlier append");
            line.push('\n');
        }
        line.push_str(name);
        line.push('\n');

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::unavailable("append", e))?;
        file.sync_data()
            .await
            .map_err(|e| StoreError::unavailable("sync", e))?;

        if !existed {
            sync_dir(parent)
                .await
                .map_err(|e| StoreError::unavailable("sync data directory", e))?;
        }

        debug!(path = %self.path.display(), "Appended name");
        Ok(())
    }
}

/// Flush a directory entry so a newly created file survives a crash
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
