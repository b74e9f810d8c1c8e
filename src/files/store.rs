//! Flat directory of named text files.
//!
//! # Responsibilities
//! - Map a file name to a path under the storage root
//! - Read a file line by line
//! - Create a new file, refusing to overwrite
//! - Append to a file, creating it if absent
//!
//! # Design Decisions
//! - Every write ends with a newline
//! - Async I/O (`tokio::fs`) so a slow disk only stalls its own request

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::StorageConfig;
use crate::files::error::FileError;

/// A validated file name: one path segment, never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    /// Take the name from the third `/`-separated segment of a request path.
    ///
    /// `/add/notes` yields `notes`; `/add` and `/add/` yield [`FileError::MissingName`].
    pub fn from_request_path(path: &str) -> Result<Self, FileError> {
        match path.split('/').nth(2) {
            None | Some("") => Err(FileError::MissingName),
            Some(name @ ("." | "..")) => Err(FileError::InvalidName(name.to_string())),
            Some(name) => Ok(Self(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    create_mode: u32,
    append_mode: u32,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, create_mode: u32, append_mode: u32) -> Self {
        Self {
            root: root.into(),
            create_mode,
            append_mode,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.root.clone(), config.create_mode, config.append_mode)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage root if it does not exist.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    fn path_of(&self, name: &FileName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Read the whole file; each line comes back terminated by `\n`.
    pub async fn read(&self, name: &FileName) -> Result<String, FileError> {
        let read_error = |source: std::io::Error| FileError::Read {
            name: name.to_string(),
            source,
        };

        let file = File::open(self.path_of(name)).await.map_err(read_error)?;
        let mut lines = BufReader::new(file).lines();
        let mut text = String::new();
        while let Some(line) = lines.next_line().await.map_err(read_error)? {
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }

    /// Create `name` holding `text` followed by a newline.
    pub async fn create(&self, name: &FileName, text: &str) -> Result<(), FileError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let file = self.open(&mut options, self.create_mode, name).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                FileError::AlreadyExists
            } else {
                FileError::Write {
                    name: name.to_string(),
                    source,
                }
            }
        })?;
        self.write_line(file, name, text).await
    }

    /// Append `text` and a newline to `name`, creating the file if needed.
    pub async fn append(&self, name: &FileName, text: &str) -> Result<(), FileError> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        let file = self
            .open(&mut options, self.append_mode, name)
            .await
            .map_err(|source| FileError::Write {
                name: name.to_string(),
                source,
            })?;
        self.write_line(file, name, text).await
    }

    async fn open(&self, options: &mut OpenOptions, mode: u32, name: &FileName) -> std::io::Result<File> {
        #[cfg(unix)]
        options.mode(mode);
        #[cfg(not(unix))]
        let _ = mode;
        options.open(self.path_of(name)).await
    }

    async fn write_line(&self, mut file: File, name: &FileName, text: &str) -> Result<(), FileError> {
        let write_error = |source: std::io::Error| FileError::Write {
            name: name.to_string(),
            source,
        };

        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        file.write_all(line.as_bytes()).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)
    }
}
