//! File-backed profile store.
//!
//! Layout under the user directory:
//! - `{id}.json`: contact profile
//! - `{id}_master_resume.csv`: master resume rows
//!
//! Files are read and replaced wholesale; there is no locking.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::resume::codec::{parse_csv, write_csv, CodecError};
use crate::resume::models::{Profile, ResumeRow};

const MASTER_SUFFIX: &str = "_master_resume.csv";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid profile id '{0}': use lower-case letters, digits, '_' or '-'")]
    InvalidId(String),

    #[error("Profile '{0}' not found")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Master resume error: {0}")]
    Codec(#[from] CodecError),
}

/// Checks an id against `[a-z0-9_-]+`.
pub fn validate_id(id: &str) -> Result<(), ProfileError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ProfileError::InvalidId(id.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn profile_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn master_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}{MASTER_SUFFIX}"))
    }

    /// Sorted ids of every stored profile. A missing directory is empty.
    pub async fn list(&self) -> Result<Vec<String>, ProfileError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub async fn load(&self, id: &str) -> Result<Profile, ProfileError> {
        validate_id(id)?;
        let bytes = match tokio::fs::read(self.profile_path(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProfileError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes the profile under the id derived from its name and returns it.
    pub async fn save(&self, profile: &Profile) -> Result<String, ProfileError> {
        let id = profile.id();
        validate_id(&id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.profile_path(&id), serde_json::to_vec_pretty(profile)?).await?;
        info!("Saved profile '{id}'");
        Ok(id)
    }

    /// Master resume rows for a profile; a profile without one has no rows.
    pub async fn load_master(&self, id: &str) -> Result<Vec<ResumeRow>, ProfileError> {
        validate_id(id)?;
        match tokio::fs::read(self.master_path(id)).await {
            Ok(bytes) => Ok(parse_csv(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No master resume for '{id}'");
                Ok(vec![])
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save_master(&self, id: &str, rows: &[ResumeRow]) -> Result<(), ProfileError> {
        validate_id(id)?;
        let bytes = write_csv(rows)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.master_path(id), bytes).await?;
        info!("Replaced master resume for '{id}' ({} rows)", rows.len());
        Ok(())
    }
}
