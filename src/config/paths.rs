use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "gmctl";

/// Fixed filesystem locations for the OAuth client credentials and the
/// persisted token. Both files are owned by the auth collaborator; the rest
/// of the crate only reads them.
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir().ok_or_else(|| {
            AppError::MissingCredentials("unable to resolve config directory".to_string())
        })?;
        let data_root = dirs::data_dir().ok_or_else(|| {
            AppError::MissingCredentials("unable to resolve data directory".to_string())
        })?;

        let config_dir = config_root.join(APP_DIR);
        let data_dir = data_root.join(APP_DIR);
        fs::create_dir_all(&config_dir)?;
        fs::create_dir_all(&data_dir)?;

        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Builds paths rooted at explicit directories instead of the platform
    /// defaults. Nothing is created on disk.
    pub fn from_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.json")
    }

    pub fn token_file(&self) -> PathBuf {
        self.data_dir.join("token.json")
    }
}
