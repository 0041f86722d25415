//! Storage layout configuration

use std::path::PathBuf;

use crate::errors::ConsoleError;
use crate::filesys::dir::Dir;
use crate::filesys::file::File;

/// Name of the console's directory under the user config dir
pub const APP_DIR_NAME: &str = "lang-console";

/// Storage layout for the console
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("settings.json"))
    }

    /// Directory of the watch view's rotated log files
    pub fn logs_dir(&self) -> Dir {
        Dir::new(self.base_dir.join("logs"))
    }

    /// Create the directories of the layout
    pub async fn setup(&self) -> Result<(), ConsoleError> {
        self.logs_dir().create().await
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        let base_dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        Self::new(base_dir)
    }
}
