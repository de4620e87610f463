use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "deepwork";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("deepwork_config.json"))
    }

    pub fn prefs_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("prefs.json"))
            .unwrap_or_else(|| PathBuf::from("deepwork_prefs.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("deepwork.log")
        } else {
            Self::project()
                .map(|pd| pd.data_local_dir().join("deepwork.log"))
                .unwrap_or_else(|| PathBuf::from("deepwork.log"))
        }
    }
}
