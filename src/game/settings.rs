use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ASSET_DIR_ENV: &str = "GEMCASCADE_ASSETS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// `None` saves to the per-user data directory.
    #[serde(default)]
    pub autosave_path: Option<PathBuf>,

    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_step_delay_ms() -> u64 {
    40
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            asset_dir: default_asset_dir(),
            autosave_path: None,
            step_delay_ms: default_step_delay_ms(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, writing the defaults there when the file
    /// is missing or unreadable. Environment overrides are applied last.
    pub fn load_from(path: &Path) -> Self {
        let mut settings = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    settings
                }
                Err(err) => {
                    warn!(target: "settings", "Ignoring unreadable settings {}: {}", path.display(), err);
                    Settings::default()
                }
            },
            Err(_) => {
                let default = Settings::default();
                if let Err(err) = default.save_to(path) {
                    warn!(target: "settings", "Could not write default settings: {}", err);
                }
                default
            }
        };
        settings.apply_env_overrides();
        settings
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        // Ensure the directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
            self.asset_dir = PathBuf::from(dir);
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }
}
