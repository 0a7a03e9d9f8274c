use log::{trace, warn};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use uuid::Uuid;

use super::BoardTiles;

/// What gets written to disk when the window closes.
#[serde_as]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardSnapshot {
    pub game_id: Uuid,
    #[serde_as(as = "TimestampSeconds")]
    pub saved_at: SystemTime,
    pub tiles: BoardTiles,
}

impl BoardSnapshot {
    pub fn new(game_id: Uuid, tiles: BoardTiles) -> Self {
        Self {
            game_id,
            saved_at: SystemTime::now(),
            tiles,
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    /// Returns `None` when the file is missing or unreadable; a broken save
    /// falls back to a fresh game.
    pub fn load(path: &Path) -> Option<BoardSnapshot> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                trace!(target: "board_snapshot", "No snapshot at {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str::<BoardSnapshot>(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(target: "board_snapshot", "Ignoring corrupt snapshot {}: {}", path.display(), err);
                None
            }
        }
    }
}
