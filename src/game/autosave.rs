use chrono::{DateTime, Local};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::BoardSnapshot;

/// Called by the window when it closes, before the process exits.
pub trait StatePersister {
    fn persist(&self, snapshot: &BoardSnapshot) -> io::Result<()>;
}

pub struct JsonAutosave {
    path: PathBuf,
}

impl JsonAutosave {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last autosave, if there is a readable one.
    pub fn restore(&self) -> Option<BoardSnapshot> {
        let snapshot = BoardSnapshot::load(&self.path)?;
        let saved_at: DateTime<Local> = snapshot.saved_at.into();
        info!(
            target: "autosave",
            "Resuming game {} saved {}",
            snapshot.game_id,
            saved_at.format("%Y-%m-%d %H:%M")
        );
        Some(snapshot)
    }
}

impl StatePersister for JsonAutosave {
    fn persist(&self, snapshot: &BoardSnapshot) -> io::Result<()> {
        snapshot.save(&self.path)?;
        info!(target: "autosave", "Saved game {} to {}", snapshot.game_id, self.path.display());
        Ok(())
    }
}
