use log::{trace, warn};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::assets::AssetCache;
use crate::model::{BoardEvent, BoardTiles, Colour, Coordinate, SoundEvent};

use super::{GridView, SoundPlayer};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot highlight empty cell {0}")]
    NothingToHighlight(Coordinate),
    #[error("task panicked: {0}")]
    Panicked(String),
}

/// Everything a task may use besides the view itself. Moved into the worker
/// thread when the queue starts.
pub struct TaskContext {
    pub assets: Arc<AssetCache>,
    pub player: Box<dyn SoundPlayer>,
    /// Pause after each task so the replay is visible; zero disables it.
    pub step_delay: Duration,
}

/// One queued visual update, derived from exactly one [`BoardEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Selection {
        selected: Coordinate,
        previous: Option<Coordinate>,
    },
    Swap {
        a: Coordinate,
        b: Coordinate,
    },
    Clear(Vec<Coordinate>),
    Drop {
        from: Coordinate,
        to: Coordinate,
    },
    Fill {
        coord: Coordinate,
        tile: Colour,
    },
    Redraw(BoardTiles),
}

impl From<BoardEvent> for Task {
    fn from(event: BoardEvent) -> Self {
        match event {
            BoardEvent::SelectionChanged { selected, previous } => {
                Task::Selection { selected, previous }
            }
            BoardEvent::Swapped { a, b } => Task::Swap { a, b },
            BoardEvent::Cleared(coordinates) => Task::Clear(coordinates),
            BoardEvent::Dropped { from, to } => Task::Drop { from, to },
            BoardEvent::Filled { coord, tile } => Task::Fill { coord, tile },
            BoardEvent::BoardChanged(tiles) => Task::Redraw(tiles),
        }
    }
}

impl Task {
    pub fn kind(&self) -> &'static str {
        match self {
            Task::Selection { .. } => "selection",
            Task::Swap { .. } => "swap",
            Task::Clear(_) => "clear",
            Task::Drop { .. } => "drop",
            Task::Fill { .. } => "fill",
            Task::Redraw(_) => "redraw",
        }
    }

    pub fn run(self, view: &mut GridView, context: &TaskContext) -> Result<(), TaskError> {
        match self {
            Task::Selection { selected, previous } => {
                let highlighted = view.highlight_cell(selected);
                // restored even when the highlight failed
                if let Some(previous) = previous {
                    let tile = view.current_tile(previous);
                    view.set_cell(previous, tile);
                }
                highlighted?;
            }
            Task::Swap { a, b } => view.swap_cells(a, b),
            Task::Clear(coordinates) => {
                if coordinates.is_empty() {
                    trace!(target: "task", "Empty clear batch");
                    return Ok(());
                }
                for coord in coordinates {
                    view.clear_cell(coord);
                }
                // once per batch, not per cell
                play(context, SoundEvent::Match);
            }
            Task::Drop { from, to } => {
                let tile = view.current_tile(from);
                view.set_cell(to, tile);
                view.clear_cell(from);
            }
            Task::Fill { coord, tile } => view.set_cell(coord, Some(tile)),
            Task::Redraw(tiles) => {
                for (coord, tile) in tiles.iter() {
                    view.set_cell(coord, tile);
                }
            }
        }
        Ok(())
    }
}

/// Sound is cosmetic: failures are logged and the task carries on.
fn play(context: &TaskContext, event: SoundEvent) {
    let sound = context.assets.sound(event);
    if let Err(err) = context.player.play(&sound) {
        warn!(target: "task", "Could not play {} sound: {}", event, err);
    }
}
