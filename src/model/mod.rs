mod board_event;
pub mod board_snapshot;
mod board_tiles;
mod category;
mod colour;
mod coordinate;
mod game_command;
mod sound_event;

pub use board_event::{BoardEvent, BoardObserver};
pub use board_snapshot::BoardSnapshot;
pub use board_tiles::BoardTiles;
pub use category::Category;
pub use colour::Colour;
pub use coordinate::{Coordinate, GRID_SIZE};
pub use game_command::GameCommand;
pub use sound_event::SoundEvent;
