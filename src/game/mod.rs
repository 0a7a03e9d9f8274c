pub mod autosave;
pub mod sandbox_board;
pub mod settings;

pub use autosave::{JsonAutosave, StatePersister};
pub use sandbox_board::SandboxBoard;
pub use settings::Settings;
