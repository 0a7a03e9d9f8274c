mod action_queue;
mod grid_view;
mod input_dispatcher;
mod sound_player;
mod task;
mod ui_bridge;

pub use action_queue::ActionQueue;
pub use grid_view::{CellPainter, GridView, NullPainter};
pub use input_dispatcher::{InputDispatcher, WidgetId};
pub use sound_player::{MutedPlayer, PlaybackError, SoundPlayer};
pub use task::{Task, TaskContext, TaskError};
pub use ui_bridge::{ui_channel, ChannelPainter, ChannelSoundPlayer, UiUpdate};
