use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::trace;

use crate::assets::{ImageHandle, SoundHandle};
use crate::model::{Category, Coordinate};

use super::{CellPainter, PlaybackError, SoundPlayer};

/// Work the queue worker hands to the UI thread. Widgets are only touched
/// there.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Paint {
        coord: Coordinate,
        category: Category,
    },
    PlaySound(SoundHandle),
}

/// The receiving half is a `Stream`, awaited on the UI main loop.
pub fn ui_channel() -> (UnboundedSender<UiUpdate>, UnboundedReceiver<UiUpdate>) {
    mpsc::unbounded()
}

pub struct ChannelPainter {
    sender: UnboundedSender<UiUpdate>,
}

impl ChannelPainter {
    pub fn new(sender: UnboundedSender<UiUpdate>) -> Self {
        Self { sender }
    }
}

impl CellPainter for ChannelPainter {
    fn paint(&self, coord: Coordinate, image: &ImageHandle) {
        let update = UiUpdate::Paint {
            coord,
            category: image.category(),
        };
        // the UI is gone when the window closed mid-replay
        if self.sender.unbounded_send(update).is_err() {
            trace!(target: "ui_bridge", "UI closed, dropping paint of {}", coord);
        }
    }
}

pub struct ChannelSoundPlayer {
    sender: UnboundedSender<UiUpdate>,
}

impl ChannelSoundPlayer {
    pub fn new(sender: UnboundedSender<UiUpdate>) -> Self {
        Self { sender }
    }
}

impl SoundPlayer for ChannelSoundPlayer {
    fn play(&self, sound: &SoundHandle) -> Result<(), PlaybackError> {
        self.sender
            .unbounded_send(UiUpdate::PlaySound(sound.clone()))
            .map_err(|_| PlaybackError::OutputClosed)
    }
}
