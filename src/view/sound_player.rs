use thiserror::Error;

use crate::assets::SoundHandle;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio output is no longer available")]
    OutputClosed,
}

/// Audio output used by the queue worker. Implementations must not block
/// for the length of the clip.
pub trait SoundPlayer: Send {
    fn play(&self, sound: &SoundHandle) -> Result<(), PlaybackError>;
}

/// Used when sound is disabled in the settings.
pub struct MutedPlayer;

impl SoundPlayer for MutedPlayer {
    fn play(&self, _sound: &SoundHandle) -> Result<(), PlaybackError> {
        Ok(())
    }
}
