#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Match,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 1] = [SoundEvent::Match];

    /// File stem of the sound asset.
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::Match => "match",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for SoundEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
