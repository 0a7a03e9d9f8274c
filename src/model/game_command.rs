use super::Coordinate;

/// Requests sent from the view to the board model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Interact(Coordinate),
    NewGame,
}
