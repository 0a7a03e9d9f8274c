use crate::events::EventEmitter;

use super::{BoardTiles, Colour, Coordinate};

/// Authoritative state transitions announced by the board model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    SelectionChanged {
        selected: Coordinate,
        previous: Option<Coordinate>,
    },
    Swapped {
        a: Coordinate,
        b: Coordinate,
    },
    Cleared(Vec<Coordinate>),
    Dropped {
        from: Coordinate,
        to: Coordinate,
    },
    Filled {
        coord: Coordinate,
        tile: Colour,
    },
    BoardChanged(BoardTiles),
}

/// Push interface the model calls. Every method is fire-and-forget; the
/// model never waits on the view.
pub trait BoardObserver {
    fn selection_changed(&self, selected: Coordinate, previous: Option<Coordinate>);
    fn swapped(&self, a: Coordinate, b: Coordinate);
    fn cleared(&self, coordinates: Vec<Coordinate>);
    fn dropped(&self, from: Coordinate, to: Coordinate);
    fn filled(&self, coord: Coordinate, tile: Colour);
    fn board_changed(&self, tiles: BoardTiles);
}

impl BoardObserver for EventEmitter<BoardEvent> {
    fn selection_changed(&self, selected: Coordinate, previous: Option<Coordinate>) {
        self.emit(BoardEvent::SelectionChanged { selected, previous });
    }

    fn swapped(&self, a: Coordinate, b: Coordinate) {
        self.emit(BoardEvent::Swapped { a, b });
    }

    fn cleared(&self, coordinates: Vec<Coordinate>) {
        self.emit(BoardEvent::Cleared(coordinates));
    }

    fn dropped(&self, from: Coordinate, to: Coordinate) {
        self.emit(BoardEvent::Dropped { from, to });
    }

    fn filled(&self, coord: Coordinate, tile: Colour) {
        self.emit(BoardEvent::Filled { coord, tile });
    }

    fn board_changed(&self, tiles: BoardTiles) {
        self.emit(BoardEvent::BoardChanged(tiles));
    }
}
