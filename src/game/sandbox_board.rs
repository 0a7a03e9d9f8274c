use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

use crate::destroyable::Destroyable;
use crate::events::{EventHandler, EventObserver, Unsubscriber};
use crate::model::{BoardObserver, BoardSnapshot, BoardTiles, Coordinate, GameCommand};

/// Minimal stand-in for the rules engine so the window has something to
/// drive. It selects and swaps tiles; it does not detect matches, score, or
/// cascade.
pub struct SandboxBoard {
    tiles: BoardTiles,
    selected: Option<Coordinate>,
    game_id: Uuid,
    observer: Box<dyn BoardObserver>,
    command_subscription: Option<Unsubscriber<GameCommand>>,
}

impl Destroyable for SandboxBoard {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl EventHandler<GameCommand> for SandboxBoard {
    fn handle_event(&mut self, event: &GameCommand) {
        match event {
            GameCommand::Interact(coord) => self.interact(*coord),
            GameCommand::NewGame => self.new_game(),
        }
    }
}

impl SandboxBoard {
    pub fn new(
        snapshot: Option<BoardSnapshot>,
        observer: Box<dyn BoardObserver>,
        command_observer: &EventObserver<GameCommand>,
    ) -> Rc<RefCell<Self>> {
        let (tiles, game_id) = match snapshot {
            Some(snapshot) => (snapshot.tiles, snapshot.game_id),
            None => (BoardTiles::random(&mut rand::rng()), Uuid::new_v4()),
        };
        let board = Rc::new(RefCell::new(Self {
            tiles,
            selected: None,
            game_id,
            observer,
            command_subscription: None,
        }));
        SandboxBoard::wire_subscription(board.clone(), command_observer);
        board
    }

    fn wire_subscription(board: Rc<RefCell<Self>>, command_observer: &EventObserver<GameCommand>) {
        let subscription = {
            let board = Rc::downgrade(&board);
            command_observer.subscribe(move |command| {
                if let Some(board) = board.upgrade() {
                    board.borrow_mut().handle_event(command);
                }
            })
        };
        board.borrow_mut().command_subscription = Some(subscription);
    }

    pub fn tiles(&self) -> &BoardTiles {
        &self.tiles
    }

    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.game_id, self.tiles)
    }

    /// Announces the whole board, used for the first paint.
    pub fn publish(&self) {
        self.observer.board_changed(self.tiles);
    }

    fn interact(&mut self, coord: Coordinate) {
        if self.tiles.get(coord).is_none() {
            trace!(target: "sandbox_board", "Ignoring click on empty {}", coord);
            return;
        }
        match self.selected {
            None => {
                self.selected = Some(coord);
                self.observer.selection_changed(coord, None);
            }
            Some(selected) if selected == coord => {
                trace!(target: "sandbox_board", "{} already selected", coord);
            }
            Some(selected) if selected.is_adjacent(&coord) => {
                self.tiles.swap(selected, coord);
                self.selected = None;
                self.observer.swapped(selected, coord);
            }
            Some(selected) => {
                self.selected = Some(coord);
                self.observer.selection_changed(coord, Some(selected));
            }
        }
    }

    fn new_game(&mut self) {
        self.tiles = BoardTiles::random(&mut rand::rng());
        self.selected = None;
        self.game_id = Uuid::new_v4();
        debug!(target: "sandbox_board", "New game {}", self.game_id);
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Channel, EventEmitter};
    use crate::model::{BoardEvent, Colour};

    fn setup(
        snapshot: Option<BoardSnapshot>,
    ) -> (
        Rc<RefCell<SandboxBoard>>,
        EventEmitter<GameCommand>,
        Rc<RefCell<Vec<BoardEvent>>>,
    ) {
        let (board_emitter, board_observer) = Channel::<BoardEvent>::new();
        let (command_emitter, command_observer) = Channel::<GameCommand>::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let received = received.clone();
            board_observer.subscribe(move |event: &BoardEvent| received.borrow_mut().push(event.clone()))
        };
        std::mem::forget(subscription);
        let board = SandboxBoard::new(snapshot, Box::new(board_emitter), &command_observer);
        (board, command_emitter, received)
    }

    fn full_board(colour: Colour) -> BoardSnapshot {
        let mut tiles = BoardTiles::default();
        for coord in Coordinate::all() {
            tiles.set(coord, Some(colour));
        }
        BoardSnapshot::new(Uuid::new_v4(), tiles)
    }

    #[test]
    fn test_select_then_move_selection() {
        let (_board, commands, received) = setup(Some(full_board(Colour::Red)));
        let first = Coordinate::new(0, 0);
        let far = Coordinate::new(5, 5);

        commands.emit(GameCommand::Interact(first));
        commands.emit(GameCommand::Interact(far));

        assert_eq!(
            *received.borrow(),
            vec![
                BoardEvent::SelectionChanged {
                    selected: first,
                    previous: None
                },
                BoardEvent::SelectionChanged {
                    selected: far,
                    previous: Some(first)
                },
            ]
        );
    }

    #[test]
    fn test_adjacent_click_swaps() {
        let snapshot = full_board(Colour::Red);
        let mut tiles = snapshot.tiles;
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(1, 2);
        tiles.set(b, Some(Colour::Blue));
        let (board, commands, received) = setup(Some(BoardSnapshot::new(snapshot.game_id, tiles)));

        commands.emit(GameCommand::Interact(a));
        commands.emit(GameCommand::Interact(b));

        assert_eq!(received.borrow().last(), Some(&BoardEvent::Swapped { a, b }));
        assert_eq!(board.borrow().tiles().get(a), Some(Colour::Blue));
        assert_eq!(board.borrow().selected(), None);
    }

    #[test]
    fn test_new_game_publishes_board() {
        let (board, commands, received) = setup(None);
        let old_id = board.borrow().snapshot().game_id;

        commands.emit(GameCommand::NewGame);

        let tiles = *board.borrow().tiles();
        assert_eq!(*received.borrow(), vec![BoardEvent::BoardChanged(tiles)]);
        assert_ne!(board.borrow().snapshot().game_id, old_id);
    }

    #[test]
    fn test_destroy_stops_listening() {
        let (board, commands, received) = setup(Some(full_board(Colour::Green)));
        board.borrow_mut().destroy();

        commands.emit(GameCommand::Interact(Coordinate::new(2, 2)));

        assert!(received.borrow().is_empty());
        assert!(!commands.has_listeners());
    }
}
