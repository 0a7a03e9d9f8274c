use log::trace;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::events::EventEmitter;
use crate::model::{Coordinate, GameCommand};

/// Identity of a clickable grid widget, handed out at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u32);

/// Maps widget clicks back to coordinates and forwards them to the board
/// model. It never touches the view; visual changes come back through the
/// action queue.
pub struct InputDispatcher {
    targets: RefCell<HashMap<WidgetId, Coordinate>>,
    next_id: Cell<u32>,
    command_emitter: EventEmitter<GameCommand>,
}

impl InputDispatcher {
    pub fn new(command_emitter: EventEmitter<GameCommand>) -> Self {
        Self {
            targets: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            command_emitter,
        }
    }

    pub fn register(&self, coord: Coordinate) -> WidgetId {
        let id = WidgetId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.targets.borrow_mut().insert(id, coord);
        id
    }

    /// Returns false for widgets that were never registered.
    pub fn dispatch(&self, widget: WidgetId) -> bool {
        let target = self.targets.borrow().get(&widget).copied();
        let Some(coord) = target else {
            trace!(target: "input_dispatcher", "Click on unknown widget {:?}", widget);
            return false;
        };
        trace!(target: "input_dispatcher", "Click at {}", coord);
        self.command_emitter.emit(GameCommand::Interact(coord));
        true
    }

    pub fn new_game(&self) {
        self.command_emitter.emit(GameCommand::NewGame);
    }
}
