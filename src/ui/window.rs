use gio::SimpleAction;
use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, Button, ContentFit, HeaderBar, Orientation, Overlay, Picture,
};
use log::{error, info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use crate::assets::AssetCache;
use crate::destroyable::Destroyable;
use crate::events::Channel;
use crate::game::{JsonAutosave, SandboxBoard, Settings, StatePersister};
use crate::model::{BoardEvent, GameCommand};
use crate::view::{
    ui_channel, ActionQueue, ChannelPainter, ChannelSoundPlayer, GridView, InputDispatcher,
    MutedPlayer, SoundPlayer, TaskContext,
};

use super::puzzle_grid_ui::{texture_for, PuzzleGridUI};

const DATA_DIR_NAME: &str = "gemcascade";

pub fn settings_path() -> PathBuf {
    glib::user_data_dir().join(DATA_DIR_NAME).join("settings.json")
}

fn default_autosave_path() -> PathBuf {
    glib::user_data_dir()
        .join(DATA_DIR_NAME)
        .join("savegame")
        .join("autosave.json")
}

pub fn build_ui(app: &Application, assets: Arc<AssetCache>, settings: &Settings) {
    let (command_emitter, command_observer) = Channel::<GameCommand>::new();
    let (board_emitter, board_observer) = Channel::<BoardEvent>::new();
    let (ui_sender, ui_receiver) = ui_channel();

    let dispatcher = Rc::new(InputDispatcher::new(command_emitter));
    let grid_ui = PuzzleGridUI::new(&assets, dispatcher.clone());
    PuzzleGridUI::attach_updates(&grid_ui, ui_receiver);

    let player: Box<dyn SoundPlayer> = if settings.sound_enabled {
        Box::new(ChannelSoundPlayer::new(ui_sender.clone()))
    } else {
        info!(target: "window", "Sound disabled in settings");
        Box::new(MutedPlayer)
    };
    let view = GridView::new(assets.clone(), Box::new(ChannelPainter::new(ui_sender)));
    let context = TaskContext {
        assets: assets.clone(),
        player,
        step_delay: settings.step_delay(),
    };
    let queue = match ActionQueue::start(view, context) {
        Ok(queue) => queue,
        Err(err) => {
            error!(target: "window", "Could not start the action queue: {}", err);
            app.quit();
            return;
        }
    };
    let queue_subscription = queue.observe(&board_observer);

    let autosave = JsonAutosave::new(
        settings
            .autosave_path
            .clone()
            .unwrap_or_else(default_autosave_path),
    );
    let saved_game = autosave.restore();
    if saved_game.is_none() {
        info!(target: "window", "No saved game found, starting a new one");
    }
    let board = SandboxBoard::new(saved_game, Box::new(board_emitter), &command_observer);
    board.borrow().publish();

    let new_game_button = Button::with_label("New Game");
    {
        let dispatcher = dispatcher.clone();
        new_game_button.connect_clicked(move |_| dispatcher.new_game());
    }
    let header_bar = HeaderBar::new();
    header_bar.pack_start(&new_game_button);

    let content = gtk4::Box::builder()
        .name("game-box")
        .orientation(Orientation::Vertical)
        .margin_top(10)
        .margin_bottom(10)
        .margin_start(10)
        .margin_end(10)
        .build();
    match assets.background() {
        Some(background) => {
            let picture = Picture::new();
            picture.set_paintable(Some(&texture_for(background)));
            picture.set_content_fit(ContentFit::Cover);
            picture.set_can_shrink(true);
            let overlay = Overlay::builder().child(&picture).build();
            let grid = grid_ui.borrow().grid.clone();
            overlay.add_overlay(&grid);
            // the grid must never be clipped by a small background
            overlay.set_measure_overlay(&grid, true);
            content.append(&overlay);
        }
        None => content.append(&grid_ui.borrow().grid),
    }

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Gem Cascade")
        .resizable(false)
        .child(&content)
        .build();
    window.set_titlebar(Some(&header_bar));

    let new_game_action = SimpleAction::new("new-game", None);
    {
        let dispatcher = dispatcher.clone();
        new_game_action.connect_activate(move |_, _| dispatcher.new_game());
    }
    window.add_action(&new_game_action);
    app.set_accels_for_action("win.new-game", &["<Control>n"]);

    // Queue and subscription live until the window closes. The worker is
    // detached then; unfinished replay is dropped with the process.
    let running = RefCell::new(Some((queue, queue_subscription)));
    window.connect_close_request(move |_| {
        if let Err(err) = autosave.persist(&board.borrow().snapshot()) {
            warn!(target: "window", "Autosave to {} failed: {}", autosave.path().display(), err);
        }
        board.borrow_mut().destroy();
        grid_ui.borrow_mut().destroy();
        if let Some((queue, subscription)) = running.borrow_mut().take() {
            subscription.unsubscribe();
            drop(queue);
        }
        glib::Propagation::Proceed
    });

    window.present();
}
