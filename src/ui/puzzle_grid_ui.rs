use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use gtk4::gdk;
use gtk4::prelude::*;
use gtk4::{Button, Grid, Image, MediaFile};
use image::RgbaImage;
use log::{trace, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::assets::{AssetCache, SoundHandle};
use crate::destroyable::Destroyable;
use crate::model::{Category, Coordinate, SoundEvent};
use crate::view::{InputDispatcher, UiUpdate};

const CELL_SIZE: i32 = 70;
const CELL_SPACING: u32 = 5;

/// The 8x8 button grid. Buttons only report clicks; their images change
/// when the queue worker posts a [`UiUpdate`].
pub struct PuzzleGridUI {
    pub grid: Grid,
    cells: HashMap<Coordinate, Image>,
    textures: HashMap<Category, gdk::Texture>,
    sounds: HashMap<SoundEvent, MediaFile>,
}

impl Destroyable for PuzzleGridUI {
    fn destroy(&mut self) {
        for media in self.sounds.values() {
            media.pause();
        }
        self.sounds.clear();
    }
}

pub(crate) fn texture_for(image: &RgbaImage) -> gdk::Texture {
    let (width, height) = image.dimensions();
    let bytes = glib::Bytes::from_owned(image.as_raw().clone());
    gdk::MemoryTexture::new(
        width as i32,
        height as i32,
        gdk::MemoryFormat::R8g8b8a8,
        &bytes,
        width as usize * 4,
    )
    .upcast()
}

/// Streams the clip from the bytes loaded at startup; nothing is read from
/// disk at play time.
fn media_for(sound: &SoundHandle) -> MediaFile {
    trace!(
        target: "puzzle_grid_ui",
        "Preparing {} ({:?}, {} bytes)",
        sound.event(),
        sound.format(),
        sound.bytes().len()
    );
    let bytes = glib::Bytes::from(sound.bytes());
    let stream = gio::MemoryInputStream::from_bytes(&bytes);
    MediaFile::for_input_stream(&stream)
}

impl PuzzleGridUI {
    pub fn new(assets: &AssetCache, dispatcher: Rc<InputDispatcher>) -> Rc<RefCell<Self>> {
        let grid = Grid::builder()
            .row_spacing(CELL_SPACING)
            .column_spacing(CELL_SPACING)
            .halign(gtk4::Align::Center)
            .valign(gtk4::Align::Center)
            .css_classes(["puzzle-grid"])
            .build();

        let textures: HashMap<Category, gdk::Texture> = Category::all()
            .map(|category| (category, texture_for(assets.image(category).image())))
            .collect();
        let sounds: HashMap<SoundEvent, MediaFile> = SoundEvent::ALL
            .into_iter()
            .map(|event| (event, media_for(&assets.sound(event))))
            .collect();

        let mut cells = HashMap::new();
        for coord in Coordinate::all() {
            let image = Image::new();
            image.set_paintable(textures.get(&Category::Empty));
            image.set_pixel_size(CELL_SIZE);

            let button = Button::builder()
                .child(&image)
                .has_frame(false)
                .width_request(CELL_SIZE)
                .height_request(CELL_SIZE)
                .build();
            let widget = dispatcher.register(coord);
            {
                let dispatcher = Rc::clone(&dispatcher);
                button.connect_clicked(move |_| {
                    dispatcher.dispatch(widget);
                });
            }

            grid.attach(&button, coord.x as i32, coord.y as i32, 1, 1);
            cells.insert(coord, image);
        }

        Rc::new(RefCell::new(Self {
            grid,
            cells,
            textures,
            sounds,
        }))
    }

    /// Applies worker updates on the GTK main loop as they arrive, until the
    /// grid is dropped or the worker side closes.
    pub fn attach_updates(grid_ui: &Rc<RefCell<Self>>, mut receiver: UnboundedReceiver<UiUpdate>) {
        let grid_ui = Rc::downgrade(grid_ui);
        glib::spawn_future_local(async move {
            while let Some(update) = receiver.next().await {
                let Some(grid_ui) = grid_ui.upgrade() else {
                    return;
                };
                grid_ui.borrow_mut().apply(update);
            }
            trace!(target: "puzzle_grid_ui", "Worker closed its side, stop listening");
        });
    }

    fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Paint { coord, category } => {
                match (self.cells.get(&coord), self.textures.get(&category)) {
                    (Some(image), Some(texture)) => image.set_paintable(Some(texture)),
                    _ => warn!(target: "puzzle_grid_ui", "Nothing to paint {} with {}", coord, category),
                }
            }
            UiUpdate::PlaySound(sound) => self.play(&sound),
        }
    }

    fn play(&self, sound: &SoundHandle) {
        let Some(media) = self.sounds.get(&sound.event()) else {
            trace!(target: "puzzle_grid_ui", "Sounds released, skipping {}", sound.event());
            return;
        };
        if let Some(err) = media.error() {
            warn!(
                target: "puzzle_grid_ui",
                "Cannot play {} from {}: {}",
                sound.event(),
                sound.path().display(),
                err
            );
            return;
        }
        media.seek(0);
        media.play();
    }
}
