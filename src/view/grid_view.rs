use log::trace;
use std::sync::Arc;

use crate::assets::{AssetCache, ImageHandle};
use crate::model::{BoardTiles, Category, Colour, Coordinate, GRID_SIZE};

use super::TaskError;

/// Toolkit seam: receives every image change so the widgets can repaint.
pub trait CellPainter: Send {
    fn paint(&self, coord: Coordinate, image: &ImageHandle);
}

/// Painter for headless use.
pub struct NullPainter;

impl CellPainter for NullPainter {
    fn paint(&self, _coord: Coordinate, _image: &ImageHandle) {}
}

#[derive(Debug, Clone)]
struct Cell {
    category: Category,
    image: ImageHandle,
}

/// The displayed 8x8 grid. It knows nothing about game rules: every change
/// is an explicit instruction addressed to a single coordinate.
///
/// Owned by the queue worker once the queue starts; nothing else mutates it.
pub struct GridView {
    assets: Arc<AssetCache>,
    cells: Vec<Cell>,
    painter: Box<dyn CellPainter>,
}

impl GridView {
    pub fn new(assets: Arc<AssetCache>, painter: Box<dyn CellPainter>) -> Self {
        let empty = Cell {
            category: Category::Empty,
            image: assets.image(Category::Empty),
        };
        Self {
            assets,
            cells: vec![empty; GRID_SIZE * GRID_SIZE],
            painter,
        }
    }

    pub fn headless(assets: Arc<AssetCache>) -> Self {
        GridView::new(assets, Box::new(NullPainter))
    }

    fn index(coord: Coordinate) -> usize {
        coord.y * GRID_SIZE + coord.x
    }

    fn display(&mut self, coord: Coordinate, category: Category) {
        trace!(target: "grid_view", "{} -> {}", coord, category);
        let image = self.assets.image(category);
        self.painter.paint(coord, &image);
        self.cells[GridView::index(coord)] = Cell { category, image };
    }

    /// Shows the normal image for `tile`, or the empty image for `None`.
    pub fn set_cell(&mut self, coord: Coordinate, tile: Option<Colour>) {
        self.display(coord, Category::for_tile(tile));
    }

    pub fn clear_cell(&mut self, coord: Coordinate) {
        self.display(coord, Category::Empty);
    }

    /// Switches the cell to the highlighted variant of the tile it shows.
    pub fn highlight_cell(&mut self, coord: Coordinate) -> Result<(), TaskError> {
        let tile = self
            .current_tile(coord)
            .ok_or(TaskError::NothingToHighlight(coord))?;
        self.display(coord, Category::Highlighted(tile));
        Ok(())
    }

    /// Exchanges the tiles shown at `a` and `b`, dropping any highlight.
    pub fn swap_cells(&mut self, a: Coordinate, b: Coordinate) {
        let tile_a = self.current_tile(a);
        let tile_b = self.current_tile(b);
        self.set_cell(a, tile_b);
        self.set_cell(b, tile_a);
    }

    pub fn current_category(&self, coord: Coordinate) -> Category {
        self.cells[GridView::index(coord)].category
    }

    pub fn current_tile(&self, coord: Coordinate) -> Option<Colour> {
        self.current_category(coord).tile()
    }

    pub fn image_at(&self, coord: Coordinate) -> &ImageHandle {
        &self.cells[GridView::index(coord)].image
    }

    /// Displayed tiles, highlights folded into their colour.
    pub fn tiles(&self) -> BoardTiles {
        let mut tiles = BoardTiles::default();
        for coord in Coordinate::all() {
            tiles.set(coord, self.current_tile(coord));
        }
        tiles
    }
}
