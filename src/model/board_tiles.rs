use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Colour, Coordinate, GRID_SIZE};

/// Full board contents, row-major (`rows[y][x]`). `None` is an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTiles {
    rows: [[Option<Colour>; GRID_SIZE]; GRID_SIZE],
}

impl Default for BoardTiles {
    fn default() -> Self {
        Self {
            rows: [[None; GRID_SIZE]; GRID_SIZE],
        }
    }
}

impl BoardTiles {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut tiles = BoardTiles::default();
        for coord in Coordinate::all() {
            let colour = Colour::ALL[rng.random_range(0..Colour::ALL.len())];
            tiles.set(coord, Some(colour));
        }
        tiles
    }

    pub fn get(&self, coord: Coordinate) -> Option<Colour> {
        self.rows[coord.y][coord.x]
    }

    pub fn set(&mut self, coord: Coordinate, tile: Option<Colour>) {
        self.rows[coord.y][coord.x] = tile;
    }

    pub fn swap(&mut self, a: Coordinate, b: Coordinate) {
        let tile_a = self.get(a);
        let tile_b = self.get(b);
        self.set(a, tile_b);
        self.set(b, tile_a);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Option<Colour>)> + '_ {
        Coordinate::all().map(move |coord| (coord, self.get(coord)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_board_is_full() {
        let tiles = BoardTiles::random(&mut rand::rng());
        assert!(tiles.iter().all(|(_, tile)| tile.is_some()));
    }

    #[test]
    fn test_swap_exchanges_only_two_cells() {
        let mut tiles = BoardTiles::default();
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(1, 2);
        tiles.set(a, Some(Colour::Red));
        tiles.set(b, Some(Colour::Blue));
        tiles.set(Coordinate::new(5, 5), Some(Colour::Green));

        tiles.swap(a, b);

        assert_eq!(tiles.get(a), Some(Colour::Blue));
        assert_eq!(tiles.get(b), Some(Colour::Red));
        assert_eq!(tiles.get(Coordinate::new(5, 5)), Some(Colour::Green));
        assert_eq!(tiles.iter().filter(|(_, t)| t.is_some()).count(), 3);
    }
}
