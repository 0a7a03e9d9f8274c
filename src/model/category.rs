use super::Colour;

const HIGHLIGHT_SUFFIX: &str = "HL";
const EMPTY_KEY: &str = "Empty";

/// What a cell can display. Every colour has a normal and a highlighted
/// variant; `Empty` stands for a cell without a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Empty,
    Jewel(Colour),
    Highlighted(Colour),
}

impl Category {
    pub const COUNT: usize = 1 + 2 * Colour::ALL.len();

    pub fn all() -> impl Iterator<Item = Category> {
        std::iter::once(Category::Empty)
            .chain(Colour::ALL.into_iter().map(Category::Jewel))
            .chain(Colour::ALL.into_iter().map(Category::Highlighted))
    }

    pub fn for_tile(tile: Option<Colour>) -> Category {
        tile.map_or(Category::Empty, Category::Jewel)
    }

    /// Dense index in `0..COUNT`, used to address asset tables.
    pub fn index(&self) -> usize {
        match self {
            Category::Empty => 0,
            Category::Jewel(colour) => 1 + colour.index(),
            Category::Highlighted(colour) => 1 + Colour::ALL.len() + colour.index(),
        }
    }

    pub fn tile(&self) -> Option<Colour> {
        match self {
            Category::Empty => None,
            Category::Jewel(colour) | Category::Highlighted(colour) => Some(*colour),
        }
    }

    /// Asset file key: `Empty`, `Red`, `RedHL`, ...
    pub fn asset_key(&self) -> String {
        match self {
            Category::Empty => EMPTY_KEY.to_string(),
            Category::Jewel(colour) => colour.name().to_string(),
            Category::Highlighted(colour) => format!("{}{}", colour.name(), HIGHLIGHT_SUFFIX),
        }
    }

    pub fn from_asset_key(key: &str) -> Option<Category> {
        if key == EMPTY_KEY {
            return Some(Category::Empty);
        }
        match key.strip_suffix(HIGHLIGHT_SUFFIX) {
            Some(name) => Colour::from_name(name).map(Category::Highlighted),
            None => Colour::from_name(key).map(Category::Jewel),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.asset_key())
    }
}
