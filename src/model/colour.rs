use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    White,
    Yellow,
}

impl Colour {
    pub const ALL: [Colour; 7] = [
        Colour::Blue,
        Colour::Green,
        Colour::Orange,
        Colour::Purple,
        Colour::Red,
        Colour::White,
        Colour::Yellow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colour::Blue => "Blue",
            Colour::Green => "Green",
            Colour::Orange => "Orange",
            Colour::Purple => "Purple",
            Colour::Red => "Red",
            Colour::White => "White",
            Colour::Yellow => "Yellow",
        }
    }

    pub fn from_name(name: &str) -> Option<Colour> {
        Colour::ALL.into_iter().find(|colour| colour.name() == name)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
