use std::fmt;

/// What a tile holds: a mine, or the number of mines among its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    Mine,
    Count(u8)
}

impl Adjacency {
    pub fn is_mine(&self) -> bool {
        match *self {
            Adjacency::Mine => true,
            _ => false
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    x: usize,
    y: usize,
    pub(crate) adjacency: Adjacency,
    pub(crate) exposed: bool,
    pub(crate) flagged: bool
}

impl Tile {
    pub fn new(x: usize, y: usize) -> Tile {
        Tile{x, y, adjacency: Adjacency::Count(0), exposed: false, flagged: false}
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    pub fn is_mine(&self) -> bool {
        self.adjacency.is_mine()
    }

    pub fn is_exposed(&self) -> bool {
        self.exposed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// A flag left on a safe tile, only visible once the tile is exposed.
    pub fn is_wrong_flag(&self) -> bool {
        self.exposed && self.flagged && !self.is_mine()
    }

    pub fn to_char(&self) -> char {
        match (self.exposed, self.flagged, self.adjacency) {
            (true, true, Adjacency::Count(_)) => 'X',
            (true, _, Adjacency::Mine) => '*',
            (true, _, Adjacency::Count(0)) => ' ',
            (true, _, Adjacency::Count(n)) => (b'0' + n) as char,
            (false, true, _) => '!',
            (false, false, _) => '.'
        }
    }

    /// Position and visible state, hiding mine data on covered tiles.
    pub fn to_debug_string(&self) -> String {
        format!("({:2},{:2},{})", self.x, self.y, self.status())
    }

    fn status(&self) -> String {
        match (self.exposed, self.flagged, self.adjacency) {
            (true, _, Adjacency::Mine) => String::from("BOMB"),
            (true, _, Adjacency::Count(n)) => n.to_string(),
            (false, true, _) => String::from("flagged"),
            (false, false, _) => String::from("blank")
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
