//! Neighborhood shapes and the 3x3 pattern layout.
//!
//! A pattern packs the parity of a cell and its eight neighbors into nine
//! bits, most significant first:
//!
//! ```text
//! NW N  NE      256 128  64
//! W  C  E   =>   32  16   8
//! SW S  SE        4   2   1
//! ```

use crate::State;

/// Pattern bit of the center cell.
pub const CENTER_BIT: u16 = 0x10;

/// Number of distinct 3x3 patterns.
pub const PATTERN_COUNT: usize = 512;

/// Raw neighbor states, indexed by [`Direction`].
pub type Neighbors = [State; 8];

/// The eight neighbor positions, in [`Neighbors`] order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    NW = 0,
    North = 1,
    NE = 2,
    West = 3,
    East = 4,
    SW = 5,
    South = 6,
    SE = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NW,   Direction::North, Direction::NE,
        Direction::West,                   Direction::East,
        Direction::SW,   Direction::South, Direction::SE,
    ];

    /// The bit this neighbor occupies in a 3x3 pattern.
    #[inline]
    pub const fn pattern_bit(self) -> u16 {
        match self {
            Direction::NW    => 0x100,
            Direction::North => 0x080,
            Direction::NE    => 0x040,
            Direction::West  => 0x020,
            Direction::East  => 0x008,
            Direction::SW    => 0x004,
            Direction::South => 0x002,
            Direction::SE    => 0x001,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which neighbors take part in a rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// All eight neighbors.
    #[default]
    Moore,
    /// Six neighbors: the NE and SW corners are ignored.
    Hexagonal,
    /// The four orthogonal neighbors.
    VonNeumann,
}

impl Neighborhood {
    /// Pattern bits that participate, center included.
    #[inline]
    pub const fn mask(self) -> u16 {
        match self {
            Neighborhood::Moore => 0x1ff,
            Neighborhood::Hexagonal => 0x1bb,
            Neighborhood::VonNeumann => 0x0ba,
        }
    }

    #[inline]
    pub const fn neighbor_count(self) -> u8 {
        match self {
            Neighborhood::Moore => 8,
            Neighborhood::Hexagonal => 6,
            Neighborhood::VonNeumann => 4,
        }
    }

    /// Suffix written after the birth/survival digits.
    #[inline]
    pub const fn suffix(self) -> &'static str {
        match self {
            Neighborhood::Moore => "",
            Neighborhood::Hexagonal => "H",
            Neighborhood::VonNeumann => "V",
        }
    }

    /// Base64 characters in a MAP payload for this neighborhood.
    ///
    /// A MAP holds `2^(n+1)` bits, six per character, rounded up.
    #[inline]
    pub const fn map_len(self) -> usize {
        let bits = 1usize << (self.neighbor_count() + 1);
        bits.div_ceil(6)
    }

    /// Neighborhood implied by a MAP payload length, if any.
    pub fn from_map_len(len: usize) -> Option<Self> {
        [
            Neighborhood::Moore,
            Neighborhood::Hexagonal,
            Neighborhood::VonNeumann,
        ]
        .into_iter()
        .find(|nbhd| nbhd.map_len() == len)
    }

    /// Whether a neighbor position participates.
    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.mask() & dir.pattern_bit() != 0
    }

    /// Number of live neighbors in `pattern` under this neighborhood.
    #[inline]
    pub const fn live_neighbors(self, pattern: u16) -> u32 {
        (pattern & self.mask() & !CENTER_BIT).count_ones()
    }

    /// One bit per distinct state among the participating neighbors.
    #[inline]
    pub fn type_mask(self, neighbors: &Neighbors) -> u32 {
        let mut mask = 0u32;
        for dir in Direction::ALL {
            if self.contains(dir) {
                let state = neighbors[dir.index()];
                debug_assert!(state < 32, "state {state} out of range");
                mask |= 1 << state;
            }
        }
        mask
    }
}

/// Pack the parity of the center and its neighbors into a 3x3 pattern.
#[inline]
pub fn parity_pattern(center: State, neighbors: &Neighbors) -> u16 {
    let mut pattern = if center & 1 != 0 { CENTER_BIT } else { 0 };
    for dir in Direction::ALL {
        if neighbors[dir.index()] & 1 != 0 {
            pattern |= dir.pattern_bit();
        }
    }
    pattern
}
