//! Gem tokens and board coordinates.

use std::fmt;

/// A cell on the board as `(col, row)`. Row 0 is the ground row.
pub type Pos = (usize, usize);

/// Category of a gem. Matches are runs of equal type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GemType {
    Purple,
    Pink,
    Yellow,
    Blue,
    Green,
}

impl GemType {
    /// All gem types, in declaration order. A board with `k` types uses the first `k`.
    pub const ALL: [GemType; 5] = [
        GemType::Purple,
        GemType::Pink,
        GemType::Yellow,
        GemType::Blue,
        GemType::Green,
    ];

    /// The first `count` gem types.
    pub fn in_play(count: usize) -> Vec<GemType> {
        GemType::ALL.iter().copied().take(count).collect()
    }

    /// Single-letter symbol used in text layouts.
    pub fn symbol(self) -> char {
        match self {
            GemType::Purple => 'A',
            GemType::Pink => 'B',
            GemType::Yellow => 'C',
            GemType::Blue => 'D',
            GemType::Green => 'E',
        }
    }

    /// Inverse of [`GemType::symbol`] (case-insensitive).
    pub fn from_symbol(c: char) -> Option<GemType> {
        match c.to_ascii_uppercase() {
            'A' => Some(GemType::Purple),
            'B' => Some(GemType::Pink),
            'C' => Some(GemType::Yellow),
            'D' => Some(GemType::Blue),
            'E' => Some(GemType::Green),
            _ => None,
        }
    }

    /// Position of this type in [`GemType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GemType::Purple => "purple",
            GemType::Pink => "pink",
            GemType::Yellow => "yellow",
            GemType::Blue => "blue",
            GemType::Green => "green",
        };
        f.write_str(name)
    }
}

/// Stable identity of a gem, unique within one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GemId(pub u32);

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A gem occupying one board cell.
///
/// `pos` is the logical cell and always equals the index of the cell that
/// stores the gem. Only the board changes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gem {
    pub(crate) id: GemId,
    pub(crate) kind: GemType,
    pub(crate) pos: Pos,
    pub(crate) matched: bool,
    pub(crate) selected: bool,
}

impl Gem {
    pub(crate) fn new(id: GemId, kind: GemType, pos: Pos) -> Self {
        Self {
            id,
            kind,
            pos,
            matched: false,
            selected: false,
        }
    }

    /// Stable identity of this gem.
    pub fn id(&self) -> GemId {
        self.id
    }

    /// Gem type.
    pub fn kind(&self) -> GemType {
        self.kind
    }

    /// Cell the gem occupies.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Set during match detection, consumed by removal.
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Presentation-only flag; ignored by matching.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Read-only snapshot for the presentation layer.
    pub fn descriptor(&self) -> GemDescriptor {
        GemDescriptor {
            id: self.id,
            kind: self.kind,
            pos: self.pos,
        }
    }
}

/// Read-only snapshot of a gem handed out to callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GemDescriptor {
    /// Identity of the described gem
    pub id: GemId,
    /// Its type
    pub kind: GemType,
    /// Cell it occupies
    pub pos: Pos,
}
