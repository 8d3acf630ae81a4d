/// Total length of a ship, in cells.
pub type ShipLength = usize;

/// The state of one grid cell.
///
/// This is the tagged form of the sentinel labels `-1` (unknown), `0` (water) and `n > 0` (part of a ship of length `n`);
/// see [`Cell::from_label`] and [`Cell::label`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Cell {
    /// Not yet determined.
    #[default]
    Unknown,
    /// Known to hold no ship.
    Water,
    /// A segment of a ship whose total length is `length`. `length` is never zero.
    Ship { length: ShipLength },
}

impl Cell {
    /// Convert a sentinel label. Negative labels are unknown, `0` is water, anything else is a ship of that length.
    pub fn from_label(label: i64) -> Self {
        match label {
            0 => Self::Water,
            length if length < 0 => Self::Unknown,
            length => Self::Ship { length: length as ShipLength },
        }
    }

    /// The sentinel label of this cell; the inverse of [`Cell::from_label`].
    pub fn label(&self) -> i64 {
        match self {
            Self::Unknown => -1,
            Self::Water => 0,
            Self::Ship { length } => *length as i64,
        }
    }

    /// Whether this cell holds part of a ship. Unknown cells do not.
    #[inline]
    pub fn is_ship(&self) -> bool {
        matches!(self, Self::Ship { .. })
    }
}
