//! Court end identifier.

use serde::{Deserialize, Serialize};

/// One of the two ends of the court along its long (X) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both ends, left first.
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Sign of this end along the long axis (-1 for left, +1 for right).
    pub fn sign(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Lowercase name used in node names.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// The opposite end.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
