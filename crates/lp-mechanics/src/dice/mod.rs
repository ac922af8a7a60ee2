//! Dice types.
//!
//! Life paths are rolled with d20s and sheet attacks are written in d6
//! notation; those are the only dice the tables use.

pub mod batch;

pub use batch::DiceBatch;

use serde::{Deserialize, Serialize};

use crate::error::RandomResult;
use crate::random::RandomSource;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided die.
    D6,
    /// Twenty-sided die.
    D20,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D20 => 20,
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A count of identical dice, written "14d20".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpr {
    /// How many dice.
    pub count: u32,
    /// Which die.
    pub die: Die,
}

impl DiceExpr {
    /// `count` dice of type `die`.
    pub fn new(count: u32, die: Die) -> Self {
        Self { count, die }
    }

    /// Roll every die, one value per die, in draw order.
    pub fn roll(&self, source: &mut dyn RandomSource) -> RandomResult<Vec<u32>> {
        source.draw(self.count as usize, 1, self.die.sides())
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)
    }
}
