//! A pre-rolled batch of dice consumed one value at a time.

use crate::error::{RandomError, RandomResult};
use crate::random::RandomSource;

use super::DiceExpr;

/// Dice rolled up front and handed out last-rolled-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceBatch {
    values: Vec<u32>,
}

impl DiceBatch {
    /// Roll `expr` once and keep every value.
    pub fn roll(expr: DiceExpr, source: &mut dyn RandomSource) -> RandomResult<Self> {
        let values = expr.roll(source)?;
        tracing::debug!(dice = %expr, ?values, "rolled dice batch");
        Ok(Self { values })
    }

    /// Wrap already-rolled values.
    pub fn from_values(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Take the most recently rolled value that is still unused.
    pub fn pop(&mut self) -> RandomResult<u32> {
        self.values.pop().ok_or(RandomError::BatchEmpty)
    }

    /// Sum of the next `n` pops.
    pub fn pop_sum(&mut self, n: usize) -> RandomResult<u32> {
        (0..n).map(|_| self.pop()).sum()
    }

    /// Values not yet popped.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
