//! Dice, random sources and talent rules for Lifepath.
//!
//! Provides dice notation and pre-rolled batches, the [`RandomSource`]
//! abstraction with pseudo-random, random.org and scripted implementations,
//! and the pure talent eligibility and pricing rules.

pub mod dice;
pub mod error;
pub mod random;
pub mod talent;

pub use dice::{DiceBatch, DiceExpr, Die};
pub use error::{RandomError, RandomResult};
pub use random::{PseudoRandom, RandomSource, ScriptedRandom, TrueRandom};
pub use talent::{OrSemantics, is_allowed, matches_skills, purchase_cost, raw_cost};
