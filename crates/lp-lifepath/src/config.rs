//! Configuration for a life-path run.

use serde::{Deserialize, Serialize};

use lp_mechanics::{OrSemantics, PseudoRandom, RandomResult, RandomSource, TrueRandom};

/// Who makes the choices during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// The player is prompted for every choice.
    #[default]
    Interactive,
    /// Every choice is made at random.
    Automatic,
}

/// Configuration for one generated character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Who makes the choices.
    pub mode: SelectionMode,
    /// Experience to spend after the life path.
    pub xp: u32,
    /// Seed for every local generator; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Roll life-path dice through random.org instead of locally.
    pub true_random: bool,
    /// How "A or B" talent prerequisites are read.
    pub or_semantics: OrSemantics,
}

impl GeneratorConfig {
    /// Set the XP budget.
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the selection mode.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use random.org for life-path dice.
    pub fn with_true_random(mut self, true_random: bool) -> Self {
        self.true_random = true_random;
        self
    }

    /// Set how OR prerequisites are read.
    pub fn with_or_semantics(mut self, semantics: OrSemantics) -> Self {
        self.or_semantics = semantics;
        self
    }

    /// Source for the life-path dice batch and the extra archetype rolls.
    pub fn dice_source(&self) -> RandomResult<Box<dyn RandomSource>> {
        if self.true_random {
            Ok(Box::new(TrueRandom::new()?))
        } else {
            Ok(Box::new(self.local_stream(0)))
        }
    }

    /// Generator for height, age and XP spending.
    pub fn local_source(&self) -> PseudoRandom {
        self.local_stream(1)
    }

    /// Generator for automatic choices.
    pub fn choice_source(&self) -> PseudoRandom {
        self.local_stream(2)
    }

    fn local_stream(&self, stream: u64) -> PseudoRandom {
        match self.seed {
            Some(seed) => PseudoRandom::seeded(seed.wrapping_add(stream)),
            None => PseudoRandom::from_entropy(),
        }
    }
}
