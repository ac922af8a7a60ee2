//! Life-path character generation.
//!
//! Walks the nine table-driven steps that turn a batch of d20 rolls into a
//! character, applies the grants of each archetype, nature and education,
//! derives the finished numbers and optionally spends an XP budget.

pub mod config;
pub mod derived;
pub mod error;
pub mod grant;
pub mod pipeline;
pub mod select;
pub mod xp;

pub use config::{GeneratorConfig, SelectionMode};
pub use error::{LifePathError, LifePathResult, SelectResult, SelectionError};
pub use grant::{StepContext, apply_grants};
pub use pipeline::{FINISHING_TOUCHES, generate};
pub use select::{AutoChooser, Chooser, PromptChooser};
pub use xp::spend_xp;
