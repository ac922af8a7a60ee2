//! Core types for Lifepath.
//!
//! Provides the attribute and skill identifiers, the character record built
//! by the life-path generator, talent definitions with their prerequisites,
//! and the content tables the generator rolls against. Table text is parsed
//! into typed values here, at the import boundary, so the rest of the
//! workspace never deals with raw phrases.

pub mod attribute;
pub mod character;
pub mod error;
pub mod grant;
pub mod key;
pub mod narrative;
pub mod skill;
pub mod store;
pub mod table;
pub mod talent;

pub use attribute::Attribute;
pub use character::{
    BASE_ATTRIBUTE, Background, CharacterState, DerivedStats, Gender, OwnedTalent, Purchase, PurchaseKind,
    SkillBook, SkillRanks, Talents,
};
pub use error::{TableError, TableResult};
pub use grant::{CareerTalent, Described, GrantFields, SkillRef};
pub use key::normalize_key;
pub use skill::Skill;
pub use store::{AttributeRow, CasteRow, HomelandRow, StoryRow, TableStore, WarStoryRow};
pub use table::{NameTable, RangeTable};
pub use talent::{Prerequisite, TalentDefinition};
