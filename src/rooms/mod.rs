//! Room archetypes, the offer draw and room effects.

pub mod catalog;
pub mod effects;
pub mod selection;
pub mod types;

pub use catalog::{antechamber, catalog, entrance};
pub use effects::{resolve, EffectKind, Resolution};
pub use selection::{draw_choices, rarity_weight};
pub use types::{rarity_name, ColorCategory, EffectParams, RoomArchetype, RoomType};
