//! Room archetype data structures.

use crate::core::constants::MAX_RARITY;
use crate::inventory::Tool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of room behaviours. Each variant maps to one effect branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    /// Entrance hall, placed at grid construction
    Start,
    /// Antechamber, reaching it wins the game
    Exit,
    Neutral,
    Corridor,
    /// Library: grants gems
    Library,
    /// Workshop: grants keys
    Workshop,
    /// Treasure room: grants gold
    Treasure,
    /// Bedroom, may hold food
    Bedroom,
    /// Trap: costs steps
    Trap,
    /// Chest room: needs a key or the hammer
    Chest,
    /// Locker room: needs a key
    Locker,
    /// Garden with dig spots: needs the shovel
    Dig,
    /// Vault: needs a key to enter at all
    LockedRoom,
    Veranda,
    /// Anything unrecognised when reading old saves
    Normal,
}

impl RoomType {
    /// Tag used in saved games.
    pub fn as_tag(&self) -> &'static str {
        match self {
            RoomType::Start => "start",
            RoomType::Exit => "exit",
            RoomType::Neutral => "neutral",
            RoomType::Corridor => "corridor",
            RoomType::Library => "bibliotheque",
            RoomType::Workshop => "atelier",
            RoomType::Treasure => "tresor",
            RoomType::Bedroom => "bedroom",
            RoomType::Trap => "piege",
            RoomType::Chest => "coffre",
            RoomType::Locker => "casier",
            RoomType::Dig => "creuser",
            RoomType::LockedRoom => "locked_room",
            RoomType::Veranda => "veranda",
            RoomType::Normal => "normal",
        }
    }

    /// Parses a saved tag. Unknown tags become `Normal`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "start" => RoomType::Start,
            "exit" => RoomType::Exit,
            "neutral" => RoomType::Neutral,
            "corridor" => RoomType::Corridor,
            "bibliotheque" => RoomType::Library,
            "atelier" => RoomType::Workshop,
            "tresor" => RoomType::Treasure,
            "bedroom" => RoomType::Bedroom,
            "piege" => RoomType::Trap,
            "coffre" => RoomType::Chest,
            "casier" => RoomType::Locker,
            "creuser" => RoomType::Dig,
            "locked_room" => RoomType::LockedRoom,
            "veranda" => RoomType::Veranda,
            _ => RoomType::Normal,
        }
    }

    /// Two-character map symbol.
    pub fn icon(&self) -> &'static str {
        match self {
            RoomType::Start => "En",
            RoomType::Exit => "Ex",
            RoomType::Neutral | RoomType::Normal => "..",
            RoomType::Corridor => "==",
            RoomType::Library => "Li",
            RoomType::Workshop => "Wk",
            RoomType::Treasure => "$$",
            RoomType::Bedroom => "Bd",
            RoomType::Trap => "!!",
            RoomType::Chest => "Ch",
            RoomType::Locker => "Lk",
            RoomType::Dig => "Dg",
            RoomType::LockedRoom => "Vt",
            RoomType::Veranda => "Vr",
        }
    }
}

/// Cosmetic colour family. No gameplay effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Yellow,
    Green,
    Violet,
    Orange,
    Red,
    Blue,
    #[default]
    Neutral,
}

impl ColorCategory {
    pub fn as_tag(&self) -> &'static str {
        match self {
            ColorCategory::Yellow => "yellow",
            ColorCategory::Green => "green",
            ColorCategory::Violet => "violet",
            ColorCategory::Orange => "orange",
            ColorCategory::Red => "red",
            ColorCategory::Blue => "blue",
            ColorCategory::Neutral => "neutral",
        }
    }

    /// Parses a saved tag. Unknown tags become `Neutral`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "yellow" => ColorCategory::Yellow,
            "green" => ColorCategory::Green,
            "violet" => ColorCategory::Violet,
            "orange" => ColorCategory::Orange,
            "red" => ColorCategory::Red,
            "blue" => ColorCategory::Blue,
            _ => ColorCategory::Neutral,
        }
    }
}

/// Named parameters attached to an archetype.
///
/// Every field is optional on the wire. Keys this build does not know about
/// are kept in `extra` so saves survive a round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gems: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap_damage: Option<i32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_food: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub requires_key_to_enter: bool,
    /// One-shot permanent tool found in the room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locker_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dig_spots: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Immutable room template. Placed rooms are copies of these.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomArchetype {
    pub name: String,
    pub image_name: Option<String>,
    pub room_type: RoomType,
    pub gem_cost: u32,
    pub color: ColorCategory,
    /// 0 (common) to 3 (legendary)
    pub rarity: u8,
    pub effect: EffectParams,
}

impl RoomArchetype {
    pub fn new(name: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            name: name.into(),
            image_name: None,
            room_type,
            gem_cost: 0,
            color: ColorCategory::Neutral,
            rarity: 0,
            effect: EffectParams::default(),
        }
    }

    pub fn with_image(mut self, image_name: &str) -> Self {
        self.image_name = Some(image_name.to_string());
        self
    }

    pub fn with_cost(mut self, gem_cost: u32) -> Self {
        self.gem_cost = gem_cost;
        self
    }

    pub fn with_color(mut self, color: ColorCategory) -> Self {
        self.color = color;
        self
    }

    pub fn with_rarity(mut self, rarity: u8) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_effect(mut self, effect: EffectParams) -> Self {
        self.effect = effect;
        self
    }

    pub fn is_free(&self) -> bool {
        self.gem_cost == 0
    }

    pub fn is_exit(&self) -> bool {
        self.room_type == RoomType::Exit
    }

    pub fn requires_key_to_enter(&self) -> bool {
        self.effect.requires_key_to_enter
    }

    /// Catalog invariant: rarity within 0..=3.
    pub fn is_well_formed(&self) -> bool {
        self.rarity <= MAX_RARITY
    }

    pub fn rarity_name(&self) -> String {
        rarity_name(self.rarity)
    }
}

/// Display name of a rarity level.
pub fn rarity_name(rarity: u8) -> String {
    match rarity {
        0 => "Common".to_string(),
        1 => "Rare".to_string(),
        2 => "Epic".to_string(),
        3 => "Legendary".to_string(),
        other => format!("Rarity {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [RoomType; 15] = [
        RoomType::Start,
        RoomType::Exit,
        RoomType::Neutral,
        RoomType::Corridor,
        RoomType::Library,
        RoomType::Workshop,
        RoomType::Treasure,
        RoomType::Bedroom,
        RoomType::Trap,
        RoomType::Chest,
        RoomType::Locker,
        RoomType::Dig,
        RoomType::LockedRoom,
        RoomType::Veranda,
        RoomType::Normal,
    ];

    #[test]
    fn test_room_type_tags_are_reversible() {
        for room_type in ALL_TYPES {
            assert_eq!(RoomType::from_tag(room_type.as_tag()), room_type);
        }
    }

    #[test]
    fn test_unknown_room_tag_is_normal() {
        assert_eq!(RoomType::from_tag("ballroom"), RoomType::Normal);
        assert_eq!(RoomType::from_tag(""), RoomType::Normal);
    }

    #[test]
    fn test_icons_are_two_cells_wide() {
        for room_type in ALL_TYPES {
            assert_eq!(room_type.icon().chars().count(), 2, "{:?}", room_type);
        }
    }

    #[test]
    fn test_color_tags() {
        assert_eq!(ColorCategory::from_tag("violet"), ColorCategory::Violet);
        assert_eq!(ColorCategory::from_tag("plaid"), ColorCategory::Neutral);
        assert_eq!(ColorCategory::Orange.as_tag(), "orange");
    }

    #[test]
    fn test_rarity_names() {
        assert_eq!(rarity_name(0), "Common");
        assert_eq!(rarity_name(3), "Legendary");
        assert_eq!(rarity_name(7), "Rarity 7");
    }

    #[test]
    fn test_archetype_builder() {
        let room = RoomArchetype::new("Vault", RoomType::LockedRoom)
            .with_cost(2)
            .with_rarity(2)
            .with_color(ColorCategory::Yellow)
            .with_effect(EffectParams {
                requires_key_to_enter: true,
                ..Default::default()
            });
        assert!(!room.is_free());
        assert!(room.requires_key_to_enter());
        assert!(room.is_well_formed());
        assert_eq!(room.rarity_name(), "Epic");
        assert!(!RoomArchetype::new("Odd", RoomType::Neutral)
            .with_rarity(4)
            .is_well_formed());
    }

    #[test]
    fn test_effect_params_skip_empty_fields() {
        let params = EffectParams {
            gold: Some(10),
            requires_key_to_enter: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"gold": 10, "requires_key_to_enter": true})
        );
    }

    #[test]
    fn test_effect_params_keep_unknown_keys() {
        let params: EffectParams =
            serde_json::from_str(r#"{"item": "marteau", "boost_green": true}"#).unwrap();
        assert_eq!(params.item, Some(Tool::Hammer));
        assert_eq!(
            params.extra.get("boost_green"),
            Some(&serde_json::Value::Bool(true))
        );

        let back = serde_json::to_value(&params).unwrap();
        assert_eq!(back["boost_green"], serde_json::Value::Bool(true));
    }
}
