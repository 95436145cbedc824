//! Static room catalog.

use super::types::{ColorCategory, EffectParams, RoomArchetype, RoomType};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Marker parameters that carry no behaviour of their own.
fn flags(names: &[&str]) -> BTreeMap<String, serde_json::Value> {
    names
        .iter()
        .map(|name| (name.to_string(), serde_json::Value::Bool(true)))
        .collect()
}

/// The entrance hall placed at the bottom-left corner.
pub fn entrance() -> RoomArchetype {
    RoomArchetype::new("Entrance Hall", RoomType::Start)
        .with_image("entry.png")
        .with_color(ColorCategory::Blue)
}

/// The antechamber placed on the top row. Never offered as a choice.
pub fn antechamber() -> RoomArchetype {
    RoomArchetype::new("Antechamber", RoomType::Exit)
        .with_image("sortie.png")
        .with_color(ColorCategory::Blue)
        .with_effect(EffectParams {
            extra: flags(&["escape"]),
            ..Default::default()
        })
}

fn build_catalog() -> Vec<RoomArchetype> {
    vec![
        // Blue: common, nothing inside
        RoomArchetype::new("Hallway", RoomType::Neutral)
            .with_image("Couloir.png")
            .with_color(ColorCategory::Blue),
        RoomArchetype::new("Empty Room", RoomType::Neutral)
            .with_image("room_default.png")
            .with_color(ColorCategory::Blue),
        // Green: gardens and studies
        RoomArchetype::new("Library", RoomType::Library)
            .with_image("bibliotheque.png")
            .with_cost(1)
            .with_color(ColorCategory::Green)
            .with_rarity(1)
            .with_effect(EffectParams {
                gems: Some(1),
                ..Default::default()
            }),
        RoomArchetype::new("Veranda", RoomType::Veranda)
            .with_image("Veranda.png")
            .with_cost(2)
            .with_color(ColorCategory::Green)
            .with_rarity(2)
            .with_effect(EffectParams {
                extra: flags(&["boost_green"]),
                ..Default::default()
            }),
        // Yellow: workshops
        RoomArchetype::new("Workshop", RoomType::Workshop)
            .with_image("atelier.png")
            .with_cost(1)
            .with_color(ColorCategory::Yellow)
            .with_rarity(1)
            .with_effect(EffectParams {
                keys: Some(1),
                ..Default::default()
            }),
        // Violet: bedrooms
        RoomArchetype::new("Bedroom", RoomType::Bedroom)
            .with_image("Chambre.png")
            .with_cost(1)
            .with_color(ColorCategory::Violet)
            .with_rarity(1)
            .with_effect(EffectParams {
                has_food: true,
                ..Default::default()
            }),
        // Orange: corridors
        RoomArchetype::new("Great Corridor", RoomType::Corridor)
            .with_image("room_default.png")
            .with_color(ColorCategory::Orange),
        // Red: dangerous
        RoomArchetype::new("Trapped Room", RoomType::Trap)
            .with_image("piege.png")
            .with_color(ColorCategory::Red)
            .with_rarity(1)
            .with_effect(EffectParams {
                trap_damage: Some(5),
                ..Default::default()
            }),
        // Containers
        RoomArchetype::new("Treasure Room", RoomType::Treasure)
            .with_image("salle_tresor.png")
            .with_cost(2)
            .with_color(ColorCategory::Yellow)
            .with_rarity(2)
            .with_effect(EffectParams {
                gold: Some(5),
                ..Default::default()
            }),
        RoomArchetype::new("Chest Room", RoomType::Chest)
            .with_image("coffre.png")
            .with_cost(1)
            .with_color(ColorCategory::Blue)
            .with_rarity(1)
            .with_effect(EffectParams {
                chest_count: Some(1),
                extra: flags(&["requires_key"]),
                ..Default::default()
            }),
        RoomArchetype::new("Locker Room", RoomType::Locker)
            .with_image("casiers.png")
            .with_cost(1)
            .with_color(ColorCategory::Blue)
            .with_rarity(1)
            .with_effect(EffectParams {
                locker_count: Some(2),
                extra: flags(&["requires_key"]),
                ..Default::default()
            }),
        RoomArchetype::new("Garden", RoomType::Dig)
            .with_image("Jardin.png")
            .with_cost(1)
            .with_color(ColorCategory::Green)
            .with_rarity(1)
            .with_effect(EffectParams {
                dig_spots: Some(1),
                extra: flags(&["requires_shovel"]),
                ..Default::default()
            }),
        // Needs a key just to walk in
        RoomArchetype::new("Vault", RoomType::LockedRoom)
            .with_image("coffre.png")
            .with_cost(2)
            .with_color(ColorCategory::Yellow)
            .with_rarity(2)
            .with_effect(EffectParams {
                gold: Some(10),
                gems: Some(2),
                requires_key_to_enter: true,
                ..Default::default()
            }),
    ]
}

/// All drawable archetypes. Built once, shared for the process lifetime.
pub fn catalog() -> &'static [RoomArchetype] {
    static CATALOG: OnceLock<Vec<RoomArchetype>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}
