//! Room effect resolution.
//!
//! Entry gating (vault keys, gem costs) happens before this point. The
//! resolver only applies what is inside the room, and never touches the
//! caller's ledger: it returns an updated copy.

use super::types::{RoomArchetype, RoomType};
use crate::core::constants::{
    CHEST_GEMS, CHEST_GOLD, CHEST_STEPS, DEFAULT_CHEST_COUNT, DEFAULT_DIG_SPOTS,
    DEFAULT_LOCKER_COUNT, DIG_GEMS, DIG_GOLD, FOOD_TABLE, LIBRARY_GEMS, LOCKED_ROOM_GEMS,
    LOCKED_ROOM_GOLD, LOCKER_STEPS, TRAP_DAMAGE, TREASURE_GOLD, WORKSHOP_KEYS,
};
use crate::inventory::{ResourceLedger, Tool};
use rand::Rng;

/// How a room affected the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Resources gained
    Reward,
    /// Steps lost
    Penalty,
    /// A container could not be opened; nothing consumed
    Blocked,
    /// The room's item is already owned
    AlreadyOwned,
    /// The exit was reached
    Victory,
    /// Nothing happened
    Nothing,
}

/// Result of entering a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub ledger: ResourceLedger,
    pub message: String,
    pub kind: EffectKind,
    /// Always true here: refusals happen at the gating step, and a blocked
    /// container still lets the player stand in the room.
    pub entry_permitted: bool,
}

impl Resolution {
    fn new(ledger: ResourceLedger, kind: EffectKind, message: String) -> Self {
        Self {
            ledger,
            message,
            kind,
            entry_permitted: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChestReward {
    Gold,
    Food,
    Gem,
}

const CHEST_REWARDS: [ChestReward; 3] = [ChestReward::Gold, ChestReward::Food, ChestReward::Gem];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigReward {
    Gold,
    Gem,
    Nothing,
}

const DIG_REWARDS: [DigReward; 3] = [DigReward::Gold, DigReward::Gem, DigReward::Nothing];

/// Applies the effect of `room` to a copy of `ledger`.
///
/// Branches are tried in a fixed order: vault, direct-resource rooms,
/// bedroom food, trap, chest, locker, dig spot, one-shot item, exit, and
/// finally the neutral fallback.
pub fn resolve<R: Rng>(room: &RoomArchetype, ledger: &ResourceLedger, rng: &mut R) -> Resolution {
    let mut next = ledger.clone();
    let params = &room.effect;

    match room.room_type {
        RoomType::LockedRoom => {
            let gold = params.gold.unwrap_or(LOCKED_ROOM_GOLD);
            let gems = params.gems.unwrap_or(LOCKED_ROOM_GEMS);
            next.add_gold(gold);
            next.add_gems(gems);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("Vault opened! You find {} gold and {} gems!", gold, gems),
            )
        }
        RoomType::Library => {
            let gems = params.gems.unwrap_or(LIBRARY_GEMS);
            next.add_gems(gems);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You find {} gem(s) in the library.", gems),
            )
        }
        RoomType::Workshop => {
            let keys = params.keys.unwrap_or(WORKSHOP_KEYS);
            next.add_keys(keys);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You find {} key(s) in the workshop.", keys),
            )
        }
        RoomType::Treasure => {
            let gold = params.gold.unwrap_or(TREASURE_GOLD);
            next.add_gold(gold);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You find {} gold in the treasure room!", gold),
            )
        }
        RoomType::Bedroom if params.has_food => {
            let (food, steps) = FOOD_TABLE[rng.gen_range(0..FOOD_TABLE.len())];
            next.add_steps(steps);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You find {} and recover {} steps.", food, steps),
            )
        }
        RoomType::Trap => {
            let damage = params.trap_damage.unwrap_or(TRAP_DAMAGE).max(0);
            next.lose_steps(damage);
            Resolution::new(
                next,
                EffectKind::Penalty,
                format!("A trap! You lose {} steps.", damage),
            )
        }
        RoomType::Chest => open_chest(room, next, rng),
        RoomType::Locker => {
            if next.spend_key() {
                next.add_steps(LOCKER_STEPS);
                Resolution::new(
                    next,
                    EffectKind::Reward,
                    format!(
                        "You open a locker with a key and find food (+{} steps).",
                        LOCKER_STEPS
                    ),
                )
            } else {
                let count = params.locker_count.unwrap_or(DEFAULT_LOCKER_COUNT);
                Resolution::new(
                    next,
                    EffectKind::Blocked,
                    format!("There are {} locked lockers. You need a key.", count),
                )
            }
        }
        RoomType::Dig => dig(room, next, rng),
        RoomType::Bedroom
        | RoomType::Start
        | RoomType::Exit
        | RoomType::Neutral
        | RoomType::Corridor
        | RoomType::Veranda
        | RoomType::Normal => item_exit_or_nothing(room, next),
    }
}

fn open_chest<R: Rng>(room: &RoomArchetype, mut next: ResourceLedger, rng: &mut R) -> Resolution {
    // A key is used before the hammer; the hammer is never consumed
    let verb = if next.spend_key() {
        "You open a chest with a key"
    } else if next.has_tool(Tool::Hammer) {
        "You smash the chest with the hammer"
    } else {
        let count = room.effect.chest_count.unwrap_or(DEFAULT_CHEST_COUNT);
        return Resolution::new(
            next,
            EffectKind::Blocked,
            format!(
                "There are {} chest(s), but you have neither key nor hammer.",
                count
            ),
        );
    };

    let found = match CHEST_REWARDS[rng.gen_range(0..CHEST_REWARDS.len())] {
        ChestReward::Gold => {
            next.add_gold(CHEST_GOLD);
            format!("{} gold", CHEST_GOLD)
        }
        ChestReward::Food => {
            next.add_steps(CHEST_STEPS);
            format!("food (+{} steps)", CHEST_STEPS)
        }
        ChestReward::Gem => {
            next.add_gems(CHEST_GEMS);
            format!("{} gem", CHEST_GEMS)
        }
    };

    Resolution::new(
        next,
        EffectKind::Reward,
        format!("{} and find {}.", verb, found),
    )
}

fn dig<R: Rng>(room: &RoomArchetype, mut next: ResourceLedger, rng: &mut R) -> Resolution {
    if !next.has_tool(Tool::Shovel) {
        let spots = room.effect.dig_spots.unwrap_or(DEFAULT_DIG_SPOTS);
        return Resolution::new(
            next,
            EffectKind::Blocked,
            format!(
                "There are {} spot(s) to dig, but you have no shovel.",
                spots
            ),
        );
    }

    match DIG_REWARDS[rng.gen_range(0..DIG_REWARDS.len())] {
        DigReward::Gold => {
            next.add_gold(DIG_GOLD);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You dig with the shovel and find {} gold.", DIG_GOLD),
            )
        }
        DigReward::Gem => {
            next.add_gems(DIG_GEMS);
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You dig with the shovel and find {} gem.", DIG_GEMS),
            )
        }
        DigReward::Nothing => Resolution::new(
            next,
            EffectKind::Nothing,
            "You dig with the shovel, but find nothing.".to_string(),
        ),
    }
}

fn item_exit_or_nothing(room: &RoomArchetype, mut next: ResourceLedger) -> Resolution {
    if let Some(tool) = room.effect.item {
        return if next.grant_tool(tool) {
            Resolution::new(
                next,
                EffectKind::Reward,
                format!("You find a {}!", tool.name()),
            )
        } else {
            Resolution::new(
                next,
                EffectKind::AlreadyOwned,
                "This room held an item, but you already have it.".to_string(),
            )
        };
    }

    if room.room_type == RoomType::Exit {
        return Resolution::new(
            next,
            EffectKind::Victory,
            format!("You reached the {}! Victory!", room.name),
        );
    }

    Resolution::new(
        next,
        EffectKind::Nothing,
        format!("You enter the {}. Nothing special here.", room.name),
    )
}
