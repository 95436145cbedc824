//! Player resources: consumable counters and permanent tools.

use crate::core::constants::{STARTING_GEMS, STARTING_STEPS};
use serde::{Deserialize, Serialize};

/// Permanent tools. Once found they are never lost.
///
/// The serialized names are the item tags carried by room effect data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    #[serde(rename = "pelle")]
    Shovel,
    #[serde(rename = "marteau")]
    Hammer,
    #[serde(rename = "crochetage")]
    PicklockKit,
    #[serde(rename = "detecteur")]
    MetalDetector,
    #[serde(rename = "patte_lapin")]
    RabbitFoot,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Shovel,
        Tool::Hammer,
        Tool::PicklockKit,
        Tool::MetalDetector,
        Tool::RabbitFoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Shovel => "shovel",
            Tool::Hammer => "hammer",
            Tool::PicklockKit => "picklock kit",
            Tool::MetalDetector => "metal detector",
            Tool::RabbitFoot => "rabbit foot",
        }
    }
}

/// Permanent tool flags. Only settable from false to true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permanents {
    shovel: bool,
    hammer: bool,
    picklock_kit: bool,
    metal_detector: bool,
    rabbit_foot: bool,
}

impl Permanents {
    pub fn has(&self, tool: Tool) -> bool {
        match tool {
            Tool::Shovel => self.shovel,
            Tool::Hammer => self.hammer,
            Tool::PicklockKit => self.picklock_kit,
            Tool::MetalDetector => self.metal_detector,
            Tool::RabbitFoot => self.rabbit_foot,
        }
    }

    /// Grants a tool. Returns false if it was already owned.
    pub fn grant(&mut self, tool: Tool) -> bool {
        let slot = match tool {
            Tool::Shovel => &mut self.shovel,
            Tool::Hammer => &mut self.hammer,
            Tool::PicklockKit => &mut self.picklock_kit,
            Tool::MetalDetector => &mut self.metal_detector,
            Tool::RabbitFoot => &mut self.rabbit_foot,
        };
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn owned(&self) -> Vec<Tool> {
        Tool::ALL.into_iter().filter(|t| self.has(*t)).collect()
    }
}

/// The mutable resource state of a run.
///
/// `steps` is signed: trap damage may push it below zero for the turn in
/// which the lose condition fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub steps: i32,
    pub gems: u32,
    pub keys: u32,
    pub dice: u32,
    pub gold: u32,
    pub permanents: Permanents,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(STARTING_STEPS, STARTING_GEMS)
    }
}

impl ResourceLedger {
    pub fn new(steps: i32, gems: u32) -> Self {
        Self {
            steps,
            gems,
            keys: 0,
            dice: 0,
            gold: 0,
            permanents: Permanents::default(),
        }
    }

    pub fn has_tool(&self, tool: Tool) -> bool {
        self.permanents.has(tool)
    }

    pub fn grant_tool(&mut self, tool: Tool) -> bool {
        self.permanents.grant(tool)
    }

    /// Spends `amount` gems if enough are available. No change otherwise.
    pub fn spend_gems(&mut self, amount: u32) -> bool {
        if self.gems < amount {
            return false;
        }
        self.gems -= amount;
        true
    }

    /// Consumes one key if available. No change otherwise.
    pub fn spend_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    /// Grants saturate at `u32::MAX`.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn add_gems(&mut self, amount: u32) {
        self.gems = self.gems.saturating_add(amount);
    }

    pub fn add_keys(&mut self, amount: u32) {
        self.keys = self.keys.saturating_add(amount);
    }

    pub fn add_steps(&mut self, amount: i32) {
        self.steps = self.steps.saturating_add(amount);
    }

    pub fn lose_steps(&mut self, amount: i32) {
        self.steps = self.steps.saturating_sub(amount);
    }

    /// Lose condition: no steps left.
    pub fn is_exhausted(&self) -> bool {
        self.steps <= 0
    }
}
