//! JSON snapshot of a game in progress.
//!
//! The document has four top-level keys: `grid`, `inventory`, `player` and
//! `metadata`. Reading is lenient: every missing field falls back to its
//! new-game value, and out-of-range values are clamped with a warning.

use crate::core::constants::{
    GAME_VERSION, GRID_COLS, GRID_ROWS, MAX_GRID_DIM, MAX_RARITY, SAVE_DATE_FORMAT,
};
use crate::core::GameConfig;
use crate::exploration::Exploration;
use crate::grid::{Grid, Position};
use crate::inventory::{Permanents, ResourceLedger};
use crate::rooms::{ColorCategory, EffectParams, RoomArchetype, RoomType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub grid: GridRecord,
    pub inventory: InventoryRecord,
    pub player: PlayerRecord,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridRecord {
    pub rows: usize,
    pub cols: usize,
    /// Row-major
    pub cells: Vec<Vec<CellRecord>>,
}

impl Default for GridRecord {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            cells: Vec::new(),
        }
    }
}

impl GridRecord {
    /// Saved (rows, cols). A dimension that is zero or larger than
    /// `MAX_GRID_DIM` is replaced by the default one.
    fn dimensions(&self) -> (usize, usize) {
        (
            checked_dimension("rows", self.rows, GRID_ROWS),
            checked_dimension("cols", self.cols, GRID_COLS),
        )
    }
}

fn checked_dimension(label: &str, value: usize, fallback: usize) -> usize {
    if (1..=MAX_GRID_DIM).contains(&value) {
        value
    } else {
        log::warn!("saved grid {} {} out of range, using {}", label, value, fallback);
        fallback
    }
}

/// One grid cell. Room fields are only written when `exists` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellRecord {
    pub exists: bool,
    pub discovered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_gems: Option<i64>,
    /// Kept loose so one odd parameter does not sink the whole file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect_data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<i64>,
}

impl CellRecord {
    fn from_cell(room: Option<&RoomArchetype>, discovered: bool) -> Self {
        let Some(room) = room else {
            return Self {
                discovered,
                ..Default::default()
            };
        };
        Self {
            exists: true,
            discovered,
            name: Some(room.name.clone()),
            image_name: room.image_name.clone(),
            room_type: Some(room.room_type.as_tag().to_string()),
            cost_gems: Some(i64::from(room.gem_cost)),
            effect_data: serde_json::to_value(&room.effect).ok(),
            color_type: Some(room.color.as_tag().to_string()),
            rarity: Some(i64::from(room.rarity)),
        }
    }

    /// Rebuilds the room in this cell, if any.
    fn to_room(&self, pos: Position) -> Option<RoomArchetype> {
        if !self.exists {
            return None;
        }

        let name = self.name.clone().unwrap_or_else(|| "Room".to_string());
        let room_type = self
            .room_type
            .as_deref()
            .map(RoomType::from_tag)
            .unwrap_or(RoomType::Normal);
        let color = self
            .color_type
            .as_deref()
            .map(ColorCategory::from_tag)
            .unwrap_or_default();

        let raw_cost = self.cost_gems.unwrap_or(0);
        let gem_cost = u32::try_from(raw_cost.max(0)).unwrap_or(u32::MAX);
        if raw_cost < 0 {
            log::warn!("{} at {:?} had cost {}, using 0", name, pos, raw_cost);
        }

        let raw_rarity = self.rarity.unwrap_or(0);
        let rarity = raw_rarity.clamp(0, i64::from(MAX_RARITY)) as u8;
        if i64::from(rarity) != raw_rarity {
            log::warn!("{} at {:?} had rarity {}, using {}", name, pos, raw_rarity, rarity);
        }

        let effect = match &self.effect_data {
            Some(value) => serde_json::from_value::<EffectParams>(value.clone()).unwrap_or_else(|err| {
                log::warn!("dropping effect data of {} at {:?}: {}", name, pos, err);
                EffectParams::default()
            }),
            None => EffectParams::default(),
        };

        let mut room = RoomArchetype::new(name, room_type)
            .with_cost(gem_cost)
            .with_color(color)
            .with_rarity(rarity)
            .with_effect(effect);
        room.image_name = self.image_name.clone();
        Some(room)
    }
}

/// Resource counters. Signed on the wire so negative values can be clamped
/// instead of rejecting the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    pub steps: i64,
    pub gems: i64,
    pub keys: i64,
    pub dice: i64,
    pub gold: i64,
    pub permanents: Permanents,
}

impl Default for InventoryRecord {
    fn default() -> Self {
        Self::from_ledger(&ResourceLedger::default())
    }
}

impl InventoryRecord {
    fn from_ledger(ledger: &ResourceLedger) -> Self {
        Self {
            steps: i64::from(ledger.steps),
            gems: i64::from(ledger.gems),
            keys: i64::from(ledger.keys),
            dice: i64::from(ledger.dice),
            gold: i64::from(ledger.gold),
            permanents: ledger.permanents,
        }
    }

    fn to_ledger(&self) -> ResourceLedger {
        ResourceLedger {
            steps: self.steps.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            gems: counter(self.gems),
            keys: counter(self.keys),
            dice: counter(self.dice),
            gold: counter(self.gold),
            permanents: self.permanents,
        }
    }
}

fn counter(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Player cell. Missing coordinates fall back to the entrance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
}

/// Informational only, never checked on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub save_date: String,
    pub game_version: String,
}

impl Snapshot {
    /// Captures the persistent part of a session. Any open room offer is
    /// not saved.
    pub fn capture(session: &Exploration) -> Self {
        let grid = session.grid();
        let mut cells = vec![Vec::with_capacity(grid.cols()); grid.rows()];
        for ((row, _), room, discovered) in grid.cells() {
            cells[row].push(CellRecord::from_cell(room, discovered));
        }
        let (row, col) = session.player();

        Self {
            grid: GridRecord {
                rows: grid.rows(),
                cols: grid.cols(),
                cells,
            },
            inventory: InventoryRecord::from_ledger(session.ledger()),
            player: PlayerRecord {
                row: Some(row),
                col: Some(col),
            },
            metadata: Metadata {
                save_date: chrono::Local::now().format(SAVE_DATE_FORMAT).to_string(),
                game_version: GAME_VERSION.to_string(),
            },
        }
    }

    /// Rebuilds a session. The entrance and exit always come from a fresh
    /// grid; every other cell is taken from the record.
    pub fn restore(&self, config: &GameConfig) -> Exploration {
        let (rows, cols) = self.grid.dimensions();
        let mut grid = Grid::new(rows, cols);
        let fixed = [grid.start(), grid.exit()];

        for (row, cells) in self.grid.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let pos = (row, col);
                if !grid.in_bounds(pos) {
                    log::warn!("ignoring saved cell {:?} outside the grid", pos);
                    continue;
                }
                if fixed.contains(&pos) {
                    continue;
                }
                let room = cell.to_room(pos);
                if room.is_some() && !cell.discovered {
                    log::warn!("saved room at {:?} was hidden, revealing it", pos);
                }
                grid.set_cell(pos, room, cell.discovered);
            }
        }

        let start = grid.start();
        let player = (
            self.player.row.unwrap_or(start.0),
            self.player.col.unwrap_or(start.1),
        );
        if !grid.in_bounds(player) {
            log::warn!("saved player {:?} is off the grid, using the entrance", player);
        }

        Exploration::from_parts(grid, self.inventory.to_ledger(), player, config)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
