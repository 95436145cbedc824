// Grid
pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 9;
/// Largest row or column count accepted from a save file.
pub const MAX_GRID_DIM: usize = 64;

// Starting ledger
pub const STARTING_STEPS: i32 = 70;
pub const STARTING_GEMS: u32 = 2;

// Room offer
pub const OFFER_SIZE: usize = 3;
pub const MAX_RARITY: u8 = 3;
/// Each rarity level divides the draw weight by this factor.
pub const RARITY_WEIGHT_DIVISOR: f64 = 3.0;

// Default effect amounts, overridable per archetype
pub const LOCKED_ROOM_GOLD: u32 = 10;
pub const LOCKED_ROOM_GEMS: u32 = 2;
pub const LIBRARY_GEMS: u32 = 1;
pub const WORKSHOP_KEYS: u32 = 1;
pub const TREASURE_GOLD: u32 = 5;
pub const TRAP_DAMAGE: i32 = 5;
pub const LOCKER_STEPS: i32 = 8;
pub const DEFAULT_CHEST_COUNT: u32 = 1;
pub const DEFAULT_LOCKER_COUNT: u32 = 2;
pub const DEFAULT_DIG_SPOTS: u32 = 1;

// Reward tables (uniform draws)
pub const FOOD_TABLE: [(&str, i32); 3] = [("an apple", 2), ("a banana", 3), ("a cake", 10)];
pub const CHEST_GOLD: u32 = 5;
pub const CHEST_STEPS: i32 = 10;
pub const CHEST_GEMS: u32 = 1;
pub const DIG_GOLD: u32 = 3;
pub const DIG_GEMS: u32 = 1;

// Persistence
pub const SAVE_FILE_NAME: &str = "save.json";
pub const LOG_FILE_NAME: &str = "manor.log";
pub const GAME_VERSION: &str = "1.0";
pub const SAVE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Terminal loop
pub const INPUT_POLL_MS: u64 = 50;
