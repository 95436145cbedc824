//! Save file round trips and lenient loading.

use manor::core::GameConfig;
use manor::exploration::{process_command, Command, Direction, Exploration, Phase};
use manor::grid::Grid;
use manor::inventory::{ResourceLedger, Tool};
use manor::rooms::{catalog, RoomArchetype};
use manor::utils::{LoadOutcome, SaveManager};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A save path in a fresh temporary directory.
fn temp_save_path() -> PathBuf {
    let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir()
        .join(format!("manor-it-{}-{}", std::process::id(), test_id))
        .join("save.json")
}

fn cleanup(manager: &SaveManager) {
    if let Some(dir) = manager.save_path().parent() {
        fs::remove_dir_all(dir).ok();
    }
}

fn load(manager: &SaveManager) -> Exploration {
    match manager.load(&GameConfig::default()) {
        LoadOutcome::Restored(session) => session,
        LoadOutcome::NoSave => panic!("expected a restored game"),
    }
}

fn catalog_room(name: &str) -> RoomArchetype {
    catalog()
        .iter()
        .find(|room| room.name == name)
        .cloned()
        .expect("room in catalog")
}

fn mixed_session() -> Exploration {
    let mut grid = Grid::new(5, 9);
    grid.place_room((3, 0), catalog_room("Library")).unwrap();
    grid.place_room((2, 0), catalog_room("Vault")).unwrap();
    grid.place_room((2, 1), catalog_room("Chest Room")).unwrap();
    // Revealed but never filled
    grid.discover((1, 1));
    grid.discover((4, 8));

    let mut ledger = ResourceLedger::new(41, 3);
    ledger.keys = 2;
    ledger.dice = 1;
    ledger.gold = 17;
    ledger.grant_tool(Tool::Shovel);
    ledger.grant_tool(Tool::RabbitFoot);

    Exploration::from_parts(grid, ledger, (2, 1), &GameConfig::default())
}

#[test]
fn test_round_trip_preserves_every_cell() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    let original = mixed_session();

    manager.save(&original).unwrap();
    let restored = load(&manager);

    let before: Vec<_> = original.grid().cells().collect();
    let after: Vec<_> = restored.grid().cells().collect();
    assert_eq!(before.len(), 45);
    assert_eq!(before, after);

    assert!(restored.grid().is_discovered((1, 1)));
    assert!(restored.grid().get_room((1, 1)).is_none());
    assert!(!restored.grid().is_discovered((3, 3)));
    assert_eq!(restored.ledger(), original.ledger());
    assert_eq!(restored.player(), (2, 1));
    assert_eq!(restored.cursor(), (2, 1));

    cleanup(&manager);
}

#[test]
fn test_document_shape() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    manager.save(&mixed_session()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(manager.save_path()).unwrap()).unwrap();

    assert_eq!(json["grid"]["rows"], 5);
    assert_eq!(json["grid"]["cols"], 9);
    assert_eq!(json["grid"]["cells"].as_array().unwrap().len(), 5);

    let library = &json["grid"]["cells"][3][0];
    assert_eq!(library["exists"], true);
    assert_eq!(library["discovered"], true);
    assert_eq!(library["room_type"], "bibliotheque");
    assert_eq!(library["cost_gems"], 1);

    let revealed = &json["grid"]["cells"][1][1];
    assert_eq!(revealed["exists"], false);
    assert_eq!(revealed["discovered"], true);
    assert!(revealed.get("name").is_none());

    assert_eq!(json["inventory"]["steps"], 41);
    assert_eq!(json["inventory"]["gold"], 17);
    assert_eq!(json["inventory"]["permanents"]["shovel"], true);
    assert_eq!(json["inventory"]["permanents"]["hammer"], false);
    assert_eq!(json["inventory"]["permanents"]["rabbit_foot"], true);
    assert_eq!(json["player"]["row"], 2);
    assert_eq!(json["player"]["col"], 1);
    assert!(json["metadata"]["save_date"].is_string());
    assert_eq!(json["metadata"]["game_version"], "1.0");

    cleanup(&manager);
}

#[test]
fn test_missing_file_is_no_save() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    assert!(!manager.save_exists());
    assert!(matches!(
        manager.load(&GameConfig::default()),
        LoadOutcome::NoSave
    ));
    cleanup(&manager);
}

#[test]
fn test_unreadable_file_is_no_save() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    fs::write(manager.save_path(), "{\"grid\": [1, 2").unwrap();
    assert!(matches!(
        manager.load(&GameConfig::default()),
        LoadOutcome::NoSave
    ));
    assert!(manager.save_info().is_none());
    cleanup(&manager);
}

#[test]
fn test_partial_document_uses_new_game_values() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    fs::write(
        manager.save_path(),
        r#"{"inventory": {"gold": 3, "permanents": {"hammer": true}}}"#,
    )
    .unwrap();

    let session = load(&manager);
    let ledger = session.ledger();
    assert_eq!(ledger.steps, 70);
    assert_eq!(ledger.gems, 2);
    assert_eq!(ledger.keys, 0);
    assert_eq!(ledger.dice, 0);
    assert_eq!(ledger.gold, 3);
    assert!(ledger.has_tool(Tool::Hammer));
    assert!(!ledger.has_tool(Tool::Shovel));
    assert_eq!(session.player(), (4, 0));
    assert_eq!(session.grid().rows(), 5);
    assert_eq!(session.grid().cols(), 9);
    assert!(session.grid().get_room((0, 4)).unwrap().is_exit());

    cleanup(&manager);
}

#[test]
fn test_oversized_grid_loads_default_floor() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    fs::write(
        manager.save_path(),
        r#"{"grid": {"rows": 4000000000, "cols": 4000000000}, "inventory": {"gold": 9}}"#,
    )
    .unwrap();

    let session = load(&manager);
    assert_eq!(session.grid().rows(), 5);
    assert_eq!(session.grid().cols(), 9);
    assert_eq!(session.player(), (4, 0));
    assert_eq!(session.ledger().gold, 9);

    cleanup(&manager);
}

#[test]
fn test_maxed_counters_survive_a_reward_room() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    let mut grid = Grid::new(5, 9);
    grid.place_room((3, 0), catalog_room("Treasure Room")).unwrap();
    let mut ledger = ResourceLedger::default();
    ledger.gold = u32::MAX;
    manager
        .save(&Exploration::from_parts(grid, ledger, (4, 0), &GameConfig::default()))
        .unwrap();

    let mut session = load(&manager);
    assert_eq!(session.ledger().gold, u32::MAX);
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    process_command(&mut session, Command::MoveCursor(Direction::Up), &mut rng).unwrap();
    process_command(&mut session, Command::Select, &mut rng).unwrap();

    assert_eq!(session.player(), (3, 0));
    assert_eq!(session.ledger().gold, u32::MAX);

    cleanup(&manager);
}

#[test]
fn test_open_offer_is_not_saved() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    let mut session = Exploration::new(&GameConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    process_command(&mut session, Command::MoveCursor(Direction::Up), &mut rng).unwrap();
    process_command(&mut session, Command::Select, &mut rng).unwrap();
    assert_eq!(session.phase(), Phase::AwaitingChoice);

    manager.save(&session).unwrap();
    let restored = load(&manager);
    assert_eq!(restored.phase(), Phase::Idle);
    assert!(!restored.grid().is_discovered((3, 0)));
    assert_eq!(restored.cursor(), restored.player());

    cleanup(&manager);
}

#[test]
fn test_save_info_summary() {
    let manager = SaveManager::with_path(temp_save_path()).unwrap();
    assert!(manager.save_info().is_none());
    manager.save(&mixed_session()).unwrap();

    let info = manager.save_info().unwrap();
    assert_eq!(info.steps, 41);
    assert_eq!(info.gold, 17);
    assert_eq!(info.gems, 3);
    assert_eq!(info.player, Some((2, 1)));

    cleanup(&manager);
}
