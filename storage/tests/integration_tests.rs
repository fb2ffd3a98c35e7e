//! Integration tests for the snapshot stores against real files.

use engine::{GameState, PlayerId};
use storage::{SnapshotStore, SqliteStore, StoreConfig, DEFAULT_KEY};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn game_in_progress() -> GameState {
    GameState::from_names(&["Alice", "Bob", "Charlie", "Dana", "Eve"])
        .unwrap()
        .submit_all_predictions(&[1, 0, 0, 1, 1])
        .unwrap()
        .submit_achieved(PlayerId(2), 1)
        .unwrap()
}

/// Snapshots written through one pool are visible to a store reopened on the
/// same file.
#[test]
fn test_sqlite_file_survives_reopen() {
    init_logs();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("snapshots.db");
    let path = path.to_str().unwrap();
    let game = game_in_progress();

    {
        let mut store = SqliteStore::open(path, 2).expect("Failed to open store");
        store.save(DEFAULT_KEY, &game).expect("Failed to save");
    }

    let reopened = SqliteStore::open(path, 2).expect("Failed to reopen store");
    let loaded = reopened.load(DEFAULT_KEY).unwrap().expect("Snapshot should exist");
    assert_eq!(loaded, game);
    assert_eq!(loaded.active_player(), Some(PlayerId(3)));
    assert!(loaded.submit_achieved(PlayerId(3), 0).is_ok());
}

#[test]
fn test_store_config_opens_every_kind() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.db");
    let game = game_in_progress();

    let configs = vec![
        StoreConfig::Memory,
        StoreConfig::sqlite("sqlite::memory:"),
        StoreConfig::sqlite(format!("sqlite://{}", path.display())),
    ];
    for config in configs {
        let mut store = config.open().expect("Failed to open configured store");
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), None);
        store.save(DEFAULT_KEY, &game).unwrap();
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), Some(game.clone()));
        store.clear(DEFAULT_KEY).unwrap();
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), None);
    }
}

#[test]
fn test_independent_keys() {
    let mut store = SqliteStore::in_memory().unwrap();
    let fresh = GameState::from_names(&["A", "B", "C", "D"]).unwrap();
    let playing = game_in_progress();

    store.save("first", &fresh).unwrap();
    store.save("second", &playing).unwrap();

    assert_eq!(store.load("first").unwrap(), Some(fresh));
    assert_eq!(store.load("second").unwrap(), Some(playing));
    assert_eq!(store.keys().unwrap().len(), 2);
}
