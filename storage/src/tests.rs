#[cfg(test)]
mod sqlite_store_tests {
    use crate::*;
    use engine::{GameState, PlayerId};
    use rusqlite::params;

    fn sample_game() -> GameState {
        GameState::from_names(&["Ann", "Bob", "Cas", "Dee"])
            .unwrap()
            .submit_all_predictions(&[0, 1, 0, 1])
            .unwrap()
    }

    fn insert_raw(store: &SqliteStore, key: &str, value: &str, saved_at: &str) {
        store
            .connection()
            .unwrap()
            .execute(
                "INSERT INTO snapshots (key, value, saved_at) VALUES (?1, ?2, ?3)",
                params![key, value, saved_at],
            )
            .expect("Failed to insert raw snapshot");
    }

    #[test]
    fn test_save_and_load_snapshot() {
        let mut store = SqliteStore::in_memory().expect("Failed to open store");
        let game = sample_game();

        store.save(DEFAULT_KEY, &game).expect("Failed to save");
        let loaded = store.load(DEFAULT_KEY).expect("Failed to load");

        assert_eq!(loaded, Some(game));
        assert!(store.saved_at(DEFAULT_KEY).unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites_existing_key() {
        let mut store = SqliteStore::in_memory().unwrap();
        let first = sample_game();
        let second = first.submit_achieved(PlayerId(2), 1).unwrap();

        store.save("game", &first).unwrap();
        store.save("game", &second).unwrap();

        assert_eq!(store.load("game").unwrap(), Some(second));
        assert_eq!(store.keys().unwrap(), vec!["game".to_string()]);
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.save("game", &sample_game()).unwrap();
        store.clear("game").unwrap();
        assert_eq!(store.load("game").unwrap(), None);
        // clearing a missing key is fine
        store.clear("game").unwrap();
    }

    #[test]
    fn test_corrupt_row_loads_as_absent() {
        let store = SqliteStore::in_memory().unwrap();
        insert_raw(&store, "broken", "{\"players\":", "2024-01-01T00:00:00+00:00");
        assert_eq!(store.load("broken").unwrap(), None);
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let store = SqliteStore::in_memory().unwrap();
        insert_raw(&store, "game", "{}", "yesterday");
        assert!(matches!(
            store.saved_at("game"),
            Err(StorageError::Timestamp { .. })
        ));
    }
}

#[cfg(test)]
mod memory_store_tests {
    use crate::*;
    use engine::GameState;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let game = GameState::from_names(&["Ann", "Bob", "Cas", "Dee"]).unwrap();
        store.save(DEFAULT_KEY, &game).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), Some(game));
        store.clear(DEFAULT_KEY).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_discards_corrupt_snapshot() {
        let mut store = MemoryStore::new();
        store.insert_raw(DEFAULT_KEY, "[1, 2, 3]");
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), None);
    }

    #[test]
    fn test_noop_store_never_returns_anything() {
        let mut store = NoopStore;
        let game = GameState::from_names(&["Ann", "Bob", "Cas", "Dee"]).unwrap();
        store.save(DEFAULT_KEY, &game).unwrap();
        assert_eq!(store.load(DEFAULT_KEY).unwrap(), None);
    }
}
