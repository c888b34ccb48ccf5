// ═══════════════════════════════════════════════════════════════════
// Storage Tests — FileTokenStore, MemoryTokenStore
// ═══════════════════════════════════════════════════════════════════

use mtaa_hustle_core::storage::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

// ═══════════════════════════════════════════════════════════════════
// FileTokenStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("tok-abc123").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok-abc123".to_string()));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupted_file_is_discarded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{{ not json").unwrap();
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn empty_token_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, br#"{ "access_token": "" }"#).unwrap();
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn record_uses_the_well_known_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("tok-abc123").unwrap();
        let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        assert!(raw.contains("access_token"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("inside").join("session.json");
        let store = FileTokenStore::new(&nested);
        store.save("tok").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn clear_removes_the_token_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing again is a no-op, not an error.
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_overwrites_the_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("old").unwrap();
        store.save("new").unwrap();
        assert_eq!(store.load().unwrap(), Some("new".to_string()));
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryTokenStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn with_token_starts_populated() {
        let store = MemoryTokenStore::with_token("tok-xyz");
        assert_eq!(store.load().unwrap(), Some("tok-xyz".to_string()));
    }

    #[test]
    fn save_load_clear_cycle() {
        let store = MemoryTokenStore::new();
        store.save("tok").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }
}
