//! Storage Module Tests
//!
//! ## Test Scopes
//! - **Backends**: byte-exact round trips and missing-key handling for memory and disk.
//! - **TierMapping**: level binding rules and dispatch to the bound backend.
//! - **Protocol**: paths shared with the router.
//!
//! *Note: the HTTP surface is exercised end to end in `tests/cluster.rs`.*

#[cfg(test)]
mod tests {
    use crate::storage::protocol::{store_config_path, store_path};
    use crate::storage::{
        FileStore, MEMORY_LEVEL, MemoryStore, StorageBackend, StorageError, TierMapping,
    };
    use bytes::Bytes;

    fn payloads() -> Vec<Bytes> {
        vec![
            Bytes::new(),
            Bytes::from_static(b"The bare necessities of life came to you"),
            Bytes::from_static(&[0x00, 0xff, 0x00, 0x10, 0x80, 0x00, b'\n', b'\r']),
        ]
    }

    fn assert_round_trips(store: &dyn StorageBackend) {
        for (i, payload) in payloads().into_iter().enumerate() {
            let key = format!("doc{}", i);
            store.set(&key, payload.clone()).unwrap();
            assert_eq!(store.get(&key).unwrap(), payload, "payload {} changed", i);
        }
    }

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[test]
    fn test_memory_store_round_trip() {
        assert_round_trips(&MemoryStore::new());
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("k", Bytes::from_static(b"v1")).unwrap();
        store.set("k", Bytes::from_static(b"v2")).unwrap();

        assert_eq!(store.get("k").unwrap(), Bytes::from_static(b"v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_unset_then_get_is_not_found() {
        let store = MemoryStore::new();
        store.set("k", Bytes::from_static(b"v")).unwrap();
        assert_eq!(store.get("k").unwrap(), Bytes::from_static(b"v"));

        store.unset("k").unwrap();

        assert!(matches!(store.get("k"), Err(StorageError::NotFound(key)) if key == "k"));
        assert!(matches!(store.unset("k"), Err(StorageError::NotFound(_))));
        assert!(store.is_empty());
    }

    // ============================================================
    // FILE STORE
    // ============================================================

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        assert_round_trips(&FileStore::new(dir.path()).unwrap());
    }

    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("abc", Bytes::from_static(b"\0raw\0")).unwrap();

        assert_eq!(std::fs::read(dir.path().join("abc")).unwrap(), b"\0raw\0");
    }

    #[test]
    fn test_file_store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("tier");

        let store = FileStore::new(&root).unwrap();
        store.set("k", Bytes::from_static(b"v")).unwrap();

        assert!(root.join("k").exists());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_file_store_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(matches!(store.get("nope"), Err(StorageError::NotFound(_))));
        assert!(matches!(store.unset("nope"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_store_unset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.set("k", Bytes::from_static(b"v")).unwrap();

        store.unset("k").unwrap();

        assert!(!dir.path().join("k").exists());
        assert!(matches!(store.get("k"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        for key in ["", ".", "..", "../escape", "a/b", "a\\b", "/abs"] {
            assert!(
                matches!(
                    store.set(key, Bytes::from_static(b"x")),
                    Err(StorageError::InvalidKey(_))
                ),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_backend_descriptions() {
        let dir = tempfile::tempdir().unwrap();
        let disk = FileStore::new(dir.path()).unwrap();

        assert_eq!(MemoryStore::new().to_string(), "MemoryStore");
        assert_eq!(
            disk.to_string(),
            format!("DiskStore pointing at -> {}", dir.path().display())
        );
    }

    // ============================================================
    // TIER MAPPING
    // ============================================================

    #[test]
    fn test_level_zero_is_memory_regardless_of_route() {
        let mapping = TierMapping::new();
        mapping.bind(MEMORY_LEVEL, "ignored").unwrap();

        mapping.set("0", "k", Bytes::from_static(b"v")).unwrap();
        assert_eq!(mapping.get("0", "k").unwrap(), Bytes::from_static(b"v"));

        mapping.unset("0", "k").unwrap();
        assert!(matches!(mapping.get("0", "k"), Err(StorageError::NotFound(_))));

        assert_eq!(
            mapping.describe(),
            vec![("0".to_string(), "MemoryStore".to_string())]
        );
    }

    #[test]
    fn test_other_levels_are_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = TierMapping::new();
        mapping.bind("1", dir.path().to_str().unwrap()).unwrap();

        mapping.set("1", "k", Bytes::from_static(b"disk")).unwrap();

        assert_eq!(std::fs::read(dir.path().join("k")).unwrap(), b"disk");
    }

    #[test]
    fn test_rebinding_level_is_rejected() {
        let mapping = TierMapping::new();
        mapping.bind("0", "").unwrap();
        mapping.set("0", "k", Bytes::from_static(b"v")).unwrap();

        let err = mapping.bind("0", "").unwrap_err();

        assert!(matches!(err, StorageError::AlreadyMapped(level) if level == "0"));
        // The original backend and its data survive.
        assert_eq!(mapping.get("0", "k").unwrap(), Bytes::from_static(b"v"));
    }

    #[test]
    fn test_unmapped_level_is_reported() {
        let mapping = TierMapping::new();

        assert!(matches!(
            mapping.get("7", "k"),
            Err(StorageError::LevelNotMapped(level)) if level == "7"
        ));
        assert!(matches!(
            mapping.unbind("7"),
            Err(StorageError::LevelNotMapped(_))
        ));
    }

    #[test]
    fn test_unbind_then_rebind() {
        let mapping = TierMapping::new();
        mapping.bind("0", "").unwrap();
        mapping.set("0", "k", Bytes::from_static(b"v")).unwrap();

        mapping.unbind("0").unwrap();
        assert!(mapping.describe().is_empty());

        mapping.bind("0", "").unwrap();
        assert!(matches!(mapping.get("0", "k"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_levels_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = TierMapping::new();
        mapping.bind("0", "").unwrap();
        mapping.bind("2", dir.path().to_str().unwrap()).unwrap();

        mapping.set("0", "k", Bytes::from_static(b"memory")).unwrap();
        mapping.set("2", "k", Bytes::from_static(b"disk")).unwrap();

        assert_eq!(mapping.get("0", "k").unwrap(), Bytes::from_static(b"memory"));
        assert_eq!(mapping.get("2", "k").unwrap(), Bytes::from_static(b"disk"));
        assert_eq!(mapping.describe().len(), 2);
    }

    #[test]
    fn test_failed_bind_inserts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let mapping = TierMapping::new();

        let err = mapping.bind("3", blocker.to_str().unwrap()).unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
        assert!(mapping.describe().is_empty());
    }

    // ============================================================
    // PROTOCOL
    // ============================================================

    #[test]
    fn test_store_paths_are_encoded() {
        assert_eq!(store_path("abc", "0"), "/store/abc/0");
        assert_eq!(store_path("a b", "1"), "/store/a%20b/1");
        assert_eq!(store_config_path("1", "/tmp/x"), "/store_config/1/%2Ftmp%2Fx");
    }
}
