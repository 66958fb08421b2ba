#[cfg(test)]
mod tests {
    use breakwatch::db::kv::SqliteStore;
    use breakwatch::libs::settings::PauseSettings;
    use breakwatch::libs::store::{self, KeyValueStore, MemoryStore, StoreError, PAUSE_SETTINGS_KEY, PAUSE_STATE_KEY};
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Database file inside a temporary directory removed on teardown.
    struct StoreContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for StoreContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join("breakwatch.db");
            StoreContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_missing_key_reads_as_none(ctx: &mut StoreContext) {
        let kv = SqliteStore::open(&ctx.db_path).unwrap();

        assert_eq!(kv.get(PAUSE_STATE_KEY).unwrap(), None);
        assert_eq!(kv.updated_at(PAUSE_STATE_KEY).unwrap(), None);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_update_replaces_value(ctx: &mut StoreContext) {
        let kv = SqliteStore::open(&ctx.db_path).unwrap();

        kv.update(PAUSE_STATE_KEY, json!({"phase": "work", "remainingSeconds": 1200})).unwrap();
        kv.update(PAUSE_STATE_KEY, json!({"phase": "break", "remainingSeconds": 20})).unwrap();

        assert_eq!(
            kv.get(PAUSE_STATE_KEY).unwrap(),
            Some(json!({"phase": "break", "remainingSeconds": 20}))
        );
        let updated_at = kv.updated_at(PAUSE_STATE_KEY).unwrap().unwrap();
        assert_eq!(updated_at.len(), "2024-01-01 00:00:00".len());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_values_survive_reopen(ctx: &mut StoreContext) {
        let settings = PauseSettings {
            enabled: true,
            work_interval_minutes: 45,
            ..PauseSettings::default()
        };
        {
            let kv = SqliteStore::open(&ctx.db_path).unwrap();
            store::save(&kv, PAUSE_SETTINGS_KEY, &settings).unwrap();
        }

        let kv = SqliteStore::open(&ctx.db_path).unwrap();
        let loaded: Option<PauseSettings> = store::load(&kv, PAUSE_SETTINGS_KEY);

        assert_eq!(loaded, Some(settings));
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_keys_are_independent(ctx: &mut StoreContext) {
        let kv = SqliteStore::open(&ctx.db_path).unwrap();

        kv.update(PAUSE_SETTINGS_KEY, json!({"enabled": true})).unwrap();
        kv.update(PAUSE_STATE_KEY, json!(null)).unwrap();

        assert_eq!(kv.get(PAUSE_SETTINGS_KEY).unwrap(), Some(json!({"enabled": true})));
        assert_eq!(kv.get(PAUSE_STATE_KEY).unwrap(), Some(json!(null)));
    }

    #[test]
    fn test_load_treats_malformed_value_as_missing() {
        let kv = MemoryStore::new();
        kv.insert_raw(PAUSE_SETTINGS_KEY, json!({"enabled": "sometimes"}));

        let loaded: Option<PauseSettings> = store::load(&kv, PAUSE_SETTINGS_KEY);

        assert_eq!(loaded, None);
    }

    #[test]
    fn test_memory_store_write_failure() {
        let kv = MemoryStore::new();
        kv.set_fail_writes(true);

        let result = store::save(&kv, PAUSE_SETTINGS_KEY, &PauseSettings::default());

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(kv.get(PAUSE_SETTINGS_KEY).unwrap(), None);
    }
}
