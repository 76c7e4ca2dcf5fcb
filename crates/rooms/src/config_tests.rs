use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = ServiceConfig::from_toml_str("").unwrap();
    assert_eq!(config, ServiceConfig::default());
    assert_eq!(config.storage, StorageConfig::Memory);
    assert_eq!(config.room_code_length, 6);
}

#[test]
fn test_directory_storage() {
    let config = ServiceConfig::from_toml_str(
        r#"
        room_code_length = 4
        log_level = "debug"

        [storage]
        kind = "directory"
        path = "games"
        "#,
    )
    .unwrap();
    assert_eq!(config.room_code_length, 4);
    assert_eq!(config.log_level, "debug");
    assert_eq!(
        config.storage,
        StorageConfig::Directory {
            path: PathBuf::from("games")
        }
    );
}

#[test]
fn test_unknown_storage_kind_is_rejected() {
    let err = ServiceConfig::from_toml_str("[storage]\nkind = \"postgres\"\n").unwrap_err();
    assert!(matches!(err, crate::RoomError::Config(_)));
}

#[test]
fn test_memory_store_opens() {
    let store = ServiceConfig::default().open_store().unwrap();
    assert!(store.rooms().unwrap().is_empty());
}
