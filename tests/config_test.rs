// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读写与远端/本地存储切换
// ==========================================


use kol_import::app::AppState;
use kol_import::config::{config_keys, ConfigManager, ImportConfigReader};
use tempfile::TempDir;
use test_helpers::create_test_db;

#[tokio::test]
async fn test_defaults_on_empty_database() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config.get_currency_marker().await.unwrap(), "RM");
    assert_eq!(config.get_row_delay_ms().await.unwrap(), 0);
    assert_eq!(config.get_api_base_url().await.unwrap(), None);
    assert_eq!(config.get_api_timeout_secs().await.unwrap(), 30);
    assert!(config.list_global_configs().unwrap().is_empty());
}

#[tokio::test]
async fn test_set_values_are_visible_to_new_instance() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    {
        let config = ConfigManager::new(&db_path).unwrap();
        config
            .set_global_config_value(config_keys::CURRENCY_MARKER, "USD")
            .unwrap();
        config
            .set_global_config_value(config_keys::API_BASE_URL, "https://api.example.com/")
            .unwrap();
        // 覆盖写
        config
            .set_global_config_value(config_keys::CURRENCY_MARKER, "SGD")
            .unwrap();
    }

    let config = ConfigManager::new(&db_path).unwrap();
    assert_eq!(config.get_currency_marker().await.unwrap(), "SGD");
    assert_eq!(
        config.get_api_base_url().await.unwrap().as_deref(),
        Some("https://api.example.com")
    );

    let all = config.list_global_configs().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        config
            .get_global_config_value(config_keys::CURRENCY_MARKER)
            .unwrap()
            .as_deref(),
        Some("SGD")
    );
}

#[tokio::test]
async fn test_malformed_numbers_fall_back() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    config
        .set_global_config_value(config_keys::ROW_DELAY_MS, "fast")
        .unwrap();
    config
        .set_global_config_value(config_keys::API_TIMEOUT_SECS, "0")
        .unwrap();

    assert_eq!(config.get_row_delay_ms().await.unwrap(), 0);
    assert_eq!(config.get_api_timeout_secs().await.unwrap(), 30);
}

#[tokio::test]
async fn test_empty_key_is_rejected() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    let config = ConfigManager::new(&db_path).unwrap();

    assert!(config.set_global_config_value("  ", "x").is_err());
}

#[tokio::test]
async fn test_unreachable_remote_fails_rows_but_keeps_local_history() {
    let (_temp_file, db_path) = create_test_db().unwrap();
    {
        let config = ConfigManager::new(&db_path).unwrap();
        config
            .set_global_config_value(config_keys::API_BASE_URL, "http://127.0.0.1:1")
            .unwrap();
        config
            .set_global_config_value(config_keys::API_TIMEOUT_SECS, "2")
            .unwrap();
    }

    let work_dir = TempDir::new().unwrap();
    let input = work_dir.path().join("remote.csv");
    std::fs::write(
        &input,
        "Name,Instagram\nAmy,https://instagram.com/amy\nBen,https://instagram.com/ben\n",
    )
    .unwrap();

    let state = AppState::new(&db_path).await.unwrap();
    let outcome = state.import_api.import_file(&input).await.unwrap();

    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.succeeded, 0);
    assert_eq!(outcome.failed, 2);
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[1].row_number, 2);

    let batches = state.import_api.list_recent_batches(5).await.unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].failed, 2);
}
