use std::fs;
use std::path::PathBuf;

use spendview_config::{Config, ConfigError, ConfigManager};
use spendview_domain::{SortKey, TimeWindow};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");

    let cfg = manager.load().expect("load config");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.currency_symbol, "฿");
    assert_eq!(cfg.decimal_places, 2);
    assert!(manager.base_dir().exists());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let cfg = Config {
        currency_symbol: "€".into(),
        decimal_places: 1,
        dashboard_window: TimeWindow::Week,
        default_sort: SortKey::AmountDesc,
        ui_color_enabled: false,
        last_snapshot: Some(PathBuf::from("/tmp/expenses.json")),
    };
    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_is_reported_as_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), "{ not json").expect("write");

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}
