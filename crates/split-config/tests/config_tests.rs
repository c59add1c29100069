use split_config::{Config, ConfigError, ConfigManager};
use split_domain::currency::NegativeStyle;
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.minor_unit_scale(), 2);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(dir.path().join("config").is_dir());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        currency: "JPY".to_string(),
        locale: "ja-JP".to_string(),
        negative_style: NegativeStyle::Parentheses,
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.minor_unit_scale(), 0);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn failed_save_leaves_no_staging_file() {
    let dir = tempdir().expect("tempdir");
    let occupied = dir.path().join("config.json");
    std::fs::create_dir(&occupied).expect("dir in the way");
    let manager = ConfigManager::new(occupied);

    assert!(matches!(
        manager.save(&Config::default()),
        Err(ConfigError::Io(_))
    ));
    assert!(!dir.path().join("config.json.tmp").exists());
}
