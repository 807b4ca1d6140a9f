use std::fs;

use tempfile::TempDir;
use user_admin::config::{parse_base_url, Config, ConfigManager};
use user_admin::errors::ConfigError;

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();
    let config = Config {
        api_base_url: "http://users.internal:9000/crud".into(),
        page_size: 10,
        ui_color_enabled: false,
    };

    manager.save(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
    assert!(!manager.path().with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_is_a_serde_error() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    fs::write(manager.path(), "{ not json").unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn configured_url_is_validated() {
    assert!(matches!(
        parse_base_url("not a url"),
        Err(ConfigError::InvalidUrl { .. })
    ));
    let url = parse_base_url(" http://localhost:8080/crud ").unwrap();
    assert_eq!(url.path(), "/crud");
}
