use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Config pointing at a port nothing listens on, with no reply delay
#[allow(dead_code)]
pub fn offline_config() -> (TempDir, PathBuf) {
    temp_config_file(
        r#"
api:
  base_url: http://127.0.0.1:9/api/v1
  timeout_seconds: 2
chat:
  reply_delay_min_ms: 0
  reply_delay_max_ms: 0
auth:
  keyring_service: taskmate-cli-test
"#,
    )
}
