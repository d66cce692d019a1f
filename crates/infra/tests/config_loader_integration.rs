//! Config file loading against real files on disk.

use std::fs;

use tempfile::TempDir;
use tinderbox_domain::{MailDriver, TinderboxError};
use tinderbox_infra::config::{apply_overrides, load_from_file, validate};

#[test]
fn full_toml_document_round_trips_every_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tinderbox.toml");
    fs::write(
        &path,
        r#"
[server]
host = "127.0.0.1"
port = 8181

[database]
path = "/var/lib/tinderbox/app.db"
pool_size = 4
busy_timeout_ms = 2000

[notifier]
threshold = 100
recipient = "ops@example.com"

[mail]
driver = "http"
from = "alerts@example.com"
relay_url = "https://relay.example.com/send"
timeout_secs = 3

[scheduler]
enabled = false
cron_expression = "0 */10 * * * *"

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let config = load_from_file(&path).unwrap();
    assert_eq!(config.server.bind_address(), "127.0.0.1:8181");
    assert_eq!(config.database.pool_size, 4);
    assert_eq!(config.notifier.threshold, 100);
    assert_eq!(config.mail.driver, MailDriver::Http);
    assert_eq!(config.mail.relay_url.as_deref(), Some("https://relay.example.com/send"));
    assert!(!config.scheduler.enabled);
    assert!(config.logging.json);
    assert!(validate(&config).is_ok());
}

#[test]
fn environment_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"notifier": {"threshold": 5, "recipient": "file@example.com"}}"#).unwrap();

    let mut config = load_from_file(&path).unwrap();
    apply_overrides(&mut config, |key| {
        (key == "TINDERBOX_ADMIN_EMAIL").then(|| "env@example.com".to_string())
    })
    .unwrap();

    assert_eq!(config.notifier.threshold, 5);
    assert_eq!(config.notifier.recipient, "env@example.com");
}

#[test]
fn malformed_toml_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[notifier\nthreshold = ").unwrap();

    assert!(matches!(load_from_file(&path), Err(TinderboxError::Config(_))));
}
