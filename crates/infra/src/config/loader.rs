//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Read `.env` (if present) into the process environment
//! 2. Load the config file given explicitly, or the first one found by
//!    [`probe_config_paths`], or fall back to defaults
//! 3. Overlay `TINDERBOX_*` environment variables
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `TINDERBOX_SERVER_HOST`, `TINDERBOX_SERVER_PORT`
//! - `TINDERBOX_DB_PATH`, `TINDERBOX_DB_POOL_SIZE`
//! - `TINDERBOX_ADMIN_EMAIL`: popularity alert recipient
//! - `TINDERBOX_POPULAR_THRESHOLD`: alert when `like_count` exceeds this
//! - `TINDERBOX_MAIL_DRIVER` (`log` or `http`), `TINDERBOX_MAIL_FROM`,
//!   `TINDERBOX_MAIL_RELAY_URL`, `TINDERBOX_MAIL_API_TOKEN`
//! - `TINDERBOX_SCHEDULER_ENABLED`, `TINDERBOX_SWEEP_CRON`
//! - `TINDERBOX_LOG_LEVEL`, `TINDERBOX_LOG_JSON`
//!
//! ## File Locations
//! `tinderbox.toml`, `config.toml`, `config.json` in the working directory,
//! then the same names next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tinderbox_domain::{Config, MailDriver, Result, TinderboxError};

const CONFIG_FILE_NAMES: [&str; 3] = ["tinderbox.toml", "config.toml", "config.json"];

/// Load configuration from file and environment.
///
/// # Errors
/// Returns `TinderboxError::Config` if the explicit file is missing, a file
/// cannot be parsed, an environment value is malformed, or the merged
/// configuration is invalid.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(env_path) => tracing::debug!(path = %env_path.display(), "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(TinderboxError::Config(format!("Failed to read .env: {err}"))),
    }

    let mut config = match path {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(&path)?,
            None => {
                tracing::info!("No config file found; using defaults");
                Config::default()
            }
        },
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file.
///
/// Format is detected by extension (`.toml` or `.json`).
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(TinderboxError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| TinderboxError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TinderboxError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TinderboxError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TinderboxError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Overlay `TINDERBOX_*` variables onto `config`.
///
/// `lookup` resolves a variable name; the process environment in production.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("TINDERBOX_SERVER_HOST") {
        config.server.host = host;
    }
    if let Some(port) = parsed(&lookup, "TINDERBOX_SERVER_PORT")? {
        config.server.port = port;
    }
    if let Some(path) = lookup("TINDERBOX_DB_PATH") {
        config.database.path = path;
    }
    if let Some(pool_size) = parsed(&lookup, "TINDERBOX_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }
    if let Some(recipient) = lookup("TINDERBOX_ADMIN_EMAIL") {
        config.notifier.recipient = recipient;
    }
    if let Some(threshold) = parsed(&lookup, "TINDERBOX_POPULAR_THRESHOLD")? {
        config.notifier.threshold = threshold;
    }
    if let Some(driver) = lookup("TINDERBOX_MAIL_DRIVER") {
        config.mail.driver = MailDriver::from_str(&driver)
            .map_err(|e| TinderboxError::Config(format!("Invalid TINDERBOX_MAIL_DRIVER: {e}")))?;
    }
    if let Some(from) = lookup("TINDERBOX_MAIL_FROM") {
        config.mail.from = from;
    }
    if let Some(url) = lookup("TINDERBOX_MAIL_RELAY_URL") {
        config.mail.relay_url = Some(url);
    }
    if let Some(token) = lookup("TINDERBOX_MAIL_API_TOKEN") {
        config.mail.api_token = Some(token);
    }
    if let Some(enabled) = lookup("TINDERBOX_SCHEDULER_ENABLED") {
        config.scheduler.enabled = parse_bool(&enabled);
    }
    if let Some(cron) = lookup("TINDERBOX_SWEEP_CRON") {
        config.scheduler.cron_expression = cron;
    }
    if let Some(level) = lookup("TINDERBOX_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("TINDERBOX_LOG_JSON") {
        config.logging.json = parse_bool(&json);
    }
    Ok(())
}

/// Reject configurations the services cannot run with.
pub fn validate(config: &Config) -> Result<()> {
    if config.notifier.threshold < 0 {
        return Err(TinderboxError::Config("notifier.threshold must not be negative".into()));
    }
    if config.notifier.recipient.trim().is_empty() {
        return Err(TinderboxError::Config("notifier.recipient must not be empty".into()));
    }
    if config.database.path.trim().is_empty() {
        return Err(TinderboxError::Config("database.path must not be empty".into()));
    }
    if config.database.pool_size == 0 {
        return Err(TinderboxError::Config("database.pool_size must be at least 1".into()));
    }
    if config.mail.driver == MailDriver::Http && config.mail.relay_url.is_none() {
        return Err(TinderboxError::Config(
            "mail.relay_url is required for the http mail driver".into(),
        ));
    }
    Ok(())
}

fn parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TinderboxError::Config(format!("Invalid {key} '{raw}': {e}")))
        })
        .transpose()
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
