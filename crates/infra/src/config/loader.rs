//! Configuration loader
//!
//! Loads dispatcher configuration from a file, then applies environment
//! overrides.
//!
//! ## Loading Strategy
//! 1. `ETIMS_CONFIG_PATH` names the file explicitly, if set
//! 2. Otherwise the standard locations are probed
//! 3. Without any file, built-in defaults are used (no routes, no
//!    credentials)
//! 4. Environment overrides are applied last
//!
//! ## Environment Variables
//! - `ETIMS_CONFIG_PATH`: Config file path (`.toml` or `.json`)
//! - `ETIMS_HTTP_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `ETIMS_USER_AGENT`: Outbound `User-Agent`
//! - `ETIMS_DEFAULT_COMPANY`: Company used when a payload names none
//! - `ETIMS_DEFAULT_BRANCH`: Branch used when a payload names none
//! - `ETIMS_DEFAULT_DOCTYPE`: Doctype used for error attribution
//!
//! ## File Locations
//! The loader probes `etims.toml`, `etims.json`, `config.toml` and
//! `config.json` in the current working directory, then its parent and
//! grandparent.

use std::path::{Path, PathBuf};

use etims_domain::{EtimsConfig, EtimsError, Result};

const CONFIG_PATH_VAR: &str = "ETIMS_CONFIG_PATH";
const CONFIG_FILE_NAMES: [&str; 4] = ["etims.toml", "etims.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `EtimsError::Config` if:
/// - `ETIMS_CONFIG_PATH` names a missing file
/// - The file format is invalid
/// - An override variable has an invalid value
pub fn load() -> Result<EtimsConfig> {
    let config = match std::env::var(CONFIG_PATH_VAR).ok().filter(|p| !p.trim().is_empty()) {
        Some(path) => load_from_file(Some(PathBuf::from(path)))?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                tracing::info!("No config file found, using defaults");
                EtimsConfig::default()
            }
        },
    };

    apply_env_overrides(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by file extension.
///
/// # Errors
/// Returns `EtimsError::Config` if the file is missing, unreadable, or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<EtimsConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(EtimsError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            EtimsError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| EtimsError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Apply `ETIMS_*` environment overrides on top of `config`.
///
/// # Errors
/// Returns `EtimsError::Config` if an override has an invalid value.
pub fn apply_env_overrides(mut config: EtimsConfig) -> Result<EtimsConfig> {
    if let Some(timeout) = env_opt("ETIMS_HTTP_TIMEOUT_SECS") {
        config.http.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| EtimsError::Config(format!("Invalid HTTP timeout: {}", e)))?;
    }
    if let Some(agent) = env_opt("ETIMS_USER_AGENT") {
        config.http.user_agent = agent;
    }
    if let Some(company) = env_opt("ETIMS_DEFAULT_COMPANY") {
        config.defaults.company = Some(company);
    }
    if let Some(branch) = env_opt("ETIMS_DEFAULT_BRANCH") {
        config.defaults.branch_id = branch;
    }
    if let Some(doctype) = env_opt("ETIMS_DEFAULT_DOCTYPE") {
        config.defaults.doctype = doctype;
    }

    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<EtimsConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| EtimsError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| EtimsError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(EtimsError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(3)
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Non-blank environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
