// Configuration loading and parsing (config/server.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// server.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire server.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ServerFile {
    server: ServerSection,
    websocket: WebsocketSection,
    providers: ProviderConfig,
    cache: CacheSection,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerSection {
    host: String,
    port: u16,
    #[serde(default)]
    cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct WebsocketSection {
    port: u16,
}

/// Upstream provider endpoints and request timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the id-keyed roster/stats/ADP provider (Sleeper-style API).
    pub sleeper_base_url: String,
    /// Base URL of the name-keyed ADP fallback provider (FFC-style API).
    pub ffc_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct CacheSection {
    players_ttl_secs: u64,
}

/// The assembled runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ws_port: u16,
    pub cors_origins: Vec<String>,
    pub providers: ProviderConfig,
    pub players_ttl_secs: u64,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/server.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let server_path = base_dir.join("config").join("server.toml");
    let server_text = read_file(&server_path)?;
    let server_file: ServerFile =
        toml::from_str(&server_text).map_err(|e| ConfigError::ParseError {
            path: server_path.clone(),
            source: e,
        })?;

    let mut cors_origins = server_file.server.cors_origins;
    // Merge additional origins from the environment, matching the original
    // deployment contract (comma-separated CORS_ORIGINS).
    if let Ok(extra) = std::env::var("CORS_ORIGINS") {
        for origin in extra.split(',') {
            let origin = origin.trim();
            if !origin.is_empty() && !cors_origins.iter().any(|o| o == origin) {
                cors_origins.push(origin.to_string());
            }
        }
    }

    let config = Config {
        host: server_file.server.host,
        port: server_file.server.port,
        ws_port: server_file.websocket.port,
        cors_origins,
        providers: server_file.providers,
        players_ttl_secs: server_file.cache.players_ttl_secs,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/` is populated, copying any file missing there from
/// `defaults/`. Existing files in `config/` are never touched; `.example`
/// templates are skipped. Returns the files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            // Nothing to seed from, but a config/ already exists; loading
            // will surface any missing file by name.
            return Ok(vec![]);
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no defaults/ or config/ directory under {}; run from the project root",
                base_dir.display()
            ),
        });
    }

    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut copied = Vec::new();
    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("cannot read {}: {e}", defaults_dir.display())))?;

    for entry in entries {
        let entry = entry.map_err(|e| copy_err(format!("cannot read defaults entry: {e}")))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || name.ends_with(".example") {
            continue;
        }

        let target = config_dir.join(name);
        // create_new makes the existence check and the copy one atomic step.
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path)
                    .map_err(|e| copy_err(format!("cannot read {}: {e}", path.display())))?;
                std::io::Write::write_all(&mut dest, &content)
                    .map_err(|e| copy_err(format!("cannot write {}: {e}", target.display())))?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(copy_err(format!("cannot create {}: {e}", target.display())));
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.host".into(),
            message: "must not be empty".into(),
        });
    }

    if config.providers.sleeper_base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "providers.sleeper_base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.providers.ffc_base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "providers.ffc_base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.providers.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "providers.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.players_ttl_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "cache.players_ttl_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_SERVER_TOML: &str = r#"
[server]
host = "127.0.0.1"
port = 8000
cors_origins = ["http://localhost:3000"]

[websocket]
port = 9001

[providers]
sleeper_base_url = "https://api.sleeper.app/v1"
ffc_base_url = "https://fantasyfootballcalculator.com/api/v1"
timeout_secs = 30

[cache]
players_ttl_secs = 300
"#;

    /// Helper: write a server.toml into a fresh temp dir and return the dir.
    fn write_config(dir_name: &str, content: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(dir_name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("server.toml"), content).unwrap();
        tmp
    }

    #[test]
    fn load_valid_config() {
        let tmp = write_config("draftroom_config_valid", VALID_SERVER_TOML);

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.ws_port, 9001);
        assert!(config
            .cors_origins
            .iter()
            .any(|o| o == "http://localhost:3000"));
        assert_eq!(config.providers.sleeper_base_url, "https://api.sleeper.app/v1");
        assert_eq!(config.providers.timeout_secs, 30);
        assert_eq!(config.players_ttl_secs, 300);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let modified = VALID_SERVER_TOML.replace("timeout_secs = 30", "timeout_secs = 0");
        let tmp = write_config("draftroom_config_zero_timeout", &modified);

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "providers.timeout_secs");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_cache_ttl() {
        let modified =
            VALID_SERVER_TOML.replace("players_ttl_secs = 300", "players_ttl_secs = 0");
        let tmp = write_config("draftroom_config_zero_ttl", &modified);

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "cache.players_ttl_secs");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_provider_url() {
        let modified = VALID_SERVER_TOML.replace(
            "sleeper_base_url = \"https://api.sleeper.app/v1\"",
            "sleeper_base_url = \"\"",
        );
        let tmp = write_config("draftroom_config_empty_url", &modified);

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "providers.sleeper_base_url");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_server_toml() {
        let tmp = std::env::temp_dir().join("draftroom_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("server.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("draftroom_config_invalid", "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("server.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("draftroom_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::write(defaults_dir.join("server.toml"), VALID_SERVER_TOML).unwrap();
        // Add an example file that should NOT be copied
        fs::write(defaults_dir.join("server.toml.example"), "# template\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/server.toml").exists());
        assert!(!tmp.join("config/server.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("draftroom_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(defaults_dir.join("server.toml"), VALID_SERVER_TOML).unwrap();

        // Pre-create server.toml in config/ with custom content
        fs::write(config_dir.join("server.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(config_dir.join("server.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("draftroom_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/ or config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
