//! Settings resolution: CLI path → `ERRWATCH_CONFIG` → XDG config dir → defaults.

use crate::settings::Settings;
use crate::validate::{validate, ValidationError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "ERRWATCH_CONFIG";

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "errwatch";

/// Settings file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the effective settings came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

/// Inputs to resolution, split out so tests need not touch the real environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Gather the candidates from the process environment.
    pub fn from_env(cli: Option<PathBuf>) -> Self {
        Self {
            cli,
            env: std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            config_dir: dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME)),
        }
    }
}

/// Settings plus their provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub source: ConfigSource,
}

/// Resolve, load and validate the effective settings.
///
/// An explicit path (CLI or env) that does not exist is an error; a missing
/// XDG file silently falls through to defaults.
pub fn resolve_config(paths: &ConfigPaths) -> Result<ResolvedConfig, ValidationError> {
    let (settings, source) = if let Some(path) = &paths.cli {
        (load_file(path)?, ConfigSource::Cli(path.clone()))
    } else if let Some(path) = &paths.env {
        (load_file(path)?, ConfigSource::Env(path.clone()))
    } else {
        match paths
            .config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .filter(|p| p.is_file())
        {
            Some(path) => (load_file(&path)?, ConfigSource::Xdg(path)),
            None => (Settings::default(), ConfigSource::Defaults),
        }
    };

    validate(&settings).into_result()?;
    Ok(ResolvedConfig { settings, source })
}

/// Load a settings file, picking the parser from the extension.
pub fn load_file(path: &Path) -> Result<Settings, ValidationError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Settings::from_json_str(&raw)
            .map_err(|e| ValidationError::ParseError(format!("{}: {}", path.display(), e)))
    } else {
        Settings::from_toml_str(&raw)
            .map_err(|e| ValidationError::ParseError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn nothing_configured_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = ConfigPaths {
            config_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.settings, Settings::default());
    }

    #[test]
    fn cli_wins_over_env_and_xdg() {
        let dir = tempdir().unwrap();
        let cli = dir.path().join("cli.toml");
        let env = dir.path().join("env.toml");
        fs::write(&cli, "[schedule]\nhealth_interval_secs = 5\n").unwrap();
        fs::write(&env, "[schedule]\nhealth_interval_secs = 7\n").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[schedule]\nhealth_interval_secs = 9\n",
        )
        .unwrap();

        let mut paths = ConfigPaths {
            cli: Some(cli.clone()),
            env: Some(env.clone()),
            config_dir: Some(dir.path().to_path_buf()),
        };
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.source, ConfigSource::Cli(cli));
        assert_eq!(resolved.settings.schedule.health_interval_secs, 5);

        paths.cli = None;
        let resolved = resolve_config(&paths).unwrap();
        assert_eq!(resolved.source, ConfigSource::Env(env));
        assert_eq!(resolved.settings.schedule.health_interval_secs, 7);

        paths.env = None;
        let resolved = resolve_config(&paths).unwrap();
        assert!(matches!(resolved.source, ConfigSource::Xdg(_)));
        assert_eq!(resolved.settings.schedule.health_interval_secs, 9);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let paths = ConfigPaths {
            cli: Some(PathBuf::from("/nonexistent/errwatch.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::IoError(_))
        ));
    }

    #[test]
    fn json_extension_uses_json_parser() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"credits": {"rate_per_hour": 80.0}}"#).unwrap();
        let settings = load_file(&path).unwrap();
        assert!((settings.credits.rate_per_hour - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_values_fail_resolution() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[schedule]\nscan_interval_secs = 0\n").unwrap();
        let paths = ConfigPaths {
            cli: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&paths),
            Err(ValidationError::ZeroValue { .. })
        ));
    }
}
