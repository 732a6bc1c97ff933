//! TOML-based application configuration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.toml";

/// Top-level application configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`AppConfig::from_toml_file`] or use [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Input, output and reference data locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Folder watching and keep-alive timing.
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Input, output and reference data locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Folder scanned and watched for generation reports.
    pub input_folder: PathBuf,
    /// Folder that receives `GenerationOutput_*.xml` files.
    pub output_folder: PathBuf,
    /// Reference factors XML file.
    pub reference_data: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("input"),
            output_folder: PathBuf::from("output"),
            reference_data: PathBuf::from("ReferenceData.xml"),
        }
    }
}

/// Folder watching and keep-alive timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// Delay before reading a newly seen file, so its writer can finish (ms).
    pub settle_delay_ms: u64,
    /// Keep-alive loop tick (ms, must be > 0).
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 500,
            poll_interval_ms: 100,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"watch.poll_interval_ms"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl AppConfig {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] in
    /// the working directory if it exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a config file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_toml_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_toml_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.paths;

        for (field, value) in [
            ("paths.input_folder", &p.input_folder),
            ("paths.output_folder", &p.output_folder),
            ("paths.reference_data", &p.reference_data),
        ] {
            if value.as_os_str().is_empty() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must not be empty".into(),
                });
            }
        }

        if !p.input_folder.as_os_str().is_empty()
            && same_folder(&p.input_folder, &p.output_folder)
        {
            errors.push(ConfigError {
                field: "paths.output_folder".into(),
                message: "must differ from paths.input_folder".into(),
            });
        }

        if self.watch.poll_interval_ms == 0 {
            errors.push(ConfigError {
                field: "watch.poll_interval_ms".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

/// Compares folder paths lexically, ignoring `.` components.
fn same_folder(a: &Path, b: &Path) -> bool {
    folder_parts(a) == folder_parts(b)
}

fn folder_parts(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(cfg.paths.reference_data, PathBuf::from("ReferenceData.xml"));
        assert_eq!(cfg.watch.settle_delay_ms, 500);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[paths]
input_folder = "/data/in"
output_folder = "/data/out"
reference_data = "/data/ReferenceData.xml"

[watch]
settle_delay_ms = 0
poll_interval_ms = 250
"#;
        let cfg = AppConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.paths.input_folder.clone()),
            Some(PathBuf::from("/data/in"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.watch.settle_delay_ms), Some(0));
        assert_eq!(cfg.as_ref().map(|c| c.watch.poll_interval_ms), Some(250));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[paths]
input_folder = "in"
bogus_field = true
"#;
        let result = AppConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[watch]
settle_delay_ms = 10
"#;
        let cfg = AppConfig::from_toml_str(toml).expect("partial config parses");
        assert_eq!(cfg.watch.settle_delay_ms, 10);
        assert_eq!(cfg.watch.poll_interval_ms, 100);
        assert_eq!(cfg.paths.output_folder, PathBuf::from("output"));
    }

    #[test]
    fn validation_catches_zero_poll_interval() {
        let mut cfg = AppConfig::default();
        cfg.watch.poll_interval_ms = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "watch.poll_interval_ms"));
    }

    #[test]
    fn validation_catches_empty_paths() {
        let mut cfg = AppConfig::default();
        cfg.paths.input_folder = PathBuf::new();
        cfg.paths.reference_data = PathBuf::new();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "paths.reference_data"));
    }

    #[test]
    fn validation_catches_shared_input_and_output_folder() {
        let mut cfg = AppConfig::default();
        cfg.paths.input_folder = PathBuf::from("./drop");
        cfg.paths.output_folder = PathBuf::from("drop/");
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "paths.output_folder");

        cfg.paths.output_folder = PathBuf::from("drop/out");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AppConfig::from_toml_file(Path::new("no/such/appsettings.toml")).unwrap_err();
        assert_eq!(err.field, "config");
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[paths]\ninput_folder = \"drop\"\n").expect("write config");
        let cfg = AppConfig::load(Some(&path)).expect("config loads");
        assert_eq!(cfg.paths.input_folder, PathBuf::from("drop"));
    }
}
