//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ComparatorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ComparatorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, apply environment overrides, and validate.
pub fn parse_config(content: &str) -> Result<ComparatorConfig, ConfigError> {
    let mut config: ComparatorConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Default configuration with environment overrides applied.
pub fn default_config() -> ComparatorConfig {
    let mut config = ComparatorConfig::default();
    apply_env_overrides(&mut config);
    config
}

/// The API key comes from the environment when the named variable is set,
/// so it never has to live in the file.
pub fn apply_env_overrides(config: &mut ComparatorConfig) {
    if config.provider.api_key_env.is_empty() {
        return;
    }
    if let Ok(key) = std::env::var(&config.provider.api_key_env) {
        if !key.trim().is_empty() {
            config.provider.api_key = key.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [provider]
            api_key = "from-file"
            api_key_env = ""

            [route]
            origin = "Centreville Library, Centreville, VA"
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.provider.api_key, "from-file");
        assert_eq!(config.route.origin, "Centreville Library, Centreville, VA");
    }

    #[test]
    fn test_env_overrides_file_key() {
        let var = "ROUTE_COMPARATOR_TEST_KEY_OVERRIDE";
        std::env::set_var(var, "from-env");
        let config = parse_config(&format!(
            "[provider]\napi_key = \"from-file\"\napi_key_env = \"{}\"\n",
            var
        ))
        .unwrap();
        std::env::remove_var(var);
        assert_eq!(config.provider.api_key, "from-env");
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_config("[readiness]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("readiness.timeout_secs"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
