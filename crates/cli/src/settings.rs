//! Layered configuration: defaults, optional file, `BANDBOOK__*` environment

use std::path::Path;

use config::{Config, Environment, File};

use bandbook_core::AppConfig;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bandbook";

pub const ENV_PREFIX: &str = "BANDBOOK";

pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    load_with_prefix(path, ENV_PREFIX)
}

/// Same as [`load`], reading `<env_prefix>__*` variables.
pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> anyhow::Result<AppConfig> {
    let defaults = Config::try_from(&AppConfig::default())?;

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = settings.try_deserialize()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_temp(
            "bandbook-test.toml",
            r#"
[pair]
base = "ETH"
quote = "USDC"

[http]
timeout_ms = 2500
"#,
        );

        let config = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.pair.base, "ETH");
        assert_eq!(config.pair.quote, "USDC");
        assert_eq!(config.http.timeout_ms, 2500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let prefix = "BANDBOOK_ENVTEST";
        std::env::set_var("BANDBOOK_ENVTEST__HTTP__TIMEOUT_MS", "1234");
        std::env::set_var("BANDBOOK_ENVTEST__PAIR__BASE", "ETH");

        let path = write_temp("bandbook-env-test.toml", "[http]\ntimeout_ms = 2500\n");
        let config = load_with_prefix(Some(&path), prefix);

        std::fs::remove_file(&path).ok();
        std::env::remove_var("BANDBOOK_ENVTEST__HTTP__TIMEOUT_MS");
        std::env::remove_var("BANDBOOK_ENVTEST__PAIR__BASE");

        let config = config.unwrap();
        assert_eq!(config.http.timeout_ms, 1234);
        assert_eq!(config.pair.base, "ETH");
        assert_eq!(config.pair.quote, "USDT");
        assert_eq!(config.venues.len(), 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("bandbook-does-not-exist.toml");
        assert!(load(Some(&path)).is_err());
    }
}
