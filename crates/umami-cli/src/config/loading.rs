use crate::config::{ConfigOverrides, UmamiConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::{Path, PathBuf};
use umami_graph::{DetectorKind, KeyStrategy, Strategy};

/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "umami.config.json";

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "UMAMI_";

/// Map an environment variable suffix to its config field.
///
/// `CORPUS_SIZE` becomes `corpusSize`, `CACHE_DIR` becomes `cacheDir`.
pub fn env_field_name(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.trim().chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}

impl UmamiConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = Self::config_file(config_path)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // UMAMI_CORPUS_SIZE, UMAMI_CACHE_DIR, ...
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .lowercase(false)
                .map(|key| env_field_name(key.as_str()).into()),
        );

        if !overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} syntax, field names and types", CONFIG_FILE_NAME),
            }
            .into()
        })
    }

    /// Resolve the config file to read: an explicit path must exist, the
    /// default file is optional.
    pub fn config_file(config_path: Option<&Path>) -> Result<Option<PathBuf>> {
        match config_path {
            Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                Ok(default_path.is_file().then(|| default_path.to_path_buf()))
            }
        }
    }

    /// Get default configuration values.
    pub fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            source: default_source(),
            cache_dir: default_cache_dir(),
            corpus_size: default_corpus_size(),
            recommendations: default_recommendations(),
            strategy: Strategy::default(),
            community: DetectorKind::default(),
            cache_key: KeyStrategy::default(),
            force_rebuild: false,
            aliases: Default::default(),
            ignore: Vec::new(),
        }
    }
}
