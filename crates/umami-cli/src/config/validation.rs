use crate::config::UmamiConfig;
use crate::error::{ConfigError, Result};

impl UmamiConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.corpus_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "corpusSize".to_string(),
                value: "0".to_string(),
                hint: "The graph needs at least one recipe".to_string(),
            }
            .into());
        }

        if self.recommendations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recommendations".to_string(),
                value: "0".to_string(),
                hint: "Ask for at least one recommendation".to_string(),
            }
            .into());
        }

        if self.source.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "source".to_string(),
                hint: "Point 'source' at a JSON-lines recipe file".to_string(),
            }
            .into());
        }

        for (raw, token) in &self.aliases {
            if raw.trim().is_empty() || token.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "aliases".to_string(),
                    value: format!("{:?} -> {:?}", raw, token),
                    hint: "Alias names and tokens must be non-empty".to_string(),
                }
                .into());
            }
        }

        for token in &self.ignore {
            if token.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "ignore".to_string(),
                    value: format!("{:?}", token),
                    hint: "Remove empty entries from 'ignore'".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
