#[cfg(test)]
mod tests {
    use crate::config::*;
    use figment::Jail;
    use std::path::{Path, PathBuf};
    use umami_graph::{DetectorKind, KeyStrategy, Strategy};

    #[test]
    fn test_serialization() {
        let config = UmamiConfig {
            corpus_size: 500,
            strategy: Strategy::Cooccurring,
            cache_key: KeyStrategy::Content,
            aliases: [("scallion".to_string(), "green onion".to_string())].into(),
            ..UmamiConfig::default_config()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UmamiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);

        // camelCase field names and lowercase enums
        let json_val = serde_json::to_value(&config).unwrap();
        assert_eq!(json_val["corpusSize"], 500);
        assert_eq!(json_val["cacheDir"], ".cache/umami");
        assert_eq!(json_val["strategy"], "cooccurring");
        assert_eq!(json_val["cacheKey"], "content");
        assert_eq!(json_val["community"], "greedy");
        assert!(json_val.get("corpus_size").is_none());
    }

    #[test]
    fn test_defaults() {
        let config = UmamiConfig::default();
        assert_eq!(config.source, PathBuf::from("recipes.jsonl"));
        assert_eq!(config.cache_dir, PathBuf::from(".cache/umami"));
        assert_eq!(config.corpus_size, 10_000);
        assert_eq!(config.recommendations, 5);
        assert_eq!(config.strategy, Strategy::Adjacency);
        assert_eq!(config.community, DetectorKind::Greedy);
        assert_eq!(config.cache_key, KeyStrategy::CorpusSize);
        assert!(!config.force_rebuild);
        assert!(config.aliases.is_empty());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: UmamiConfig = serde_json::from_str(r#"{"corpusSize": 42}"#).unwrap();
        assert_eq!(config.corpus_size, 42);
        assert_eq!(config.recommendations, 5);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<UmamiConfig, _> = serde_json::from_str(r#"{"corpus": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(UmamiConfig::default_config().validate().is_ok());

        assert!(
            UmamiConfig {
                corpus_size: 0,
                ..UmamiConfig::default_config()
            }
            .validate()
            .is_err()
        );

        assert!(
            UmamiConfig {
                recommendations: 0,
                ..UmamiConfig::default_config()
            }
            .validate()
            .is_err()
        );

        assert!(
            UmamiConfig {
                aliases: [(" ".to_string(), "onion".to_string())].into(),
                ..UmamiConfig::default_config()
            }
            .validate()
            .is_err()
        );

        assert!(
            UmamiConfig {
                aliases: [("scallion".to_string(), "".to_string())].into(),
                ..UmamiConfig::default_config()
            }
            .validate()
            .is_err()
        );

        assert!(
            UmamiConfig {
                ignore: vec!["".to_string()],
                ..UmamiConfig::default_config()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_env_field_name() {
        assert_eq!(env_field_name("CORPUS_SIZE"), "corpusSize");
        assert_eq!(env_field_name("CACHE_DIR"), "cacheDir");
        assert_eq!(env_field_name("FORCE_REBUILD"), "forceRebuild");
        assert_eq!(env_field_name("SOURCE"), "source");
        assert_eq!(env_field_name("_STRATEGY"), "strategy");
    }

    #[test]
    fn test_load_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = UmamiConfig::load(None, &ConfigOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config, UmamiConfig::default_config());
            Ok(())
        });
    }

    #[test]
    fn test_load_picks_up_default_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"{"source": "data/recipes.jsonl", "community": "louvain"}"#,
            )?;
            let config = UmamiConfig::load(None, &ConfigOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.source, PathBuf::from("data/recipes.jsonl"));
            assert_eq!(config.community, DetectorKind::Louvain);
            assert_eq!(config.corpus_size, 10_000);
            Ok(())
        });
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.json",
                r#"{"corpusSize": 100, "recommendations": 8, "strategy": "cooccurring"}"#,
            )?;
            jail.set_env("UMAMI_CORPUS_SIZE", 200);
            jail.set_env("UMAMI_CACHE_KEY", "content");

            let overrides = ConfigOverrides {
                corpus_size: Some(300),
                ..ConfigOverrides::default()
            };
            let config = UmamiConfig::load(Some(Path::new("custom.json")), &overrides)
                .map_err(|e| e.to_string())?;

            assert_eq!(config.corpus_size, 300);
            assert_eq!(config.cache_key, KeyStrategy::Content);
            assert_eq!(config.recommendations, 8);
            assert_eq!(config.strategy, Strategy::Cooccurring);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"{"corpusSize": 100}"#)?;
            jail.set_env("UMAMI_CORPUS_SIZE", 250);
            jail.set_env("UMAMI_FORCE_REBUILD", true);

            let config = UmamiConfig::load(None, &ConfigOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.corpus_size, 250);
            assert!(config.force_rebuild);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = UmamiConfig::load(
                Some(Path::new("nope.json")),
                &ConfigOverrides::default(),
            )
            .unwrap_err();
            assert!(err.to_string().contains("Config file not found"));
            Ok(())
        });
    }

    #[test]
    fn test_bad_field_type_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"{"corpusSize": "lots"}"#)?;
            let err = UmamiConfig::load(None, &ConfigOverrides::default()).unwrap_err();
            assert!(err.to_string().contains("Invalid value for 'configuration'"));
            Ok(())
        });
    }

    #[test]
    fn test_overrides_skip_unset_fields() {
        let overrides = ConfigOverrides {
            strategy: Some(Strategy::Cooccurring),
            ..ConfigOverrides::default()
        };
        assert!(!overrides.is_empty());
        let json = serde_json::to_value(&overrides).unwrap();
        assert_eq!(json, serde_json::json!({"strategy": "cooccurring"}));
        assert!(ConfigOverrides::default().is_empty());
    }
}
