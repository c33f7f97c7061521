//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use formcast_schemas::{ModelStore, ModelStoreConfig};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Open the model store, honouring a `--models` override and the cache setting
pub fn open_store(config: &Config, models_override: Option<&Path>) -> ModelStore {
    let mut store_config = ModelStoreConfig::new(config.models_dir(models_override));
    store_config.cache.enabled = config.cache_models;

    debug!(
        model_dir = %store_config.model_dir.display(),
        cache = store_config.cache.enabled,
        "Opening model store"
    );
    ModelStore::with_config(store_config)
}

/// Load a request parameter document; the root must be a mapping
pub fn load_parameters(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Parameter file read, {} bytes", content.len());

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| Error::ParamsYaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| Error::ParamsJson {
            path: path.to_path_buf(),
            source,
        })?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "a mapping of request parameters".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcast_schemas::ModelSource;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_and_json_parameters() {
        let dir = tempdir().unwrap();

        let yaml = dir.path().join("params.yaml");
        fs::write(&yaml, "user_seq: 10\nuser_name: テスト\n").unwrap();
        let params = load_parameters(&yaml).unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), ["user_seq", "user_name"]);

        let json = dir.path().join("params.json");
        fs::write(&json, r#"{"user_seq": "10"}"#).unwrap();
        assert_eq!(load_parameters(&json).unwrap()["user_seq"], "10");
    }

    #[test]
    fn test_rejects_non_mapping_parameters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_parameters(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));

        let missing = load_parameters(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.exit_code(), 3);
    }

    #[test]
    fn test_malformed_parameters_keep_parse_position() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("params.json");
        fs::write(&json, "{\n  \"user_seq\": 1,\n  oops\n}").unwrap();
        let err = load_parameters(&json).unwrap_err();
        assert!(matches!(err, Error::ParamsJson { .. }));
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("line 3"), "{err}");
        assert!(std::error::Error::source(&err).is_some());

        let yaml = dir.path().join("params.yaml");
        fs::write(&yaml, "user_seq: 1\nuser_name: [unclosed\n").unwrap();
        let err = load_parameters(&yaml).unwrap_err();
        assert!(matches!(err, Error::ParamsYaml { .. }));
        assert!(err.to_string().contains("line"), "{err}");
    }

    #[test]
    fn test_open_store_uses_override() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("user_seq.json"), r#"{"type": "int"}"#).unwrap();

        let config = Config {
            cache_models: false,
            ..Config::default()
        };
        let store = open_store(&config, Some(dir.path()));
        assert_eq!(store.model_dir(), dir.path());
        assert!(store.resolve("user_seq").is_ok());
        assert!(!store.is_cached("user_seq").unwrap());
    }
}
