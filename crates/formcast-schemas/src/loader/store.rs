//! Model stores: name → [`LeafSchema`] resolution
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::definition::LeafSchema;
use crate::loader::{
    cache::{CacheConfig, CacheStats, ModelCache},
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Anything that can hand out models by name.
///
/// Failing to resolve a name is a configuration error and aborts the
/// validation call that asked for it.
pub trait ModelSource: Send + Sync {
    fn resolve(&self, name: &str) -> LoaderResult<Arc<LeafSchema>>;
}

impl<S: ModelSource + ?Sized> ModelSource for &S {
    fn resolve(&self, name: &str) -> LoaderResult<Arc<LeafSchema>> {
        (**self).resolve(name)
    }
}

impl<S: ModelSource + ?Sized> ModelSource for Arc<S> {
    fn resolve(&self, name: &str) -> LoaderResult<Arc<LeafSchema>> {
        (**self).resolve(name)
    }
}

/// Configuration for the file-backed store
#[derive(Debug, Clone)]
pub struct ModelStoreConfig {
    /// Directory holding `<name>.json`, `<name>.yaml` or `<name>.yml`
    pub model_dir: PathBuf,
    pub cache: CacheConfig,
}

impl ModelStoreConfig {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            cache: CacheConfig::default(),
        }
    }
}

/// File-backed store that loads each model on first use and keeps it
#[derive(Debug)]
pub struct ModelStore {
    config: ModelStoreConfig,
    cache: RwLock<ModelCache>,
    parser: SchemaParser,
}

impl ModelStore {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(ModelStoreConfig::new(model_dir))
    }

    pub fn with_config(config: ModelStoreConfig) -> Self {
        Self {
            cache: RwLock::new(ModelCache::with_config(config.cache.clone())),
            parser: SchemaParser::new(),
            config,
        }
    }

    pub fn model_dir(&self) -> &Path {
        &self.config.model_dir
    }

    /// Find the document for a model name without reading it
    pub fn locate(&self, name: &str) -> LoaderResult<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if name.is_empty() || escapes {
            return Err(LoaderError::invalid_definition(
                self.config.model_dir.join(name),
                "model name must be a relative path inside the model directory",
            ));
        }

        for ext in Format::lookup_order() {
            let candidate = self.config.model_dir.join(format!("{name}.{ext}"));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        Err(LoaderError::model_not_found(
            name,
            self.config.model_dir.join(format!("{name}.json")),
        ))
    }

    /// Read a model from disk, bypassing the cache
    pub fn load(&self, name: &str) -> LoaderResult<(LeafSchema, PathBuf)> {
        let path = self.locate(name)?;
        let schema = self.parser.load_typed::<LeafSchema>(&path)?;
        debug!(model = name, path = %path.display(), "Loaded model");
        Ok((schema, path))
    }

    pub fn is_cached(&self, name: &str) -> LoaderResult<bool> {
        Ok(self.read_cache()?.contains(name))
    }

    pub fn clear_cache(&self) -> LoaderResult<()> {
        self.write_cache()?.clear();
        Ok(())
    }

    pub fn cache_stats(&self) -> LoaderResult<CacheStats> {
        Ok(self.read_cache()?.stats())
    }

    /// Load every model document below the model directory.
    ///
    /// Files that fail to parse are logged and skipped; the return value
    /// is the number of models now cached by this call.
    pub fn preload(&self, recursive: bool) -> LoaderResult<usize> {
        let root = self.config.model_dir.clone();
        self.preload_dir(&root, &root, recursive)
    }

    fn preload_dir(&self, root: &Path, dir: &Path, recursive: bool) -> LoaderResult<usize> {
        let mut loaded_count = 0;
        let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;

        for entry in entries {
            let entry = entry.map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;
            let path = entry.path();

            if path.is_dir() {
                if recursive {
                    loaded_count += self.preload_dir(root, &path, recursive)?;
                }
                continue;
            }

            if Format::from_path(&path).is_err() {
                continue;
            }

            let Some(name) = model_name_for(root, &path) else {
                continue;
            };

            match self.resolve(&name) {
                Ok(_) => loaded_count += 1,
                Err(e) => warn!(model = %name, error = %e, "Skipping model that failed to load"),
            }
        }

        Ok(loaded_count)
    }

    fn read_cache(&self) -> LoaderResult<std::sync::RwLockReadGuard<'_, ModelCache>> {
        self.cache
            .read()
            .map_err(|_| LoaderError::cache_error("model cache lock poisoned"))
    }

    fn write_cache(&self) -> LoaderResult<std::sync::RwLockWriteGuard<'_, ModelCache>> {
        self.cache
            .write()
            .map_err(|_| LoaderError::cache_error("model cache lock poisoned"))
    }
}

impl ModelSource for ModelStore {
    fn resolve(&self, name: &str) -> LoaderResult<Arc<LeafSchema>> {
        if let Some(schema) = self.read_cache()?.get(name) {
            return Ok(schema);
        }

        let (schema, path) = self.load(name)?;
        let schema = self.write_cache()?.insert(name, Arc::new(schema), path);
        Ok(schema)
    }
}

/// Model name for a file below `root`: relative path without extension
fn model_name_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

/// In-memory store for tests and schemas compiled into a binary
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    models: HashMap<String, Arc<LeafSchema>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: impl Into<String>, schema: LeafSchema) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: LeafSchema) {
        self.models.insert(name.into(), Arc::new(schema));
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelSource for MemoryStore {
    fn resolve(&self, name: &str) -> LoaderResult<Arc<LeafSchema>> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::model_not_found(name, PathBuf::from(format!("<memory>/{name}"))))
    }
}
