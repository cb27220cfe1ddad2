//! YAML loading with `extends:` inheritance and dotted overrides
//!
//! A config file may name a parent:
//!
//! ```yaml
//! extends: base.yaml
//! model:
//!   latent_dim: 64
//! ```
//!
//! The parent is resolved relative to the child's directory and loaded first;
//! the child is then deep-merged over it. Mappings merge key by key, every
//! other value replaces. `--set model.n_critic=5` style overrides are applied
//! after all files are merged, then the result is validated once.

use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::ExperimentConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};

const EXTENDS_KEY: &str = "extends";

/// Load, merge and validate an experiment config
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    load_config_with_overrides(path, &[])
}

/// Load an experiment config and apply `key.path=value` overrides before validation
pub fn load_config_with_overrides<P: AsRef<Path>>(
    path: P,
    overrides: &[String],
) -> Result<ExperimentConfig> {
    let mut value = load_merged_value(path.as_ref())?;
    for assignment in overrides {
        apply_override(&mut value, assignment)?;
    }

    let config: ExperimentConfig = serde_yaml::from_value(value)
        .map_err(|e| Error::ConfigParse(format!("{}: {e}", path.as_ref().display())))?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the `extends` chain of a file into one merged YAML document
pub fn load_merged_value(path: &Path) -> Result<Value> {
    let mut chain = HashSet::new();
    load_recursive(path, &mut chain)
}

fn load_recursive(path: &Path, chain: &mut HashSet<PathBuf>) -> Result<Value> {
    let canonical = fs::canonicalize(path).map_err(|e| {
        Error::ConfigParse(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    if !chain.insert(canonical.clone()) {
        return Err(Error::ConfigParse(format!(
            "extends cycle detected at {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(&canonical)?;
    let mut value: Value = serde_yaml::from_str(&content)
        .map_err(|e| Error::ConfigParse(format!("Failed to parse {}: {e}", path.display())))?;
    if value.is_null() {
        value = Value::Mapping(Mapping::new());
    }

    let parent = match value.as_mapping_mut() {
        Some(map) => map.remove(EXTENDS_KEY),
        None => {
            return Err(Error::ConfigParse(format!(
                "{} must contain a YAML mapping",
                path.display()
            )))
        }
    };

    let merged = match parent {
        None => value,
        Some(Value::String(parent)) => {
            let base_dir = canonical.parent().unwrap_or_else(|| Path::new("."));
            let mut base = load_recursive(&base_dir.join(parent), chain)?;
            merge_values(&mut base, value);
            base
        }
        Some(other) => {
            return Err(Error::ConfigParse(format!(
                "{}: `extends` must be a file path, got {other:?}",
                path.display()
            )))
        }
    };

    chain.remove(&canonical);
    Ok(merged)
}

/// Deep-merge `overlay` into `base`
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Apply one `a.b.c=value` assignment. The value is parsed as a YAML scalar,
/// so `5`, `0.01`, `true` and `wasserstein` get their natural types.
pub fn apply_override(root: &mut Value, assignment: &str) -> Result<()> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| {
        Error::ConfigParse(format!("override `{assignment}` must look like key.path=value"))
    })?;
    let segments: Vec<&str> = key.trim().split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::ConfigParse(format!("override `{assignment}` has an empty key segment")));
    }

    let parsed: Value = serde_yaml::from_str(raw.trim())
        .unwrap_or_else(|_| Value::String(raw.trim().to_string()));

    let mut node = root;
    for segment in &segments[..segments.len() - 1] {
        if !node.is_mapping() {
            *node = Value::Mapping(Mapping::new());
        }
        let map = node
            .as_mapping_mut()
            .ok_or_else(|| Error::ConfigParse(format!("cannot descend into `{segment}`")))?;
        node = map
            .entry(Value::String((*segment).to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }

    let leaf = segments[segments.len() - 1];
    match node.as_mapping_mut() {
        Some(map) => {
            map.insert(Value::String(leaf.to_string()), parsed);
            Ok(())
        }
        None => Err(Error::ConfigParse(format!(
            "override `{assignment}`: parent of `{leaf}` is not a mapping"
        ))),
    }
}
