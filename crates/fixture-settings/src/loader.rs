//! Settings loading with deep merge.
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::FixtureSettings;

/// Load settings, optionally deep-merging a JSON file over the defaults.
///
/// With `None` the compiled defaults are returned. A path that cannot be read
/// is an error: the caller asked for that file explicitly. The result is
/// validated before it is returned.
pub fn load_settings_from_path(path: Option<&Path>) -> Result<FixtureSettings> {
    let Some(path) = path else {
        debug!("no settings file given, using defaults");
        return Ok(FixtureSettings::default());
    };

    debug!(?path, "loading settings from file");
    let content = std::fs::read_to_string(path)?;
    let user: Value = serde_json::from_str(&content)?;
    let defaults = serde_json::to_value(FixtureSettings::default())?;

    let settings: FixtureSettings = serde_json::from_value(deep_merge(defaults, user))?;
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}
