//! Layering helpers: defaults merging and environment overrides.

use toml::{Table, Value};

use super::error::ConfigError;

/// Separator between path segments in override variable names.
const PATH_SEPARATOR: &str = "__";

/// Deep-merge `overlay` into `base`.
///
/// Nested tables merge key by key; any other value in `overlay` replaces the
/// one in `base`.
pub(super) fn merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => merge(existing, incoming),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Returns the override variable name for a key path, e.g.
/// `["device", "lcd", "columns"]` → `DEVICE__LCD__COLUMNS`.
pub(super) fn env_key<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
        .to_uppercase()
}

/// Replace every leaf of `table` for which `lookup` returns a non-empty value.
///
/// The override string is coerced to the type of the value it replaces.
pub(super) fn apply_overrides<F>(table: &mut Table, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut path = Vec::new();
    walk(table, &mut path, lookup)
}

fn walk<F>(table: &mut Table, path: &mut Vec<String>, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (key, value) in table.iter_mut() {
        path.push(key.clone());

        match value {
            Value::Table(nested) => walk(nested, path, lookup)?,
            leaf => {
                let name = env_key(path.as_slice());
                if let Some(raw) = lookup(&name).filter(|v| !v.is_empty()) {
                    *leaf = coerce(&name, raw, leaf)?;
                }
            }
        }

        path.pop();
    }
    Ok(())
}

fn coerce(key: &str, raw: String, current: &Value) -> Result<Value, ConfigError> {
    let invalid = |expected| ConfigError::Override {
        key: key.to_string(),
        value: raw.clone(),
        expected,
    };

    match current {
        Value::Integer(_) => raw
            .trim()
            .parse()
            .map(Value::Integer)
            .map_err(|_| invalid("integer")),
        Value::Float(_) => raw
            .trim()
            .parse()
            .map(Value::Float)
            .map_err(|_| invalid("float")),
        Value::Boolean(_) => raw
            .trim()
            .parse()
            .map(Value::Boolean)
            .map_err(|_| invalid("boolean")),
        _ => Ok(Value::String(raw)),
    }
}
