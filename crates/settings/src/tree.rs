//! Nested-object views over the flat store.
//!
//! The orchestrator works with nested JSON configuration objects while the
//! store keeps flat dotted groups of strings. `read_config` assembles the
//! nested object for a group, descending one dotted level per recursion;
//! `save_config` flattens a nested object back. Values are re-typed on read:
//! exactly `true`/`false` becomes a boolean, anything containing `/` stays a
//! string (paths), then integer, float, and comma-separated arrays are
//! tried, with plain text as the fallback.

use serde_json::{Map, Number, Value};

use crate::store::SettingsStore;

/// Read a group and its subgroups as one nested JSON object.
pub fn read_config(store: &SettingsStore, group: &str) -> Value {
    let mut config = Map::new();

    for key in store.group_keys(group) {
        if let Some(raw) = store.get(group, key) {
            config.insert(key.to_owned(), coerce_value(raw));
        }
    }

    let prefix = format!("{group}.");
    for entry in store.group_names() {
        if let Some(rest) = entry.strip_prefix(&prefix) {
            let name = match rest.find('.') {
                Some(at) => &rest[..at],
                None => rest,
            };
            let path = format!("{prefix}{name}");
            config.insert(name.to_owned(), read_config(store, &path));
        }
    }

    Value::Object(config)
}

/// Flatten a nested JSON object into dotted groups of the store. Nested
/// objects become subgroups; scalar and array values are stringified.
pub fn save_config(store: &mut SettingsStore, config: &Value, group: &str) {
    let Some(object) = config.as_object() else {
        return;
    };

    for (key, value) in object {
        if value.is_object() {
            let child = if group.is_empty() {
                key.clone()
            } else {
                format!("{group}.{key}")
            };
            save_config(store, value, &child);
        } else {
            store.set(group, key, stringify(value));
        }
    }
}

/// Re-type a stored string value.
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    // Paths and URLs keep their textual form.
    if raw.contains('/') {
        return Value::String(raw.to_owned());
    }

    if let Some(number) = coerce_number(raw) {
        return Value::Number(number);
    }

    if raw.contains(',') {
        let items: Vec<Value> = raw
            .split(',')
            .map(|item| {
                let item = item.trim();
                coerce_number(item)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(item.to_owned()))
            })
            .collect();
        return Value::Array(items);
    }

    Value::String(raw.to_owned())
}

fn coerce_number(raw: &str) -> Option<Number> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(float) = raw.parse::<f64>() {
        return Number::from_f64(float);
    }
    None
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_owned(),
        Value::Bool(false) => "false".to_owned(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null | Value::Object(_) => String::new(),
    }
}
