//! JSON data handling utilities.

use serde_json::Value;

/// Deep merge two JSON values.
/// Recursively merges objects, with overlay values taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                match base_map.remove(&key) {
                    Some(base_val) => {
                        base_map.insert(key, deep_merge(base_val, overlay_val));
                    }
                    None => {
                        base_map.insert(key, overlay_val);
                    }
                }
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

/// Set a value at a path in dotted notation, creating intermediate objects.
pub fn set_path(data: &mut Value, path: &str, value: Value) {
    let mut current = data;
    let mut parts = path.split('.').peekable();

    while let Some(part) = parts.next() {
        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        let Value::Object(map) = current else {
            return;
        };

        if parts.peek().is_none() {
            map.insert(part.to_string(), value);
            return;
        }

        current = map
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_overlay_wins() {
        let base = json!({"api_url": "https://a", "log": {"level": "WARN", "format": "json"}});
        let overlay = json!({"log": {"level": "DEBUG"}});
        let merged = deep_merge(base, overlay);
        assert_eq!(
            merged,
            json!({"api_url": "https://a", "log": {"level": "DEBUG", "format": "json"}})
        );
    }

    #[test]
    fn test_set_path_creates_parents() {
        let mut data = json!({});
        set_path(&mut data, "log.level", json!("TRACE"));
        set_path(&mut data, "api_url", json!("https://b"));
        assert_eq!(data, json!({"log": {"level": "TRACE"}, "api_url": "https://b"}));
    }
}
