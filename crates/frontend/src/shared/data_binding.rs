//! Metric binding for dashboard-style payloads.
//!
//! The overview and analytics endpoints return nested JSON whose exact
//! shape the frontend does not own. Instead of reflecting over the DOM at
//! runtime, each page builds an explicit table mapping dot-joined field
//! paths ("revenue.total") to setter signals once at render time, then
//! applies whatever leaves the payload happens to contain. Paths without
//! a binding are silently skipped, as are bindings the payload does not
//! mention.

use std::collections::HashMap;

use leptos::prelude::*;
use serde_json::Value;

/// Walk a payload and collect `(dot.joined.path, display text)` for every
/// leaf value. Objects are recursed into without a depth limit; arrays are
/// not metric material and are skipped entirely.
pub fn flatten_leaf_paths(payload: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Value::Object(map) = payload {
        for (key, value) in map {
            walk(key.clone(), value, &mut out);
        }
    }
    out
}

fn walk(path: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(format!("{}.{}", path, key), child, out);
            }
        }
        Value::Array(_) => {}
        Value::Null => out.push((path, String::new())),
        Value::String(s) => out.push((path, s.clone())),
        other => out.push((path, other.to_string())),
    }
}

/// A flat `{field path -> setter}` table. Built once per page render.
#[derive(Default)]
pub struct MetricBindings {
    setters: HashMap<&'static str, WriteSignal<String>>,
}

impl MetricBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field path and get the read side to render. The cell
    /// shows an em dash until a payload supplies the value.
    pub fn bind(&mut self, path: &'static str) -> ReadSignal<String> {
        let (value, set_value) = signal("—".to_string());
        self.setters.insert(path, set_value);
        value
    }

    /// Push every matching leaf of `payload` into its bound signal.
    pub fn apply(&self, payload: &Value) {
        for (path, text) in flatten_leaf_paths(payload) {
            if let Some(setter) = self.setters.get(path.as_str()) {
                setter.set(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_object() {
        let payload = json!({
            "total_orders": 12,
            "revenue": {"total": "999.50", "today": 40},
            "note": null
        });
        let mut paths = flatten_leaf_paths(&payload);
        paths.sort();
        assert_eq!(
            paths,
            vec![
                ("note".to_string(), String::new()),
                ("revenue.today".to_string(), "40".to_string()),
                ("revenue.total".to_string(), "999.50".to_string()),
                ("total_orders".to_string(), "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_arrays_are_skipped() {
        let payload = json!({"recent_orders": [{"order_id": 1}], "count": 3});
        let paths = flatten_leaf_paths(&payload);
        assert_eq!(paths, vec![("count".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_apply_sets_bound_and_skips_unbound() {
        let mut bindings = MetricBindings::new();
        let total = bindings.bind("total_orders");
        let revenue = bindings.bind("revenue.total");
        bindings.apply(&json!({"total_orders": 7, "unrelated": 1}));
        assert_eq!(total.get_untracked(), "7");
        // Not mentioned by the payload: keeps its placeholder.
        assert_eq!(revenue.get_untracked(), "—");
    }
}
