//! Safe nested lookups over backend JSON.
//!
//! Response schemas are not fixed, so every renderer reads fields through
//! dotted paths (`analysis.currentMetrics.peopleCount`) with a default for
//! anything missing, `null`, or of the wrong type.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Object(&'a Map<String, Value>),
    Value(&'a Value),
    Missing,
}

/// Read-only cursor into a JSON tree.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    node: Node<'a>,
}

impl<'a> Lookup<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            node: Node::Value(value),
        }
    }

    pub fn object(map: &'a Map<String, Value>) -> Self {
        Self {
            node: Node::Object(map),
        }
    }

    fn missing() -> Self {
        Self {
            node: Node::Missing,
        }
    }

    fn as_object(&self) -> Option<&'a Map<String, Value>> {
        match self.node {
            Node::Object(map) => Some(map),
            Node::Value(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Value at `path`; `null` counts as absent.  An empty path is the
    /// cursor itself (only for non-root cursors).
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        let mut current: Option<&'a Value> = match self.node {
            Node::Value(v) => Some(v),
            _ => None,
        };
        let mut map = self.as_object();

        for segment in path.split('.').filter(|s| !s.is_empty()) {
            let next = map?.get(segment)?;
            current = Some(next);
            map = next.as_object();
        }
        current.filter(|v| !v.is_null())
    }

    /// Sub-cursor at `path`; missing paths give an empty cursor.
    pub fn node(&self, path: &str) -> Lookup<'a> {
        self.get(path).map(Lookup::new).unwrap_or_else(Lookup::missing)
    }

    /// True when `key` is present on the object under the cursor, even
    /// when its value is `null`.
    pub fn has_key(&self, key: &str) -> bool {
        self.as_object().is_some_and(|m| m.contains_key(key))
    }

    /// True when the cursor points at an object with at least one key.
    pub fn is_populated(&self) -> bool {
        self.as_object().is_some_and(|m| !m.is_empty())
    }

    /// Key/value pairs of the object under the cursor.
    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.as_object().into_iter().flat_map(|m| m.iter())
    }

    pub fn int(&self, path: &str, default: i64) -> i64 {
        match self.get(path) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(default),
            _ => default,
        }
    }

    /// First numeric value among `paths`, else `default`.
    pub fn first_int(&self, paths: &[&str], default: i64) -> i64 {
        paths
            .iter()
            .find(|p| self.get(p).is_some_and(Value::is_number))
            .map(|p| self.int(p, default))
            .unwrap_or(default)
    }

    pub fn float(&self, path: &str, default: f64) -> f64 {
        self.get(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Strings verbatim, numbers and booleans formatted; anything else is
    /// `default`.
    pub fn text(&self, path: &str, default: &str) -> String {
        self.get(path).and_then(scalar_text).unwrap_or_else(|| default.to_string())
    }

    pub fn flag(&self, path: &str, default: bool) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Loose truthiness: absent, `false`, zero, and empty strings, arrays
    /// or objects are all false.
    pub fn truthy(&self, path: &str) -> bool {
        match self.get(path) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }

    /// Array at `path`, empty when absent or not an array.
    pub fn list(&self, path: &str) -> &'a [Value] {
        match self.get(path) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Array elements as cursors.
    pub fn items(&self, path: &str) -> impl Iterator<Item = Lookup<'a>> {
        self.list(path).iter().map(Lookup::new)
    }

    /// Scalar array elements as display strings; other elements are skipped.
    pub fn strings(&self, path: &str) -> Vec<String> {
        self.list(path).iter().filter_map(scalar_text).collect()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ─── tests ───────────────────────────────────────────────────────────────
