use crate::value::Value;

/// A delimited locator for a nested scalar, e.g. `x.1` or `x/1`.
///
/// Object segments are keys, array segments are decimal indices. Lookups
/// never fail loudly: a missing segment reads as `NaN` and skips the write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeepPath {
    segments: Vec<String>,
}

impl DeepPath {
    pub fn new(path: &str, sep: &str) -> Self {
        let segments = if sep.is_empty() {
            vec![path.to_string()]
        } else {
            path.split(sep).map(str::to_string).collect()
        };
        DeepPath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| child(node, segment))
    }

    /// Reads the leaf as a number; anything else reads as `NaN`.
    pub fn read(&self, root: &Value) -> f64 {
        self.get(root)
            .and_then(Value::as_f64)
            .unwrap_or(f64::NAN)
    }

    /// Overwrites the leaf with `value`. Returns `false` when an intermediate
    /// segment is missing or the leaf's parent cannot hold it.
    pub fn write(&self, root: &mut Value, value: f64) -> bool {
        let Some((leaf, parents)) = self.segments.split_last() else {
            return false;
        };
        let mut node = root;
        for segment in parents {
            match child_mut(node, segment) {
                Some(next) => node = next,
                None => return false,
            }
        }
        match node {
            Value::Object(map) => {
                map.insert(leaf.clone(), Value::Number(value));
                true
            }
            Value::Array(items) => {
                let slot = match parse_index(leaf) {
                    Some(index) => items.get_mut(index),
                    None => None,
                };
                match slot {
                    Some(slot) => {
                        *slot = Value::Number(value);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    segment.parse::<usize>().ok()
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => match parse_index(segment) {
            Some(index) => items.get_mut(index),
            None => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(raw: serde_json::Value) -> Value {
        Value::from(raw)
    }

    #[test]
    fn splits_on_custom_separator() {
        let path = DeepPath::new("a/b/0", "/");
        assert_eq!(path.segments(), &["a", "b", "0"]);
        assert_eq!(DeepPath::new("a.b", "").segments(), &["a.b"]);
    }

    #[test]
    fn reads_through_objects_and_arrays() {
        let value = record(json!({"x": [9, -1], "y": {"z": 0.5}}));
        assert_eq!(DeepPath::new("x.1", ".").read(&value), -1.0);
        assert_eq!(DeepPath::new("y.z", ".").read(&value), 0.5);
    }

    #[test]
    fn missing_segments_read_as_nan() {
        let value = record(json!({"x": [9]}));
        assert!(DeepPath::new("x.3", ".").read(&value).is_nan());
        assert!(DeepPath::new("q.1", ".").read(&value).is_nan());
        assert!(DeepPath::new("x.a", ".").read(&value).is_nan());
    }

    #[test]
    fn non_numeric_leaf_reads_as_nan() {
        let value = record(json!({"x": "6"}));
        assert!(DeepPath::new("x", ".").read(&value).is_nan());
    }

    #[test]
    fn writes_back_at_the_same_location() {
        let mut value = record(json!({"x": [9, -1]}));
        assert!(DeepPath::new("x.1", ".").write(&mut value, 6.0));
        assert_eq!(value, record(json!({"x": [9, 6]})));
    }

    #[test]
    fn write_creates_missing_leaf_in_existing_object() {
        let mut value = record(json!({"x": {}}));
        assert!(DeepPath::new("x.y", ".").write(&mut value, 6.0));
        assert_eq!(value, record(json!({"x": {"y": 6}})));
    }

    #[test]
    fn write_skips_missing_intermediate() {
        let mut value = record(json!({"x": [9]}));
        let before = value.clone();
        assert!(!DeepPath::new("q.1", ".").write(&mut value, 6.0));
        assert!(!DeepPath::new("x.5", ".").write(&mut value, 6.0));
        assert_eq!(value, before);
    }
}
