use crate::catalog::RuntimeInput;
use serde_json::{Map, Value};

/// Parses arrays, booleans and numbers; everything else stays a string.
pub fn sniff_example(example: &str) -> Value {
    match serde_json::from_str::<Value>(example.trim()) {
        Ok(value @ (Value::Array(_) | Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(example.to_string()),
    }
}

/// Nested JSON object with each input's example written at its dotted key.
pub fn example_payload(inputs: &[RuntimeInput]) -> Value {
    let mut root = Map::new();
    for input in inputs {
        insert_at_path(&mut root, &input.key, sniff_example(&input.example));
    }
    Value::Object(root)
}

/// Pretty-printed [`example_payload`].
pub fn build_example_snippet(inputs: &[RuntimeInput]) -> String {
    format!("{:#}", example_payload(inputs))
}

// A later key overwrites any scalar sitting where it needs an object.
fn insert_at_path(root: &mut Map<String, Value>, key: &str, value: Value) {
    let segments: Vec<&str> = key.split('.').filter(|segment| !segment.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut cursor = root;
    for segment in parents {
        let entry = cursor
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        cursor = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }
    cursor.insert(last.to_string(), value);
}
