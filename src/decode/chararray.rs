//! Repair for an encoder defect where a string arrives as an object mapping
//! stringified indices to single characters: `{"0":"O","1":"K"}`.
//!
//! This is a heuristic tied to that defect. It fires only when every key is
//! a decimal index and every value is a string; any other object is data.

use serde_json::{Map, Value};

/// Rebuild the string an index-keyed object stands for, ordered by the
/// numeric value of the keys. `None` when the object is not of that shape.
pub fn reconstruct(map: &Map<String, Value>) -> Option<String> {
    if map.is_empty() {
        return None;
    }

    let mut parts: Vec<(u64, &str)> = Vec::with_capacity(map.len());
    for (key, value) in map {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = key.parse::<u64>().ok()?;
        parts.push((index, value.as_str()?));
    }

    parts.sort_by_key(|(index, _)| *index);
    Some(parts.into_iter().map(|(_, s)| s).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn ordered_by_numeric_key() {
        // "10" sorts before "2" lexically; numeric order must win
        let mut m = Map::new();
        for (i, c) in "abcdefghijk".chars().enumerate() {
            m.insert(i.to_string(), Value::String(c.to_string()));
        }
        assert_eq!(reconstruct(&m).unwrap(), "abcdefghijk");
    }

    #[test]
    fn simple() {
        assert_eq!(reconstruct(&map(json!({"1": "K", "0": "O"}))).unwrap(), "OK");
    }

    #[test]
    fn non_digit_key_is_data() {
        assert_eq!(reconstruct(&map(json!({"0": "a", "x": "b"}))), None);
        assert_eq!(reconstruct(&map(json!({"-1": "a"}))), None);
    }

    #[test]
    fn non_string_value_is_data() {
        assert_eq!(reconstruct(&map(json!({"0": 1, "1": 2}))), None);
    }

    #[test]
    fn empty_object_is_data() {
        assert_eq!(reconstruct(&Map::new()), None);
    }
}
