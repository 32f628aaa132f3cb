use serde_json::{Map, Value};

/// Full attribute set returned for one character. Only a handful of fields are
/// displayed; the rest is kept as received.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a JSON object, found {found}")]
pub struct DetailShapeError {
    pub found: &'static str,
}

impl DetailRecord {
    pub fn from_value(value: Value) -> Result<Self, DetailShapeError> {
        match value {
            Value::Object(payload) => Ok(Self { payload }),
            other => Err(DetailShapeError {
                found: json_kind(&other),
            }),
        }
    }

    pub fn name(&self) -> String {
        self.text("name")
    }

    pub fn height(&self) -> String {
        self.text("height")
    }

    pub fn birth_year(&self) -> String {
        self.text("birth_year")
    }

    /// Reference to the homeworld resource, when present and non-empty.
    pub fn homeworld(&self) -> Option<&str> {
        self.payload
            .get("homeworld")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.payload
    }

    fn text(&self, key: &str) -> String {
        match self.payload.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

/// Name of a secondary resource; empty when the field is absent or not a string.
pub fn resource_name(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_displayed_fields() {
        let record = DetailRecord::from_value(json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "birth_year": "19BBY",
            "homeworld": "https://swapi.dev/api/planets/1/"
        }))
        .expect("object");
        assert_eq!(record.name(), "Luke Skywalker");
        assert_eq!(record.height(), "172");
        assert_eq!(record.birth_year(), "19BBY");
        assert_eq!(record.homeworld(), Some("https://swapi.dev/api/planets/1/"));
        assert_eq!(record.get("mass"), Some(&json!("77")));
    }

    #[test]
    fn numbers_render_as_text_and_missing_fields_are_empty() {
        let record = DetailRecord::from_value(json!({"name": "R2-D2", "height": 96})).unwrap();
        assert_eq!(record.height(), "96");
        assert_eq!(record.birth_year(), "");
        assert_eq!(record.homeworld(), None);
    }

    #[test]
    fn empty_homeworld_is_no_reference() {
        let record = DetailRecord::from_value(json!({"homeworld": ""})).unwrap();
        assert_eq!(record.homeworld(), None);
    }

    #[test]
    fn rejects_non_objects() {
        let err = DetailRecord::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
    }

    #[test]
    fn resource_name_defaults_to_empty() {
        assert_eq!(resource_name(&json!({"name": "Tatooine"})), "Tatooine");
        assert_eq!(resource_name(&json!({"name": 3})), "");
        assert_eq!(resource_name(&json!({})), "");
    }
}
