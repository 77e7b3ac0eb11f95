//! Fortune record

use serde::{Deserialize, Serialize};

/// A single fortune: an opaque identifier and its message.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Fortune {
    pub id: String,
    pub message: String,
}

impl Fortune {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Records present at startup when nothing else has been loaded
pub fn default_fortunes() -> Vec<Fortune> {
    vec![
        Fortune::new("1", "A new voyage will fill your life with untold memories."),
        Fortune::new(
            "2",
            "The measure of time to your next goal is the measure of your discipline.",
        ),
        Fortune::new("3", "The only way to do well is to do better each day."),
        Fortune::new("4", "It ain't over till it's EOF."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let fortune = Fortune::new("7", "Lucky");
        let json = serde_json::to_value(&fortune).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "7", "message": "Lucky" }));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let fortune: Fortune = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(fortune, Fortune::new("1", ""));

        let fortune: Fortune = serde_json::from_str("{}").unwrap();
        assert_eq!(fortune, Fortune::default());
    }

    #[test]
    fn test_default_seed() {
        let seed = default_fortunes();
        let ids: Vec<&str> = seed.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
