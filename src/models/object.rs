//! Base record shared by every Foreman entity, plus small id helpers.

use crate::error::{ForemanError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Attributes every Foreman object carries.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ForemanObject {
    /// Server-assigned id, 0 until the object has been created.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Read-only timestamps as Foreman formats them.
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<String>,
}

impl ForemanObject {
    pub fn new(name: &str) -> ForemanObject {
        ForemanObject {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(id: u64, name: &str) -> ForemanObject {
        ForemanObject {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// True until the server has assigned an id.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// Deserialize `null` as the type's default. Foreman sends `null` for most unset
/// scalars.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free-text field that tolerates other JSON types: `null` is empty, anything else
/// that is not a string keeps its JSON text (`12` becomes `"12"`).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(Option::<Value>::deserialize(deserializer)?).unwrap_or_default())
}

/// As [`lenient_string`], keeping `null` apart from a present value.
pub(crate) fn lenient_opt_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(Option::<Value>::deserialize(deserializer)?))
}

fn lenient_text(value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    }
}

pub(crate) fn is_zero(id: &u64) -> bool {
    *id == 0
}

pub(crate) fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Project a list of nested objects down to their ids, keeping server order.
pub fn objects_to_ids(objects: &[ForemanObject]) -> Vec<u64> {
    objects.iter().map(|o| o.id).collect()
}

/// Render an id the way resource state stores it.
pub fn id_to_string(id: u64) -> String {
    id.to_string()
}

/// Parse a resource id stored as a string.
pub fn parse_id(id: &str) -> Result<u64> {
    id.trim()
        .parse::<u64>()
        .map_err(|e| ForemanError::Request(format!("invalid id '{id}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objects_to_ids_keeps_order() {
        let objects: Vec<ForemanObject> = serde_json::from_str(
            r#"[{"id": 9, "name": "x86_64"}, {"id": 2, "name": "i386", "extra": true}]"#,
        )
        .unwrap();
        assert_eq!(objects_to_ids(&objects), vec![9, 2]);
        assert!(objects_to_ids(&[]).is_empty());
    }

    #[test]
    fn test_null_fields() {
        let object: ForemanObject =
            serde_json::from_str(r#"{"id": null, "name": null, "created_at": null}"#).unwrap();
        assert_eq!(object, ForemanObject::default());
        assert!(object.is_new());
    }

    #[test]
    fn test_timestamps_not_serialized() {
        let object: ForemanObject = serde_json::from_str(
            r#"{"id": 3, "name": "lab", "created_at": "2023-04-01 10:00:00 UTC"}"#,
        )
        .unwrap();
        assert_eq!(object.created_at.as_deref(), Some("2023-04-01 10:00:00 UTC"));
        let json = serde_json::to_value(&object).unwrap();
        assert!(json.get("created_at").is_none());
    }

    #[derive(Deserialize)]
    struct Text {
        #[serde(default, deserialize_with = "lenient_string")]
        text: String,
        #[serde(default, deserialize_with = "lenient_opt_string")]
        maybe: Option<String>,
    }

    #[test]
    fn test_lenient_strings() {
        let t: Text = serde_json::from_str(r#"{"text": 12, "maybe": null}"#).unwrap();
        assert_eq!(t.text, "12");
        assert_eq!(t.maybe, None);
        let t: Text = serde_json::from_str(r#"{"text": null, "maybe": true}"#).unwrap();
        assert_eq!(t.text, "");
        assert_eq!(t.maybe.as_deref(), Some("true"));
        let t: Text = serde_json::from_str("{}").unwrap();
        assert_eq!(t.text, "");
        assert!(t.maybe.is_none());
    }

    #[test]
    fn test_id_strings() {
        assert_eq!(id_to_string(42), "42");
        assert_eq!(parse_id(" 42 ").unwrap(), 42);
        assert!(parse_id("forty-two").is_err());
    }
}
