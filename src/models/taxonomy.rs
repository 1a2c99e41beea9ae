//! Organizations and locations, which Foreman groups together as taxonomies.

use super::object::lenient_string;
use super::{Entity, ForemanObject, SearchFilter};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Fields common to both taxonomy kinds. `title` is the computed nested path and is
/// never sent.
#[derive(Deserialize)]
struct TaxonomyWire {
    #[serde(flatten)]
    object: ForemanObject,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
}

fn serialize_taxonomy<S>(
    serializer: S,
    object: &ForemanObject,
    description: &str,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    if !object.is_new() {
        map.serialize_entry("id", &object.id)?;
    }
    map.serialize_entry("name", &object.name)?;
    map.serialize_entry("description", description)?;
    map.end()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Organization {
    pub object: ForemanObject,
    pub title: String,
    pub description: String,
}

impl Organization {
    pub fn new(name: &str) -> Organization {
        Organization {
            object: ForemanObject::new(name),
            ..Default::default()
        }
    }
}

impl Serialize for Organization {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_taxonomy(serializer, &self.object, &self.description)
    }
}

impl<'de> Deserialize<'de> for Organization {
    fn deserialize<D>(deserializer: D) -> Result<Organization, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = TaxonomyWire::deserialize(deserializer)?;
        Ok(Organization {
            object: wire.object,
            title: wire.title,
            description: wire.description,
        })
    }
}

impl Entity for Organization {
    const ENDPOINT: &'static str = "organizations";
    const WIRE_KEY: &'static str = "organization";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new("name", &self.object.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub object: ForemanObject,
    pub title: String,
    pub description: String,
}

impl Location {
    pub fn new(name: &str) -> Location {
        Location {
            object: ForemanObject::new(name),
            ..Default::default()
        }
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_taxonomy(serializer, &self.object, &self.description)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Location, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = TaxonomyWire::deserialize(deserializer)?;
        Ok(Location {
            object: wire.object,
            title: wire.title,
            description: wire.description,
        })
    }
}

impl Entity for Location {
    const ENDPOINT: &'static str = "locations";
    const WIRE_KEY: &'static str = "location";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new("name", &self.object.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_nested_title() {
        let location: Location = serde_json::from_value(json!({
            "id": 4,
            "name": "rack-2",
            "title": "berlin/dc1/rack-2",
            "description": null,
            "created_at": "2023-05-01 08:00:00 UTC"
        }))
        .unwrap();
        assert_eq!(location.object.id, 4);
        assert_eq!(location.title, "berlin/dc1/rack-2");
        assert_eq!(location.description, "");
    }

    #[test]
    fn test_encode_without_title() {
        let mut org = Organization::new("ops");
        org.title = "ops".to_string();
        org.description = "Operations".to_string();
        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json, json!({"name": "ops", "description": "Operations"}));
    }

    #[test]
    fn test_search_by_name() {
        assert_eq!(
            Organization::new("ops").search_filter().to_query(),
            r#"name="ops""#
        );
        assert_eq!(Location::new("dc1").search_filter().field, "name");
    }
}
