//! Global (common) parameters.

use super::object::lenient_string;
use super::{Entity, ForemanObject, SearchFilter};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A global name/value parameter. Each one is created and updated individually.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonParameter {
    pub object: ForemanObject,
    pub value: String,
}

impl CommonParameter {
    pub fn new(name: &str, value: &str) -> CommonParameter {
        CommonParameter {
            object: ForemanObject::new(name),
            value: value.to_string(),
        }
    }
}

impl Serialize for CommonParameter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.object.is_new() {
            map.serialize_entry("id", &self.object.id)?;
        }
        map.serialize_entry("name", &self.object.name)?;
        map.serialize_entry("value", &self.value)?;
        map.end()
    }
}

#[derive(Deserialize)]
struct CommonParameterWire {
    #[serde(flatten)]
    object: ForemanObject,
    #[serde(default, deserialize_with = "lenient_string")]
    value: String,
}

impl<'de> Deserialize<'de> for CommonParameter {
    fn deserialize<D>(deserializer: D) -> Result<CommonParameter, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = CommonParameterWire::deserialize(deserializer)?;
        Ok(CommonParameter {
            object: wire.object,
            value: wire.value,
        })
    }
}

impl Entity for CommonParameter {
    const ENDPOINT: &'static str = "common_parameters";
    const WIRE_KEY: &'static str = "common_parameter";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new("name", &self.object.name)
    }
}
