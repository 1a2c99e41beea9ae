//! Optional reference to another Foreman object.
//!
//! Foreman rejects a literal `0` for an association and treats an omitted key on update
//! as "leave unchanged", so an unset reference goes over the wire as an empty string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU64;

/// Foreign key to another object. Real Foreman ids start at 1, so `0` is never a valid
/// reference and maps to [`ForeignKey::UNSET`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey(Option<NonZeroU64>);

impl ForeignKey {
    pub const UNSET: ForeignKey = ForeignKey(None);

    /// Reference `id`, or unset when `id` is 0.
    pub fn new(id: u64) -> ForeignKey {
        ForeignKey(NonZeroU64::new(id))
    }

    pub fn get(&self) -> Option<u64> {
        self.0.map(NonZeroU64::get)
    }

    /// The referenced id, 0 when unset.
    pub fn id_or_zero(&self) -> u64 {
        self.get().unwrap_or(0)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Wire form: `""` when unset, the decimal id otherwise.
    pub fn to_wire(&self) -> String {
        match self.0 {
            Some(id) => id.to_string(),
            None => String::new(),
        }
    }

    /// Interpret an arbitrary JSON value. Numbers and numeric strings become a reference;
    /// null, missing, empty, zero, negative or non-numeric values are unset.
    pub fn from_wire(value: Option<&Value>) -> ForeignKey {
        let id = match value {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        ForeignKey(id.and_then(NonZeroU64::new))
    }
}

impl From<u64> for ForeignKey {
    fn from(id: u64) -> Self {
        ForeignKey::new(id)
    }
}

impl From<Option<u64>> for ForeignKey {
    fn from(id: Option<u64>) -> Self {
        ForeignKey::new(id.unwrap_or(0))
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "<unset>"),
        }
    }
}

impl Serialize for ForeignKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for ForeignKey {
    fn deserialize<D>(deserializer: D) -> Result<ForeignKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(ForeignKey::from_wire(value.as_ref()))
    }
}
