//! Operating system model.

use super::object::{lenient_string, null_as_default};
use super::{objects_to_ids, Entity, ForemanObject, SearchFilter};
use crate::error::ForemanError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Operating system families Foreman knows about.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OsFamily {
    #[serde(rename = "AIX")]
    Aix,
    Altlinux,
    Archlinux,
    Coreos,
    Debian,
    Freebsd,
    Gentoo,
    Junos,
    #[serde(rename = "NXOS")]
    Nxos,
    Redhat,
    Solaris,
    Suse,
    Windows,
}

impl OsFamily {
    pub const ALL: [OsFamily; 13] = [
        OsFamily::Aix,
        OsFamily::Altlinux,
        OsFamily::Archlinux,
        OsFamily::Coreos,
        OsFamily::Debian,
        OsFamily::Freebsd,
        OsFamily::Gentoo,
        OsFamily::Junos,
        OsFamily::Nxos,
        OsFamily::Redhat,
        OsFamily::Solaris,
        OsFamily::Suse,
        OsFamily::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Aix => "AIX",
            OsFamily::Altlinux => "Altlinux",
            OsFamily::Archlinux => "Archlinux",
            OsFamily::Coreos => "Coreos",
            OsFamily::Debian => "Debian",
            OsFamily::Freebsd => "Freebsd",
            OsFamily::Gentoo => "Gentoo",
            OsFamily::Junos => "Junos",
            OsFamily::Nxos => "NXOS",
            OsFamily::Redhat => "Redhat",
            OsFamily::Solaris => "Solaris",
            OsFamily::Suse => "Suse",
            OsFamily::Windows => "Windows",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = ForemanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OsFamily::ALL
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| ForemanError::Request(format!("unknown operating system family '{s}'")))
    }
}

/// An operating system release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatingSystem {
    pub object: ForemanObject,
    /// Computed: name plus major/minor version. Never sent.
    pub title: String,
    pub major: String,
    pub minor: String,
    pub description: String,
    pub family: Option<OsFamily>,
    /// Code name, e.g. `bookworm`.
    pub release_name: String,
    /// Root password hash function: `MD5`, `SHA256`, `SHA512` or `Base64`.
    pub password_hash: String,
    // Read-only associations, projected from the nested objects the server returns.
    pub provisioning_template_ids: Vec<u64>,
    pub medium_ids: Vec<u64>,
    pub architecture_ids: Vec<u64>,
    pub ptable_ids: Vec<u64>,
}

impl OperatingSystem {
    /// New release. `title` stays empty until the server computes it; searches fall
    /// back to [`OperatingSystem::expected_title`].
    pub fn new(name: &str, major: &str) -> OperatingSystem {
        OperatingSystem {
            object: ForemanObject::new(name),
            major: major.to_string(),
            ..Default::default()
        }
    }

    /// Title the server derives: the description when set, otherwise
    /// `<name> <major>[.<minor>]`.
    pub fn expected_title(&self) -> String {
        if !self.description.is_empty() {
            return self.description.clone();
        }
        if self.minor.is_empty() {
            format!("{} {}", self.object.name, self.major)
        } else {
            format!("{} {}.{}", self.object.name, self.major, self.minor)
        }
    }
}

impl Serialize for OperatingSystem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.object.is_new() {
            map.serialize_entry("id", &self.object.id)?;
        }
        map.serialize_entry("name", &self.object.name)?;
        map.serialize_entry("major", &self.major)?;
        map.serialize_entry("minor", &self.minor)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("family", self.family.map(|f| f.as_str()).unwrap_or(""))?;
        map.serialize_entry("release_name", &self.release_name)?;
        map.serialize_entry("password_hash", &self.password_hash)?;
        map.end()
    }
}

#[derive(Deserialize)]
struct OperatingSystemWire {
    #[serde(flatten)]
    object: ForemanObject,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    major: String,
    #[serde(default, deserialize_with = "lenient_string")]
    minor: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    family: String,
    #[serde(default, deserialize_with = "lenient_string")]
    release_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    password_hash: String,
    #[serde(default, deserialize_with = "null_as_default")]
    provisioning_templates: Vec<ForemanObject>,
    #[serde(default, deserialize_with = "null_as_default")]
    media: Vec<ForemanObject>,
    #[serde(default, deserialize_with = "null_as_default")]
    architectures: Vec<ForemanObject>,
    #[serde(default, deserialize_with = "null_as_default")]
    ptables: Vec<ForemanObject>,
}

impl<'de> Deserialize<'de> for OperatingSystem {
    fn deserialize<D>(deserializer: D) -> Result<OperatingSystem, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = OperatingSystemWire::deserialize(deserializer)?;
        let family = if wire.family.is_empty() {
            None
        } else {
            Some(wire.family.parse::<OsFamily>().map_err(serde::de::Error::custom)?)
        };
        Ok(OperatingSystem {
            object: wire.object,
            title: wire.title,
            major: wire.major,
            minor: wire.minor,
            description: wire.description,
            family,
            release_name: wire.release_name,
            password_hash: wire.password_hash,
            provisioning_template_ids: objects_to_ids(&wire.provisioning_templates),
            medium_ids: objects_to_ids(&wire.media),
            architecture_ids: objects_to_ids(&wire.architectures),
            ptable_ids: objects_to_ids(&wire.ptables),
        })
    }
}

impl Entity for OperatingSystem {
    const ENDPOINT: &'static str = "operatingsystems";
    const WIRE_KEY: &'static str = "operatingsystem";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        if self.title.is_empty() {
            SearchFilter::new("title", &self.expected_title())
        } else {
            SearchFilter::new("title", &self.title)
        }
    }
}
