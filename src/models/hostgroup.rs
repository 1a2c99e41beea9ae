//! Hostgroup model.
//!
//! Hostgroups form a tree through `parent_id`. Hosts and child groups inherit their
//! settings on the server side; nothing here resolves inheritance.

use super::object::{lenient_opt_string, lenient_string};
use super::{Entity, ForeignKey, ForemanObject, KvParameter, SearchFilter};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hostgroup {
    pub object: ForemanObject,
    /// Computed full path `<parent 1>/<parent 2>/.../<name>`. Never sent.
    pub title: String,
    pub root_password: String,
    pub pxe_loader: String,
    pub architecture_id: ForeignKey,
    pub compute_profile_id: ForeignKey,
    pub domain_id: ForeignKey,
    pub environment_id: ForeignKey,
    pub medium_id: ForeignKey,
    pub operatingsystem_id: ForeignKey,
    pub parent_id: ForeignKey,
    pub ptable_id: ForeignKey,
    /// Smart proxy acting as puppet CA.
    pub puppet_ca_proxy_id: ForeignKey,
    pub puppet_proxy_id: ForeignKey,
    pub realm_id: ForeignKey,
    pub subnet_id: ForeignKey,
    pub parameters: Vec<KvParameter>,
}

impl Hostgroup {
    pub fn new(name: &str) -> Hostgroup {
        Hostgroup {
            object: ForemanObject::new(name),
            ..Default::default()
        }
    }

    /// Child group of `parent`; the title follows the server's path convention so it
    /// can be looked up before the server has computed it.
    pub fn child_of(parent: &Hostgroup, name: &str) -> Hostgroup {
        let title = if parent.title.is_empty() {
            format!("{}/{}", parent.object.name, name)
        } else {
            format!("{}/{}", parent.title, name)
        };
        Hostgroup {
            object: ForemanObject::new(name),
            title,
            parent_id: ForeignKey::new(parent.object.id),
            ..Default::default()
        }
    }
}

impl Serialize for Hostgroup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.object.is_new() {
            map.serialize_entry("id", &self.object.id)?;
        }
        map.serialize_entry("name", &self.object.name)?;
        map.serialize_entry("root_pass", &self.root_password)?;
        map.serialize_entry("pxe_loader", &self.pxe_loader)?;
        map.serialize_entry("architecture_id", &self.architecture_id)?;
        map.serialize_entry("compute_profile_id", &self.compute_profile_id)?;
        map.serialize_entry("domain_id", &self.domain_id)?;
        map.serialize_entry("environment_id", &self.environment_id)?;
        map.serialize_entry("medium_id", &self.medium_id)?;
        map.serialize_entry("operatingsystem_id", &self.operatingsystem_id)?;
        map.serialize_entry("parent_id", &self.parent_id)?;
        map.serialize_entry("ptable_id", &self.ptable_id)?;
        map.serialize_entry("puppet_ca_proxy_id", &self.puppet_ca_proxy_id)?;
        map.serialize_entry("puppet_proxy_id", &self.puppet_proxy_id)?;
        map.serialize_entry("realm_id", &self.realm_id)?;
        map.serialize_entry("subnet_id", &self.subnet_id)?;
        if !self.parameters.is_empty() {
            map.serialize_entry("group_parameters_attributes", &self.parameters)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct HostgroupWire {
    #[serde(flatten)]
    object: ForemanObject,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    root_pass: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    root_password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pxe_loader: String,
    #[serde(default)]
    architecture_id: ForeignKey,
    #[serde(default)]
    compute_profile_id: ForeignKey,
    #[serde(default)]
    domain_id: ForeignKey,
    #[serde(default)]
    environment_id: ForeignKey,
    #[serde(default)]
    medium_id: ForeignKey,
    #[serde(default)]
    operatingsystem_id: ForeignKey,
    #[serde(default)]
    parent_id: ForeignKey,
    #[serde(default)]
    ptable_id: ForeignKey,
    #[serde(default)]
    puppet_ca_proxy_id: ForeignKey,
    #[serde(default)]
    puppet_proxy_id: ForeignKey,
    #[serde(default)]
    realm_id: ForeignKey,
    #[serde(default)]
    subnet_id: ForeignKey,
    #[serde(default)]
    parameters: Option<Vec<KvParameter>>,
    #[serde(default)]
    group_parameters_attributes: Option<Vec<KvParameter>>,
}

impl<'de> Deserialize<'de> for Hostgroup {
    fn deserialize<D>(deserializer: D) -> Result<Hostgroup, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = HostgroupWire::deserialize(deserializer)?;
        Ok(Hostgroup {
            object: wire.object,
            title: wire.title,
            root_password: [wire.root_pass, wire.root_password]
                .into_iter()
                .flatten()
                .find(|p| !p.is_empty())
                .unwrap_or_default(),
            pxe_loader: wire.pxe_loader,
            architecture_id: wire.architecture_id,
            compute_profile_id: wire.compute_profile_id,
            domain_id: wire.domain_id,
            environment_id: wire.environment_id,
            medium_id: wire.medium_id,
            operatingsystem_id: wire.operatingsystem_id,
            parent_id: wire.parent_id,
            ptable_id: wire.ptable_id,
            puppet_ca_proxy_id: wire.puppet_ca_proxy_id,
            puppet_proxy_id: wire.puppet_proxy_id,
            realm_id: wire.realm_id,
            subnet_id: wire.subnet_id,
            parameters: wire
                .parameters
                .or(wire.group_parameters_attributes)
                .unwrap_or_default(),
        })
    }
}

impl Entity for Hostgroup {
    const ENDPOINT: &'static str = "hostgroups";
    const WIRE_KEY: &'static str = "hostgroup";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new("title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_never_sent() {
        let mut group = Hostgroup::new("web");
        group.title = "base/web".to_string();
        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("title").is_none());
        assert_eq!(json["parent_id"], json!(""));
        assert_eq!(json["ptable_id"], json!(""));
    }

    #[test]
    fn test_parameters_write_key() {
        let mut group = Hostgroup::new("web");
        assert!(serde_json::to_value(&group)
            .unwrap()
            .get("group_parameters_attributes")
            .is_none());
        group.parameters.push(KvParameter::new("tier", "frontend"));
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["group_parameters_attributes"][0]["value"], json!("frontend"));
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn test_decode_fixture() {
        let raw = std::fs::read_to_string("src/tests/test_data/hostgroup_01.json")
            .expect("Error reading hostgroup fixture");
        let group: Hostgroup = serde_json::from_str(&raw).unwrap();
        assert_eq!(group.object.id, 11);
        assert_eq!(group.title, "base/web");
        assert_eq!(group.parent_id.get(), Some(10));
        assert_eq!(group.operatingsystem_id.get(), Some(2));
        assert!(!group.realm_id.is_set());
        assert!(!group.puppet_ca_proxy_id.is_set());
        assert_eq!(group.pxe_loader, "PXELinux BIOS");
        assert_eq!(group.parameters.len(), 2);
    }

    #[test]
    fn test_decode_both_key_spellings() {
        let group: Hostgroup = serde_json::from_value(json!({
            "id": 11,
            "name": "web",
            "root_pass": "from-root-pass",
            "root_password": "from-root-password",
            "parameters": [{"id": 31, "name": "role", "value": "web"}],
            "group_parameters_attributes": []
        }))
        .unwrap();
        assert_eq!(group.root_password, "from-root-pass");
        assert_eq!(group.parameters.len(), 1);

        let group: Hostgroup = serde_json::from_value(json!({
            "id": 11,
            "name": "web",
            "root_pass": "",
            "root_password": "secret",
            "group_parameters_attributes": [{"id": 32, "name": "tier", "value": "front"}]
        }))
        .unwrap();
        assert_eq!(group.root_password, "secret");
        assert_eq!(group.parameters[0].name, "tier");
    }

    #[test]
    fn test_child_of_builds_title_and_parent() {
        let parent: Hostgroup =
            serde_json::from_value(json!({"id": 10, "name": "base", "title": "base"})).unwrap();
        let child = Hostgroup::child_of(&parent, "web");
        assert_eq!(child.title, "base/web");
        assert_eq!(child.parent_id.get(), Some(10));
        assert_eq!(child.search_filter().to_query(), r#"title="base/web""#);
    }

    #[test]
    fn test_round_trip() {
        for id in [0u64, 1, 9999] {
            let mut group = Hostgroup::new("rt");
            group.object.id = id;
            group.parent_id = ForeignKey::new(id);
            group.subnet_id = ForeignKey::new(id);
            let back: Hostgroup =
                serde_json::from_str(&serde_json::to_string(&group).unwrap()).unwrap();
            assert_eq!(back.object.id, id);
            assert_eq!(back.object.name, "rt");
            assert_eq!(back.parent_id, group.parent_id);
            assert_eq!(back.subnet_id, group.subnet_id);
        }
    }
}
