//! Content definitions — roles, buildings, and their keyed lookups.
//!
//! Definitions are immutable data loaded once per session. The resolver
//! only ever sees them through [`RoleTable`] / [`BuildingTable`], keyed by
//! id; a missing id means "no such role/building" and contributes nothing.
//!
//! Field names follow the content JSON files (`eraUnlock`, `roleId`, and
//! `type` for a production entry's resource kind).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One (resource kind, per-worker-per-turn amount) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(rename = "type", alias = "resource", default)]
    pub resource: String,
    #[serde(default)]
    pub amount: i32,
}

impl ResourceEntry {
    pub fn new(resource: impl Into<String>, amount: i32) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

/// A worker occupation producing resources per assigned worker per turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDef {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub era_unlock: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Per worker, per turn. Order is preserved from the content file.
    #[serde(default)]
    pub production: Vec<ResourceEntry>,
}

impl RoleDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_production(mut self, resource: impl Into<String>, amount: i32) -> Self {
        self.production.push(ResourceEntry::new(resource, amount));
        self
    }
}

/// A structure hosting one role and bounding how many of its workers are productive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDef {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub era_unlock: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_id: Option<String>,
    /// Max workers per instance of this building.
    #[serde(default)]
    pub capacity: i32,
}

impl BuildingDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn hosting(mut self, role_id: impl Into<String>, capacity: i32) -> Self {
        self.role_id = Some(role_id.into());
        self.capacity = capacity;
        self
    }

    /// The hosted role id, if present and non-empty.
    pub fn hosted_role(&self) -> Option<&str> {
        self.role_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Capacity with negative values treated as zero.
    pub fn effective_capacity(&self) -> i32 {
        self.capacity.max(0)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

pub type RoleTable = HashMap<String, RoleDef>;
pub type BuildingTable = HashMap<String, BuildingDef>;

/// Index role definitions by id. On duplicate ids the last definition wins.
pub fn index_roles(defs: impl IntoIterator<Item = RoleDef>) -> RoleTable {
    let mut table = RoleTable::new();
    for def in defs {
        if let Some(prev) = table.insert(def.id.clone(), def) {
            log::warn!("duplicate role id '{}', keeping the later definition", prev.id);
        }
    }
    table
}

/// Index building definitions by id. On duplicate ids the last definition wins.
pub fn index_buildings(defs: impl IntoIterator<Item = BuildingDef>) -> BuildingTable {
    let mut table = BuildingTable::new();
    for def in defs {
        if let Some(prev) = table.insert(def.id.clone(), def) {
            log::warn!(
                "duplicate building id '{}', keeping the later definition",
                prev.id
            );
        }
    }
    table
}

/// All content for a session, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    pub roles: RoleTable,
    pub buildings: BuildingTable,
}

impl ContentCatalog {
    pub fn from_defs(roles: Vec<RoleDef>, buildings: Vec<BuildingDef>) -> Self {
        Self {
            roles: index_roles(roles),
            buildings: index_buildings(buildings),
        }
    }

    pub fn role(&self, id: &str) -> Option<&RoleDef> {
        self.roles.get(id)
    }

    pub fn building(&self, id: &str) -> Option<&BuildingDef> {
        self.buildings.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.buildings.is_empty()
    }
}

/// Advisory content problem. None of these stop a turn from resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    DuplicateRoleId(String),
    DuplicateBuildingId(String),
    /// Building hosts a role id no role definition has.
    UnknownHostedRole { building: String, role: String },
    /// Building hosts no role, so it never contributes capacity.
    NoHostedRole(String),
    NegativeCapacity { building: String, capacity: i32 },
    EmptyResourceKind { role: String },
    NegativeProductionAmount {
        role: String,
        resource: String,
        amount: i32,
    },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoleId(id) => write!(f, "duplicate role id '{id}'"),
            Self::DuplicateBuildingId(id) => write!(f, "duplicate building id '{id}'"),
            Self::UnknownHostedRole { building, role } => {
                write!(f, "building '{building}' hosts unknown role '{role}'")
            }
            Self::NoHostedRole(id) => write!(f, "building '{id}' hosts no role"),
            Self::NegativeCapacity { building, capacity } => {
                write!(f, "building '{building}' has negative capacity {capacity}")
            }
            Self::EmptyResourceKind { role } => {
                write!(f, "role '{role}' has a production entry with no resource kind")
            }
            Self::NegativeProductionAmount {
                role,
                resource,
                amount,
            } => write!(
                f,
                "role '{role}' produces negative {resource} ({amount}), treated as 0"
            ),
        }
    }
}

/// Validate content definitions, returning all issues found.
pub fn validate_content(roles: &[RoleDef], buildings: &[BuildingDef]) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    let mut role_ids = HashSet::new();
    for role in roles {
        if !role_ids.insert(role.id.as_str()) {
            issues.push(ContentIssue::DuplicateRoleId(role.id.clone()));
        }
        for entry in &role.production {
            if entry.resource.is_empty() {
                issues.push(ContentIssue::EmptyResourceKind {
                    role: role.id.clone(),
                });
            } else if entry.amount < 0 {
                issues.push(ContentIssue::NegativeProductionAmount {
                    role: role.id.clone(),
                    resource: entry.resource.clone(),
                    amount: entry.amount,
                });
            }
        }
    }

    let mut building_ids = HashSet::new();
    for building in buildings {
        if !building_ids.insert(building.id.as_str()) {
            issues.push(ContentIssue::DuplicateBuildingId(building.id.clone()));
        }
        match building.hosted_role() {
            None => issues.push(ContentIssue::NoHostedRole(building.id.clone())),
            Some(role) if !role_ids.contains(role) => {
                issues.push(ContentIssue::UnknownHostedRole {
                    building: building.id.clone(),
                    role: role.to_string(),
                })
            }
            Some(_) => {}
        }
        if building.capacity < 0 {
            issues.push(ContentIssue::NegativeCapacity {
                building: building.id.clone(),
                capacity: building.capacity,
            });
        }
    }

    issues
}
