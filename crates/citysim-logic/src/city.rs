//! Cities and the per-city workforce pipeline.
//!
//! Population and role assignments are edited independently between turns,
//! so nothing here trusts them to be consistent. Each city's productive
//! workforce is derived in four steps:
//!
//! 1. [`role_capacity`] — sum building capacity per hosted role
//! 2. [`raw_assignments`] — sum requested workers per role
//! 3. [`scale_to_population`] — proportional floor downscale if over population
//! 4. [`clamp_to_capacity`] — cap each role at its building capacity
//!
//! [`CityWorkforce::compute`] runs all four.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::BuildingTable;

/// Workers of one role requested by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub role_id: String,
    #[serde(default)]
    pub workers: i32,
}

/// A building present in a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInstance {
    pub building_id: String,
    /// Carried for the editor; production ignores it.
    #[serde(default)]
    pub workers_assigned: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CityState {
    pub id: String,
    pub label: String,
    pub population: i32,
    pub tags: Vec<String>,
    pub role_assignments: Vec<RoleAssignment>,
    pub buildings: Vec<BuildingInstance>,
}

impl CityState {
    pub fn new(id: impl Into<String>, label: impl Into<String>, population: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            population,
            ..Default::default()
        }
    }

    pub fn with_assignment(mut self, role_id: impl Into<String>, workers: i32) -> Self {
        self.role_assignments.push(RoleAssignment {
            role_id: role_id.into(),
            workers,
        });
        self
    }

    pub fn with_building(mut self, building_id: impl Into<String>) -> Self {
        self.buildings.push(BuildingInstance {
            building_id: building_id.into(),
            workers_assigned: 0,
        });
        self
    }
}

/// Per-role worker counts, keyed by role id.
pub type RoleCounts = BTreeMap<String, i64>;

/// Aggregate building capacity per hosted role.
///
/// Unknown building ids and buildings hosting no role contribute nothing.
/// Several instances hosting the same role add up.
pub fn role_capacity(city: &CityState, buildings: &BuildingTable) -> RoleCounts {
    let mut capacity = RoleCounts::new();
    for instance in &city.buildings {
        let Some(def) = buildings.get(&instance.building_id) else {
            continue;
        };
        let Some(role) = def.hosted_role() else {
            continue;
        };
        *capacity.entry(role.to_string()).or_insert(0) += i64::from(def.effective_capacity());
    }
    capacity
}

/// Requested workers per role and their total. Negative counts count as zero.
pub fn raw_assignments(city: &CityState) -> (RoleCounts, i64) {
    let mut assigned = RoleCounts::new();
    let mut total = 0i64;
    for ra in &city.role_assignments {
        if ra.role_id.is_empty() {
            continue;
        }
        let workers = i64::from(ra.workers.max(0));
        *assigned.entry(ra.role_id.clone()).or_insert(0) += workers;
        total += workers;
    }
    (assigned, total)
}

/// Scale assignments down proportionally when they exceed `population`.
///
/// Each role becomes `floor(assigned * population / total)`. Fractional
/// workers are dropped, not redistributed, so the result may sum to less
/// than `population`. A non-positive population scales everything to zero.
pub fn scale_to_population(assigned: &RoleCounts, total: i64, population: i32) -> RoleCounts {
    let population = i64::from(population);
    if total <= population {
        return assigned.clone();
    }
    if population <= 0 {
        return assigned.keys().map(|role| (role.clone(), 0)).collect();
    }
    assigned
        .iter()
        .map(|(role, &workers)| {
            // result <= workers, so narrowing back is lossless
            let scaled = i128::from(workers) * i128::from(population) / i128::from(total);
            (role.clone(), scaled as i64)
        })
        .collect()
}

/// Cap each role at its aggregated capacity; roles without capacity get zero.
pub fn clamp_to_capacity(assigned: &RoleCounts, capacity: &RoleCounts) -> RoleCounts {
    assigned
        .iter()
        .map(|(role, &workers)| {
            let cap = capacity.get(role).copied().unwrap_or(0);
            (role.clone(), workers.min(cap))
        })
        .collect()
}

/// Full workforce breakdown for one city in one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CityWorkforce {
    pub capacity: RoleCounts,
    pub assigned: RoleCounts,
    pub total_assigned: i64,
    pub scaled: RoleCounts,
    pub effective: RoleCounts,
}

impl CityWorkforce {
    pub fn compute(city: &CityState, buildings: &BuildingTable) -> Self {
        let capacity = role_capacity(city, buildings);
        let (assigned, total_assigned) = raw_assignments(city);
        let scaled = scale_to_population(&assigned, total_assigned, city.population);
        let effective = clamp_to_capacity(&scaled, &capacity);
        Self {
            capacity,
            assigned,
            total_assigned,
            scaled,
            effective,
        }
    }

    /// Workers actually producing this turn.
    pub fn total_effective(&self) -> i64 {
        self.effective.values().sum()
    }

    /// Effective workers for `role`, 0 if none.
    pub fn effective_for(&self, role: &str) -> i64 {
        self.effective.get(role).copied().unwrap_or(0)
    }
}
