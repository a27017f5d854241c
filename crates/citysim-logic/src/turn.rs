//! Per-turn production resolver.
//!
//! Converts each city's workforce (see [`crate::city`]) into resource
//! production, sums it over all cities into one [`ResourceDelta`], then
//! commits that delta and advances the turn counters.
//!
//! Resolution is total: unknown role or building ids contribute nothing,
//! negative counts and amounts are treated as zero, and the counters advance
//! even when nothing was produced.
//!
//! ```
//! use citysim_logic::city::CityState;
//! use citysim_logic::content::{index_buildings, index_roles, BuildingDef, RoleDef};
//! use citysim_logic::state::GameState;
//! use citysim_logic::turn::resolve_turn;
//!
//! let roles = index_roles(vec![RoleDef::new("farmer", "Farmer").with_production("food", 2)]);
//! let buildings = index_buildings(vec![BuildingDef::new("farm", "Farm").hosting("farmer", 5)]);
//!
//! let mut state = GameState::new();
//! state.cities.push(
//!     CityState::new("c1", "Harbor", 10)
//!         .with_assignment("farmer", 8)
//!         .with_building("farm"),
//! );
//!
//! resolve_turn(&mut state, &roles, &buildings);
//! assert_eq!(state.resources.get("food"), 10);
//! assert_eq!(state.turn, 1);
//! ```

use serde::Serialize;

use crate::city::{CityState, CityWorkforce};
use crate::content::{BuildingTable, RoleTable};
use crate::resources::ResourceDelta;
use crate::state::{ensure_resource_keys, GameState};

/// What one city contributed in a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityReport {
    pub city_id: String,
    pub workforce: CityWorkforce,
    pub produced: ResourceDelta,
}

/// Outcome of one resolved turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn number after the counters advanced.
    pub turn: u32,
    /// Production summed over all cities.
    pub delta: ResourceDelta,
    pub cities: Vec<CityReport>,
}

/// Add one city's production into `delta`, returning the city's own share.
fn produce_city(
    city: &CityState,
    roles: &RoleTable,
    buildings: &BuildingTable,
    delta: &mut ResourceDelta,
) -> CityReport {
    let workforce = CityWorkforce::compute(city, buildings);
    let mut produced = ResourceDelta::new();

    for (role_id, &workers) in &workforce.effective {
        if workers <= 0 {
            continue;
        }
        let Some(role) = roles.get(role_id) else {
            continue;
        };
        for entry in &role.production {
            if entry.resource.is_empty() {
                continue;
            }
            let amount = i64::from(entry.amount.max(0)).saturating_mul(workers);
            produced.accumulate(&entry.resource, amount);
        }
    }

    for (kind, amount) in produced.iter() {
        delta.accumulate(kind, amount);
    }

    log::debug!(
        "city {} ({}): {} of {} requested workers productive, produced {:?}",
        city.id,
        city.label,
        workforce.total_effective(),
        workforce.total_assigned,
        produced
    );

    CityReport {
        city_id: city.id.clone(),
        workforce,
        produced,
    }
}

/// Compute this turn's production without touching `state`.
///
/// The returned report's `turn` is the number the turn will have once committed.
pub fn compute_turn_delta(
    state: &GameState,
    roles: &RoleTable,
    buildings: &BuildingTable,
) -> TurnReport {
    let mut delta = ResourceDelta::new();
    let cities = state
        .cities
        .iter()
        .map(|city| produce_city(city, roles, buildings, &mut delta))
        .collect();

    TurnReport {
        turn: state.turn.saturating_add(1),
        delta,
        cities,
    }
}

/// Resolve exactly one turn: produce, commit, advance `turn` and `era_turn`.
pub fn resolve_turn(
    state: &mut GameState,
    roles: &RoleTable,
    buildings: &BuildingTable,
) -> TurnReport {
    ensure_resource_keys(state);

    let report = compute_turn_delta(state, roles, buildings);
    state.resources.apply(&report.delta);
    state.turn = state.turn.saturating_add(1);
    state.era_turn = state.era_turn.saturating_add(1);

    log::debug!(
        "turn {} resolved: {} cities, {} total resources produced",
        state.turn,
        state.cities.len(),
        report.delta.total()
    );

    report
}

/// Resolve `turns` turns in sequence, returning each turn's report.
pub fn run_turns(
    state: &mut GameState,
    roles: &RoleTable,
    buildings: &BuildingTable,
    turns: u32,
) -> Vec<TurnReport> {
    (0..turns)
        .map(|_| resolve_turn(state, roles, buildings))
        .collect()
}
