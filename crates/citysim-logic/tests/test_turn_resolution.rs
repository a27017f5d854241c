//! Integration tests for turn resolution.
//!
//! Exercises: content tables → city workforce → turn delta → commit,
//! including the population/capacity caps under randomized inputs.
//!
//! All tests are pure logic — no files, no harness.

use citysim_logic::city::{raw_assignments, scale_to_population, CityState, CityWorkforce};
use citysim_logic::content::{
    index_buildings, index_roles, BuildingDef, BuildingTable, RoleDef, RoleTable,
};
use citysim_logic::state::{ensure_resource_keys, GameState};
use citysim_logic::turn::{compute_turn_delta, resolve_turn, run_turns};
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

const ROLE_IDS: [&str; 4] = ["farmer", "miner", "scholar", "ghost"];
const BUILDING_IDS: [&str; 5] = ["farm", "mine", "library", "ruin", "void"];

fn roles() -> RoleTable {
    index_roles(vec![
        RoleDef::new("farmer", "Farmer").with_production("food", 2),
        RoleDef::new("miner", "Miner")
            .with_production("materials", 3)
            .with_production("gold", 1),
        RoleDef::new("scholar", "Scholar").with_production("knowledge", 1),
        RoleDef::new("roleA", "Role A").with_production("production", 1),
        RoleDef::new("roleB", "Role B").with_production("unity", 1),
    ])
}

fn buildings() -> BuildingTable {
    index_buildings(vec![
        BuildingDef::new("farm", "Farm").hosting("farmer", 5),
        BuildingDef::new("mine", "Mine").hosting("miner", 3),
        BuildingDef::new("library", "Library").hosting("scholar", 2),
        BuildingDef::new("ruin", "Ruin").hosting("miner", -2),
        BuildingDef::new("workshopA", "Workshop A").hosting("roleA", 10),
        BuildingDef::new("workshopB", "Workshop B").hosting("roleB", 10),
    ])
}

fn farmer_city(population: i32, workers: i32) -> CityState {
    CityState::new("harbor", "Harbor", population)
        .with_assignment("farmer", workers)
        .with_building("farm")
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn farmer_capped_by_farm_capacity() {
    let mut state = GameState::new();
    state.cities.push(farmer_city(10, 8));

    resolve_turn(&mut state, &roles(), &buildings());

    assert_eq!(state.resources.get("food"), 10);
    assert_eq!(state.turn, 1);
    assert_eq!(state.era_turn, 1);
}

#[test]
fn scaling_exact_half() {
    let city = CityState::new("c", "C", 5)
        .with_assignment("roleA", 6)
        .with_assignment("roleB", 4)
        .with_building("workshopA")
        .with_building("workshopB");
    let wf = CityWorkforce::compute(&city, &buildings());
    assert_eq!(wf.total_assigned, 10);
    assert_eq!(wf.effective_for("roleA"), 3);
    assert_eq!(wf.effective_for("roleB"), 2);
    assert_eq!(wf.total_effective(), 5);
}

#[test]
fn scaling_truncation_loses_a_worker() {
    let city = CityState::new("c", "C", 5)
        .with_assignment("roleA", 3)
        .with_assignment("roleB", 4)
        .with_building("workshopA")
        .with_building("workshopB");
    let wf = CityWorkforce::compute(&city, &buildings());
    assert_eq!(wf.effective_for("roleA"), 2);
    assert_eq!(wf.effective_for("roleB"), 2);
    assert_eq!(wf.total_effective(), 4);

    let mut state = GameState::new();
    state.cities.push(city);
    resolve_turn(&mut state, &roles(), &buildings());
    assert_eq!(state.resources.get("production"), 2);
    assert_eq!(state.resources.get("unity"), 2);
}

#[test]
fn zero_population_city_produces_nothing() {
    let mut state = GameState::new();
    state.cities.push(farmer_city(0, 8));
    let report = resolve_turn(&mut state, &roles(), &buildings());
    assert_eq!(report.delta.total(), 0);
    assert_eq!(state.resources.get("food"), 0);
}

#[test]
fn negative_population_city_produces_nothing() {
    let mut state = GameState::new();
    state.cities.push(farmer_city(-3, 8));
    let report = resolve_turn(&mut state, &roles(), &buildings());
    assert_eq!(report.delta.total(), 0);
}

#[test]
fn unknown_references_are_inert() {
    let mut state = GameState::new();
    state.cities.push(
        CityState::new("c", "C", 10)
            .with_assignment("ghost", 5)
            .with_building("void")
            .with_building("castle"),
    );
    let report = resolve_turn(&mut state, &roles(), &buildings());
    assert!(report.delta.is_empty());
    assert!(report.cities[0].workforce.capacity.is_empty());
    assert_eq!(state.turn, 1);
}

#[test]
fn assigned_role_without_definition_is_inert() {
    // capacity exists for "ghost" but no role definition does
    let buildings =
        index_buildings(vec![BuildingDef::new("crypt", "Crypt").hosting("ghost", 4)]);
    let mut state = GameState::new();
    state.cities.push(
        CityState::new("c", "C", 10)
            .with_assignment("ghost", 4)
            .with_building("crypt"),
    );
    let report = resolve_turn(&mut state, &roles(), &buildings);
    assert_eq!(report.cities[0].workforce.effective_for("ghost"), 4);
    assert!(report.delta.is_empty());
}

#[test]
fn empty_content_still_advances_turn() {
    let mut state = GameState::new();
    state.cities.push(farmer_city(10, 8));
    resolve_turn(&mut state, &RoleTable::new(), &BuildingTable::new());
    assert_eq!(state.turn, 1);
    assert_eq!(state.resources.get("food"), 0);
}

#[test]
fn resolve_seeds_canonical_keys() {
    let mut state = GameState::default();
    resolve_turn(&mut state, &roles(), &buildings());
    let mut seeded = GameState::default();
    ensure_resource_keys(&mut seeded);
    assert_eq!(state.resources, seeded.resources);
}

#[test]
fn city_order_does_not_change_delta() {
    let mut forward = GameState::new();
    forward.cities.push(farmer_city(10, 8));
    forward.cities.push(
        CityState::new("pit", "Pit", 6)
            .with_assignment("miner", 6)
            .with_building("mine")
            .with_building("ruin"),
    );
    let mut reversed = forward.clone();
    reversed.cities.reverse();

    let a = compute_turn_delta(&forward, &roles(), &buildings());
    let b = compute_turn_delta(&reversed, &roles(), &buildings());
    assert_eq!(a.delta, b.delta);
    assert_eq!(a.delta.get("materials"), 9);
}

#[test]
fn state_round_trips_through_json() {
    let mut state = GameState::new();
    state.cities.push(farmer_city(10, 8));
    run_turns(&mut state, &roles(), &buildings(), 3);
    let json = serde_json::to_string_pretty(&state).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert!(json.contains("\"eraTurn\": 3"));
}

// ── Properties ─────────────────────────────────────────────────────────

fn arb_city() -> impl Strategy<Value = CityState> {
    (
        -5i32..60,
        prop::collection::vec((0..ROLE_IDS.len(), -10i32..40), 0..8),
        prop::collection::vec(0..BUILDING_IDS.len(), 0..8),
    )
        .prop_map(|(population, assignments, buildings)| {
            let mut city = CityState::new("p", "Prop", population);
            for (role, workers) in assignments {
                city = city.with_assignment(ROLE_IDS[role], workers);
            }
            for b in buildings {
                city = city.with_building(BUILDING_IDS[b]);
            }
            city
        })
}

proptest! {
    #[test]
    fn prop_scaled_never_exceeds_population(city in arb_city()) {
        let (assigned, total) = raw_assignments(&city);
        let scaled = scale_to_population(&assigned, total, city.population);
        let sum: i64 = scaled.values().sum();
        if total > i64::from(city.population) {
            prop_assert!(sum <= i64::from(city.population.max(0)));
        } else {
            prop_assert_eq!(sum, total);
        }
    }

    #[test]
    fn prop_effective_within_capacity_and_population(city in arb_city()) {
        let wf = CityWorkforce::compute(&city, &buildings());
        for (role, &workers) in &wf.effective {
            let cap = wf.capacity.get(role).copied().unwrap_or(0);
            prop_assert!(workers <= cap);
            prop_assert!(workers >= 0);
        }
        prop_assert!(wf.total_effective() <= i64::from(city.population.max(0)));
    }

    #[test]
    fn prop_turn_counters_advance_by_n(
        cities in prop::collection::vec(arb_city(), 0..4),
        n in 0u32..20
    ) {
        let mut state = GameState::new();
        state.turn = 7;
        state.era_turn = 2;
        state.cities = cities;
        run_turns(&mut state, &roles(), &buildings(), n);
        prop_assert_eq!(state.turn, 7 + n);
        prop_assert_eq!(state.era_turn, 2 + n);
    }

    #[test]
    fn prop_resources_never_decrease(cities in prop::collection::vec(arb_city(), 0..4)) {
        let mut state = GameState::new();
        state.cities = cities;
        let before = state.resources.clone();
        resolve_turn(&mut state, &roles(), &buildings());
        for (kind, amount) in before.iter() {
            prop_assert!(state.resources.get(kind) >= amount);
        }
    }
}
