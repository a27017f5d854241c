//! Self-checks run by `citysim-simtest check`.
//!
//! Each check produces a [`CheckResult`]; the binary prints the summary
//! and exits non-zero if any failed.

use citysim_logic::city::{CityState, CityWorkforce};
use citysim_logic::constants::resources;
use citysim_logic::content::{
    index_buildings, index_roles, validate_content, BuildingDef, BuildingTable, RoleDef,
    RoleTable,
};
use citysim_logic::state::{ensure_resource_keys, GameState};
use citysim_logic::turn::{resolve_turn, run_turns};

use crate::content_loader::LoadedContent;

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Run every check against the loaded content plus built-in fixtures.
pub fn run_checks(content: &LoadedContent, verbose: bool) -> Vec<CheckResult> {
    let mut results = Vec::new();

    // 1. Content lint
    results.extend(validate_content_files(content, verbose));

    // 2. Loaded content produces as declared
    results.extend(validate_content_production(content, verbose));

    // 3. Resolver behavior on fixed fixtures
    results.extend(validate_turn_engine(verbose));

    results
}

// ── 1. Content Lint ────────────────────────────────────────────────────

fn validate_content_files(content: &LoadedContent, verbose: bool) -> Vec<CheckResult> {
    println!("--- Content ---");
    let mut results = Vec::new();

    results.push(CheckResult {
        name: "content_roles_loaded".into(),
        passed: !content.roles.is_empty(),
        detail: format!("{} roles loaded", content.roles.len()),
    });
    results.push(CheckResult {
        name: "content_buildings_loaded".into(),
        passed: !content.buildings.is_empty(),
        detail: format!("{} buildings loaded", content.buildings.len()),
    });

    let issues = validate_content(&content.roles, &content.buildings);
    results.push(CheckResult {
        name: "content_no_issues".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "no content issues".into()
        } else {
            issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    if verbose {
        for role in &content.roles {
            let produces = role
                .production
                .iter()
                .map(|p| format!("{}×{}", p.resource, p.amount))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  role {:12} {}", role.id, produces);
        }
        for building in &content.buildings {
            println!(
                "  building {:12} hosts {:12} cap {}",
                building.id,
                building.hosted_role().unwrap_or("-"),
                building.capacity
            );
        }
    }

    results
}

// ── 2. Content Production ──────────────────────────────────────────────

/// One city per building, fully staffed: production must equal
/// capacity × per-worker amount for every entry of the hosted role.
fn validate_content_production(content: &LoadedContent, _verbose: bool) -> Vec<CheckResult> {
    println!("--- Content Production ---");
    let catalog = content.catalog();
    let mut results = Vec::new();

    let mut building_ids: Vec<&String> = catalog.buildings.keys().collect();
    building_ids.sort();

    for id in building_ids {
        let building = &catalog.buildings[id];
        let Some(role_id) = building.hosted_role() else {
            continue;
        };
        let Some(role) = catalog.role(role_id) else {
            continue;
        };
        let capacity = building.effective_capacity();

        let mut state = GameState::new();
        state.cities.push(
            CityState::new("probe", "Probe", capacity)
                .with_assignment(role_id, capacity)
                .with_building(id.as_str()),
        );
        let report = resolve_turn(&mut state, &catalog.roles, &catalog.buildings);

        let mismatches: Vec<String> = role
            .production
            .iter()
            .filter(|p| !p.resource.is_empty())
            .filter_map(|p| {
                // several entries may share a resource kind
                let expected: i64 = role
                    .production
                    .iter()
                    .filter(|q| q.resource == p.resource)
                    .map(|q| i64::from(q.amount.max(0)) * i64::from(capacity))
                    .sum();
                let actual = report.delta.get(&p.resource);
                (actual != expected)
                    .then(|| format!("{}: expected {} got {}", p.resource, expected, actual))
            })
            .collect();

        results.push(CheckResult {
            name: format!("production_{}", id),
            passed: mismatches.is_empty(),
            detail: if mismatches.is_empty() {
                format!("{} × {} workers → {:?}", role_id, capacity, report.delta)
            } else {
                mismatches.join("; ")
            },
        });
    }

    results
}

// ── 3. Turn Engine ─────────────────────────────────────────────────────

fn fixture_roles() -> RoleTable {
    index_roles(vec![
        RoleDef::new("farmer", "Farmer").with_production(resources::FOOD, 2),
        RoleDef::new("roleA", "Role A").with_production(resources::PRODUCTION, 1),
        RoleDef::new("roleB", "Role B").with_production(resources::UNITY, 1),
    ])
}

fn fixture_buildings() -> BuildingTable {
    index_buildings(vec![
        BuildingDef::new("farm", "Farm").hosting("farmer", 5),
        BuildingDef::new("hallA", "Hall A").hosting("roleA", 10),
        BuildingDef::new("hallB", "Hall B").hosting("roleB", 10),
    ])
}

fn two_role_city(population: i32, a: i32, b: i32) -> CityState {
    CityState::new("c", "Two Roles", population)
        .with_assignment("roleA", a)
        .with_assignment("roleB", b)
        .with_building("hallA")
        .with_building("hallB")
}

fn validate_turn_engine(verbose: bool) -> Vec<CheckResult> {
    println!("--- Turn Engine ---");
    let roles = fixture_roles();
    let buildings = fixture_buildings();
    let mut results = Vec::new();

    // Farmer capped by farm capacity
    let mut state = GameState::new();
    state.cities.push(
        CityState::new("c", "Harbor", 10)
            .with_assignment("farmer", 8)
            .with_building("farm"),
    );
    resolve_turn(&mut state, &roles, &buildings);
    let food = state.resources.get(resources::FOOD);
    results.push(CheckResult {
        name: "engine_capacity_clamp".into(),
        passed: food == 10 && state.turn == 1 && state.era_turn == 1,
        detail: format!(
            "food={} turn={} eraTurn={} (expected 10/1/1)",
            food, state.turn, state.era_turn
        ),
    });

    // Proportional downscale, exact
    let wf = CityWorkforce::compute(&two_role_city(5, 6, 4), &buildings);
    let (a, b) = (wf.effective_for("roleA"), wf.effective_for("roleB"));
    results.push(CheckResult {
        name: "engine_population_scale_exact".into(),
        passed: a == 3 && b == 2,
        detail: format!("pop 5, raw 6/4 → {}/{} (expected 3/2)", a, b),
    });

    // Proportional downscale with truncation loss
    let wf = CityWorkforce::compute(&two_role_city(5, 3, 4), &buildings);
    let (a, b) = (wf.effective_for("roleA"), wf.effective_for("roleB"));
    results.push(CheckResult {
        name: "engine_population_scale_truncates".into(),
        passed: a == 2 && b == 2 && wf.total_effective() == 4,
        detail: format!("pop 5, raw 3/4 → {}/{} (expected 2/2, sum 4)", a, b),
    });

    // Zero population
    let mut state = GameState::new();
    state.cities.push(two_role_city(0, 6, 4));
    let report = resolve_turn(&mut state, &roles, &buildings);
    results.push(CheckResult {
        name: "engine_zero_population".into(),
        passed: report.delta.total() == 0,
        detail: format!("produced {:?}", report.delta),
    });

    // Unknown references
    let mut state = GameState::new();
    state.cities.push(
        CityState::new("c", "Nowhere", 10)
            .with_assignment("ghost", 5)
            .with_building("castle"),
    );
    let report = resolve_turn(&mut state, &roles, &buildings);
    results.push(CheckResult {
        name: "engine_unknown_refs_inert".into(),
        passed: report.delta.is_empty() && state.turn == 1,
        detail: "unknown role/building ids contribute nothing".into(),
    });

    // Counters advance with no cities
    let mut state = GameState::new();
    run_turns(&mut state, &roles, &buildings, 10);
    results.push(CheckResult {
        name: "engine_turn_monotonic".into(),
        passed: state.turn == 10 && state.era_turn == 10,
        detail: format!("10 empty turns → turn={} eraTurn={}", state.turn, state.era_turn),
    });

    // Key seeding
    let mut once = GameState::default();
    ensure_resource_keys(&mut once);
    let mut twice = once.clone();
    ensure_resource_keys(&mut twice);
    results.push(CheckResult {
        name: "engine_key_seeding_idempotent".into(),
        passed: once.resources == twice.resources
            && resources::CANONICAL.iter().all(|k| once.resources.contains(k)),
        detail: format!("{} canonical keys", once.resources.len()),
    });

    if verbose {
        println!("  {} engine checks", results.len());
    }

    results
}
