//! Session game state and resource-key seeding.

use serde::{Deserialize, Serialize};

use crate::city::CityState;
use crate::constants::{self, resources};
use crate::resources::ResourceTable;

/// Everything a session owns. The turn resolver only touches `resources`,
/// `turn` and `era_turn`; the rest is read-only to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub seed: String,
    pub turn: u32,
    /// Current era name. Passed through; not resolved here.
    pub era: String,
    /// Turns elapsed in the current era.
    pub era_turn: u32,
    /// Not used by turn resolution.
    pub entropy: f32,
    pub resources: ResourceTable,
    pub cities: Vec<CityState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            seed: constants::DEFAULT_SEED.to_string(),
            turn: 0,
            era: constants::DEFAULT_ERA.to_string(),
            era_turn: 0,
            entropy: 0.0,
            resources: ResourceTable::new(),
            cities: Vec::new(),
        }
    }
}

impl GameState {
    /// A fresh state with the canonical resource keys already seeded.
    pub fn new() -> Self {
        let mut state = Self::default();
        ensure_resource_keys(&mut state);
        state
    }

    /// Append a city with a generated id (`city-1`, `city-2`, ...) and return it.
    pub fn add_city(&mut self, label: impl Into<String>, population: i32) -> &mut CityState {
        let mut n = self.cities.len() + 1;
        while self.cities.iter().any(|c| c.id == format!("city-{n}")) {
            n += 1;
        }
        self.cities
            .push(CityState::new(format!("city-{n}"), label, population));
        let last = self.cities.len() - 1;
        &mut self.cities[last]
    }

    pub fn city(&self, id: &str) -> Option<&CityState> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn city_mut(&mut self, id: &str) -> Option<&mut CityState> {
        self.cities.iter_mut().find(|c| c.id == id)
    }
}

/// Make sure every canonical resource kind exists, at zero if new.
///
/// Idempotent; never overwrites an existing value.
pub fn ensure_resource_keys(state: &mut GameState) {
    for kind in resources::CANONICAL {
        state.resources.ensure_key(kind);
    }
}
