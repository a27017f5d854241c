//! Scenario files — a whole `GameState` as JSON, for loading and export.

use std::fs;
use std::path::Path;

use citysim_logic::constants::DEFAULT_CITY_POPULATION;
use citysim_logic::state::{ensure_resource_keys, GameState};

use crate::error::HarnessError;

/// Fresh session with one empty sandbox city.
pub fn sandbox_state() -> GameState {
    let mut state = GameState::new();
    state.add_city("City 1", DEFAULT_CITY_POPULATION);
    state
}

/// Load a scenario, or the sandbox default when no path is given.
pub fn load_scenario(path: Option<&Path>) -> Result<GameState, HarnessError> {
    let Some(path) = path else {
        return Ok(sandbox_state());
    };
    let json = fs::read_to_string(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut state: GameState =
        serde_json::from_str(&json).map_err(|source| HarnessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    ensure_resource_keys(&mut state);
    log::info!(
        "Loaded scenario {}: turn {}, {} cities",
        path.display(),
        state.turn,
        state.cities.len()
    );
    Ok(state)
}

/// Write the full state as pretty JSON.
pub fn export_state(state: &GameState, path: &Path) -> Result<(), HarnessError> {
    let json = serde_json::to_string_pretty(state).map_err(|source| HarnessError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported state to {}", path.display());
    Ok(())
}
