//! Content loading — role and building definitions from JSON arrays.
//!
//! Layout under the content directory:
//!
//! ```text
//! <content>/roles/core.json      [ { "id": "farmer", ... }, ... ]
//! <content>/buildings/core.json  [ { "id": "farm", ... }, ... ]
//! ```
//!
//! A missing file is not an error: it logs a warning and loads nothing.

use std::fs;
use std::io;
use std::path::Path;

use citysim_logic::content::{BuildingDef, ContentCatalog, RoleDef};
use serde::de::DeserializeOwned;

use crate::error::HarnessError;

pub const ROLES_FILE: &str = "roles/core.json";
pub const BUILDINGS_FILE: &str = "buildings/core.json";

/// Definitions as loaded, before indexing, so validation can see duplicates.
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    pub roles: Vec<RoleDef>,
    pub buildings: Vec<BuildingDef>,
}

impl LoadedContent {
    pub fn catalog(&self) -> ContentCatalog {
        ContentCatalog::from_defs(self.roles.clone(), self.buildings.clone())
    }
}

/// Read a top-level JSON array. Missing file → empty list.
pub fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, HarnessError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Not found: {}", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(HarnessError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&json).map_err(|source| HarnessError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load roles and buildings from a content directory.
pub fn load_content(dir: &Path) -> Result<LoadedContent, HarnessError> {
    let roles: Vec<RoleDef> = load_json_array(&dir.join(ROLES_FILE))?;
    let buildings: Vec<BuildingDef> = load_json_array(&dir.join(BUILDINGS_FILE))?;
    log::info!(
        "Loaded {} roles, {} buildings from {}",
        roles.len(),
        buildings.len(),
        dir.display()
    );
    Ok(LoadedContent { roles, buildings })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, body: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_load_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            ROLES_FILE,
            r#"[{"id": "farmer", "label": "Farmer", "production": [{"type": "food", "amount": 2}]}]"#,
        );
        write(
            dir.path(),
            BUILDINGS_FILE,
            r#"[{"id": "farm", "label": "Farm", "roleId": "farmer", "capacity": 5}]"#,
        );
        let content = load_content(dir.path()).unwrap();
        assert_eq!(content.roles.len(), 1);
        assert_eq!(content.buildings.len(), 1);
        let catalog = content.catalog();
        assert_eq!(catalog.building("farm").and_then(|b| b.hosted_role()), Some("farmer"));
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let content = load_content(dir.path()).unwrap();
        assert!(content.roles.is_empty());
        assert!(content.buildings.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be cannot be read as text
        fs::create_dir_all(dir.path().join(ROLES_FILE)).unwrap();
        let err = load_content(dir.path()).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ROLES_FILE, "{ not an array");
        let err = load_content(dir.path()).unwrap_err();
        assert!(matches!(err, HarnessError::Parse { .. }));
        assert!(err.to_string().contains("core.json"));
    }
}
