use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{info, warn};

use crate::domain::{FamilyState, TradeUpFamily};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "TradeUpValueScanner";
const APP_NAME: &str = "TradeUpValueScanner";

/// Platform data directory for price files, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn family_file(data_dir: &Path, family: &TradeUpFamily) -> PathBuf {
    data_dir.join(family.data_file)
}

/// Loads a family's price lists, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_family_state(path: &Path, family: &TradeUpFamily) -> FamilyState {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved prices yet, using defaults");
            return FamilyState::with_defaults(family);
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read saved prices");
            return FamilyState::with_defaults(family);
        }
    };

    match serde_json::from_str(&raw) {
        Ok(document) => FamilyState::from_persisted(family, document),
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse saved prices");
            FamilyState::with_defaults(family)
        }
    }
}

pub fn save_family_state(
    path: &Path,
    family: &TradeUpFamily,
    state: &FamilyState,
) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&state.to_persisted(family))?;
    fs::write(path, json)?;
    info!(
        path = %path.display(),
        outputs = state.outputs.len(),
        materials = state.materials.len(),
        "saved prices"
    );
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
