use std::path::{Path, PathBuf};

use crate::logging;
use crate::metadata;
use crate::model::{ExtensionLocation, ExtensionRecord};
use crate::settings_reader::{read_extension_ids, SettingsError, SettingsProvider};

pub const PREFS_FILE: &str = "prefs.js";

/// The two fixed extension roots. User installs shadow system installs
/// when an identifier exists under both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRoots {
    pub user: PathBuf,
    pub system: PathBuf,
}

impl Default for ExtensionRoots {
    fn default() -> Self {
        Self {
            user: default_user_root(),
            system: default_system_root(),
        }
    }
}

impl ExtensionRoots {
    pub fn new(user: impl Into<PathBuf>, system: impl Into<PathBuf>) -> Self {
        Self {
            user: user.into(),
            system: system.into(),
        }
    }

    pub fn dir(&self, location: ExtensionLocation) -> &Path {
        match location {
            ExtensionLocation::User => &self.user,
            ExtensionLocation::System => &self.system,
        }
    }
}

pub fn default_user_root() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local/share/gnome-shell/extensions"),
        None => std::env::temp_dir().join("gnome-shell-extensions"),
    }
}

pub fn default_system_root() -> PathBuf {
    PathBuf::from("/usr/share/gnome-shell/extensions")
}

/// User root first, then system; `None` drops the identifier.
pub fn classify(roots: &ExtensionRoots, id: &str) -> Option<ExtensionLocation> {
    if roots.user.join(id).is_dir() {
        return Some(ExtensionLocation::User);
    }
    if roots.system.join(id).is_dir() {
        return Some(ExtensionLocation::System);
    }
    None
}

/// An extension advertises a preferences UI by shipping a readable
/// `prefs.js` next to its metadata.
pub fn has_preferences(root: &Path, id: &str) -> bool {
    let prefs = root.join(id).join(PREFS_FILE);
    prefs.is_file() && std::fs::File::open(&prefs).is_ok()
}

/// Builds the candidate list for one query session: settings read, location
/// classification, capability filter, metadata load. Always constructs a
/// fresh list; a candidate whose metadata fails to load is skipped with a
/// warning while the rest of the list survives.
pub fn build_candidates(
    provider: &dyn SettingsProvider,
    roots: &ExtensionRoots,
    include_disabled: bool,
) -> Result<Vec<ExtensionRecord>, SettingsError> {
    let ids = read_extension_ids(provider, include_disabled)?;

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(location) = classify(roots, &id) else {
            continue;
        };
        let root = roots.dir(location);
        if !has_preferences(root, &id) {
            continue;
        }

        match metadata::load(&root.join(&id)) {
            Ok(meta) => records.push(ExtensionRecord::new(
                id,
                location,
                meta.name,
                meta.description,
            )),
            Err(error) => {
                logging::warn(&format!("skipping candidate {id}: {error}"));
            }
        }
    }

    Ok(records)
}
