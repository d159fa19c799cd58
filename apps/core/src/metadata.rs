use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const METADATA_FILE: &str = "metadata.json";

/// The slice of `metadata.json` this core cares about. `name` is required
/// by the GNOME extension layout; `description` is presentation-only.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtensionMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug)]
pub enum MetadataError {
    Missing(PathBuf),
    Unreadable(PathBuf, std::io::Error),
    Malformed(PathBuf, String),
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "metadata missing: {}", path.display()),
            Self::Unreadable(path, error) => {
                write!(f, "metadata unreadable: {}: {error}", path.display())
            }
            Self::Malformed(path, error) => {
                write!(f, "metadata malformed: {}: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// Loads `<extension_dir>/metadata.json`. Extension authors hand-write
/// these files, so a strict JSON failure gets one lenient (json5) retry
/// before the candidate is given up on.
pub fn load(extension_dir: &Path) -> Result<ExtensionMetadata, MetadataError> {
    let path = extension_dir.join(METADATA_FILE);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(MetadataError::Missing(path))
        }
        Err(error) => return Err(MetadataError::Unreadable(path, error)),
    };

    match serde_json::from_str::<ExtensionMetadata>(&raw) {
        Ok(metadata) => Ok(metadata),
        Err(strict_error) => json5::from_str::<ExtensionMetadata>(&raw)
            .map_err(|_| MetadataError::Malformed(path, strict_error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{load, MetadataError};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_dir(tag: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be valid")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("shellprefs-metadata-{tag}-{unique}"));
        std::fs::create_dir_all(&dir).expect("temp dir should be created");
        dir
    }

    #[test]
    fn loads_name_and_description() {
        let dir = unique_dir("ok");
        std::fs::write(
            dir.join("metadata.json"),
            br#"{"uuid": "x@y", "name": "Alpha", "description": "First one"}"#,
        )
        .expect("metadata should be written");

        let metadata = load(&dir).expect("metadata should load");
        assert_eq!(metadata.name, "Alpha");
        assert_eq!(metadata.description, "First one");

        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let dir = unique_dir("nodesc");
        std::fs::write(dir.join("metadata.json"), br#"{"name": "Beta"}"#)
            .expect("metadata should be written");

        let metadata = load(&dir).expect("metadata should load");
        assert_eq!(metadata.description, "");

        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        let dir = unique_dir("json5");
        std::fs::write(dir.join("metadata.json"), br#"{"name": "Gamma",}"#)
            .expect("metadata should be written");

        let metadata = load(&dir).expect("lenient parse should succeed");
        assert_eq!(metadata.name, "Gamma");

        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }

    #[test]
    fn absent_file_reports_missing() {
        let dir = unique_dir("absent");
        let error = load(&dir).expect_err("load should fail");
        assert!(matches!(error, MetadataError::Missing(_)));

        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }

    #[test]
    fn missing_name_field_reports_malformed() {
        let dir = unique_dir("noname");
        std::fs::write(dir.join("metadata.json"), br#"{"description": "nameless"}"#)
            .expect("metadata should be written");

        let error = load(&dir).expect_err("load should fail");
        assert!(matches!(error, MetadataError::Malformed(_, _)));

        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }
}
