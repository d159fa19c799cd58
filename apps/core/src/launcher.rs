use std::fmt::{Display, Formatter};
use std::process::{Command, Stdio};

#[derive(Debug)]
pub enum LaunchError {
    EmptyId,
    Spawn(String, std::io::Error),
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "empty extension id"),
            Self::Spawn(program, error) => write!(f, "failed to spawn {program}: {error}"),
        }
    }
}

impl std::error::Error for LaunchError {}

/// Fire-and-forget launch of the preferences UI for one extension.
pub trait PrefsLauncher: Send + Sync {
    fn launch(&self, id: &str) -> Result<(), LaunchError>;
}

/// Real launcher: `gnome-extensions prefs <id>`, detached.
pub struct GnomeExtensionsLauncher {
    program: String,
}

impl Default for GnomeExtensionsLauncher {
    fn default() -> Self {
        Self {
            program: "gnome-extensions".to_string(),
        }
    }
}

impl GnomeExtensionsLauncher {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PrefsLauncher for GnomeExtensionsLauncher {
    fn launch(&self, id: &str) -> Result<(), LaunchError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(LaunchError::EmptyId);
        }

        let child = Command::new(&self.program)
            .arg("prefs")
            .arg(trimmed)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|error| LaunchError::Spawn(self.program.clone(), error))?;

        // Detach: the preferences window outlives this process and is
        // never awaited, inspected, or retried.
        drop(child);
        Ok(())
    }
}
