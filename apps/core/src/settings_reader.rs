use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::process::Command;

pub const SHELL_SCHEMA: &str = "org.gnome.shell";
pub const ENABLED_KEY: &str = "enabled-extensions";
pub const DISABLED_KEY: &str = "disabled-extensions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings store could not be opened or queried. Surfaced to the
    /// caller, never retried.
    Unavailable(String),
    /// The store answered with output we could not parse as a string list.
    Malformed(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "settings store unavailable: {message}"),
            Self::Malformed(message) => write!(f, "settings value malformed: {message}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Read-only view of the host's named list-valued settings.
pub trait SettingsProvider: Send + Sync {
    fn read_list(&self, key: &str) -> Result<Vec<String>, SettingsError>;
}

/// Real provider: shells out to `gsettings get <schema> <key>` and parses
/// the GVariant `as` literal it prints.
pub struct GsettingsProvider {
    schema: String,
}

impl Default for GsettingsProvider {
    fn default() -> Self {
        Self {
            schema: SHELL_SCHEMA.to_string(),
        }
    }
}

impl GsettingsProvider {
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }
}

impl SettingsProvider for GsettingsProvider {
    fn read_list(&self, key: &str) -> Result<Vec<String>, SettingsError> {
        let output = Command::new("gsettings")
            .arg("get")
            .arg(&self.schema)
            .arg(key)
            .output()
            .map_err(|error| SettingsError::Unavailable(format!("gsettings: {error}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SettingsError::Unavailable(format!(
                "gsettings get {} {} failed: {}",
                self.schema,
                key,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_string_array(&stdout)
    }
}

/// In-memory provider for tests and fixtures.
pub struct StaticSettingsProvider {
    lists: HashMap<String, Vec<String>>,
}

impl StaticSettingsProvider {
    pub fn from_lists(enabled: Vec<String>, disabled: Vec<String>) -> Self {
        let mut lists = HashMap::new();
        lists.insert(ENABLED_KEY.to_string(), enabled);
        lists.insert(DISABLED_KEY.to_string(), disabled);
        Self { lists }
    }

    pub fn deterministic_fixture() -> Self {
        Self::from_lists(
            vec![
                "dash-to-dock@micxgx.gmail.com".to_string(),
                "caffeine@patapon.info".to_string(),
            ],
            vec!["apps-menu@gnome-shell-extensions.gcampax.github.com".to_string()],
        )
    }
}

impl SettingsProvider for StaticSettingsProvider {
    fn read_list(&self, key: &str) -> Result<Vec<String>, SettingsError> {
        self.lists
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::Unavailable(format!("no such key: {key}")))
    }
}

/// Reads the enabled list, then the disabled list when asked. Order is
/// preserved; an identifier present in both lists keeps its first slot.
pub fn read_extension_ids(
    provider: &dyn SettingsProvider,
    include_disabled: bool,
) -> Result<Vec<String>, SettingsError> {
    let mut ids = provider.read_list(ENABLED_KEY)?;
    if include_disabled {
        ids.extend(provider.read_list(DISABLED_KEY)?);
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(ids.len());
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.clone()) {
            unique.push(id);
        }
    }

    Ok(unique)
}

/// Parses a GVariant `as` literal, e.g. `['a', 'b']` or the typed empty
/// form `@as []`. Strings may be single- or double-quoted with backslash
/// escapes.
pub fn parse_string_array(raw: &str) -> Result<Vec<String>, SettingsError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("@as").map(str::trim_start).unwrap_or(trimmed);

    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| SettingsError::Malformed(format!("expected a list, got: {trimmed}")))?;

    let mut items = Vec::new();
    let mut chars = inner.chars();
    loop {
        let quote = match chars.find(|c| !c.is_whitespace() && *c != ',') {
            None => break,
            Some(c @ ('\'' | '"')) => c,
            Some(other) => {
                return Err(SettingsError::Malformed(format!(
                    "expected a quoted string, got character: {other}"
                )))
            }
        };

        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                }
                continue;
            }
            if c == quote {
                closed = true;
                break;
            }
            value.push(c);
        }

        if !closed {
            return Err(SettingsError::Malformed(
                "unterminated string in list".to_string(),
            ));
        }
        items.push(value);
    }

    Ok(items)
}
