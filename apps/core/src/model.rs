/// Which of the two extension roots an identifier was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionLocation {
    User,
    System,
}

impl ExtensionLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

/// One launchable candidate: an installed extension with a preferences UI.
/// Immutable once built; the candidate list is rebuilt per session instead
/// of mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRecord {
    pub id: String,
    pub location: ExtensionLocation,
    pub name: String,
    pub description: String,
    normalized_name: String,
}

impl ExtensionRecord {
    pub fn new(
        id: impl Into<String>,
        location: ExtensionLocation,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let normalized_name = normalize_for_match(&name);
        Self {
            id: id.into(),
            location,
            name,
            description: description.into(),
            normalized_name,
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// Matching is a plain case-insensitive substring check, so normalization
/// is Unicode lowercasing and nothing more.
pub fn normalize_for_match(input: &str) -> String {
    input.chars().flat_map(|c| c.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_for_match, ExtensionLocation, ExtensionRecord};

    #[test]
    fn record_precomputes_normalized_name() {
        let record = ExtensionRecord::new(
            "dash-to-dock@micxgx.gmail.com",
            ExtensionLocation::User,
            "Dash to Dock",
            "A dock for the GNOME Shell",
        );
        assert_eq!(record.normalized_name(), "dash to dock");
    }

    #[test]
    fn normalization_keeps_punctuation() {
        assert_eq!(normalize_for_match("Caffeine (Fork)"), "caffeine (fork)");
    }

    #[test]
    fn location_labels_are_stable() {
        assert_eq!(ExtensionLocation::User.as_str(), "user");
        assert_eq!(ExtensionLocation::System.as_str(), "system");
    }
}
