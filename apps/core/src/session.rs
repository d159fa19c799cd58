use crate::model::ExtensionRecord;

/// Session lifecycle: `Idle -> ListBuilt` on activation, `Filtered`
/// re-entered on every keystroke, back to `Idle` after a launch or on
/// deactivation. The candidate list is built at most once per activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    ListBuilt,
    Filtered,
}

/// Per-activation context the host threads through each event handler.
/// Created on activation, discarded on deactivation; nothing here is
/// global.
#[derive(Debug, Default)]
pub struct QuerySession {
    candidates: Vec<ExtensionRecord>,
    built: bool,
    filtered: bool,
}

impl QuerySession {
    pub fn state(&self) -> SessionState {
        if self.filtered {
            SessionState::Filtered
        } else if self.built {
            SessionState::ListBuilt
        } else {
            SessionState::Idle
        }
    }

    pub fn needs_candidates(&self) -> bool {
        !self.built
    }

    pub fn candidates(&self) -> &[ExtensionRecord] {
        &self.candidates
    }

    pub fn install_candidates(&mut self, candidates: Vec<ExtensionRecord>) {
        self.candidates = candidates;
        self.built = true;
        self.filtered = false;
    }

    pub fn note_filtered(&mut self) {
        self.filtered = true;
    }

    /// Launch is fire-and-forget; the session drops straight back to idle.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.built = false;
        self.filtered = false;
    }
}
