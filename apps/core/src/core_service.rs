use crate::config::{validate, Config};
use crate::contract::{CoreRequest, CoreResponse, LaunchResponse, QueryResponse, ResultDto};
use crate::discovery::{self, ExtensionRoots};
use crate::launcher::{GnomeExtensionsLauncher, LaunchError, PrefsLauncher};
use crate::model::ExtensionRecord;
use crate::search::match_query;
use crate::session::QuerySession;
use crate::settings_reader::{GsettingsProvider, SettingsError, SettingsProvider};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Settings(SettingsError),
    Launch(LaunchError),
    ItemNotFound(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Settings(error) => write!(f, "settings error: {error}"),
            Self::Launch(error) => write!(f, "launch error: {error}"),
            Self::ItemNotFound(id) => write!(f, "extension not found: {id}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<SettingsError> for ServiceError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

impl From<LaunchError> for ServiceError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

/// One discrete host callback. The host delivers these serially; there is
/// no overlap and no concurrency inside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A keystroke in the launcher. `None` marks activation, before any
    /// character was typed.
    KeywordQuery { query: Option<String> },
    /// The user picked one result row.
    ItemSelected { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Results(Vec<ExtensionRecord>),
    Launched { id: String },
}

pub struct CoreService {
    config: Config,
    provider: Box<dyn SettingsProvider>,
    launcher: Box<dyn PrefsLauncher>,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        Self::with_collaborators(
            config,
            Box::new(GsettingsProvider::default()),
            Box::new(GnomeExtensionsLauncher::default()),
        )
    }

    pub fn with_collaborators(
        config: Config,
        provider: Box<dyn SettingsProvider>,
        launcher: Box<dyn PrefsLauncher>,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self {
            config,
            provider,
            launcher,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Takes effect on the next candidate-list rebuild, not retroactively.
    pub fn set_only_enabled(&mut self, only_enabled: bool) {
        self.config.only_enabled = only_enabled;
    }

    fn roots(&self) -> ExtensionRoots {
        self.config.roots()
    }

    /// Runs the full discovery pipeline once: settings read, location
    /// classification, prefs.js filter, metadata load.
    pub fn discover(&self) -> Result<Vec<ExtensionRecord>, ServiceError> {
        let include_disabled = !self.config.only_enabled;
        let candidates =
            discovery::build_candidates(self.provider.as_ref(), &self.roots(), include_disabled)?;
        Ok(candidates)
    }

    pub fn handle_event(
        &self,
        session: &mut QuerySession,
        event: HostEvent,
    ) -> Result<EventOutcome, ServiceError> {
        match event {
            HostEvent::KeywordQuery { query } => self.on_keyword_query(session, query),
            HostEvent::ItemSelected { id } => self.on_item_selected(session, &id),
        }
    }

    fn on_keyword_query(
        &self,
        session: &mut QuerySession,
        query: Option<String>,
    ) -> Result<EventOutcome, ServiceError> {
        // Activation (query == None) or a keystroke arriving before the
        // list exists triggers the one build for this session.
        if query.is_none() || session.needs_candidates() {
            session.install_candidates(self.discover()?);
        }

        let query = query.unwrap_or_default();
        let results = match_query(
            session.candidates(),
            &query,
            self.config.max_results as usize,
        );
        session.note_filtered();
        Ok(EventOutcome::Results(results))
    }

    fn on_item_selected(
        &self,
        session: &mut QuerySession,
        id: &str,
    ) -> Result<EventOutcome, ServiceError> {
        // The host may hand us a selection on a fresh session; rebuild
        // rather than trusting a stale list.
        if session.needs_candidates() {
            session.install_candidates(self.discover()?);
        }

        if !session.candidates().iter().any(|record| record.id == id) {
            return Err(ServiceError::ItemNotFound(id.to_string()));
        }

        self.launcher.launch(id)?;
        session.reset();
        Ok(EventOutcome::Launched { id: id.to_string() })
    }

    pub fn handle_command(
        &self,
        session: &mut QuerySession,
        request: CoreRequest,
    ) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Query(query) => {
                let outcome =
                    self.handle_event(session, HostEvent::KeywordQuery { query: query.query })?;
                let results = match outcome {
                    EventOutcome::Results(records) => {
                        records.into_iter().map(ResultDto::from).collect()
                    }
                    EventOutcome::Launched { .. } => Vec::new(),
                };
                Ok(CoreResponse::Query(QueryResponse { results }))
            }
            CoreRequest::Launch(launch) => {
                self.handle_event(session, HostEvent::ItemSelected { id: launch.id })?;
                Ok(CoreResponse::Launch(LaunchResponse { launched: true }))
            }
        }
    }
}
