use std::io::BufRead;
use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, EventOutcome, HostEvent, ServiceError};
use crate::logging;
use crate::model::ExtensionRecord;
use crate::session::QuerySession;
use crate::transport;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print every candidate (the activation view).
    List,
    /// One-shot query against a fresh session.
    Query(String),
    /// Spawn the preferences UI for one extension id.
    Launch(String),
    /// Serve JSON requests, one per stdin line.
    Serve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub only_enabled: Option<bool>,
    pub command: CliCommand,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut config_path = None;
    let mut only_enabled = None;
    let mut command = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--all" => only_enabled = Some(false),
            "--only-enabled" => only_enabled = Some(true),
            "list" => set_command(&mut command, CliCommand::List)?,
            "query" => {
                let text = iter
                    .next()
                    .ok_or_else(|| "query requires text".to_string())?;
                set_command(&mut command, CliCommand::Query(text.clone()))?;
            }
            "launch" => {
                let id = iter
                    .next()
                    .ok_or_else(|| "launch requires an extension id".to_string())?;
                set_command(&mut command, CliCommand::Launch(id.clone()))?;
            }
            "serve" => set_command(&mut command, CliCommand::Serve)?,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(CliOptions {
        config_path,
        only_enabled,
        command: command.unwrap_or(CliCommand::List),
    })
}

fn set_command(slot: &mut Option<CliCommand>, command: CliCommand) -> Result<(), String> {
    if slot.is_some() {
        return Err("only one command may be given".to_string());
    }
    *slot = Some(command);
    Ok(())
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(only_enabled) = options.only_enabled {
        config.only_enabled = only_enabled;
    }

    if let Err(error) = logging::init() {
        eprintln!("[shellprefs-core] logging unavailable: {error}");
    }
    logging::info(&format!(
        "startup only_enabled={} max_results={} config_path={}",
        config.only_enabled,
        config.max_results,
        config.config_path.display()
    ));

    let service = CoreService::new(config)?;
    let mut session = QuerySession::default();

    match options.command {
        CliCommand::List => {
            let outcome =
                service.handle_event(&mut session, HostEvent::KeywordQuery { query: None })?;
            print_results(&outcome);
        }
        CliCommand::Query(text) => {
            service.handle_event(&mut session, HostEvent::KeywordQuery { query: None })?;
            let outcome = service.handle_event(
                &mut session,
                HostEvent::KeywordQuery { query: Some(text) },
            )?;
            print_results(&outcome);
        }
        CliCommand::Launch(id) => {
            let outcome =
                service.handle_event(&mut session, HostEvent::ItemSelected { id })?;
            if let EventOutcome::Launched { id } = outcome {
                println!("[shellprefs-core] launched preferences for {id}");
            }
        }
        CliCommand::Serve => {
            serve(&service, &mut session)?;
        }
    }

    Ok(())
}

fn serve(service: &CoreService, session: &mut QuerySession) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", transport::handle_json(service, session, &line));
    }
    Ok(())
}

fn print_results(outcome: &EventOutcome) {
    let EventOutcome::Results(results) = outcome else {
        return;
    };

    if results.is_empty() {
        println!("[shellprefs-core] no extensions with preferences matched");
        return;
    }
    for record in results {
        print_row(record);
    }
}

fn print_row(record: &ExtensionRecord) {
    println!(
        "{:<6} {:<40} {}",
        record.location.as_str(),
        record.name,
        record.id
    );
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_args, CliCommand};

    #[test]
    fn defaults_to_list() {
        let options = parse_cli_args(&[]).unwrap();
        assert_eq!(options.command, CliCommand::List);
        assert!(options.config_path.is_none());
        assert!(options.only_enabled.is_none());
    }

    #[test]
    fn parses_query_with_flags() {
        let args: Vec<String> = ["--all", "query", "dash"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_cli_args(&args).unwrap();
        assert_eq!(options.command, CliCommand::Query("dash".to_string()));
        assert_eq!(options.only_enabled, Some(false));
    }

    #[test]
    fn parses_launch_and_config_path() {
        let args: Vec<String> = ["--config", "/tmp/shellprefs.toml", "launch", "ext-a@x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_cli_args(&args).unwrap();
        assert_eq!(options.command, CliCommand::Launch("ext-a@x".to_string()));
        assert_eq!(
            options.config_path.as_deref(),
            Some(std::path::Path::new("/tmp/shellprefs.toml"))
        );
    }

    #[test]
    fn rejects_two_commands() {
        let args: Vec<String> = ["list", "serve"].iter().map(|s| s.to_string()).collect();
        assert!(parse_cli_args(&args).is_err());
    }

    #[test]
    fn rejects_unknown_argument() {
        let args = vec!["--frobnicate".to_string()];
        assert!(parse_cli_args(&args).is_err());
    }
}
