use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use shellprefs_core::config::Config;
use shellprefs_core::core_service::CoreService;
use shellprefs_core::launcher::{LaunchError, PrefsLauncher};
use shellprefs_core::session::QuerySession;
use shellprefs_core::settings_reader::StaticSettingsProvider;
use shellprefs_core::transport::handle_json;

struct NoopLauncher;

impl PrefsLauncher for NoopLauncher {
    fn launch(&self, _id: &str) -> Result<(), LaunchError> {
        Ok(())
    }
}

fn fixture_service() -> (CoreService, PathBuf) {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be valid")
        .as_nanos();
    let base = std::env::temp_dir().join(format!("shellprefs-transport-{unique}"));
    let user = base.join("user");
    let dir = user.join("ext-a");
    std::fs::create_dir_all(&dir).expect("extension dir should be created");
    std::fs::write(dir.join("metadata.json"), br#"{"name": "Alpha"}"#)
        .expect("metadata should be written");
    std::fs::write(dir.join("prefs.js"), b"// prefs\n").expect("prefs.js should be written");

    let config = Config {
        user_root: user,
        system_root: base.join("system"),
        ..Default::default()
    };
    let provider = StaticSettingsProvider::from_lists(vec!["ext-a".to_string()], vec![]);
    let service =
        CoreService::with_collaborators(config, Box::new(provider), Box::new(NoopLauncher))
            .expect("service should initialize");
    (service, base)
}

#[test]
fn query_request_round_trips_as_json() {
    let (service, base) = fixture_service();
    let mut session = QuerySession::default();

    let payload = r#"{"kind": "Query", "payload": {"query": null}}"#;
    let raw = handle_json(&service, &mut session, payload);

    assert!(raw.contains(r#""status":"ok""#));
    assert!(raw.contains(r#""name":"Alpha""#));
    assert!(raw.contains(r#""location":"user""#));

    std::fs::remove_dir_all(&base).expect("temp dir should be removed");
}

#[test]
fn launch_request_reports_launched() {
    let (service, base) = fixture_service();
    let mut session = QuerySession::default();

    let payload = r#"{"kind": "Launch", "payload": {"id": "ext-a"}}"#;
    let raw = handle_json(&service, &mut session, payload);

    assert!(raw.contains(r#""status":"ok""#));
    assert!(raw.contains(r#""launched":true"#));

    std::fs::remove_dir_all(&base).expect("temp dir should be removed");
}

#[test]
fn unknown_id_maps_to_item_not_found() {
    let (service, base) = fixture_service();
    let mut session = QuerySession::default();

    let payload = r#"{"kind": "Launch", "payload": {"id": "ghost@nowhere"}}"#;
    let raw = handle_json(&service, &mut session, payload);

    assert!(raw.contains(r#""status":"err""#));
    assert!(raw.contains(r#""code":"item_not_found""#));

    std::fs::remove_dir_all(&base).expect("temp dir should be removed");
}

#[test]
fn invalid_json_maps_to_invalid_json() {
    let (service, base) = fixture_service();
    let mut session = QuerySession::default();

    let raw = handle_json(&service, &mut session, "{not json");

    assert!(raw.contains(r#""status":"err""#));
    assert!(raw.contains(r#""code":"invalid_json""#));

    std::fs::remove_dir_all(&base).expect("temp dir should be removed");
}
