//! Configuration file loading and gateway construction.

use service_selector::config::{load_config, ConfigError};
use service_selector::Gateway;

mod common;

const CONFIG: &str = r#"
[observability]
log_level = "debug"

[flags]
"dynamic-routing.enabled" = true
"dynamic-routing.clouddriver.enabled" = true

[families.clouddriver]
default_url = "http://clouddriver:7002"

[[families.clouddriver.base_urls]]
base_url = "http://clouddriver-deck:7002"
priority = 10
config = { parameters = [ { name = "sourceApp", values = ["deck"] } ] }

[[families.clouddriver.base_urls]]
base_url = "http://clouddriver-orca:7002"
priority = 20
config = { parameters = [ { name = "sourceApp", values = ["deck"] }, { name = "destinationApp", values = ["orca"] } ] }

[[families.clouddriver.base_urls]]
base_url = "http://clouddriver-legacy:7002"
priority = 50
config = {}
"#;

#[test]
fn test_load_and_route_from_file() {
    let path = common::write_temp_config("route", CONFIG);
    let config = load_config(&path).unwrap();
    let gateway = Gateway::from_config(&config).unwrap();

    let route = |source: Option<&str>, dest: Option<&str>| {
        gateway.route("clouddriver", source, dest).unwrap().base_url.to_string()
    };

    assert_eq!(route(Some("deck"), Some("orca")), "http://clouddriver-orca:7002/");
    assert_eq!(route(Some("deck"), Some("front50")), "http://clouddriver-deck:7002/");
    assert_eq!(route(Some("deck"), None), "http://clouddriver-deck:7002/");
    assert_eq!(route(None, Some("orca")), "http://clouddriver:7002/");
    assert_eq!(route(None, None), "http://clouddriver:7002/");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_file_reports_every_problem() {
    let path = common::write_temp_config(
        "invalid",
        r#"
[families.clouddriver]
[[families.clouddriver.base_urls]]
base_url = "nope"

[families.front50]
default_url = "::"
"#,
    );

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation errors, got {:?}", other.map(|_| ())),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("service-selector-does-not-exist.toml");
    assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
}
