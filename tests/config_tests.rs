use std::fs;

use carstream::error::{ConfigError, Error};
use carstream::infrastructure::config::backend::{BackendConfig, PublisherKind};
use carstream::infrastructure::config::broker::ProducerKind;
use carstream::infrastructure::config::logging::LogFormat;
use carstream::infrastructure::config::settings::Config;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn loads_full_firestore_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"
format = "json"

[server]
bind = "0.0.0.0:9090"

[feed]
base_url = "http://localhost:3000"
path = "/vehicles.json"
timeout_ms = 2000

[broker]
producer = "log"
delay_ms = 250

[backend]
type = "firestore"
collection = "Cars"
project_id = "car-factory"
topic_id = "car-events"
publisher = "rest"
pubsub_endpoint = "http://localhost:8085"
shutdown_timeout_secs = 5
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.server.bind.port(), 9090);
    assert_eq!(config.feed.path, "/vehicles.json");
    assert_eq!(config.broker.producer, ProducerKind::Log);
    assert_eq!(config.broker.delay_ms, 250);

    let BackendConfig::Firestore(firestore) = &config.backend else {
        panic!("expected firestore backend");
    };
    assert_eq!(firestore.collection, "Cars");
    assert_eq!(firestore.publisher, PublisherKind::Rest);
    assert_eq!(firestore.shutdown_timeout_secs, 5);
}

#[test]
fn rest_publisher_requires_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
type = "firestore"
publisher = "rest"
topic_id = "car-events"
"#,
    );

    let result = Config::load(&path);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField { field: "project_id" }))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[feed\nbase_url = 1");

    let result = Config::load(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn cosmos_uri_overrides_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
type = "cosmos"
uri = "/var/lib/carstream/cars.db"
"#,
    );

    let config = Config::load(&path).unwrap();
    let BackendConfig::Cosmos(cosmos) = &config.backend else {
        panic!("expected cosmos backend");
    };
    assert_eq!(cosmos.database, "CarFactory");
    assert_eq!(cosmos.database_url(), "/var/lib/carstream/cars.db");
}
