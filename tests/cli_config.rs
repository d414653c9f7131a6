//! Config loading and one-shot queries through the CLI module

use std::fs;
use std::path::Path;

use docpager::cli::{execute_query, CliError, Config, ConfigError};
use docpager::schema::SchemaError;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn sample_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "customers.json",
        r#"[{"_id": "c1", "name": "ACME"}, {"_id": "c2", "name": "Globex"}]"#,
    );
    write(
        dir.path(),
        "orders.json",
        r#"[
            {"_id": "o1", "customer": "c1", "total": 120, "createdAt": "2024-01-05T00:00:00.000Z"},
            {"_id": "o2", "customer": "c2", "total": 80, "createdAt": "2024-01-07T00:00:00.000Z"},
            {"_id": "o3", "customer": "c1", "total": 45, "createdAt": "2024-01-06T00:00:00.000Z"}
        ]"#,
    );
    write(
        dir.path(),
        "docpager.json",
        r#"{
            "http": {"port": 8088},
            "logging": {"level": "debug"},
            "collections": [
                {"name": "customers", "collection": "jtCustomer", "seed": "customers.json"},
                {"name": "orders", "collection": "jtOrder", "timestamp_field": "createdAt",
                 "relations": {"customer": "jtCustomer"}, "expand": "customer",
                 "seed": "orders.json"}
            ]
        }"#,
    );
    dir
}

#[test]
fn loads_full_config() {
    let dir = sample_dir();
    let config = Config::load(&dir.path().join("docpager.json")).unwrap();

    assert_eq!(config.http.port, 8088);
    assert_eq!(config.http.host, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.collections.len(), 2);
    assert_eq!(
        config.collections[1].seed.as_deref(),
        Some(dir.path().join("orders.json").as_path())
    );
}

#[tokio::test]
async fn one_shot_query_uses_seeds() {
    let dir = sample_dir();
    let config = Config::load(&dir.path().join("docpager.json")).unwrap();

    let envelope = execute_query(&config, "orders", "total[gte]=50&limit=1")
        .await
        .unwrap();

    // newest first among o1 and o2
    assert_eq!(envelope.count, 1);
    assert_eq!(envelope.data[0]["_id"], "o2");
    assert_eq!(envelope.data[0]["customer"]["name"], "Globex");
    assert!(envelope.pagination.next.is_some());
}

#[tokio::test]
async fn one_shot_query_error() {
    let dir = sample_dir();
    let config = Config::load(&dir.path().join("docpager.json")).unwrap();

    let err = execute_query(&config, "orders", "page=zero").await.unwrap_err();
    assert!(matches!(err, CliError::Results(_)));
}

#[test]
fn rejects_relation_to_unknown_collection() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "docpager.json",
        r#"{"collections": [{"name": "orders", "relations": {"customer": "jtCustomer"}}]}"#,
    );

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Schema(SchemaError::UnknownTarget { .. })
    ));
}

#[test]
fn rejects_undeclared_expansion() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "docpager.json",
        r#"{"collections": [{"name": "orders", "expand": "customer"}]}"#,
    );

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Schema(SchemaError::UndeclaredExpansion { .. })
    ));
}
