//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use etims_infra::config;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "http": { "timeout_secs": 12 },
        "defaults": { "company": "Acme", "branch_id": "01" },
        "routes": [
            { "key": "ItemSearchReq", "path": "/api/items/", "label": "Item Search" }
        ],
        "credentials": [
            {
                "company": "Acme",
                "branch_id": "01",
                "server_url": "https://etims.example",
                "access_token": "abc",
                "token_expiry": "2030-01-01T00:00:00Z",
                "workstation": "WS-1"
            }
        ]
    }"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file: {:?}", result.err());

    let config = result.unwrap();
    assert_eq!(config.http.timeout_secs, 12);
    assert_eq!(config.defaults.company.as_deref(), Some("Acme"));
    assert_eq!(config.defaults.branch_id, "01");
    assert_eq!(config.routes.len(), 1);
    assert_eq!(config.routes[0].display_label(), "Item Search");

    let credential = &config.credentials[0];
    assert!(credential.is_active);
    assert!(credential.has_token());
    assert_eq!(credential.workstation.as_deref(), Some("WS-1"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[http]
timeout_secs = 8

[defaults]
company = "Acme"

[[routes]]
key = "TaxSearchReq"
path = "/api/taxes/"

[[routes]]
key = "CustomerSearchReq"
path = "/api/customers/{pin}/"
label = "Customer Search"

[[credentials]]
company = "Acme"
server_url = "https://etims.example"
auth_server_url = "https://auth.example"
client_id = "client"
client_secret = "secret"
username = "user"
password = "pass"
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");

    assert_eq!(config.http.timeout_secs, 8);
    assert_eq!(config.defaults.branch_id, "00");
    assert_eq!(config.routes[1].path_template, "/api/customers/{pin}/");

    let credential = &config.credentials[0];
    assert_eq!(credential.branch_id, "00");
    assert!(!credential.has_token());
    assert!(credential.can_refresh());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_invalid_toml() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(b"[[routes]\nkey = ").expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "Should fail with invalid TOML");

    std::fs::remove_file(path).ok();
}
