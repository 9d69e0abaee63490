use std::collections::HashMap;

use super::*;

fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn from_lookup_applies_defaults() {
    let cfg = config(&[("API_BASE_URL", "https://api.example.test/")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(
        cfg.timeouts,
        UpstreamTimeouts { request_secs: DEFAULT_API_TIMEOUT_SECS, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = config(&[
        ("PORT", "8080"),
        ("API_BASE_URL", "http://localhost:5000"),
        ("API_TIMEOUT_SECS", "5"),
        ("API_CONNECT_TIMEOUT_SECS", "2"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_base_url, "http://localhost:5000");
    assert_eq!(cfg.timeouts, UpstreamTimeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn from_lookup_requires_base_url() {
    assert!(matches!(config(&[]), Err(ConfigError::Missing { var: "API_BASE_URL" })));
    assert!(matches!(config(&[("API_BASE_URL", "  ")]), Err(ConfigError::Missing { .. })));
}

#[test]
fn from_lookup_rejects_bad_port_and_scheme() {
    let err = config(&[("API_BASE_URL", "http://localhost:5000"), ("PORT", "seventy")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    let err = config(&[("API_BASE_URL", "localhost:5000")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "API_BASE_URL", .. }));
}

#[test]
fn unparsable_timeouts_fall_back_to_defaults() {
    let cfg = config(&[("API_BASE_URL", "http://localhost:5000"), ("API_TIMEOUT_SECS", "soon")]).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_API_TIMEOUT_SECS);
}

#[test]
fn normalize_base_url_requires_http_scheme() {
    assert_eq!(normalize_base_url(" https://x.test// "), Some("https://x.test".to_owned()));
    assert_eq!(normalize_base_url("ftp://x.test"), None);
    assert_eq!(normalize_base_url("https://"), None);
    assert_eq!(normalize_base_url("x.test"), None);
}
