use super::*;

// =============================================================================
// resolve — relative paths against the base URL
// =============================================================================

#[test]
fn resolve_joins_relative_path() {
    let config = ClientConfig::with_base_url("http://localhost:8080/api/v1");
    assert_eq!(config.resolve("/mascot"), "http://localhost:8080/api/v1/mascot");
}

#[test]
fn resolve_trims_trailing_slash_on_base() {
    let config = ClientConfig::with_base_url("http://localhost:8080/api/v1/");
    assert_eq!(config.resolve("/mascot"), "http://localhost:8080/api/v1/mascot");
}

#[test]
fn resolve_inserts_slash_when_path_lacks_one() {
    let config = ClientConfig::with_base_url("http://localhost:8080/api/v1");
    assert_eq!(config.resolve("mascot"), "http://localhost:8080/api/v1/mascot");
}

#[test]
fn resolve_passes_absolute_http_url_through() {
    let config = ClientConfig::with_base_url("http://localhost:8080/api/v1");
    assert_eq!(config.resolve("http://example.com/x"), "http://example.com/x");
}

#[test]
fn resolve_passes_absolute_https_url_through() {
    let config = ClientConfig::with_base_url("http://localhost:8080/api/v1");
    assert_eq!(config.resolve("https://example.com/x"), "https://example.com/x");
}

// =============================================================================
// defaults — from_env shares the fixed env var with parallel tests, so only
// the default path is covered here.
// =============================================================================

#[test]
fn default_config_points_at_local_backend() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.max_auth_retries, 1);
}
