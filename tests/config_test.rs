use cxo_dashboard::config::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_without_environment() {
    let config = Config::from_lookup(lookup(&[]), &["cxo-dashboard".to_string()]);
    assert_eq!(config, Config::default());
    assert_eq!(config.addr, "127.0.0.1:3000");
    assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
}

#[test]
fn environment_overrides_defaults() {
    let config = Config::from_lookup(
        lookup(&[
            ("CXO_DASHBOARD_ADDR", "0.0.0.0:8080"),
            ("CXO_DASHBOARD_MAX_UPLOAD_MB", "5"),
            ("CXO_DASHBOARD_STATIC_DIR", "/srv/static"),
        ]),
        &[],
    );
    assert_eq!(config.addr, "0.0.0.0:8080");
    assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
}

#[test]
fn argument_beats_environment_and_bad_sizes_are_ignored() {
    let config = Config::from_lookup(
        lookup(&[
            ("CXO_DASHBOARD_ADDR", "0.0.0.0:8080"),
            ("CXO_DASHBOARD_MAX_UPLOAD_MB", "lots"),
        ]),
        &["cxo-dashboard".to_string(), "127.0.0.1:9000".to_string()],
    );
    assert_eq!(config.addr, "127.0.0.1:9000");
    assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
}

#[test]
fn overflowing_upload_size_is_ignored() {
    let config = Config::from_lookup(
        lookup(&[("CXO_DASHBOARD_MAX_UPLOAD_MB", "18446744073709551615")]),
        &[],
    );
    assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);

    let config = Config::from_lookup(lookup(&[("CXO_DASHBOARD_MAX_UPLOAD_MB", "0")]), &[]);
    assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
}

#[test]
fn session_lifetime_from_environment() {
    assert_eq!(Config::default().session_ttl, Duration::from_secs(24 * 3600));

    let config = Config::from_lookup(lookup(&[("CXO_DASHBOARD_SESSION_HOURS", "2")]), &[]);
    assert_eq!(config.session_ttl, Duration::from_secs(2 * 3600));

    for bad in ["0", "-1", "soon", "18446744073709551615"] {
        let config = Config::from_lookup(lookup(&[("CXO_DASHBOARD_SESSION_HOURS", bad)]), &[]);
        assert_eq!(config.session_ttl, Duration::from_secs(24 * 3600));
    }
}
