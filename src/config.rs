use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 25;
pub const DEFAULT_SESSION_HOURS: u64 = 24;
/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_HOURS: u64 = 24 * 365;

const BYTES_PER_MB: usize = 1024 * 1024;
const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Server settings. These configure the web server only; the dashboard content always comes
/// from the uploaded workbook.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Address the server binds to
    pub addr: String,

    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// How long an uploaded workbook stays available to its session
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            addr: DEFAULT_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * BYTES_PER_MB,
            static_dir: PathBuf::from("static"),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_HOURS * SECONDS_PER_HOUR),
        }
    }
}

impl Config {
    /// Reads `CXO_DASHBOARD_ADDR`, `CXO_DASHBOARD_MAX_UPLOAD_MB`, `CXO_DASHBOARD_STATIC_DIR` and
    /// `CXO_DASHBOARD_SESSION_HOURS`, then lets the first positional argument override the
    /// address. Zero, unparsable, overflowing or out-of-range values are ignored.
    pub fn from_env_and_args(args: &[String]) -> Self {
        Self::from_lookup(|key| env::var(key).ok(), args)
    }

    /// Same as [`Config::from_env_and_args`] with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F, args: &[String]) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(addr) = lookup("CXO_DASHBOARD_ADDR").filter(|a| !a.trim().is_empty()) {
            config.addr = addr.trim().to_string();
        }
        if let Some(bytes) = lookup("CXO_DASHBOARD_MAX_UPLOAD_MB")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|mb| *mb > 0)
            .and_then(|mb| mb.checked_mul(BYTES_PER_MB))
        {
            config.max_upload_bytes = bytes;
        }
        if let Some(hours) = lookup("CXO_DASHBOARD_SESSION_HOURS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|hours| (1..=MAX_SESSION_HOURS).contains(hours))
        {
            config.session_ttl = Duration::from_secs(hours * SECONDS_PER_HOUR);
        }
        if let Some(dir) = lookup("CXO_DASHBOARD_STATIC_DIR").filter(|d| !d.trim().is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }

        // args[0] is the program name
        if let Some(addr) = args.get(1) {
            config.addr = addr.clone();
        }

        config
    }
}
