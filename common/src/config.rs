//! Configuration parsing – reads a KEY=VALUE file (`drishti.conf`) and
//! applies environment overrides on top.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Default backend address when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "localhost:3001";

/// Dashboard configuration.
///
/// The backend address is fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ── backend ──────────────────────────────────────────────────────
    /// Normalized backend URL, e.g. `http://localhost:3001` (no trailing slash).
    pub api_base_url: String,

    // ── web server ───────────────────────────────────────────────────
    /// Address the dashboard HTTP server listens on.
    pub listen_addr: String,
    /// Interval of the sidebar auto refresh (seconds).
    pub auto_refresh_secs: u64,

    // ── map ──────────────────────────────────────────────────────────
    /// Key for the static map tile service. Without it the map falls back
    /// to fixture-only rendering.
    pub maps_api_key: Option<String>,
    pub map_center_lat: f64,
    pub map_center_lng: f64,
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(DEFAULT_API_BASE_URL),
            listen_addr: "0.0.0.0:8501".into(),
            auto_refresh_secs: 30,
            maps_api_key: None,
            map_center_lat: 37.7749,
            map_center_lng: -122.4194,
            map_zoom: 13,
        }
    }
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/drishti/drishti.conf"
    }

    /// Apply `DRISHTI_API_BASE_URL`, `DRISHTI_LISTEN_ADDR` and
    /// `GOOGLE_MAPS_API_KEY` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("DRISHTI_API_BASE_URL").filter(|s| !s.trim().is_empty()) {
            self.api_base_url = normalize_base_url(&url);
        }
        if let Some(addr) = lookup("DRISHTI_LISTEN_ADDR").filter(|s| !s.trim().is_empty()) {
            self.listen_addr = addr.trim().to_string();
        }
        if let Some(key) = lookup("GOOGLE_MAPS_API_KEY") {
            self.maps_api_key = non_empty(key);
        }
        self
    }
}

/// Parse a `KEY=VALUE` configuration file.
///
/// Lines starting with `#` are comments.  Values may be optionally
/// double-quoted.  Unknown keys are silently ignored.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let config = from_conf_text(&text);
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Like [`load`], but a missing file yields the defaults.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load(path)
    } else {
        warn!("Config {} not found – using defaults", path.display());
        Ok(Config::default())
    }
}

fn from_conf_text(text: &str) -> Config {
    let map = parse_conf(text);
    let defaults = Config::default();

    let get = |key: &str| -> Option<String> { map.get(key).cloned() };
    let get_f64 = |key: &str, default: f64| -> f64 {
        get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    Config {
        api_base_url: get("API_BASE_URL")
            .filter(|s| !s.is_empty())
            .map(|s| normalize_base_url(&s))
            .unwrap_or(defaults.api_base_url),
        listen_addr: get("LISTEN_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.listen_addr),
        auto_refresh_secs: get("AUTO_REFRESH_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(defaults.auto_refresh_secs),
        maps_api_key: get("GOOGLE_MAPS_API_KEY").and_then(non_empty),
        map_center_lat: get_f64("MAP_CENTER_LAT", defaults.map_center_lat),
        map_center_lng: get_f64("MAP_CENTER_LNG", defaults.map_center_lng),
        map_zoom: get("MAP_ZOOM")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.map_zoom),
    }
}

/// Turn `host:port` or a full URL into `scheme://host:port` without a
/// trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_conf() {
        let text = r#"
# comment
API_BASE_URL="backend:4000"
LISTEN_ADDR=127.0.0.1:9000
GOOGLE_MAPS_API_KEY=
"#;
        let map = parse_conf(text);
        assert_eq!(map["API_BASE_URL"], "backend:4000");
        assert_eq!(map["LISTEN_ADDR"], "127.0.0.1:9000");
        assert_eq!(map["GOOGLE_MAPS_API_KEY"], "");
    }

    #[test]
    fn test_defaults() {
        let config = from_conf_text("");
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.auto_refresh_secs, 30);
        assert_eq!(config.maps_api_key, None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_conf_text() {
        let text = "API_BASE_URL=https://drishti.example/\nMAP_ZOOM=15\nAUTO_REFRESH_SECS=0\nGOOGLE_MAPS_API_KEY=\"  \"\n";
        let config = from_conf_text(text);
        assert_eq!(config.api_base_url, "https://drishti.example");
        assert_eq!(config.map_zoom, 15);
        // zero would mean a refresh loop, keep the default
        assert_eq!(config.auto_refresh_secs, 30);
        assert_eq!(config.maps_api_key, None);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("localhost:3001"), "http://localhost:3001");
        assert_eq!(normalize_base_url("http://10.0.0.2:3001/"), "http://10.0.0.2:3001");
        assert_eq!(normalize_base_url(" https://api.local "), "https://api.local");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("DRISHTI_API_BASE_URL", "10.1.1.1:3001"),
            ("GOOGLE_MAPS_API_KEY", "abc123"),
        ]
        .into();
        let config = Config::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "http://10.1.1.1:3001");
        assert_eq!(config.maps_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.listen_addr, "0.0.0.0:8501");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = PathBuf::from("/nonexistent/drishti/drishti.conf");
        assert_eq!(load_or_default(&path).unwrap(), Config::default());
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load() {
        let path = tempfile("LISTEN_ADDR=0.0.0.0:9999\n");
        let config = load(&path).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9999");
    }

    fn tempfile(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("drishti_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.conf");
        std::fs::write(&path, content).unwrap();
        path
    }
}
