//! Watcher configuration.
//!
//! Loaded from a TOML file (default `config.toml`) layered over built-in
//! defaults. Any leaf value can then be overridden from the environment with
//! its upper-cased, `__`-joined key path, e.g. `API__PASSWORD` or
//! `REFRESH_TIME__MAX`. The result is validated before the watcher starts.

mod env;
mod error;

use std::path::{Path, PathBuf};
use serde::Deserialize;
use toml::Table;

use crate::domain::StationCode;

pub use error::ConfigError;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Built-in defaults. Empty strings mark required values.
const DEFAULTS: &str = r#"
[api]
base_url = "https://api.transilien.com"
user = ""
password = ""
date_format = "%d/%m/%Y %H:%M"
encoding = "utf-8"
timeout_secs = 30

[stations]
departure = ""
arrival = ""

[refresh_time]
default = 30
step = 10
max = 120

[device]
type = "console"

[device.lcd]
columns = 16
rows = 2
path = "/dev/lcd"
"#;

/// Complete, validated watcher configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schedule API access
    pub api: ApiConfig,
    /// Stations to watch
    pub stations: StationsConfig,
    /// Polling interval bounds
    pub refresh_time: RefreshConfig,
    /// Output device selection
    pub device: DeviceConfig,
}

/// Schedule API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, without trailing path
    pub base_url: String,
    /// Basic-auth user name
    pub user: String,
    /// Basic-auth password
    pub password: String,
    /// `chrono` format of the scheduled times in the feed
    pub date_format: String,
    /// Text encoding label of the response body (e.g. "utf-8", "iso-8859-1")
    pub encoding: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Stations to watch.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawStations")]
pub struct StationsConfig {
    /// Station the trains leave from
    pub departure: StationCode,
    /// Optional destination filter
    pub arrival: Option<StationCode>,
}

#[derive(Deserialize)]
struct RawStations {
    departure: String,
    arrival: String,
}

impl TryFrom<RawStations> for StationsConfig {
    type Error = String;

    fn try_from(raw: RawStations) -> Result<Self, Self::Error> {
        let departure = StationCode::parse(raw.departure.trim())
            .map_err(|e| format!("stations.departure: {e}"))?;

        let arrival = match raw.arrival.trim() {
            "" => None,
            code => Some(StationCode::parse(code).map_err(|e| format!("stations.arrival: {e}"))?),
        };

        Ok(Self { departure, arrival })
    }
}

/// Polling interval bounds, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RefreshConfig {
    /// Interval after a successful cycle, and the floor
    pub default: u64,
    /// Increment applied after each failed cycle
    pub step: u64,
    /// Ceiling for the interval
    pub max: u64,
}

impl RefreshConfig {
    /// Create a new refresh configuration.
    pub fn new(default: u64, step: u64, max: u64) -> Self {
        Self { default, step, max }
    }
}

/// Output device settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Device type tag, resolved by [`crate::display::Display::select`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Character display geometry, used when `kind` is `"lcd"`
    pub lcd: LcdConfig,
}

/// Character display settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LcdConfig {
    /// Characters per row
    pub columns: u16,
    /// Number of rows
    pub rows: u16,
    /// Character device the display is attached to
    pub path: PathBuf,
}

impl Config {
    /// Load the configuration from `path`, with overrides from the process
    /// environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load the configuration from `path`, resolving overrides through `lookup`.
    pub fn load_with_env<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents, lookup)
    }

    /// Build a configuration from TOML text, resolving overrides through `lookup`.
    pub fn from_toml_str<F>(contents: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut table: Table = DEFAULTS.parse()?;
        let file: Table = contents.parse()?;

        env::merge(&mut table, file);
        env::apply_overrides(&mut table, &lookup)?;

        let config: Config = toml::Value::Table(table).try_into()?;
        config.validate()?;

        Ok(config)
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.api.user.is_empty() {
            return invalid("api.user must not be empty");
        }
        if self.api.password.is_empty() {
            return invalid("api.password must not be empty");
        }
        if self.api.date_format.is_empty() {
            return invalid("api.date_format must not be empty");
        }
        if encoding_rs::Encoding::for_label(self.api.encoding.as_bytes()).is_none() {
            return Err(ConfigError::Invalid(format!(
                "api.encoding {:?} is not a known text encoding",
                self.api.encoding
            )));
        }
        if self.api.timeout_secs == 0 {
            return invalid("api.timeout_secs must be greater than 0");
        }

        let refresh = &self.refresh_time;
        if refresh.default == 0 {
            return invalid("refresh_time.default must be greater than 0");
        }
        if refresh.default > refresh.max {
            return Err(ConfigError::Invalid(format!(
                "refresh_time.default ({}) must not exceed refresh_time.max ({})",
                refresh.default, refresh.max
            )));
        }

        if self.device.lcd.columns == 0 || self.device.lcd.rows == 0 {
            return invalid("device.lcd.columns and device.lcd.rows must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
[api]
user = "user"
password = "password"

[stations]
departure = "87393009"
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn invalid_message(result: Result<Config, ConfigError>) -> String {
        match result {
            Err(ConfigError::Invalid(msg)) => msg,
            Err(other) => panic!("expected Invalid, got {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn defaults_fill_missing_values() {
        let config = Config::from_toml_str(MINIMAL, no_env).unwrap();

        assert_eq!(config.api.base_url, "https://api.transilien.com");
        assert_eq!(config.api.date_format, "%d/%m/%Y %H:%M");
        assert_eq!(config.api.encoding, "utf-8");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.stations.departure.as_str(), "87393009");
        assert!(config.stations.arrival.is_none());
        assert_eq!(config.refresh_time, RefreshConfig::new(30, 10, 120));
        assert_eq!(config.device.kind, "console");
        assert_eq!(config.device.lcd.columns, 16);
        assert_eq!(config.device.lcd.rows, 2);
        assert_eq!(config.device.lcd.path, PathBuf::from("/dev/lcd"));
    }

    #[test]
    fn file_values_win_over_defaults() {
        let toml = format!(
            "{MINIMAL}\n[refresh_time]\ndefault = 10\nmax = 30\n\n[device]\ntype = \"lcd\"\n\n[device.lcd]\ncolumns = 20\n"
        );
        let config = Config::from_toml_str(&toml, no_env).unwrap();

        assert_eq!(config.refresh_time, RefreshConfig::new(10, 10, 30));
        assert_eq!(config.device.kind, "lcd");
        assert_eq!(config.device.lcd.columns, 20);
        assert_eq!(config.device.lcd.rows, 2);
    }

    #[test]
    fn arrival_station_is_optional() {
        let toml = MINIMAL.replace(
            "departure = \"87393009\"",
            "departure = \"87393009\"\narrival = \"87384008\"",
        );
        let config = Config::from_toml_str(&toml, no_env).unwrap();
        assert_eq!(
            config.stations.arrival.map(|c| c.to_string()),
            Some("87384008".to_string())
        );
    }

    #[test]
    fn environment_overrides_leaves() {
        let env = env_from(&[
            ("API__PASSWORD", "from-env"),
            ("REFRESH_TIME__MAX", "300"),
            ("DEVICE__LCD__ROWS", "4"),
            ("STATIONS__ARRIVAL", "87384008"),
        ]);
        let config = Config::from_toml_str(MINIMAL, env).unwrap();

        assert_eq!(config.api.password, "from-env");
        assert_eq!(config.refresh_time.max, 300);
        assert_eq!(config.device.lcd.rows, 4);
        assert!(config.stations.arrival.is_some());
    }

    #[test]
    fn environment_supplies_required_values() {
        let toml = "[stations]\ndeparture = \"87393009\"\n";
        let env = env_from(&[("API__USER", "u"), ("API__PASSWORD", "p")]);
        let config = Config::from_toml_str(toml, env).unwrap();

        assert_eq!(config.api.user, "u");
        assert_eq!(config.api.password, "p");
    }

    #[test]
    fn malformed_override_is_rejected() {
        let env = env_from(&[("REFRESH_TIME__STEP", "ten")]);
        let result = Config::from_toml_str(MINIMAL, env);
        assert!(matches!(result, Err(ConfigError::Override { .. })));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let toml = "[stations]\ndeparture = \"87393009\"\n";
        let msg = invalid_message(Config::from_toml_str(toml, no_env));
        assert!(msg.contains("api.user"));
    }

    #[test]
    fn empty_password_is_rejected() {
        let toml = MINIMAL.replace("password = \"password\"", "password = \"\"");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("api.password"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let toml = MINIMAL.replace("password = \"password\"", "password = \"password\"\ntimeout_secs = 0");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("api.timeout_secs"));
    }

    #[test]
    fn empty_date_format_is_rejected() {
        let toml = MINIMAL.replace("password = \"password\"", "password = \"password\"\ndate_format = \"\"");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("api.date_format"));
    }

    #[test]
    fn bad_station_code_is_rejected() {
        let toml = MINIMAL.replace("87393009", "8739");
        let err = Config::from_toml_str(&toml, no_env).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("stations.departure"));
    }

    #[test]
    fn missing_departure_is_rejected() {
        let toml = "[api]\nuser = \"u\"\npassword = \"p\"\n";
        let err = Config::from_toml_str(toml, no_env).unwrap_err();
        assert!(err.to_string().contains("stations.departure"));
    }

    #[test]
    fn default_above_max_is_rejected() {
        let toml = format!("{MINIMAL}\n[refresh_time]\ndefault = 60\nmax = 30\n");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("must not exceed"));
    }

    #[test]
    fn zero_default_interval_is_rejected() {
        let toml = format!("{MINIMAL}\n[refresh_time]\ndefault = 0\n");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("refresh_time.default"));
    }

    #[test]
    fn negative_interval_is_a_type_error() {
        let toml = format!("{MINIMAL}\n[refresh_time]\nstep = -5\n");
        let result = Config::from_toml_str(&toml, no_env);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let toml = MINIMAL.replace("password = \"password\"", "password = \"password\"\nencoding = \"klingon\"");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("klingon"));
    }

    #[test]
    fn zero_lcd_geometry_is_rejected() {
        let toml = format!("{MINIMAL}\n[device.lcd]\ncolumns = 0\n");
        let msg = invalid_message(Config::from_toml_str(&toml, no_env));
        assert!(msg.contains("device.lcd"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let result = Config::from_toml_str("[api\nuser = ", no_env);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = Config::load_with_env(&path, no_env).unwrap();
        assert_eq!(config.api.user, "user");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = Config::load_with_env(&path, no_env);
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let dir = tempdir().unwrap();

        let result = Config::load_with_env(dir.path(), no_env);
        assert!(matches!(result, Err(ConfigError::Read { path, .. }) if path == dir.path()));
    }
}
