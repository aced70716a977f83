use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;

/// Reference zone of the station (Valls, Catalonia)
const DEFAULT_TIMEZONE: &str = "Europe/Madrid";
const DEFAULT_LATITUDE: f64 = 41.29;
const DEFAULT_GDD_BASE_C: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub timezone: Option<String>,
    /// Zone used for same-day chart filtering; defaults to `timezone`.
    /// Kept separate on purpose: unifying the two would change which
    /// samples land in "today" around DST edges.
    pub display_timezone: Option<String>,
    pub latitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub history_path: Option<PathBuf>,
    pub summaries_path: Option<PathBuf>,
    pub gdd_base_c: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub station: Option<StationConfig>,
    pub summary: Option<SummaryConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),
}

impl AppConfig {
    /// Load configuration from METEO_CONFIG path (TOML) if present, with
    /// reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("METEO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let cfg = if Path::new(&path).exists() {
            let s = fs::read_to_string(&path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    fn parse_tz(name: &str) -> Result<Tz, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
    }

    /// Reference zone for day keys and daily summaries
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        let name = self
            .station
            .as_ref()
            .and_then(|s| s.timezone.as_deref())
            .unwrap_or(DEFAULT_TIMEZONE);
        Self::parse_tz(name)
    }

    /// Display zone for same-day chart filtering
    pub fn display_timezone(&self) -> Result<Tz, ConfigError> {
        match self.station.as_ref().and_then(|s| s.display_timezone.as_deref()) {
            Some(name) => Self::parse_tz(name),
            None => self.timezone(),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.station
            .as_ref()
            .and_then(|s| s.latitude)
            .unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn gdd_base_c(&self) -> f64 {
        self.summary
            .as_ref()
            .and_then(|s| s.gdd_base_c)
            .unwrap_or(DEFAULT_GDD_BASE_C)
    }

    pub fn history_path(&self) -> PathBuf {
        self.summary
            .as_ref()
            .and_then(|s| s.history_path.clone())
            .unwrap_or_else(|| PathBuf::from("data/history.json"))
    }

    pub fn summaries_path(&self) -> PathBuf {
        self.summary
            .as_ref()
            .and_then(|s| s.summaries_path.clone())
            .unwrap_or_else(|| PathBuf::from("data/daily-summaries.json"))
    }
}
