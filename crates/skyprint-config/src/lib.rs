use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct SkyprintSettings {
    pub log_level: String,
    pub backend: BackendSettings,
    pub transits: TransitSettings,
    pub alerts: AlertSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransitSettings {
    pub window_days: u32,
    pub default_tz: String,
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            window_days: 7,
            default_tz: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub interval_secs: u64,
    /// Orb in degrees below which a transit dated today triggers an alert
    pub near_exact_orb: f64,
}

impl AlertSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            interval_secs: 60 * 60,
            near_exact_orb: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    backend: BackendSettings,
    #[serde(default)]
    transits: TransitSettings,
    #[serde(default)]
    alerts: AlertSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SkyprintSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            backend: BackendSettings::default(),
            transits: TransitSettings::default(),
            alerts: AlertSettings::default(),
        }
    }
}

/// Try the usual relative locations of `configs/skyprint.toml`.
pub fn read_config_toml_text() -> anyhow::Result<Option<String>> {
    let paths = ["configs/skyprint.toml", "../../configs/skyprint.toml"];
    for p in &paths {
        if Path::new(p).exists() {
            let text = fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p))?;
            return Ok(Some(text));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<SkyprintSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse skyprint config: {e}"))?;
    let settings = SkyprintSettings {
        log_level: root.log_level,
        backend: root.backend,
        transits: root.transits,
        alerts: root.alerts,
    };
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &SkyprintSettings) -> anyhow::Result<()> {
    if settings.backend.base_url.trim().is_empty() {
        anyhow::bail!("backend.base_url must not be empty");
    }
    if settings.backend.timeout_ms == 0 {
        anyhow::bail!("backend.timeout_ms must be greater than 0");
    }
    if settings.transits.window_days == 0 {
        anyhow::bail!("transits.window_days must be greater than 0");
    }
    if settings.alerts.interval_secs == 0 {
        anyhow::bail!("alerts.interval_secs must be greater than 0");
    }
    let orb = settings.alerts.near_exact_orb;
    if !orb.is_finite() || orb <= 0.0 {
        anyhow::bail!("alerts.near_exact_orb must be a positive number of degrees, got {}", orb);
    }
    Ok(())
}

/// Load settings from `path`, or from the default locations when `path` is
/// `None`. Missing default file means built-in defaults.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<SkyprintSettings> {
    let text = match path {
        Some(p) => Some(
            fs::read_to_string(p)
                .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", p.display()))?,
        ),
        None => read_config_toml_text()?,
    };
    match text {
        Some(t) => parse_settings(&t),
        None => Ok(SkyprintSettings::default()),
    }
}
