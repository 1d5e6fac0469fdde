//! Runtime settings.
//!
//! Settings come from an optional TOML file, then from environment variables
//! prefixed with `INSTOCK_` (nested keys joined with `__`):
//!
//! ```toml
//! download_dir = "~/Downloads"
//! theme = "dark"
//!
//! [navigation]
//! scroll_margin = 1
//! scroll_duration = "300ms"
//!
//! [alerts]
//! low_stock_below = 10
//!
//! [page]
//! absent = ["sidebar-toggle"]
//! ```
//!
//! `INSTOCK_NAVIGATION__SCROLL_DURATION=500ms` overrides the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};

use crate::data::AlertThresholds;
use crate::page::{ElementId, Page};

/// Suffix to nanoseconds multiplier (longer suffixes first)
const UNITS: &[(&str, f64)] = &[("ms", 1e6), ("s", 1e9), ("m", 60e9)];

/// Parse duration strings like "300ms", "1s", "1.5s", "2m"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration out of range: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier).round() as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

fn de_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).map_err(serde::de::Error::custom)
}

/// Colour theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Pick from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Rows kept free between the navbar and a section scrolled to.
    pub scroll_margin: u16,
    #[serde(deserialize_with = "de_duration")]
    pub scroll_duration: Duration,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            scroll_margin: 1,
            scroll_duration: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderSettings {
    #[serde(deserialize_with = "de_duration")]
    pub transition: Duration,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            transition: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Elements to leave off the page.
    pub absent: Vec<ElementId>,
}

impl PageSettings {
    pub fn page(&self) -> Page {
        Page::without(&self.absent)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where exported workbooks are written.
    pub download_dir: PathBuf,
    /// JSON catalog to load instead of the built-in products.
    pub catalog: Option<PathBuf>,
    pub theme: ThemeChoice,
    pub navigation: NavigationSettings,
    pub slider: SliderSettings,
    pub alerts: AlertThresholds,
    pub page: PageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
            catalog: None,
            theme: ThemeChoice::default(),
            navigation: NavigationSettings::default(),
            slider: SliderSettings::default(),
            alerts: AlertThresholds::default(),
            page: PageSettings::default(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INSTOCK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("page.absent")
}

impl Settings {
    /// Load settings from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(env)
            .build()
            .context("Failed to read settings")?;
        config
            .try_deserialize()
            .context("Invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env() -> Environment {
        environment().source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        environment().source(Some(map))
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_durations() {
        assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration(" 1.5s ").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_with(None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.navigation.scroll_duration, Duration::from_millis(300));
        assert_eq!(settings.alerts.low_stock_below, 10);
        assert_eq!(settings.page.page(), Page::full());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
download_dir = "/tmp/exports"
theme = "light"

[navigation]
scroll_duration = "500ms"

[alerts]
max_items = 3

[page]
absent = ["sidebar-toggle", "export-button"]
"#,
        );
        let settings = Settings::load_with(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.download_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.navigation.scroll_duration, Duration::from_millis(500));
        assert_eq!(settings.navigation.scroll_margin, 1);
        assert_eq!(settings.alerts.max_items, 3);
        assert_eq!(settings.alerts.expiring_within_days, 30);

        let page = settings.page.page();
        assert!(!page.has(ElementId::SidebarToggle));
        assert!(!page.has(ElementId::ExportButton));
        assert!(page.has(ElementId::Sidebar));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("theme = \"light\"\n");
        let env = env(&[
            ("INSTOCK_THEME", "dark"),
            ("INSTOCK_NAVIGATION__SCROLL_MARGIN", "3"),
            ("INSTOCK_PAGE__ABSENT", "modal,sidebar"),
        ]);
        let settings = Settings::load_with(Some(file.path()), env).unwrap();
        assert_eq!(settings.theme, ThemeChoice::Dark);
        assert_eq!(settings.navigation.scroll_margin, 3);
        assert_eq!(settings.page.absent, [ElementId::Modal, ElementId::Sidebar]);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let file = toml_file("[slider]\ntransition = \"soon\"\n");
        assert!(Settings::load_with(Some(file.path()), no_env()).is_err());

        let file = toml_file("[page]\nabsent = [\"footer\"]\n");
        assert!(Settings::load_with(Some(file.path()), no_env()).is_err());
    }
}
