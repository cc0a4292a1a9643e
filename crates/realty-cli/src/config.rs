use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use realty_core::format::DEFAULT_TRUNCATE_WIDTH;

pub const DEFAULT_API_URL: &str = "https://real-estate-backend-ebon.vercel.app/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR: &str = "realty";
const CONFIG_FILE: &str = "config.yaml";
const SESSION_FILE: &str = "session.json";

/// Everything the CLI reads from its config file. Loaded once at startup
/// and passed by reference from then on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    /// Where the admin token is kept between invocations
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Presentation knobs for table and CSV output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Long text cells are cut to this many characters in tables
    pub truncate_width: usize,
    /// Colour the status line and errors
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            truncate_width: DEFAULT_TRUNCATE_WIDTH,
            color: true,
        }
    }
}

impl SiteConfig {
    /// Load from an explicit path, else from the user config directory if a
    /// file exists there, else defaults. An explicit path must exist.
    pub fn load(explicit: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match explicit {
            Some(p) => {
                let path = PathBuf::from(p);
                if !path.is_file() {
                    return Err(format!("Config file not found: {}", path.display()).into());
                }
                Some(path)
            }
            None => default_config_path().filter(|p| p.is_file()),
        };

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        Self::from_yaml(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e).into())
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Apply command-line overrides on top of the file.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .map(|d| d.join(CONFIG_DIR).join(SESSION_FILE))
                .unwrap_or_else(|| PathBuf::from(".realty-session.json"))
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = SiteConfig::from_yaml("").unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.display.truncate_width, 80);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let cfg = SiteConfig::from_yaml(
            "api:\n  base_url: http://localhost:5000\ndisplay:\n  truncate_width: 40\n",
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:5000");
        assert_eq!(cfg.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.display.truncate_width, 40);
        assert!(cfg.display.color);
    }

    #[test]
    fn test_cli_override_wins() {
        let cfg = SiteConfig::default().with_api_url(Some("http://staging:8080".into()));
        assert_eq!(cfg.api.base_url, "http://staging:8080");
        let cfg = cfg.with_api_url(Some("  ".into()));
        assert_eq!(cfg.api.base_url, "http://staging:8080");
    }

    #[test]
    fn test_explicit_session_path() {
        let cfg = SiteConfig::from_yaml("session_file: /tmp/realty-test.json\n").unwrap();
        assert_eq!(cfg.session_path(), PathBuf::from("/tmp/realty-test.json"));
    }
}
