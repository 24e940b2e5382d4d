// ABOUTME: Configuration module for the bespoke-deck application
// ABOUTME: Provides deck composition settings and environment variable handling

use crate::errors::{DeckError, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Default bullet selector: build items that are not themselves
/// nested containers of other build items.
pub const DEFAULT_BULLET_SELECTOR: &str = ".build, .build-items > *:not(.build-items)";

/// How the client-side scale plugin should fit slides to the viewport.
/// Zoom-based scaling anti-aliases fonts correctly but is WebKit-only,
/// so transform is the portable default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMethod {
    Zoom,
    Transform,
}

impl Default for ScaleMethod {
    fn default() -> Self {
        ScaleMethod::Transform
    }
}

impl FromStr for ScaleMethod {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zoom" => Ok(ScaleMethod::Zoom),
            "transform" => Ok(ScaleMethod::Transform),
            other => Err(DeckError::ConfigError(format!(
                "Unknown scale method: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMethod::Zoom => write!(f, "zoom"),
            ScaleMethod::Transform => write!(f, "transform"),
        }
    }
}

/// Global configuration for deck composition
pub struct DeckConfig {
    pub bullet_selector: String,
    pub focus_marker: String,
    pub scale_method: ScaleMethod,
    pub overview_columns: u32,
    pub default_css: String,
    pub default_js: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            bullet_selector: DEFAULT_BULLET_SELECTOR.to_string(),
            focus_marker: "kube".to_string(),
            scale_method: ScaleMethod::default(),
            overview_columns: 4,
            default_css: "https://unpkg.com/bespoke-theme-cube@1.0.0/dist/theme.css".to_string(),
            default_js: "https://unpkg.com/bespoke@1.1.0/dist/bespoke.min.js".to_string(),
        }
    }
}

impl DeckConfig {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bullet_selector =
            env::var("BULLET_SELECTOR").unwrap_or(defaults.bullet_selector);
        let focus_marker = env::var("FOCUS_MARKER").unwrap_or(defaults.focus_marker);
        let scale_method = env::var("SCALE_METHOD")
            .ok()
            .and_then(|s| s.parse::<ScaleMethod>().ok())
            .unwrap_or(defaults.scale_method);
        let overview_columns = env::var("OVERVIEW_COLUMNS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.overview_columns);
        let default_css = env::var("DEFAULT_CSS").unwrap_or(defaults.default_css);
        let default_js = env::var("DEFAULT_JS").unwrap_or(defaults.default_js);

        Self {
            bullet_selector,
            focus_marker,
            scale_method,
            overview_columns,
            default_css,
            default_js,
        }
    }

    /// The whole-slide class applied while a focus-marked bullet is current
    pub fn focus_class(&self) -> String {
        format!("focus-{}", self.focus_marker)
    }
}
