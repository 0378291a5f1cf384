use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from cellpick.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Maximum number of list rows shown before the panel scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    /// Offer column-history suggestions while editing unvalidated cells
    #[serde(default = "default_true")]
    pub autocomplete: bool,
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Separator used to store multi-select values in one cell
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            max_visible: default_max_visible(),
            autocomplete: true,
            min_width: default_min_width(),
            max_width: default_max_width(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_visible() -> usize {
    8
}

fn default_min_width() -> u32 {
    12
}

fn default_max_width() -> u32 {
    40
}

fn default_delimiter() -> String {
    ",".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `selection_bg = "#3D1438"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
