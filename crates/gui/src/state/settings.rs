//! Application settings

use serde::{Deserialize, Serialize};

/// 2D plan display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Show the 1-meter grid
    pub show_grid: bool,
    /// Show room dimension labels
    pub show_labels: bool,
    /// Outline overlapping placements
    pub warn_overlaps: bool,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_labels: true,
            warn_overlaps: true,
        }
    }
}

/// 3D viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Selection tint RGB
    pub selection_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            selection_color: [0, 220, 255],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    pub plan: PlanSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
    /// Index into the wall swatch palette
    #[serde(default)]
    pub wall_swatch: usize,
    /// Index into the floor swatch palette
    #[serde(default)]
    pub floor_swatch: usize,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "roomplan", "roomplan") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "roomplan", "roomplan") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
