use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub grid: GridConfig,
    pub layout: LayoutConfig,
    #[serde(default)]
    pub init: InitConfig,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
}

/// Pixel metrics the renderer lays slots and cells out with. The pickup
/// resolver needs them to invert a slot click back into shape coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Rendered size of one grid cell.
    pub cell_px: f32,
    /// Outer size of one storage slot.
    pub slot_size: [f32; 2],
    /// Inset between the slot edge and the shape preview.
    pub slot_padding: [f32; 2],
    /// Strip reserved at the bottom of each slot for the item label.
    pub label_strip_px: f32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InitConfig {
    /// Visual cells constructed per scheduling tick during screen setup.
    pub cells_per_step: usize,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self { cells_per_step: 12 }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 6,
                height: 20,
            },
            layout: LayoutConfig {
                cell_px: 48.0,
                slot_size: [96.0, 96.0],
                slot_padding: [6.0, 6.0],
                label_strip_px: 18.0,
            },
            init: InitConfig::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "effigrid")
        .map(|dirs| dirs.config_dir().join("layout.toml"))
}

impl ScreenConfig {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            let config = Self::default();
            config.save();
            return config;
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse layout config: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write layout config: {e}");
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize layout config: {e}");
            }
        }
    }
}
