use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Point;

/// Per-panel persistence slot.
pub trait PanelConfig {
    fn save_position(&mut self, position: Point);
    fn save_width(&mut self, width: f32);
    /// Panel-defined boolean state (e.g. collapsed).
    fn save_state(&mut self, state: bool);
    fn load_position(&self) -> Option<Point>;
    fn load_width(&self) -> Option<f32>;
    fn load_state(&self) -> Option<bool>;
}

/// Keyed, ordered collection of panel slots.
///
/// The GUI brackets a save or load with `begin`/`end`. `add_panel` and
/// `get_panel` return `None` when no slot is available for a title; the
/// panel is then skipped.
pub trait ConfigList {
    fn begin(&mut self, loading: bool);
    fn end(&mut self, loading: bool);
    fn add_panel(&mut self, title: &str) -> Option<&mut dyn PanelConfig>;
    fn get_panel(&self, title: &str) -> Option<&dyn PanelConfig>;
}

/// Serialized state of one panel. Absent fields keep the panel default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    #[serde(default)]
    pub position: Option<(f32, f32)>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub state: Option<bool>,
}

impl PanelConfig for PanelRecord {
    fn save_position(&mut self, position: Point) {
        self.position = Some((position.x, position.y));
    }

    fn save_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    fn save_state(&mut self, state: bool) {
        self.state = Some(state);
    }

    fn load_position(&self) -> Option<Point> {
        self.position.map(|(x, y)| Point::new(x, y))
    }

    fn load_width(&self) -> Option<f32> {
        self.width
    }

    fn load_state(&self) -> Option<bool> {
        self.state
    }
}

// ---------------------------------------------------------------------------
// RON-backed config list
// ---------------------------------------------------------------------------

/// `ConfigList` stored as a RON map keyed by panel title.
///
/// File I/O is best-effort: read, parse and write failures are logged and
/// the GUI keeps its defaults.
#[derive(Debug, Default)]
pub struct RonConfigList {
    path: Option<PathBuf>,
    panels: BTreeMap<String, PanelRecord>,
}

impl RonConfigList {
    /// Backed by a file. Nothing is read until `begin(true)`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            panels: BTreeMap::new(),
        }
    }

    /// Not backed by a file; records live only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn panels(&self) -> &BTreeMap<String, PanelRecord> {
        &self.panels
    }

    pub fn insert(&mut self, title: impl Into<String>, record: PanelRecord) {
        self.panels.insert(title.into(), record);
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(&self.panels, ron::ser::PrettyConfig::default())
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        let panels = ron::from_str::<BTreeMap<String, PanelRecord>>(s)?;
        Ok(Self { path: None, panels })
    }

    /// Replace the records with the file's. On failure the file is treated
    /// as empty.
    fn read_file(&mut self, path: &Path) {
        self.panels.clear();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to read {}: {}, using default layout", path.display(), e);
                return;
            }
        };
        match ron::from_str::<BTreeMap<String, PanelRecord>>(&content) {
            Ok(panels) => self.panels = panels,
            Err(e) => {
                log::warn!("failed to parse RON {}: {}, using default layout", path.display(), e);
            }
        }
    }

    fn write_file(&self, path: &Path) {
        let ron_str = match self.to_ron_string() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("failed to serialize panel layout: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(path, ron_str) {
            log::warn!("failed to write {}: {}", path.display(), e);
        } else {
            log::debug!("saved {} panels to {}", self.panels.len(), path.display());
        }
    }
}

impl ConfigList for RonConfigList {
    /// File-backed lists reload from disk before a load and start empty
    /// before a save. In-memory lists keep their records across both.
    fn begin(&mut self, loading: bool) {
        let Some(path) = self.path.clone() else {
            return;
        };
        if loading {
            self.read_file(&path);
        } else {
            self.panels.clear();
        }
    }

    fn end(&mut self, loading: bool) {
        if let Some(path) = &self.path
            && !loading
        {
            self.write_file(path);
        }
    }

    fn add_panel(&mut self, title: &str) -> Option<&mut dyn PanelConfig> {
        let record = self.panels.entry(title.to_string()).or_default();
        Some(record as &mut dyn PanelConfig)
    }

    fn get_panel(&self, title: &str) -> Option<&dyn PanelConfig> {
        self.panels.get(title).map(|r| r as &dyn PanelConfig)
    }
}
