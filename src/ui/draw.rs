use super::Rect;

/// Intermediate draw command for a filled quad.
#[derive(Debug, Clone)]
pub struct PanelCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4], // sRGB RGBA
    /// Clip region active when the quad was emitted.
    pub clip: Option<Rect>,
}

/// Intermediate draw command for a text run.
#[derive(Debug, Clone)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: [f32; 4], // sRGB RGBA
    pub font_size: f32,
    pub clip: Option<Rect>,
}

/// Collects draw commands emitted by components during a frame.
/// Decouples the dispatch engine from whatever backend rasterizes them.
#[derive(Debug, Default)]
pub struct DrawList {
    pub panels: Vec<PanelCommand>,
    pub texts: Vec<TextCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.panels.clear();
        self.texts.clear();
    }

    /// Text runs whose origin lies inside their clip region (or unclipped).
    pub fn visible_texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.texts
            .iter()
            .filter(|t| t.clip.is_none_or(|c| c.contains(t.x, t.y)))
    }
}
