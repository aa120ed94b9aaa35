mod component;
mod config;
mod context;
mod description;
mod draw;
mod gui;
mod interface;
mod panel;
mod scroll;
mod setting;
mod setting_list;
mod theme;
mod toggle;

pub use component::{Component, FixedComponent, MouseButton};
pub use config::{ConfigList, PanelConfig, PanelRecord, RonConfigList};
pub use context::Context;
pub use description::{DescriptionRenderer, TooltipRenderer};
pub use draw::{DrawList, PanelCommand, TextCommand};
pub use gui::{Gui, PanelId, PanelToggle};
pub use interface::{ClipScope, Interface, Surface};
pub use panel::FixedPanel;
pub use scroll::{FixedViewport, ScrollComponent, ScrollPolicy, Unbounded};
pub use setting::{Labeled, Setting, SettingNode, VisibleSetting, visible_settings};
pub use setting_list::SettingList;
pub use theme::Theme;
pub use toggle::{BoolSource, SimpleToggle, Toggleable};

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

/// Screen-space point in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point translated by `offset`.
    pub fn offset(self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Returns true if the point (px, py) is inside this rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Overlap of two rectangles. Disjoint rectangles yield a zero-sized rect.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        Rect {
            x,
            y,
            width: (right - x).max(0.0),
            height: (bottom - y).max(0.0),
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
