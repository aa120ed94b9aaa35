use super::component::MouseButton;
use super::interface::Interface;
use super::{Point, Rect, Size};

/// Per-dispatch view of a component's place on screen.
///
/// Built by the dispatcher (or a containing component) right before an
/// operation and dropped right after; never stored across frames. Geometry
/// and the focus/on-top flags are fixed at construction. The component
/// reports back through `set_height`, the focus request/release flags and
/// an optional description.
pub struct Context<'a> {
    inter: &'a dyn Interface,
    size: Size,
    pos: Point,
    focus: bool,
    on_top: bool,
    focus_requested: bool,
    focus_released: bool,
    description: Option<String>,
}

impl<'a> Context<'a> {
    /// Root context for a top-level component. Height starts at zero and is
    /// filled in by the component.
    pub fn new(
        inter: &'a dyn Interface,
        width: f32,
        pos: Point,
        focus: bool,
        on_top: bool,
    ) -> Self {
        Self {
            inter,
            size: Size::new(width, 0.0),
            pos,
            focus,
            on_top,
            focus_requested: false,
            focus_released: false,
            description: None,
        }
    }

    /// Child context at `offset` from the parent's top-left corner.
    /// Focus and on-top status are narrowed: a child only has them if the
    /// parent does.
    pub fn derive(
        parent: &Context<'a>,
        width: f32,
        offset: Point,
        focus: bool,
        on_top: bool,
    ) -> Self {
        Self::new(
            parent.inter,
            width,
            parent.pos.offset(offset),
            parent.focus && focus,
            parent.on_top && on_top,
        )
    }

    pub fn interface(&self) -> &'a dyn Interface {
        self.inter
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    pub fn set_height(&mut self, height: f32) {
        self.size.height = height.max(0.0);
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub fn on_top(&self) -> bool {
        self.on_top
    }

    /// Cursor inside this context's rect and not occluded.
    pub fn is_hovered(&self) -> bool {
        self.on_top && self.rect().contains_point(self.inter.mouse())
    }

    /// Hovered while `button` is held.
    pub fn is_clicked(&self, button: MouseButton) -> bool {
        self.is_hovered() && self.inter.button(button)
    }

    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn release_focus(&mut self) {
        self.focus_released = true;
    }

    pub fn focus_requested(&self) -> bool {
        self.focus_requested
    }

    pub fn focus_released(&self) -> bool {
        self.focus_released
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
