use std::cell::{Cell, Ref, RefCell};

use super::component::MouseButton;
use super::draw::{DrawList, PanelCommand, TextCommand};
use super::{Point, Rect, Size};

/// Rough glyph advance as a fraction of font size.
const GLYPH_ADVANCE: f32 = 0.6;

/// Drawing and input surface shared by every component in a frame.
///
/// Methods take `&self` so a single handle can be threaded through nested
/// contexts; implementations keep mutable state behind cells.
pub trait Interface {
    /// Current cursor position in screen coordinates.
    fn mouse(&self) -> Point;
    /// Whether `button` is currently held down.
    fn button(&self, button: MouseButton) -> bool;
    /// Push a clip region. Intersected with the region already in effect.
    fn window(&self, rect: Rect);
    /// Pop the clip region pushed by the matching `window` call.
    fn restore(&self);
    fn fill_rect(&self, rect: Rect, color: [f32; 4]);
    fn draw_text(&self, pos: Point, text: &str, color: [f32; 4], font_size: f32);
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Scoped clip region. Pushes on construction, restores on drop, so the
/// region is lifted on every exit path including unwinding.
pub struct ClipScope<'a> {
    inter: &'a dyn Interface,
}

impl<'a> ClipScope<'a> {
    pub fn new(inter: &'a dyn Interface, rect: Rect) -> Self {
        inter.window(rect);
        Self { inter }
    }
}

impl Drop for ClipScope<'_> {
    fn drop(&mut self) {
        self.inter.restore();
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// `Interface` that records draw calls into a `DrawList`.
///
/// Cursor and button state are pushed in by the host event loop
/// (`set_mouse`, `set_button`) before each dispatch call.
pub struct Surface {
    screen: Size,
    mouse: Cell<Point>,
    /// Left, right, middle.
    buttons: Cell<[bool; 3]>,
    clip_stack: RefCell<Vec<Rect>>,
    draw_list: RefCell<DrawList>,
}

impl Surface {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            mouse: Cell::new(Point::ORIGIN),
            buttons: Cell::new([false; 3]),
            clip_stack: RefCell::new(Vec::new()),
            draw_list: RefCell::new(DrawList::new()),
        }
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn set_mouse(&self, pos: Point) {
        self.mouse.set(pos);
    }

    pub fn set_button(&self, button: MouseButton, pressed: bool) {
        let mut buttons = self.buttons.get();
        buttons[button_index(button)] = pressed;
        self.buttons.set(buttons);
    }

    /// Number of clip regions currently pushed.
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.borrow().len()
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.borrow().last().copied()
    }

    /// Draw commands recorded since the last `begin_frame`.
    pub fn draw_list(&self) -> Ref<'_, DrawList> {
        self.draw_list.borrow()
    }

    /// Clear recorded commands. An unbalanced clip stack left over from the
    /// previous frame is reported and discarded.
    pub fn begin_frame(&self) {
        self.draw_list.borrow_mut().clear();
        let mut stack = self.clip_stack.borrow_mut();
        if !stack.is_empty() {
            log::warn!("clip stack unbalanced at frame start ({} left)", stack.len());
            stack.clear();
        }
    }
}

fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

impl Interface for Surface {
    fn mouse(&self) -> Point {
        self.mouse.get()
    }

    fn button(&self, button: MouseButton) -> bool {
        self.buttons.get()[button_index(button)]
    }

    fn window(&self, rect: Rect) {
        let mut stack = self.clip_stack.borrow_mut();
        let clip = match stack.last() {
            Some(top) => top.intersect(&rect),
            None => rect,
        };
        stack.push(clip);
    }

    fn restore(&self) {
        if self.clip_stack.borrow_mut().pop().is_none() {
            log::warn!("restore called with empty clip stack");
        }
    }

    fn fill_rect(&self, rect: Rect, color: [f32; 4]) {
        let clip = self.current_clip();
        self.draw_list.borrow_mut().panels.push(PanelCommand {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color,
            clip,
        });
    }

    fn draw_text(&self, pos: Point, text: &str, color: [f32; 4], font_size: f32) {
        let clip = self.current_clip();
        self.draw_list.borrow_mut().texts.push(TextCommand {
            text: text.to_string(),
            x: pos.x,
            y: pos.y,
            color,
            font_size,
            clip,
        });
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * GLYPH_ADVANCE
    }
}
