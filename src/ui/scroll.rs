use winit::keyboard::KeyCode;

use super::component::{Component, MouseButton};
use super::context::Context;
use super::interface::ClipScope;
use super::{Point, Size};

/// Sizing rules for a scroll viewport.
pub trait ScrollPolicy {
    /// Width allocated to the child given the visible width.
    fn component_width(&self, scroll_width: f32) -> f32;
    /// Visible height reported to the parent given the child's height.
    fn scroll_height(&self, component_height: f32) -> f32;
}

/// Child as wide as the viewport; visible height capped at `max_height`.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub max_height: f32,
}

impl ScrollPolicy for FixedViewport {
    fn component_width(&self, scroll_width: f32) -> f32 {
        scroll_width
    }

    fn scroll_height(&self, component_height: f32) -> f32 {
        component_height.min(self.max_height)
    }
}

/// Viewport matches the child exactly. Scrolls only if a nested policy
/// makes the child larger than what is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl ScrollPolicy for Unbounded {
    fn component_width(&self, scroll_width: f32) -> f32 {
        scroll_width
    }

    fn scroll_height(&self, component_height: f32) -> f32 {
        component_height
    }
}

/// Viewport over a child that may be larger than what is shown.
///
/// Owns the scroll offset. The child sees a context shifted by `-offset`;
/// the parent sees a height mapped through the policy.
pub struct ScrollComponent<C, P> {
    component: C,
    policy: P,
    scroll_pos: Point,
}

impl<C: Component, P: ScrollPolicy> ScrollComponent<C, P> {
    pub fn new(component: C, policy: P) -> Self {
        Self {
            component,
            policy,
            scroll_pos: Point::ORIGIN,
        }
    }

    pub fn scroll_pos(&self) -> Point {
        self.scroll_pos
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// The child's context, shifted by the scroll offset. The child is only
    /// on top while the cursor is inside the viewport.
    fn child_context<'a>(&self, context: &Context<'a>, on_top: bool) -> Context<'a> {
        Context::derive(
            context,
            self.policy.component_width(context.size().width),
            Point::new(-self.scroll_pos.x, -self.scroll_pos.y),
            context.has_focus(),
            on_top,
        )
    }

    /// Measure the child and report the visible height. Returns the child's
    /// size.
    fn measure(&mut self, context: &mut Context<'_>) -> Size {
        let mut sub = self.child_context(context, false);
        self.component.get_height(&mut sub);
        context.set_height(self.policy.scroll_height(sub.size().height));
        sub.size()
    }

    /// Run `operation` on the child in its scrolled context and propagate
    /// its focus signal and description. Returns the child's measured size.
    fn do_operation<'a>(
        &mut self,
        context: &mut Context<'a>,
        operation: impl FnOnce(&mut C, &mut Context<'a>),
    ) -> Size {
        let content = self.measure(context);
        let mut sub = self.child_context(context, context.is_hovered());
        operation(&mut self.component, &mut sub);
        if sub.focus_released() {
            context.release_focus();
        } else if sub.focus_requested() {
            context.request_focus();
        }
        if let Some(description) = sub.description() {
            context.set_description(description);
        }
        content
    }

    /// Keep the offset within `[0, max(0, content - viewport)]` per axis.
    fn clamp_scroll_pos(&mut self, viewport: Size, content: Size) {
        self.scroll_pos.x = self
            .scroll_pos
            .x
            .min(content.width - viewport.width)
            .max(0.0);
        self.scroll_pos.y = self
            .scroll_pos
            .y
            .min(content.height - viewport.height)
            .max(0.0);
    }
}

impl<C: Component, P: ScrollPolicy> Component for ScrollComponent<C, P> {
    fn render(&mut self, context: &mut Context<'_>) {
        // Measure first so the clip rect has its final height.
        let content = self.measure(context);
        self.clamp_scroll_pos(context.size(), content);
        let _clip = ClipScope::new(context.interface(), context.rect());
        self.do_operation(context, |c, sub| c.render(sub));
    }

    fn get_height(&mut self, context: &mut Context<'_>) {
        self.measure(context);
    }

    fn handle_button(&mut self, context: &mut Context<'_>, button: MouseButton) {
        self.do_operation(context, |c, sub| c.handle_button(sub, button));
    }

    fn handle_key(&mut self, context: &mut Context<'_>, key: KeyCode) {
        self.do_operation(context, |c, sub| c.handle_key(sub, key));
    }

    fn handle_scroll(&mut self, context: &mut Context<'_>, diff: f32) {
        // Child first so nested viewports consume the wheel before we do.
        self.do_operation(context, |c, sub| c.handle_scroll(sub, diff));
        let content = self.measure(context);
        if context.is_hovered() {
            let viewport = context.size();
            if content.height > viewport.height {
                self.scroll_pos.y += diff;
            } else if content.width > viewport.width {
                self.scroll_pos.x += diff;
            }
        }
        self.clamp_scroll_pos(context.size(), content);
    }

    fn enter(&mut self, context: &mut Context<'_>) {
        self.do_operation(context, |c, sub| c.enter(sub));
    }

    fn exit(&mut self, context: &mut Context<'_>) {
        self.do_operation(context, |c, sub| c.exit(sub));
    }
}
