use winit::keyboard::KeyCode;

use super::component::{Component, FixedComponent, MouseButton};
use super::config::PanelConfig;
use super::context::Context;
use super::interface::Interface;
use super::theme::Theme;
use super::{Point, Rect};

/// Titled top-level panel at a fixed screen position.
///
/// Left-clicking the title bar requests focus (bringing the panel to the
/// front); right-clicking it collapses or expands the body. Position, width
/// and the collapsed flag are persisted.
pub struct FixedPanel<C> {
    title: String,
    position: Point,
    width: f32,
    collapsed: bool,
    body: C,
    theme: Theme,
}

impl<C: Component> FixedPanel<C> {
    pub fn new(
        title: impl Into<String>,
        position: Point,
        width: f32,
        body: C,
        theme: &Theme,
    ) -> Self {
        Self {
            title: title.into(),
            position,
            width,
            collapsed: false,
            body,
            theme: theme.clone(),
        }
    }

    pub fn body(&self) -> &C {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut C {
        &mut self.body
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn title_rect(&self, context: &Context<'_>) -> Rect {
        let pos = context.pos();
        Rect::new(pos.x, pos.y, context.size().width, self.theme.title_bar_height)
    }

    fn title_hovered(&self, context: &Context<'_>) -> bool {
        context.on_top()
            && self
                .title_rect(context)
                .contains_point(context.interface().mouse())
    }

    /// Run `operation` on the body below the title bar and fold its height
    /// and focus signal back into `context`. Collapsed panels skip the body.
    fn body_operation<'a>(
        &mut self,
        context: &mut Context<'a>,
        operation: impl FnOnce(&mut C, &mut Context<'a>),
    ) {
        let title_h = self.theme.title_bar_height;
        if self.collapsed {
            context.set_height(title_h);
            return;
        }
        let body_h = self.run_body(context, operation);
        context.set_height(title_h + body_h);
    }

    /// Lifecycle hooks reach the body even while collapsed.
    fn lifecycle_operation<'a>(
        &mut self,
        context: &mut Context<'a>,
        operation: impl FnOnce(&mut C, &mut Context<'a>),
    ) {
        let title_h = self.theme.title_bar_height;
        let body_h = self.run_body(context, operation);
        let body_h = if self.collapsed { 0.0 } else { body_h };
        context.set_height(title_h + body_h);
    }

    /// Returns the body's height.
    fn run_body<'a>(
        &mut self,
        context: &mut Context<'a>,
        operation: impl FnOnce(&mut C, &mut Context<'a>),
    ) -> f32 {
        let title_h = self.theme.title_bar_height;
        let mut sub = Context::derive(
            context,
            context.size().width,
            Point::new(0.0, title_h),
            context.has_focus(),
            context.on_top(),
        );
        operation(&mut self.body, &mut sub);
        if sub.focus_released() {
            context.release_focus();
        } else if sub.focus_requested() {
            context.request_focus();
        }
        if let Some(description) = sub.description() {
            context.set_description(description);
        }
        sub.size().height
    }
}

impl<C: Component> Component for FixedPanel<C> {
    fn render(&mut self, context: &mut Context<'_>) {
        self.get_height(context);
        let inter = context.interface();
        inter.fill_rect(context.rect(), self.theme.bg_parchment);
        inter.fill_rect(self.title_rect(context), self.theme.title_bar_bg);
        let pos = context.pos();
        inter.draw_text(
            Point::new(pos.x + self.theme.text_inset, pos.y + 2.0),
            &self.title,
            self.theme.text_light,
            self.theme.font_header_size,
        );
        self.body_operation(context, |body, sub| body.render(sub));
    }

    fn get_height(&mut self, context: &mut Context<'_>) {
        self.body_operation(context, |body, sub| body.get_height(sub));
    }

    fn handle_button(&mut self, context: &mut Context<'_>, button: MouseButton) {
        let inter = context.interface();
        if self.title_hovered(context) && inter.button(button) {
            match button {
                MouseButton::Left => context.request_focus(),
                MouseButton::Right => {
                    self.collapsed = !self.collapsed;
                    log::debug!("panel '{}' collapsed={}", self.title, self.collapsed);
                }
                MouseButton::Middle => {}
            }
        }
        self.body_operation(context, |body, sub| body.handle_button(sub, button));
    }

    fn handle_key(&mut self, context: &mut Context<'_>, key: KeyCode) {
        self.body_operation(context, |body, sub| body.handle_key(sub, key));
    }

    fn handle_scroll(&mut self, context: &mut Context<'_>, diff: f32) {
        self.body_operation(context, |body, sub| body.handle_scroll(sub, diff));
    }

    fn enter(&mut self, context: &mut Context<'_>) {
        self.lifecycle_operation(context, |body, sub| body.enter(sub));
    }

    fn exit(&mut self, context: &mut Context<'_>) {
        self.lifecycle_operation(context, |body, sub| body.exit(sub));
    }
}

impl<C: Component> FixedComponent for FixedPanel<C> {
    fn title(&self) -> &str {
        &self.title
    }

    fn position(&self, _inter: &dyn Interface) -> Point {
        self.position
    }

    fn width(&self, _inter: &dyn Interface) -> f32 {
        self.width
    }

    fn save_config(&self, _inter: &dyn Interface, config: &mut dyn PanelConfig) {
        config.save_position(self.position);
        config.save_width(self.width);
        config.save_state(self.collapsed);
    }

    fn load_config(&mut self, _inter: &dyn Interface, config: &dyn PanelConfig) {
        if let Some(position) = config.load_position() {
            self.position = position;
        }
        if let Some(width) = config.load_width() {
            self.width = width;
        }
        if let Some(collapsed) = config.load_state() {
            self.collapsed = collapsed;
        }
    }
}
