use super::context::Context;
use super::theme::Theme;
use super::{Point, Rect, Size};

/// Draws the description of the front-most hovered component.
/// Called at most once per frame, after every panel has rendered.
pub trait DescriptionRenderer {
    fn render_description(&mut self, context: &Context<'_>);
}

/// Tooltip-style description box next to the cursor.
pub struct TooltipRenderer {
    theme: Theme,
    screen: Size,
}

impl TooltipRenderer {
    pub fn new(theme: Theme, screen: Size) -> Self {
        Self { theme, screen }
    }

    /// Prefer below-right of the cursor; flip to the other side of the
    /// cursor on an axis that would clip, then clamp to the screen.
    pub(crate) fn compute_position(
        cursor: Point,
        size: Size,
        screen: Size,
        theme: &Theme,
    ) -> Point {
        let off_x = theme.tooltip_offset_x;
        let off_y = theme.tooltip_offset_y;

        let mut x = cursor.x + off_x;
        let mut y = cursor.y + off_y;

        // Flip horizontally if clipping right edge.
        if x + size.width > screen.width {
            x = cursor.x - size.width - off_x;
        }
        // Flip vertically if clipping bottom edge.
        if y + size.height > screen.height {
            y = cursor.y - size.height - off_y;
        }

        x = x.clamp(0.0, (screen.width - size.width).max(0.0));
        y = y.clamp(0.0, (screen.height - size.height).max(0.0));

        Point::new(x, y)
    }
}

impl DescriptionRenderer for TooltipRenderer {
    fn render_description(&mut self, context: &Context<'_>) {
        let Some(text) = context.description() else {
            return;
        };
        let inter = context.interface();
        let font_size = self.theme.font_body_size;
        let pad = self.theme.tooltip_padding;
        let size = Size::new(
            inter.text_width(text, font_size) + pad * 2.0,
            font_size + pad * 2.0,
        );
        let pos = Self::compute_position(inter.mouse(), size, self.screen, &self.theme);

        let border = self.theme.tooltip_border_width;
        let outer = Rect::from_parts(pos, size);
        inter.fill_rect(outer, self.theme.tooltip_border_color);
        inter.fill_rect(
            Rect::new(
                outer.x + border,
                outer.y + border,
                (outer.width - border * 2.0).max(0.0),
                (outer.height - border * 2.0).max(0.0),
            ),
            self.theme.tooltip_bg_color,
        );
        inter.draw_text(
            Point::new(pos.x + pad, pos.y + pad),
            text,
            self.theme.text_dark,
            font_size,
        );
    }
}
