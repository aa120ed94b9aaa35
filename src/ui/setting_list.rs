use super::component::{Component, MouseButton};
use super::context::Context;
use super::setting::{Labeled, Setting, SettingNode, VisibleSetting, visible_settings};
use super::theme::Theme;
use super::toggle::BoolSource;
use super::{Point, Rect};

/// One row per visible setting under `root`.
///
/// Visibility is re-evaluated on every call, so rows appear and disappear
/// as their flags change. Clicking a row requests focus and flips the
/// setting's toggle if it has one; hovering a row publishes its description.
pub struct SettingList {
    root: SettingNode,
    theme: Theme,
}

impl SettingList {
    pub fn new(root: SettingNode, theme: &Theme) -> Self {
        Self {
            root,
            theme: theme.clone(),
        }
    }

    pub fn root(&self) -> &SettingNode {
        &self.root
    }

    /// Index of the row under the cursor, if the list is hovered.
    fn hovered_row(&self, context: &Context<'_>, rows: usize) -> Option<usize> {
        if !context.is_hovered() {
            return None;
        }
        let dy = context.interface().mouse().y - context.pos().y;
        let row = (dy / self.theme.row_height) as usize;
        (row < rows).then_some(row)
    }

    fn row_rect(&self, context: &Context<'_>, index: usize) -> Rect {
        let pos = context.pos();
        Rect::new(
            pos.x,
            pos.y + index as f32 * self.theme.row_height,
            context.size().width,
            self.theme.row_height,
        )
    }

    fn measure(&self, context: &mut Context<'_>, rows: usize) {
        context.set_height(rows as f32 * self.theme.row_height);
    }

    fn describe(context: &mut Context<'_>, row: Option<usize>, rows: &[VisibleSetting<'_>]) {
        if let Some(description) = row
            .and_then(|i| rows.get(i))
            .and_then(|v| v.setting.description())
        {
            context.set_description(description);
        }
    }
}

impl Component for SettingList {
    fn render(&mut self, context: &mut Context<'_>) {
        let rows = visible_settings(&self.root);
        self.measure(context, rows.len());
        let hovered = self.hovered_row(context, rows.len());
        let inter = context.interface();

        for (i, row) in rows.iter().enumerate() {
            let rect = self.row_rect(context, i);
            if hovered == Some(i) {
                inter.fill_rect(rect, self.theme.row_hover_bg);
            }
            let color = match row.setting.toggleable() {
                Some(t) if t.is_on() => self.theme.gold,
                Some(_) => self.theme.disabled,
                None => self.theme.text_dark,
            };
            let indent = self.theme.text_inset + row.depth as f32 * self.theme.row_indent;
            inter.draw_text(
                Point::new(rect.x + indent, rect.y),
                row.setting.display_name(),
                color,
                self.theme.font_body_size,
            );
        }
        Self::describe(context, hovered, &rows);
    }

    fn get_height(&mut self, context: &mut Context<'_>) {
        let rows = visible_settings(&self.root).len();
        self.measure(context, rows);
    }

    fn handle_button(&mut self, context: &mut Context<'_>, button: MouseButton) {
        let rows = visible_settings(&self.root);
        self.measure(context, rows.len());
        if button != MouseButton::Left || !context.is_clicked(button) {
            return;
        }
        context.request_focus();
        let Some(row) = self.hovered_row(context, rows.len()) else {
            return;
        };
        let setting: &dyn Setting = rows[row].setting;
        if let Some(toggle) = setting.toggleable() {
            toggle.toggle();
            log::debug!("setting '{}' -> {}", setting.display_name(), toggle.is_on());
        }
    }
}
