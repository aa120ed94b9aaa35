/// Centralized visual style constants.
///
/// Components copy the theme at construction instead of hardcoding colors.
#[derive(Debug, Clone)]
pub struct Theme {
    // -- Color palette (sRGB RGBA) --
    /// Parchment background: #D4B896
    pub bg_parchment: [f32; 4],
    /// Gold accent: #C8A850
    pub gold: [f32; 4],
    /// Light text (on dark backgrounds): #F0E6D2
    pub text_light: [f32; 4],
    /// Dark text (on parchment): #3C2A1A
    pub text_dark: [f32; 4],
    /// Disabled/inactive grey: #808080
    pub disabled: [f32; 4],

    // -- Panel defaults --
    /// Title bar background.
    pub title_bar_bg: [f32; 4],
    /// Title bar height in pixels.
    pub title_bar_height: f32,
    /// Title text size in pixels (16pt).
    pub font_header_size: f32,
    /// Body text size in pixels (12pt).
    pub font_body_size: f32,
    /// Horizontal inset of text inside panels and rows.
    pub text_inset: f32,

    // -- Setting rows --
    /// Row height in pixels.
    pub row_height: f32,
    /// Extra indent per nesting level (pixels).
    pub row_indent: f32,
    /// Background of the row under the cursor.
    pub row_hover_bg: [f32; 4],

    // -- Tooltip defaults --
    /// Horizontal offset from cursor to tooltip (pixels).
    pub tooltip_offset_x: f32,
    /// Vertical offset from cursor to tooltip (pixels).
    pub tooltip_offset_y: f32,
    /// Internal padding for tooltip boxes (pixels).
    pub tooltip_padding: f32,
    pub tooltip_bg_color: [f32; 4],
    pub tooltip_border_color: [f32; 4],
    /// Tooltip border width (pixels).
    pub tooltip_border_width: f32,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
const fn hex(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_parchment: hex_a(0xD4, 0xB8, 0x96, 0.95),
            gold: hex(0xC8, 0xA8, 0x50),
            text_light: hex(0xF0, 0xE6, 0xD2),
            text_dark: hex(0x3C, 0x2A, 0x1A),
            disabled: hex(0x80, 0x80, 0x80),

            title_bar_bg: hex(0x5A, 0x40, 0x28),
            title_bar_height: 20.0,
            font_header_size: 16.0,
            font_body_size: 12.0,
            text_inset: 4.0,

            row_height: 16.0,
            row_indent: 8.0,
            row_hover_bg: hex_a(0xF0, 0xE6, 0xD2, 0.25), // light parchment, subtle

            tooltip_offset_x: 8.0,
            tooltip_offset_y: 8.0,
            tooltip_padding: 8.0,
            tooltip_bg_color: hex_a(0xC0, 0xA8, 0x80, 0.98), // slightly darker parchment
            tooltip_border_color: hex(0xC8, 0xA8, 0x50),     // gold
            tooltip_border_width: 1.0,
        }
    }
}
