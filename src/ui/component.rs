use winit::keyboard::KeyCode;

use super::config::PanelConfig;
use super::context::Context;
use super::interface::Interface;
use super::Point;

/// Mouse button identifier (decoupled from winit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Operations every node of the component tree answers.
///
/// The dispatcher hands each call a fresh `Context`; containers derive child
/// contexts from it and delegate. Input and lifecycle hooks default to no-ops.
pub trait Component {
    /// Draw the component. Implementations set the context height.
    fn render(&mut self, context: &mut Context<'_>);

    /// Measure only: set the context height without drawing.
    fn get_height(&mut self, context: &mut Context<'_>);

    /// A mouse button changed state. Query `Interface::button` for which way.
    fn handle_button(&mut self, context: &mut Context<'_>, button: MouseButton) {
        let _ = (context, button);
    }

    fn handle_key(&mut self, context: &mut Context<'_>, key: KeyCode) {
        let _ = (context, key);
    }

    /// Mouse wheel moved by `diff` pixels (positive = towards content end).
    fn handle_scroll(&mut self, context: &mut Context<'_>, diff: f32) {
        let _ = (context, diff);
    }

    /// The component became visible (GUI opened or panel shown).
    fn enter(&mut self, context: &mut Context<'_>) {
        let _ = context;
    }

    /// The component stopped being visible.
    fn exit(&mut self, context: &mut Context<'_>) {
        let _ = context;
    }
}

/// Top-level component placed directly by the dispatcher.
pub trait FixedComponent: Component {
    /// Stable key used for persistence.
    fn title(&self) -> &str;

    /// Absolute top-left corner on screen.
    fn position(&self, inter: &dyn Interface) -> Point;

    fn width(&self, inter: &dyn Interface) -> f32;

    fn save_config(&self, inter: &dyn Interface, config: &mut dyn PanelConfig);

    fn load_config(&mut self, inter: &dyn Interface, config: &dyn PanelConfig);
}
