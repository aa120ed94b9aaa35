use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use winit::keyboard::KeyCode;

use super::component::{Component, FixedComponent, MouseButton};
use super::config::ConfigList;
use super::context::Context;
use super::description::DescriptionRenderer;
use super::interface::Interface;
use super::toggle::{BoolSource, Toggleable};

new_key_type! {
    /// Handle to a panel owned by a `Gui`. Stable for the life of the `Gui`.
    pub struct PanelId;
}

/// Active list copied at the start of a pass.
type Snapshot = SmallVec<[PanelId; 16]>;

enum Lifecycle {
    Enter(PanelId),
    Exit(PanelId),
}

/// Z-order and membership, shared with every `PanelToggle`.
#[derive(Default)]
struct PanelOrder {
    /// Back to front.
    active: Vec<PanelId>,
    permanent: Vec<PanelId>,
    /// Hooks owed to panels whose membership changed. Run by the `Gui` at
    /// the next pass boundary.
    pending: Vec<Lifecycle>,
}

impl PanelOrder {
    fn is_on(&self, id: PanelId) -> bool {
        self.active.contains(&id)
    }

    fn show(&mut self, id: PanelId) {
        if self.is_on(id) {
            return;
        }
        self.active.push(id);
        self.pending.push(Lifecycle::Enter(id));
    }

    fn hide(&mut self, id: PanelId) {
        if self.permanent.contains(&id) || !self.is_on(id) {
            return;
        }
        self.active.retain(|&a| a != id);
        self.pending.push(Lifecycle::Exit(id));
    }

    fn toggle(&mut self, id: PanelId) {
        if self.is_on(id) {
            self.hide(id);
        } else {
            self.show(id);
        }
    }

    /// Move `id` to the front, keeping everything else in order.
    fn promote(&mut self, id: PanelId) {
        match self.active.iter().position(|&a| a == id) {
            Some(index) => {
                let id = self.active.remove(index);
                self.active.push(id);
                log::debug!("promoted {id:?} to front");
            }
            None => log::debug!("{id:?} requested focus but is no longer shown"),
        }
    }

    fn snapshot(&self) -> Snapshot {
        self.active.iter().copied().collect()
    }
}

/// Root dispatcher: owns the top-level panels, their z-order and the
/// interface they draw on.
///
/// Every pass iterates a snapshot of the active list, so panels shown or
/// hidden by a component mid-pass only take part from the next pass on.
pub struct Gui<I: Interface> {
    inter: I,
    panels: SlotMap<PanelId, Box<dyn FixedComponent>>,
    order: Rc<RefCell<PanelOrder>>,
    description_renderer: Option<Box<dyn DescriptionRenderer>>,
}

impl<I: Interface> Gui<I> {
    pub fn new(inter: I) -> Self {
        Self {
            inter,
            panels: SlotMap::with_key(),
            order: Rc::default(),
            description_renderer: None,
        }
    }

    pub fn with_description_renderer(mut self, renderer: Box<dyn DescriptionRenderer>) -> Self {
        self.description_renderer = Some(renderer);
        self
    }

    pub fn interface(&self) -> &I {
        &self.inter
    }

    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.inter
    }

    /// Add a permanent panel. It joins the front of the z-order and can
    /// never be hidden.
    pub fn add_component(&mut self, panel: Box<dyn FixedComponent>) -> PanelId {
        let id = self.panels.insert(panel);
        let mut order = self.order.borrow_mut();
        order.active.push(id);
        order.permanent.push(id);
        id
    }

    /// Add a transient panel, initially hidden. Bring it up with
    /// `show_component` or through its `PanelToggle`.
    pub fn register_component(&mut self, panel: Box<dyn FixedComponent>) -> PanelId {
        self.panels.insert(panel)
    }

    /// Put `id` at the front and run its `enter` hook. No-op if already shown.
    pub fn show_component(&mut self, id: PanelId) {
        if self.panels.contains_key(id) {
            self.order.borrow_mut().show(id);
            self.flush_lifecycle();
        }
    }

    /// Remove `id` and run its `exit` hook. No-op for permanent panels and
    /// for panels that are not shown.
    pub fn hide_component(&mut self, id: PanelId) {
        if self.panels.contains_key(id) {
            self.order.borrow_mut().hide(id);
            self.flush_lifecycle();
        }
    }

    pub fn toggle(&mut self, id: PanelId) {
        if self.panels.contains_key(id) {
            self.order.borrow_mut().toggle(id);
            self.flush_lifecycle();
        }
    }

    pub fn is_on(&self, id: PanelId) -> bool {
        self.order.borrow().is_on(id)
    }

    /// Flag bound to `id`'s membership, for widgets that show or hide it.
    pub fn toggleable(&self, id: PanelId) -> PanelToggle {
        PanelToggle {
            id,
            order: Rc::clone(&self.order),
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&dyn FixedComponent> {
        self.panels.get(id).map(|p| &**p)
    }

    /// Shown panels, back to front.
    pub fn z_order(&self) -> Vec<PanelId> {
        self.order.borrow().active.clone()
    }

    /// Permanent panels in insertion order.
    pub fn permanent(&self) -> Vec<PanelId> {
        self.order.borrow().permanent.clone()
    }

    /// Draw one frame.
    ///
    /// The first pass measures front to back and stops at the first hovered
    /// panel. The second draws back to front with every panel behind that
    /// one marked as occluded. Afterwards the first panel that asked for
    /// focus moves to the front and the front-most hovered description is
    /// handed to the description renderer.
    pub fn render(&mut self) {
        self.flush_lifecycle();
        let snapshot = self.order.borrow().snapshot();
        let inter: &dyn Interface = &self.inter;

        let mut highest = 0;
        for (index, &id) in snapshot.iter().enumerate().rev() {
            let Some(panel) = self.panels.get_mut(id) else {
                continue;
            };
            let mut context = panel_context(inter, &**panel, true);
            panel.get_height(&mut context);
            if context.is_hovered() {
                highest = index;
                break;
            }
        }

        let mut focused = None;
        let mut description = None;
        for (index, &id) in snapshot.iter().enumerate() {
            let Some(panel) = self.panels.get_mut(id) else {
                continue;
            };
            let mut context = panel_context(inter, &**panel, index >= highest);
            panel.render(&mut context);
            if focused.is_none() && context.focus_requested() {
                focused = Some(id);
            }
            if context.is_hovered() && context.description().is_some() {
                description = Some(context);
            }
        }

        if let Some(id) = focused {
            self.order.borrow_mut().promote(id);
        }
        if let (Some(context), Some(renderer)) = (description, self.description_renderer.as_mut()) {
            renderer.render_description(&context);
        }
        self.flush_lifecycle();
    }

    pub fn handle_button(&mut self, button: MouseButton) {
        self.do_component_loop(|panel, context| panel.handle_button(context, button));
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        self.do_component_loop(|panel, context| panel.handle_key(context, key));
    }

    pub fn handle_scroll(&mut self, diff: f32) {
        self.do_component_loop(|panel, context| panel.handle_scroll(context, diff));
    }

    /// GUI opened.
    pub fn enter(&mut self) {
        self.do_component_loop(|panel, context| panel.enter(context));
    }

    /// GUI closed.
    pub fn exit(&mut self) {
        self.do_component_loop(|panel, context| panel.exit(context));
    }

    /// Write every permanent panel's state, keyed by title.
    pub fn save_config(&mut self, config: &mut dyn ConfigList) {
        config.begin(false);
        for id in self.permanent() {
            let Some(panel) = self.panels.get(id) else {
                continue;
            };
            match config.add_panel(panel.title()) {
                Some(section) => panel.save_config(&self.inter, section),
                None => log::debug!("no config section for '{}', skipped", panel.title()),
            }
        }
        config.end(false);
    }

    /// Read back every permanent panel's state. Titles without a stored
    /// section keep their current state.
    pub fn load_config(&mut self, config: &mut dyn ConfigList) {
        config.begin(true);
        for id in self.permanent() {
            let Some(panel) = self.panels.get_mut(id) else {
                continue;
            };
            match config.get_panel(panel.title()) {
                Some(section) => panel.load_config(&self.inter, section),
                None => log::debug!("no stored config for '{}', skipped", panel.title()),
            }
        }
        config.end(true);
    }

    /// Front to back. Panels up to and including the first hovered one are
    /// on top, everything behind it is occluded.
    fn do_component_loop(
        &mut self,
        mut operation: impl FnMut(&mut dyn FixedComponent, &mut Context<'_>),
    ) {
        self.flush_lifecycle();
        let snapshot = self.order.borrow().snapshot();
        let inter: &dyn Interface = &self.inter;

        let mut highest = true;
        let mut focused = None;
        for &id in snapshot.iter().rev() {
            let Some(panel) = self.panels.get_mut(id) else {
                continue;
            };
            let mut context = panel_context(inter, &**panel, highest);
            operation(&mut **panel, &mut context);
            if context.is_hovered() {
                highest = false;
            }
            if focused.is_none() && context.focus_requested() {
                focused = Some(id);
            }
        }

        if let Some(id) = focused {
            self.order.borrow_mut().promote(id);
        }
        self.flush_lifecycle();
    }

    /// Run the `enter`/`exit` hooks queued by membership changes.
    fn flush_lifecycle(&mut self) {
        let pending = std::mem::take(&mut self.order.borrow_mut().pending);
        for event in pending {
            let (id, entering) = match event {
                Lifecycle::Enter(id) => (id, true),
                Lifecycle::Exit(id) => (id, false),
            };
            let Some(panel) = self.panels.get_mut(id) else {
                continue;
            };
            let mut context = panel_context(&self.inter, &**panel, false);
            if entering {
                log::debug!("showing '{}'", panel.title());
                panel.enter(&mut context);
            } else {
                log::debug!("hiding '{}'", panel.title());
                panel.exit(&mut context);
            }
        }
    }
}

/// Root context for a top-level panel. Top-level panels always have focus.
fn panel_context<'a>(
    inter: &'a dyn Interface,
    panel: &dyn FixedComponent,
    on_top: bool,
) -> Context<'a> {
    Context::new(inter, panel.width(inter), panel.position(inter), true, on_top)
}

/// Visibility flag of one panel, bound to its `Gui`'s active list.
///
/// Safe to flip from inside a dispatch pass: the change applies to the next
/// pass and the panel's `enter`/`exit` hook runs once the current pass ends.
#[derive(Clone)]
pub struct PanelToggle {
    id: PanelId,
    order: Rc<RefCell<PanelOrder>>,
}

impl PanelToggle {
    pub fn id(&self) -> PanelId {
        self.id
    }
}

impl BoolSource for PanelToggle {
    fn is_on(&self) -> bool {
        self.order.borrow().is_on(self.id)
    }
}

impl Toggleable for PanelToggle {
    fn toggle(&self) {
        self.order.borrow_mut().toggle(self.id);
    }
}
