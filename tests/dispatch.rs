//! Cross-module dispatch tests: occlusion, focus promotion, membership and
//! persistence, driven through the public `Gui` API.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use winit::keyboard::KeyCode;

use panelgui::ui::{
    BoolSource, Component, ConfigList, Context, DescriptionRenderer, FixedComponent, FixedPanel,
    FixedViewport, Gui, Interface, MouseButton, PanelConfig, PanelId, Point, Rect, RonConfigList,
    ScrollComponent, SettingList, SettingNode, SimpleToggle, Size, Surface, Theme, Toggleable,
};

/// Events in the order they happened, across every recorder.
type Journal = Rc<RefCell<Vec<String>>>;

/// What one recorder saw.
#[derive(Default)]
struct Seen {
    measured: usize,
    render_on_top: Vec<bool>,
    input_on_top: Vec<bool>,
    enters: usize,
    exits: usize,
}

/// Top-level test component: a plain rectangle that records every context
/// it is handed.
struct Recorder {
    title: &'static str,
    rect: Rect,
    seen: Rc<RefCell<Seen>>,
    journal: Journal,
    description: Option<&'static str>,
    /// Ask for focus on every render and key press.
    grab_focus: bool,
    /// Flipped when the recorder is clicked.
    on_click: Option<Box<dyn Toggleable>>,
}

impl Recorder {
    fn new(title: &'static str, rect: Rect, journal: &Journal) -> Self {
        Self {
            title,
            rect,
            seen: Rc::default(),
            journal: Rc::clone(journal),
            description: None,
            grab_focus: false,
            on_click: None,
        }
    }

    fn note(&self, event: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{} {event}", self.title));
    }
}

impl Component for Recorder {
    fn render(&mut self, context: &mut Context<'_>) {
        context.set_height(self.rect.height);
        self.seen.borrow_mut().render_on_top.push(context.on_top());
        if context.is_hovered()
            && let Some(description) = self.description
        {
            context.set_description(description);
        }
        if self.grab_focus {
            context.request_focus();
        }
    }

    fn get_height(&mut self, context: &mut Context<'_>) {
        context.set_height(self.rect.height);
        self.seen.borrow_mut().measured += 1;
    }

    fn handle_button(&mut self, context: &mut Context<'_>, button: MouseButton) {
        context.set_height(self.rect.height);
        self.seen.borrow_mut().input_on_top.push(context.on_top());
        self.note("button");
        if context.is_clicked(button) {
            context.request_focus();
            if let Some(toggle) = &self.on_click {
                toggle.toggle();
            }
        }
    }

    fn handle_key(&mut self, context: &mut Context<'_>, _key: KeyCode) {
        context.set_height(self.rect.height);
        if self.grab_focus {
            context.request_focus();
        }
    }

    fn enter(&mut self, _context: &mut Context<'_>) {
        self.seen.borrow_mut().enters += 1;
        self.note("enter");
    }

    fn exit(&mut self, _context: &mut Context<'_>) {
        self.seen.borrow_mut().exits += 1;
        self.note("exit");
    }
}

impl FixedComponent for Recorder {
    fn title(&self) -> &str {
        self.title
    }

    fn position(&self, _inter: &dyn Interface) -> Point {
        self.rect.pos()
    }

    fn width(&self, _inter: &dyn Interface) -> f32 {
        self.rect.width
    }

    fn save_config(&self, _inter: &dyn Interface, config: &mut dyn PanelConfig) {
        config.save_position(self.rect.pos());
    }

    fn load_config(&mut self, _inter: &dyn Interface, config: &dyn PanelConfig) {
        if let Some(pos) = config.load_position() {
            self.rect.x = pos.x;
            self.rect.y = pos.y;
        }
    }
}

fn new_gui() -> Gui<Surface> {
    Gui::new(Surface::new(Size::new(800.0, 600.0)))
}

/// Adds `recorder` as a permanent panel and returns its id and record.
fn add(gui: &mut Gui<Surface>, recorder: Recorder) -> (PanelId, Rc<RefCell<Seen>>) {
    let seen = Rc::clone(&recorder.seen);
    (gui.add_component(Box::new(recorder)), seen)
}

/// A (back) and B (middle) overlap around (75, 75); C (front) lies elsewhere.
struct Stack {
    gui: Gui<Surface>,
    ids: [PanelId; 3],
    seen: [Rc<RefCell<Seen>>; 3],
}

fn stack(journal: &Journal, configure: impl Fn(&mut Recorder)) -> Stack {
    let mut gui = new_gui();
    let mut a = Recorder::new("A", Rect::new(0.0, 0.0, 100.0, 100.0), journal);
    let mut b = Recorder::new("B", Rect::new(50.0, 50.0, 100.0, 100.0), journal);
    let mut c = Recorder::new("C", Rect::new(300.0, 300.0, 100.0, 100.0), journal);
    for recorder in [&mut a, &mut b, &mut c] {
        configure(recorder);
    }
    let (ia, sa) = add(&mut gui, a);
    let (ib, sb) = add(&mut gui, b);
    let (ic, sc) = add(&mut gui, c);
    gui.interface().set_mouse(Point::new(75.0, 75.0));
    Stack {
        gui,
        ids: [ia, ib, ic],
        seen: [sa, sb, sc],
    }
}

fn render_flags(seen: &[Rc<RefCell<Seen>>; 3]) -> Vec<Vec<bool>> {
    seen.iter()
        .map(|s| s.borrow().render_on_top.clone())
        .collect()
}

#[test]
fn occluded_panels_are_not_on_top() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    s.gui.render();
    assert_eq!(
        render_flags(&s.seen),
        vec![vec![false], vec![true], vec![true]],
        "A is behind the hovered B; B and C are on top"
    );
}

#[test]
fn topmost_detection_stops_at_first_hovered() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    s.gui.render();
    let measured: Vec<usize> = s.seen.iter().map(|x| x.borrow().measured).collect();
    assert_eq!(measured, vec![0, 1, 1], "A is never measured once B is hit");
}

#[test]
fn nothing_hovered_means_everything_on_top() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    s.gui.interface().set_mouse(Point::new(700.0, 10.0));
    s.gui.render();
    assert_eq!(
        render_flags(&s.seen),
        vec![vec![true], vec![true], vec![true]]
    );
}

#[test]
fn clicking_b_brings_it_to_front() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    let [a, b, c] = s.ids;

    s.gui.interface().set_button(MouseButton::Left, true);
    s.gui.handle_button(MouseButton::Left);

    assert_eq!(s.gui.z_order(), vec![a, c, b]);
    let input: Vec<Vec<bool>> = s
        .seen
        .iter()
        .map(|x| x.borrow().input_on_top.clone())
        .collect();
    assert_eq!(input, vec![vec![false], vec![true], vec![true]]);
    // Front to back.
    assert_eq!(*journal.borrow(), vec!["C button", "B button", "A button"]);
}

#[test]
fn button_release_does_not_promote() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    let before = s.gui.z_order();
    s.gui.handle_button(MouseButton::Left);
    assert_eq!(s.gui.z_order(), before);
}

#[test]
fn render_promotes_first_requester_back_to_front() {
    let journal = Journal::default();
    let mut s = stack(&journal, |p| p.grab_focus = p.title != "B");
    let [a, b, c] = s.ids;
    s.gui.render();
    assert_eq!(s.gui.z_order(), vec![b, c, a]);
}

#[test]
fn key_promotes_first_requester_front_to_back() {
    let journal = Journal::default();
    let mut s = stack(&journal, |p| p.grab_focus = p.title != "C");
    let [a, b, c] = s.ids;
    s.gui.handle_key(KeyCode::Enter);
    assert_eq!(s.gui.z_order(), vec![a, c, b]);
}

#[test]
fn front_most_hovered_description_is_rendered() {
    struct Record(Rc<RefCell<Vec<String>>>);
    impl DescriptionRenderer for Record {
        fn render_description(&mut self, context: &Context<'_>) {
            if let Some(text) = context.description() {
                self.0.borrow_mut().push(text.to_string());
            }
        }
    }

    let journal = Journal::default();
    let s = stack(&journal, |p| p.description = Some(p.title));
    let shown = Rc::new(RefCell::new(Vec::new()));
    let mut gui = s
        .gui
        .with_description_renderer(Box::new(Record(Rc::clone(&shown))));
    gui.render();
    assert_eq!(*shown.borrow(), vec!["B"]);
}

#[test]
fn show_is_idempotent() {
    let journal = Journal::default();
    let mut gui = new_gui();
    let recorder = Recorder::new("T", Rect::new(0.0, 0.0, 10.0, 10.0), &journal);
    let seen = Rc::clone(&recorder.seen);
    let t = gui.register_component(Box::new(recorder));

    gui.show_component(t);
    gui.show_component(t);

    assert_eq!(gui.z_order(), vec![t]);
    assert_eq!(seen.borrow().enters, 1);

    gui.hide_component(t);
    gui.hide_component(t);
    assert!(gui.z_order().is_empty());
    assert_eq!(seen.borrow().exits, 1);
}

#[test]
fn permanent_panel_survives_hide() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    let [a, b, c] = s.ids;
    s.gui.hide_component(b);
    assert_eq!(s.gui.z_order(), vec![a, b, c]);
    assert_eq!(s.seen[1].borrow().exits, 0);
}

#[test]
fn toggling_mid_dispatch_applies_after_the_pass() {
    let journal = Journal::default();
    let mut gui = new_gui();

    // Transient panel behind the clicked one.
    let target = Recorder::new("T", Rect::new(0.0, 0.0, 100.0, 100.0), &journal);
    let t = gui.register_component(Box::new(target));
    gui.show_component(t);
    journal.borrow_mut().clear();

    let mut switch = Recorder::new("S", Rect::new(0.0, 0.0, 50.0, 50.0), &journal);
    switch.on_click = Some(Box::new(gui.toggleable(t)));
    let (s, _) = add(&mut gui, switch);

    gui.interface().set_mouse(Point::new(10.0, 10.0));
    gui.interface().set_button(MouseButton::Left, true);
    gui.handle_button(MouseButton::Left);

    assert_eq!(
        *journal.borrow(),
        vec!["S button", "T button", "T exit"],
        "T still receives the pass it was hidden in; exit runs afterwards"
    );
    assert_eq!(gui.z_order(), vec![s]);
    assert!(!gui.toggleable(t).is_on());
}

#[test]
fn gui_enter_and_exit_reach_every_active_panel() {
    let journal = Journal::default();
    let mut s = stack(&journal, |_| {});
    s.gui.enter();
    s.gui.exit();
    for seen in &s.seen {
        assert_eq!(seen.borrow().enters, 1);
        assert_eq!(seen.borrow().exits, 1);
    }
}

#[test]
fn scroll_viewport_clamps_through_gui() {
    struct Tall;
    impl Component for Tall {
        fn render(&mut self, context: &mut Context<'_>) {
            self.get_height(context);
        }
        fn get_height(&mut self, context: &mut Context<'_>) {
            context.set_height(300.0);
        }
    }

    /// Viewport 100 high over 300 of content; publishes its offset.
    struct Viewport {
        scroll: ScrollComponent<Tall, FixedViewport>,
        offset: Rc<RefCell<Point>>,
    }
    impl Component for Viewport {
        fn render(&mut self, context: &mut Context<'_>) {
            self.scroll.render(context);
        }
        fn get_height(&mut self, context: &mut Context<'_>) {
            self.scroll.get_height(context);
        }
        fn handle_scroll(&mut self, context: &mut Context<'_>, diff: f32) {
            self.scroll.handle_scroll(context, diff);
            *self.offset.borrow_mut() = self.scroll.scroll_pos();
        }
    }
    impl FixedComponent for Viewport {
        fn title(&self) -> &str {
            "viewport"
        }
        fn position(&self, _inter: &dyn Interface) -> Point {
            Point::ORIGIN
        }
        fn width(&self, _inter: &dyn Interface) -> f32 {
            100.0
        }
        fn save_config(&self, _inter: &dyn Interface, _config: &mut dyn PanelConfig) {}
        fn load_config(&mut self, _inter: &dyn Interface, _config: &dyn PanelConfig) {}
    }

    let offset = Rc::new(RefCell::new(Point::ORIGIN));
    let mut gui = new_gui();
    gui.add_component(Box::new(Viewport {
        scroll: ScrollComponent::new(Tall, FixedViewport { max_height: 100.0 }),
        offset: Rc::clone(&offset),
    }));
    gui.interface().set_mouse(Point::new(50.0, 50.0));

    gui.handle_scroll(50.0);
    assert_eq!(offset.borrow().y, 50.0);

    gui.handle_scroll(500.0);
    assert_eq!(offset.borrow().y, 200.0);
    assert_eq!(offset.borrow().x, 0.0);

    gui.render();
    assert_eq!(gui.interface().clip_depth(), 0);
}

#[test]
fn config_round_trip_skips_missing_titles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panels.ron");
    let journal = Journal::default();

    // Only A is saved.
    let mut gui = new_gui();
    add(
        &mut gui,
        Recorder::new("A", Rect::new(40.0, 60.0, 100.0, 100.0), &journal),
    );
    let hidden = gui.register_component(Box::new(Recorder::new(
        "transient",
        Rect::new(0.0, 0.0, 10.0, 10.0),
        &journal,
    )));
    gui.show_component(hidden);
    let mut config = RonConfigList::new(&path);
    gui.save_config(&mut config);
    assert_eq!(
        config.panels().keys().collect::<Vec<_>>(),
        vec!["A"],
        "only permanent panels are persisted"
    );

    let mut restored = new_gui();
    let (a, _) = add(
        &mut restored,
        Recorder::new("A", Rect::new(0.0, 0.0, 100.0, 100.0), &journal),
    );
    let (b, _) = add(
        &mut restored,
        Recorder::new("B", Rect::new(5.0, 5.0, 100.0, 100.0), &journal),
    );
    let mut config = RonConfigList::new(&path);
    restored.load_config(&mut config);

    let pos = |id| {
        restored
            .panel(id)
            .map(|p| p.position(restored.interface()))
    };
    assert_eq!(pos(a), Some(Point::new(40.0, 60.0)));
    assert_eq!(pos(b), Some(Point::new(5.0, 5.0)));
}

#[test]
fn load_from_missing_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let journal = Journal::default();
    let mut gui = new_gui();
    let (a, _) = add(
        &mut gui,
        Recorder::new("A", Rect::new(7.0, 8.0, 100.0, 100.0), &journal),
    );
    let mut config = RonConfigList::new(dir.path().join("absent.ron"));
    config.begin(true);
    config.end(true);
    gui.load_config(&mut config);
    let pos = gui.panel(a).map(|p| p.position(gui.interface()));
    assert_eq!(pos, Some(Point::new(7.0, 8.0)));
}

#[test]
fn in_memory_config_round_trip() {
    let journal = Journal::default();
    let mut gui = new_gui();
    add(
        &mut gui,
        Recorder::new("A", Rect::new(40.0, 60.0, 100.0, 100.0), &journal),
    );
    let mut config = RonConfigList::in_memory();
    gui.save_config(&mut config);
    assert_eq!(config.panels().len(), 1);

    let mut restored = new_gui();
    let (a, _) = add(
        &mut restored,
        Recorder::new("A", Rect::new(0.0, 0.0, 100.0, 100.0), &journal),
    );
    restored.load_config(&mut config);
    let pos = restored.panel(a).map(|p| p.position(restored.interface()));
    assert_eq!(pos, Some(Point::new(40.0, 60.0)));
}

#[test]
fn config_parsed_from_ron_text_loads() {
    let journal = Journal::default();
    let mut gui = new_gui();
    let (a, _) = add(
        &mut gui,
        Recorder::new("A", Rect::new(0.0, 0.0, 100.0, 100.0), &journal),
    );
    let mut config =
        RonConfigList::from_ron_str(r#"{"A": (position: Some((12.0, 34.0)))}"#).unwrap();
    gui.load_config(&mut config);
    let pos = gui.panel(a).map(|p| p.position(gui.interface()));
    assert_eq!(pos, Some(Point::new(12.0, 34.0)));
}

/// 22 toggle rows of 16px behind a 60px viewport, below a 20px title bar.
fn long_list_panel(
    flags: &[SimpleToggle],
) -> FixedPanel<ScrollComponent<SettingList, FixedViewport>> {
    let theme = Theme::default();
    let mut root = SettingNode::new("Long");
    for (i, flag) in flags.iter().enumerate() {
        root = root.with_child(SettingNode::new(format!("Row {i}")).with_toggle(flag.clone()));
    }
    let body = ScrollComponent::new(
        SettingList::new(root, &theme),
        FixedViewport { max_height: 60.0 },
    );
    FixedPanel::new("Long", Point::ORIGIN, 100.0, body, &theme)
}

fn click_at(gui: &mut Gui<Surface>, mouse: Point) {
    gui.interface().set_mouse(mouse);
    gui.interface().set_button(MouseButton::Left, true);
    gui.handle_button(MouseButton::Left);
    gui.interface().set_button(MouseButton::Left, false);
}

#[test]
fn rows_scrolled_out_of_view_ignore_clicks() {
    let flags: Vec<SimpleToggle> = (0..22).map(|_| SimpleToggle::new(false)).collect();
    let mut gui = new_gui();
    gui.add_component(Box::new(long_list_panel(&flags)));

    // Row 19 lies here in content space, far below the visible viewport.
    click_at(&mut gui, Point::new(10.0, 337.0));
    assert!(flags.iter().all(|f| !f.is_on()));

    // First visible row.
    click_at(&mut gui, Point::new(10.0, 25.0));
    assert!(flags[0].is_on());
    assert!(flags[1..].iter().all(|f| !f.is_on()));
}

#[test]
fn clip_is_restored_when_scrolled_child_panics() {
    struct Exploding;
    impl Component for Exploding {
        fn render(&mut self, _context: &mut Context<'_>) {
            panic!("render failed");
        }
        fn get_height(&mut self, context: &mut Context<'_>) {
            context.set_height(300.0);
        }
    }

    let surface = Surface::new(Size::new(800.0, 600.0));
    let mut scroll = ScrollComponent::new(Exploding, FixedViewport { max_height: 100.0 });
    let mut ctx = Context::new(&surface, 100.0, Point::ORIGIN, true, true);
    let result = panic::catch_unwind(AssertUnwindSafe(|| scroll.render(&mut ctx)));

    assert!(result.is_err());
    assert_eq!(surface.clip_depth(), 0);
}
