use std::path::PathBuf;

use winit::keyboard::KeyCode;

use panelgui::ui::{
    FixedComponent, FixedPanel, FixedViewport, Gui, MouseButton, Point, RonConfigList,
    ScrollComponent, SettingList, SettingNode, SimpleToggle, Size, Surface, Theme, Toggleable,
    TooltipRenderer,
};

const SCREEN: Size = Size::new(1280.0, 720.0);

/// Scripted input, one entry per frame.
enum Input {
    Move,
    Click(MouseButton),
    Scroll(f32),
    Key(KeyCode),
}

fn config_path() -> PathBuf {
    std::env::var_os("PANELGUI_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("panelgui.ron"))
}

fn combat_settings(help: impl Toggleable + 'static) -> SettingNode {
    let aura = SimpleToggle::new(true);
    let mut root = SettingNode::new("Combat")
        .with_child(
            SettingNode::new("Aura")
                .with_description("Attack everything in range")
                .with_toggle(aura.clone()),
        )
        .with_child(
            SettingNode::new("Aura options")
                .with_visibility(aura)
                .with_child(SettingNode::new("Range"))
                .with_child(SettingNode::new("Delay")),
        )
        .with_child(
            SettingNode::new("Show help")
                .with_description("Open the help panel")
                .with_toggle(help),
        );
    for i in 0..12 {
        root = root.with_child(SettingNode::new(format!("Filter {i}")));
    }
    root
}

fn main() {
    env_logger::init();

    let theme = Theme::default();
    let surface = Surface::new(SCREEN);
    let tooltip = TooltipRenderer::new(theme.clone(), surface.screen());
    let mut gui = Gui::new(surface).with_description_renderer(Box::new(tooltip));

    let help = gui.register_component(Box::new(FixedPanel::new(
        "Help",
        Point::new(400.0, 60.0),
        220.0,
        SettingList::new(
            SettingNode::new("Help")
                .with_child(SettingNode::new("Left-click a title to focus"))
                .with_child(SettingNode::new("Right-click a title to collapse")),
            &theme,
        ),
        &theme,
    )));
    let help_toggle = gui.toggleable(help);
    log::debug!("help panel {:?} bound to the combat list", help_toggle.id());
    let combat_body = ScrollComponent::new(
        SettingList::new(combat_settings(help_toggle), &theme),
        FixedViewport { max_height: 120.0 },
    );
    let combat = gui.add_component(Box::new(FixedPanel::new(
        "Combat",
        Point::new(40.0, 40.0),
        180.0,
        combat_body,
        &theme,
    )));
    let render_body = SettingList::new(
        SettingNode::new("Render")
            .with_child(SettingNode::new("Tracers").with_toggle(SimpleToggle::new(false)))
            .with_child(SettingNode::new("Nametags").with_toggle(SimpleToggle::new(true))),
        &theme,
    );
    let render = gui.add_component(Box::new(FixedPanel::new(
        "Render",
        Point::new(120.0, 70.0),
        180.0,
        render_body,
        &theme,
    )));

    let mut config = RonConfigList::new(config_path());
    if let Some(path) = config.path() {
        log::info!("panel config at {}", path.display());
    }
    gui.load_config(&mut config);
    gui.enter();

    let script = [
        (Point::new(60.0, 50.0), Input::Move),
        // Title of Combat, partly under Render.
        (Point::new(60.0, 50.0), Input::Click(MouseButton::Left)),
        (Point::new(60.0, 100.0), Input::Scroll(48.0)),
        (Point::new(60.0, 100.0), Input::Scroll(1000.0)),
        (Point::new(60.0, 70.0), Input::Move),
        (Point::new(200.0, 80.0), Input::Click(MouseButton::Right)),
        (Point::new(60.0, 70.0), Input::Key(KeyCode::Escape)),
    ];

    for (frame, (mouse, input)) in script.into_iter().enumerate() {
        gui.interface().set_mouse(mouse);
        match input {
            Input::Move => {}
            Input::Click(button) => {
                gui.interface().set_button(button, true);
                gui.handle_button(button);
                gui.interface().set_button(button, false);
                gui.handle_button(button);
            }
            Input::Scroll(diff) => gui.handle_scroll(diff),
            Input::Key(key) => gui.handle_key(key),
        }

        gui.interface().begin_frame();
        gui.render();

        let titles: Vec<&str> = gui
            .z_order()
            .into_iter()
            .filter_map(|id| gui.panel(id).map(|p| p.title()))
            .collect();
        let draw_list = gui.interface().draw_list();
        log::info!(
            "frame {frame}: z-order {titles:?}, {} quads, {} text runs",
            draw_list.panels.len(),
            draw_list.texts.len()
        );
    }

    log::info!(
        "combat on={} render on={} help on={}",
        gui.is_on(combat),
        gui.is_on(render),
        gui.is_on(help)
    );

    gui.exit();
    gui.save_config(&mut config);
}
