use super::toggle::{BoolSource, Toggleable};

/// Something with a name, an optional description and a visibility flag.
pub trait Labeled {
    fn display_name(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Externally owned visibility. Consumers evaluate it every time they
    /// walk the tree.
    fn is_visible(&self) -> &dyn BoolSource;
}

/// Node of a settings tree.
pub trait Setting: Labeled {
    /// Child settings. Each call starts a fresh walk.
    fn sub_settings(&self) -> Box<dyn Iterator<Item = &dyn Setting> + '_>;

    /// Flag backing this setting, if it is a boolean setting.
    fn toggleable(&self) -> Option<&dyn Toggleable> {
        None
    }
}

/// A visible setting with its nesting depth below the walked root.
#[derive(Clone, Copy)]
pub struct VisibleSetting<'s> {
    pub setting: &'s dyn Setting,
    pub depth: usize,
}

/// Depth-first list of the visible descendants of `root` (root excluded).
/// A hidden setting hides its whole subtree.
pub fn visible_settings(root: &dyn Setting) -> Vec<VisibleSetting<'_>> {
    let mut out = Vec::new();
    collect_visible(root, 0, &mut out);
    out
}

fn collect_visible<'s>(node: &'s dyn Setting, depth: usize, out: &mut Vec<VisibleSetting<'s>>) {
    for child in node.sub_settings() {
        if !child.is_visible().is_on() {
            continue;
        }
        out.push(VisibleSetting {
            setting: child,
            depth,
        });
        collect_visible(child, depth + 1, out);
    }
}

// ---------------------------------------------------------------------------
// SettingNode
// ---------------------------------------------------------------------------

/// Plain owned settings tree node.
pub struct SettingNode {
    name: String,
    description: Option<String>,
    visible: Box<dyn BoolSource>,
    toggle: Option<Box<dyn Toggleable>>,
    children: Vec<SettingNode>,
}

impl SettingNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            visible: Box::new(true),
            toggle: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, visible: impl BoolSource + 'static) -> Self {
        self.visible = Box::new(visible);
        self
    }

    pub fn with_toggle(mut self, toggle: impl Toggleable + 'static) -> Self {
        self.toggle = Some(Box::new(toggle));
        self
    }

    pub fn with_child(mut self, child: SettingNode) -> Self {
        self.children.push(child);
        self
    }
}

impl Labeled for SettingNode {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_visible(&self) -> &dyn BoolSource {
        self.visible.as_ref()
    }
}

impl Setting for SettingNode {
    fn sub_settings(&self) -> Box<dyn Iterator<Item = &dyn Setting> + '_> {
        Box::new(self.children.iter().map(|c| c as &dyn Setting))
    }

    fn toggleable(&self) -> Option<&dyn Toggleable> {
        self.toggle.as_deref()
    }
}
