use std::cell::Cell;
use std::rc::Rc;

/// Read-only boolean source. Evaluated by whoever asks, never cached.
pub trait BoolSource {
    fn is_on(&self) -> bool;
}

/// Boolean flag that can be flipped.
///
/// `toggle` takes `&self`: implementors are shared handles (widgets and the
/// dispatcher both hold them) with the state kept behind a cell.
pub trait Toggleable: BoolSource {
    fn toggle(&self);
}

impl BoolSource for bool {
    fn is_on(&self) -> bool {
        *self
    }
}

/// Shared in-memory flag. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct SimpleToggle(Rc<Cell<bool>>);

impl SimpleToggle {
    pub fn new(on: bool) -> Self {
        Self(Rc::new(Cell::new(on)))
    }

    pub fn set(&self, on: bool) {
        self.0.set(on);
    }
}

impl BoolSource for SimpleToggle {
    fn is_on(&self) -> bool {
        self.0.get()
    }
}

impl Toggleable for SimpleToggle {
    fn toggle(&self) {
        self.0.set(!self.0.get());
    }
}
