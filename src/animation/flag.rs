use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A shared boolean that a controller writes and views read.
///
/// Clones observe the same value. Only the owning controller can change it.
#[derive(Clone, Default)]
pub struct Flag(Rc<Cell<bool>>);

impl Flag {
    pub fn new(value: bool) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn set(&self, value: bool) {
        self.0.set(value);
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Flag").field(&self.get()).finish()
    }
}
