#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

/// A payload which records how many times a value sharing its counter has been dropped.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<Cell<usize>>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Rc::new(Cell::new(0)))
    }

    /// Returns the number of drops recorded so far.
    pub fn drops(&self) -> usize {
        self.0.get()
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
