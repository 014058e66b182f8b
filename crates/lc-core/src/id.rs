use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an element on the canvas.
///
/// Ids are sequential and double as the element's position in the
/// collection, so `elements[id.index()]` is always the element itself.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    pub const fn new(index: usize) -> Self {
        ElementId(index)
    }

    /// The id that the next element appended to `elements` will receive.
    pub fn next_for<T>(elements: &[T]) -> Self {
        ElementId(elements.len())
    }

    /// Position of the element in its collection.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
