use crate::units::Pt;

/// The vertical position of the next element on a page. Starts near the top and
/// only ever moves down; each page owns its own cursor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cursor {
    y: Pt,
}

impl Cursor {
    pub fn at(y: Pt) -> Cursor {
        Cursor { y }
    }

    pub fn y(&self) -> Pt {
        self.y
    }

    /// Move down by `amount`
    pub fn advance(&mut self, amount: Pt) {
        self.y -= amount;
    }

    /// Whether the cursor is still at or above `floor`
    pub fn is_above(&self, floor: Pt) -> bool {
        self.y >= floor
    }
}
