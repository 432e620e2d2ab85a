//! Typed grid notifications with a minimal publish/subscribe fan-out.
//!
//! The grid side emits; the control panel (and optionally the host page)
//! subscribes. This replaces the original DOM CustomEvent plumbing — no
//! host-platform base class is involved.

use std::cell::RefCell;

/// Pointer position of the originating interaction, in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// A cell as carried by [`GridEvent::AfterLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCell {
    pub row: i32,
    pub col: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    /// A layout pass replaced the whole cell set.
    AfterLayout { cells: Vec<LayoutCell> },
    /// A cell's visual region was activated by direct interaction.
    CellActivated { row: i32, col: i32, pointer: Pointer },
    /// The pointer entered a placed shape's region.
    CellHovered {
        shape: usize,
        label: Option<String>,
        pointer: Pointer,
    },
}

type Listener = Box<dyn Fn(&GridEvent)>;

/// Listener registry. Emission happens only after board mutation
/// completes, so listeners are free to call back into the board.
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&GridEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn emit(&self, event: &GridEvent) {
        for listener in self.listeners.borrow().iter() {
            listener(event);
        }
    }
}
