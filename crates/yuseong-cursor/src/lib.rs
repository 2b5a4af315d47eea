//! Pointer position tracking.
//!
//! The terminal reports mouse movement as events; this crate keeps the
//! latest position as a small piece of shared state the UI reads from.

/// Terminal cell position of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    /// Column, zero-based from the left edge.
    pub x: u16,
    /// Row, zero-based from the top edge.
    pub y: u16,
}

/// Tracks the last reported pointer position.
///
/// Every mouse movement event is recorded; consumers read `position` when
/// rendering and can compare `moves` across frames to detect updates.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Option<PointerPosition>,
    moves: u64,
}

impl PointerTracker {
    /// Create a tracker with no position yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer movement.
    pub fn update(&mut self, x: u16, y: u16) {
        self.position = Some(PointerPosition { x, y });
        self.moves += 1;
    }

    /// Latest position, or `None` before the first movement.
    pub fn position(&self) -> Option<PointerPosition> {
        self.position
    }

    /// Number of movements recorded so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }
}
