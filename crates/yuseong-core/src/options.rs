//! Meteor construction options.

/// Options fixed when a meteor effect is created.
///
/// `length` and `width` are in terminal cells and stay live after
/// construction: drawing reads them every frame, and the collision
/// sequence animates them toward zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorOptions {
    /// Whether the flight-end signal triggers the collision sequence.
    pub collision: bool,
    /// Tail length from the canvas midline to the apex, in cells.
    pub length: f32,
    /// Head diameter, in cells.
    pub width: f32,
}

impl Default for MeteorOptions {
    fn default() -> Self {
        Self {
            collision: true,
            length: 11.0,
            width: 2.0,
        }
    }
}
