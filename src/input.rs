//! Logical input capability consumed by the actor controller.
//!
//! The engine never polls devices. Whatever owns the real input (keyboard,
//! gamepad, replay stream, test fixture) implements [`InputSource`] over
//! the closed set of logical actions below.

/// Logical actions the movement controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    /// Debug noclip toggle; only honored when the actor enables it.
    FreeFly,
}

/// Opaque input query, sampled once per frame by the actor controller.
pub trait InputSource {
    /// Is the action currently held down?
    fn is_held(&self, action: Action) -> bool;

    /// Did the action transition to held since the last frame?
    fn is_just_pressed(&self, action: Action) -> bool;
}
