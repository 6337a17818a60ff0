/*!
Collision root module.

This module re-exports submodules that implement AABB collision for the
platformer world: detection is velocity-swept, resolution is priority
ordered, and both run in a single synchronous pass per frame. The code is
split for clarity:

- types:  shared data types (Vec2, Side, Rect)
- detect: pairwise overlap and contact-side classification
- world:  body registries, resolution ordering, and dispatch
*/

pub mod detect;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use detect::{classify_pair, PairContact};
pub use types::{Rect, Side, Vec2};
pub use world::{BodyHandle, CollisionWorld, Contact, ContactView};
