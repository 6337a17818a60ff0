/*!
Deterministic 2D axis-aligned collision engine for a platform-style game.

The engine integrates velocities into positions, detects overlaps between
dynamic bodies and fixed/static obstacles, classifies each overlap by
contact side using the dynamic body's velocity, and resolves it by
displacing the body and zeroing the offending velocity component. An actor
controller layers a grounded / wall-sliding / ledge-climbing movement state
machine on top, driven by collision events and logical input.

Everything is single-threaded and frame-synchronous. A frame looks like:

```no_run
use platformer_physics::{
    Actor, CollisionWorld, InputSource, KinematicClass, RigidBody, Transform, Vec2,
};

# struct NoInput;
# impl InputSource for NoInput {
#     fn is_held(&self, _: platformer_physics::Action) -> bool { false }
#     fn is_just_pressed(&self, _: platformer_physics::Action) -> bool { false }
# }
let mut world = CollisionWorld::default();
let handle = world.insert(RigidBody::new(
    Transform::shared(Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0)),
    KinematicClass::Dynamic,
));
let mut actor = Actor::new(handle, Vec2::new(0.5, 0.0));
let input = NoInput;

let dt = 1.0 / 60.0;
actor.update(&mut world, &input, dt);
world.step(dt, |body, view| actor.observe(body, view));
```

Coordinates are Y-down: gravity is a positive `y` acceleration and a jump
is a negative `y` impulse. Rotation is not supported; bodies are always
axis-aligned boxes.
*/

pub mod actor;
pub mod body;
pub mod collision;
pub mod input;
pub mod settings;

pub use actor::{Actor, ActorState, ActorTuning};
pub use body::{KinematicClass, RigidBody, SharedTransform, Transform};
pub use collision::{
    BodyHandle, CollisionWorld, Contact, ContactView, PairContact, Rect, Side, Vec2,
};
pub use input::{Action, InputSource};
pub use settings::{CONTACT_OFFSET, DEFAULT_GRAVITY};
