/*!
Platformer movement controller: a dynamic body specialization driving a
grounded / wall-sliding / ledge-climbing state machine from collision
events and logical input.

The controller is the world's primary dynamic-body client. Each frame:

1. [`Actor::update`] consumes the previous frame's state, applies
   input-driven velocity changes, and resets the state to `Airborne`.
2. The world integrates and resolves collisions;
   [`Actor::observe`] runs as the contact observer and re-promotes the
   state from fresh events only (state is never latched across frames
   without a fresh event; ledge climbing persists exactly as long as wall
   contact does).

Resting contact is refreshed by gravity itself: the default resolution
leaves a grounded body separated by the contact offset and zeroes its
vertical velocity, and next frame's gravity sinks it back into detection
range. Gravity therefore never accumulates while grounded, without any
latched ground flag.
*/

use crate::body::RigidBody;
use crate::collision::{BodyHandle, CollisionWorld, ContactView, Side, Vec2};
use crate::input::{Action, InputSource};
use crate::settings::CONTACT_OFFSET;

/// Movement state, re-derived every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorState {
    Airborne,
    Grounded,
    /// Pressed against a wall on the given side of the actor.
    WallSliding(Side),
    /// Climbing the top edge of a wall on the given side.
    LedgeClimbing(Side),
}

/// Movement tuning. Speeds are world units per second, charges seconds.
#[derive(Clone, Copy, Debug)]
pub struct ActorTuning {
    pub max_speed: f32,
    pub acceleration: f32,
    pub min_jump_speed: f32,
    pub max_jump_speed: f32,
    /// Cap on jump charge; release interpolates between the min and max
    /// jump speeds by charge fraction.
    pub max_jump_charge: f32,
    pub max_wall_slide_speed: f32,
    /// Constant upward-drag applied per frame while sliding upward along a wall.
    pub wall_slide_drag: f32,
    /// Horizontal speed holding the actor against the wall while sliding
    /// or climbing.
    pub wall_hold_speed: f32,
    pub min_wall_jump_speed: f32,
    pub max_wall_jump_speed: f32,
    pub max_wall_jump_charge: f32,
    /// Vertical-to-horizontal velocity ratio of a wall jump.
    pub wall_jump_ratio: f32,
    pub ledge_climb_speed: f32,
    /// Fraction of actor height below which a ledge is climbable.
    pub ledge_climb_ratio: f32,
    /// Falling past this +Y depth respawns the actor at its spawn point.
    pub kill_depth: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            acceleration: 12.0,
            min_jump_speed: 4.0,
            max_jump_speed: 10.0,
            max_jump_charge: 0.4,
            max_wall_slide_speed: 3.0,
            wall_slide_drag: 0.5,
            wall_hold_speed: 1.8,
            min_wall_jump_speed: 4.0,
            max_wall_jump_speed: 10.0,
            max_wall_jump_charge: 0.4,
            wall_jump_ratio: 1.5,
            ledge_climb_speed: 2.0,
            ledge_climb_ratio: 0.95,
            kill_depth: 10.0,
        }
    }
}

/// Controller state for one dynamic body.
pub struct Actor {
    handle: BodyHandle,
    pub tuning: ActorTuning,
    state: ActorState,
    jump_charge: f32,
    wall_jump_charge: f32,
    /// Feet-to-wall-top gap recorded while wall sliding; gates ledge climbs.
    ledge_height: f32,
    /// Wall side contacted during the last collision pass, consumed by the
    /// ledge-climb continuation check.
    wall_contact: Option<Side>,
    spawn_point: Vec2,
    /// Allow toggling free-fly (noclip) via [`Action::FreeFly`].
    pub free_fly_enabled: bool,
    free_fly: bool,
}

impl Actor {
    pub fn new(handle: BodyHandle, spawn_point: Vec2) -> Self {
        Self {
            handle,
            tuning: ActorTuning::default(),
            state: ActorState::Airborne,
            jump_charge: 0.0,
            wall_jump_charge: 0.0,
            ledge_height: 0.0,
            wall_contact: None,
            spawn_point,
            free_fly_enabled: false,
            free_fly: false,
        }
    }

    #[inline]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    #[inline]
    pub fn state(&self) -> ActorState {
        self.state
    }

    #[inline]
    pub fn ledge_height(&self) -> f32 {
        self.ledge_height
    }

    #[inline]
    pub fn is_free_flying(&self) -> bool {
        self.free_fly
    }

    /// Charge of whichever jump is currently accumulating, in `0.0..=1.0`.
    /// Intended for UI readouts (e.g. a jump bar).
    pub fn jump_charge_fraction(&self) -> f32 {
        match self.state {
            ActorState::Grounded => self.jump_charge / self.tuning.max_jump_charge,
            ActorState::WallSliding(_) => self.wall_jump_charge / self.tuning.max_wall_jump_charge,
            _ => 0.0,
        }
    }

    /// Reset to the spawn point with all motion and charges cleared.
    pub fn respawn(&mut self, body: &mut RigidBody) {
        body.set_position(self.spawn_point);
        body.velocity = Vec2::zeros();
        self.jump_charge = 0.0;
        self.wall_jump_charge = 0.0;
        self.state = ActorState::Airborne;
    }

    /// Per-frame input and state update. Run before the world's physics
    /// step for the frame.
    ///
    /// Consumes the state derived from last frame's collision pass, applies
    /// the input-driven transitions and per-state velocity shaping, then
    /// resets the state to `Airborne` (ledge climbing excepted; it
    /// persists while wall contact does). If the actor's body has been
    /// removed from the world this is a no-op.
    pub fn update(&mut self, world: &mut CollisionWorld, input: &dyn InputSource, dt: f32) {
        let tuning = self.tuning;
        let Some(body) = world.body_mut(self.handle) else {
            return;
        };

        if input.is_just_pressed(Action::FreeFly) {
            if self.free_fly {
                self.free_fly = false;
                self.state = ActorState::Airborne;
                body.velocity = Vec2::zeros();
                body.responds_to_collisions = true;
            } else if self.free_fly_enabled {
                self.free_fly = true;
            }
        }
        if self.free_fly {
            self.update_free_fly(body, input, dt);
            return;
        }

        if body.position().y > tuning.kill_depth {
            self.respawn(body);
        }

        // Fresh wall-contact evidence from the previous collision pass.
        let wall_contact = self.wall_contact.take();

        // Ledge climbing persists only while the wall is still touched.
        let mut state = self.state;
        if let ActorState::LedgeClimbing(side) = state {
            if wall_contact != Some(side) {
                state = ActorState::Airborne;
            }
        }
        let mut climbing = match state {
            ActorState::LedgeClimbing(side) => Some(side),
            _ => None,
        };

        if state == ActorState::Grounded {
            self.update_grounded(body, input, dt);
        } else {
            self.jump_charge = 0.0;
        }

        let mut wall_sliding = match state {
            ActorState::WallSliding(side) => Some(side),
            _ => None,
        };
        if let Some(side) = wall_sliding {
            if input.is_held(Action::Down) {
                // Let go of the wall.
                self.wall_jump_charge = 0.0;
                wall_sliding = None;
            } else if input.is_held(Action::Up)
                && self.ledge_height <= body.size().y * tuning.ledge_climb_ratio
            {
                self.wall_jump_charge = 0.0;
                climbing = Some(side);
                wall_sliding = None;
            } else if input.is_held(Action::Jump) {
                self.wall_jump_charge =
                    (self.wall_jump_charge + dt).min(tuning.max_wall_jump_charge);
            } else {
                if self.wall_jump_charge > 0.0 {
                    let fraction = self.wall_jump_charge / tuning.max_wall_jump_charge;
                    let speed = tuning.min_wall_jump_speed
                        + (tuning.max_wall_jump_speed - tuning.min_wall_jump_speed) * fraction;
                    let away = if side == Side::Left { 1.0 } else { -1.0 };
                    body.velocity = Vec2::new(away, -tuning.wall_jump_ratio).normalize() * speed;
                    wall_sliding = None;
                }
                self.wall_jump_charge = 0.0;
            }
        } else {
            self.wall_jump_charge = 0.0;
        }

        // Per-state velocity shaping.
        if let Some(side) = climbing {
            // Into the wall to keep contact, upward to rise past its edge.
            let toward = if side == Side::Left { -1.0 } else { 1.0 };
            body.velocity = Vec2::new(tuning.wall_hold_speed * toward, -tuning.ledge_climb_speed);
        } else if let Some(side) = wall_sliding {
            let toward = if side == Side::Left { -1.0 } else { 1.0 };
            body.velocity.x = tuning.wall_hold_speed * toward;
            if body.velocity.y > tuning.max_wall_slide_speed {
                body.velocity.y = tuning.max_wall_slide_speed;
            } else if body.velocity.y < 0.0 {
                body.velocity.y += tuning.wall_slide_drag.min(-body.velocity.y);
            }
        }

        // Climbing overrides velocity wholesale; gravity stays on otherwise
        // so resting contact re-detects every frame.
        body.feels_gravity = climbing.is_none();

        // Re-derive from scratch: this frame's collision pass promotes
        // Grounded/WallSliding again if the contacts are still there.
        self.state = match climbing {
            Some(side) => ActorState::LedgeClimbing(side),
            None => ActorState::Airborne,
        };
    }

    fn update_grounded(&mut self, body: &mut RigidBody, input: &dyn InputSource, dt: f32) {
        let tuning = self.tuning;

        let mut direction = 0i32;
        if input.is_held(Action::Left) {
            direction -= 1;
        }
        if input.is_held(Action::Right) {
            direction += 1;
        }
        let accel = tuning.acceleration * dt;
        if direction == 0 {
            // No input: decay toward rest, snapping once within one step.
            if body.velocity.x.abs() < accel {
                body.velocity.x = 0.0;
            } else {
                direction = if body.velocity.x > 0.0 { -1 } else { 1 };
            }
        }
        body.velocity.x =
            (body.velocity.x + accel * direction as f32).clamp(-tuning.max_speed, tuning.max_speed);

        if input.is_held(Action::Jump) {
            self.jump_charge = (self.jump_charge + dt).min(tuning.max_jump_charge);
        } else {
            if self.jump_charge > 0.0 {
                let fraction = self.jump_charge / tuning.max_jump_charge;
                let speed = tuning.min_jump_speed
                    + (tuning.max_jump_speed - tuning.min_jump_speed) * fraction;
                body.velocity.y = -speed;
            }
            self.jump_charge = 0.0;
        }
    }

    fn update_free_fly(&mut self, body: &mut RigidBody, input: &dyn InputSource, dt: f32) {
        let mut direction = Vec2::zeros();
        if input.is_held(Action::Left) {
            direction.x -= 1.0;
        }
        if input.is_held(Action::Right) {
            direction.x += 1.0;
        }
        if input.is_held(Action::Up) {
            direction.y -= 1.0;
        }
        if input.is_held(Action::Down) {
            direction.y += 1.0;
        }
        let position = body.position() + direction * self.tuning.max_speed * dt;
        body.set_position(position);
        body.velocity = Vec2::zeros();
        body.feels_gravity = false;
        body.responds_to_collisions = false;
        self.jump_charge = 0.0;
        self.wall_jump_charge = 0.0;
        self.wall_contact = None;
        self.state = ActorState::Airborne;
    }

    /// Collision observer, to be passed to the world's resolution pass.
    ///
    /// Promotes the state from fresh contacts: a real bottom contact means
    /// grounded, a real side contact while airborne starts a wall slide and
    /// records the ledge height. Contact extents are read from the
    /// dispatch-time overlap, so a contact already resolved away by an
    /// earlier, larger correction no longer qualifies.
    pub fn observe(&mut self, _body: &mut RigidBody, view: &ContactView<'_>) {
        if view.contact.body != self.handle || self.free_fly {
            return;
        }

        let side = view.contact.side;
        if side.is_horizontal_surface() {
            if side == Side::Bottom
                && view.overlap.width() > CONTACT_OFFSET
                && self.state != ActorState::Grounded
            {
                self.state = ActorState::Grounded;
            }
            return;
        }

        if view.overlap.height() <= CONTACT_OFFSET {
            return;
        }
        let height = view.body_bounds.bottom - view.other_bounds.top;
        match self.state {
            ActorState::Airborne => {
                self.state = ActorState::WallSliding(side);
                self.ledge_height = height;
                self.wall_contact = Some(side);
            }
            ActorState::WallSliding(current) if current == side => {
                // Multiple walls on the same side this frame: gate climbs on
                // the tallest one.
                self.ledge_height = self.ledge_height.max(height);
                self.wall_contact = Some(side);
            }
            ActorState::LedgeClimbing(current) if current == side => {
                self.ledge_height = height;
                self.wall_contact = Some(side);
            }
            ActorState::WallSliding(_) | ActorState::LedgeClimbing(_) => {
                // Walls touching both sides at once: diagnosable anomaly,
                // reported but not acted on.
                log::warn!("wall contact on both sides of the actor in one frame");
            }
            ActorState::Grounded => {}
        }
    }
}
