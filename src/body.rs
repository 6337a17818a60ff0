//! Rigid bodies: kinematic classes, velocity integration, and the default
//! collision response.
//!
//! A body never stores a position of its own. It reads and writes the
//! position of its owning game object through a [`SharedTransform`], so the
//! rendering/gameplay side and the physics side always agree on where the
//! object is.

use std::cell::RefCell;
use std::rc::Rc;

use crate::collision::{Rect, Side, Vec2};
use crate::settings::CONTACT_OFFSET;

/// Position, size, and pivot of a game object, owned by the game side and
/// shared with the physics body that moves it.
///
/// `pivot` is the offset from `position` to the body's top-left corner, so a
/// zero pivot means `position` *is* the top-left corner.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub position: Vec2,
    pub size: Vec2,
    pub pivot: Vec2,
}

/// Shared handle to a [`Transform`]. The engine is single-threaded and
/// frame-synchronous, hence `Rc<RefCell<_>>` rather than a lock.
pub type SharedTransform = Rc<RefCell<Transform>>;

impl Transform {
    /// Convenience constructor for the common zero-pivot case.
    #[inline]
    pub fn shared(position: Vec2, size: Vec2) -> SharedTransform {
        Self::shared_with_pivot(position, size, Vec2::zeros())
    }

    #[inline]
    pub fn shared_with_pivot(position: Vec2, size: Vec2, pivot: Vec2) -> SharedTransform {
        Rc::new(RefCell::new(Transform {
            position,
            size,
            pivot,
        }))
    }
}

/// How a body participates in the simulation.
///
/// - `Fixed`: never moves; velocity is ignored entirely.
/// - `Static`: unaffected by gravity and collision response, but moves if a
///   velocity or position is assigned externally.
/// - `Dynamic`: subject to gravity and collision resolution; may only collide
///   against non-`Dynamic` bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KinematicClass {
    Fixed,
    Static,
    Dynamic,
}

/// An axis-aligned rigid body.
pub struct RigidBody {
    class: KinematicClass,
    pub velocity: Vec2,
    pub feels_gravity: bool,
    /// When cleared, the default collision response is skipped for this
    /// body; contacts are still detected and observed.
    pub responds_to_collisions: bool,
    /// Stamped by the world at registration; units/s^2, +Y is down.
    gravity_strength: f32,
    transform: SharedTransform,
}

impl RigidBody {
    pub fn new(transform: SharedTransform, class: KinematicClass) -> Self {
        Self {
            class,
            velocity: Vec2::zeros(),
            feels_gravity: true,
            responds_to_collisions: true,
            gravity_strength: 0.0,
            transform,
        }
    }

    /// The kinematic class is immutable after construction.
    #[inline]
    pub fn class(&self) -> KinematicClass {
        self.class
    }

    #[inline]
    pub fn gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    pub(crate) fn set_gravity_strength(&mut self, strength: f32) {
        self.gravity_strength = strength;
    }

    #[inline]
    pub fn transform(&self) -> &SharedTransform {
        &self.transform
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.borrow().position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.borrow_mut().position = position;
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.transform.borrow().size
    }

    /// World-space bounds: top-left at `position - pivot`, extent `size`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        let t = self.transform.borrow();
        Rect::new(t.position - t.pivot, t.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        let t = self.transform.borrow();
        t.position - t.pivot + t.size * 0.5
    }

    /// Integrate velocity into position over `dt` seconds.
    ///
    /// Fixed bodies never move. Dynamic bodies accumulate gravity first when
    /// `feels_gravity` is set; all non-Fixed bodies then translate by
    /// `velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        if self.class == KinematicClass::Fixed {
            return;
        }
        if self.class == KinematicClass::Dynamic && self.feels_gravity {
            self.velocity.y += self.gravity_strength * dt;
        }
        let delta = self.velocity * dt;
        self.transform.borrow_mut().position += delta;
    }

    /// Translate the body so the named edge of its bounds sits at `value`.
    pub fn position_side(&mut self, side: Side, value: f32) {
        let delta = value - self.bounds().side(side);
        let mut t = self.transform.borrow_mut();
        if side.is_horizontal_surface() {
            t.position.y += delta;
        } else {
            t.position.x += delta;
        }
    }

    /// Default collision response: push out along the contact axis and kill
    /// the velocity component on that axis.
    ///
    /// No-op unless the body is Dynamic with `responds_to_collisions` set.
    /// The intersection is re-tested
    /// against current bounds first; a contact already resolved by an
    /// earlier, larger correction this frame dispatches as a no-op, which is
    /// what prevents double-correction within a frame.
    pub fn handle_collision(&mut self, side: Side, other_bounds: &Rect) {
        if self.class != KinematicClass::Dynamic || !self.responds_to_collisions {
            return;
        }
        if !self.bounds().intersects(other_bounds) {
            return;
        }

        match side {
            Side::Top => {
                self.position_side(Side::Top, other_bounds.bottom + CONTACT_OFFSET);
                self.velocity.y = 0.0;
            }
            Side::Bottom => {
                self.position_side(Side::Bottom, other_bounds.top - CONTACT_OFFSET);
                self.velocity.y = 0.0;
            }
            Side::Left => {
                self.position_side(Side::Left, other_bounds.right + CONTACT_OFFSET);
                self.velocity.x = 0.0;
            }
            Side::Right => {
                self.position_side(Side::Right, other_bounds.left - CONTACT_OFFSET);
                self.velocity.x = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(class: KinematicClass, pos: Vec2, size: Vec2) -> RigidBody {
        RigidBody::new(Transform::shared(pos, size), class)
    }

    #[test]
    fn fixed_bodies_never_move() {
        // Position must be unchanged for any velocity, including with gravity.
        for vel in [
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, -3.0),
            Vec2::new(-100.0, 100.0),
        ] {
            let mut body = body_at(KinematicClass::Fixed, Vec2::new(1.0, 2.0), Vec2::new(1.0, 1.0));
            body.velocity = vel;
            body.set_gravity_strength(10.0);
            for _ in 0..10 {
                body.integrate(0.016);
            }
            assert_eq!(body.position(), Vec2::new(1.0, 2.0));
        }
    }

    #[test]
    fn static_bodies_move_by_assigned_velocity_but_ignore_gravity() {
        let mut body = body_at(KinematicClass::Static, Vec2::zeros(), Vec2::new(1.0, 1.0));
        body.velocity = Vec2::new(2.0, 0.0);
        body.set_gravity_strength(10.0);
        body.integrate(0.5);

        assert!((body.position().x - 1.0).abs() < 1.0e-6);
        assert!(body.position().y.abs() < 1.0e-6);
        // Velocity untouched by gravity.
        assert!(body.velocity.y.abs() < 1.0e-6);
    }

    #[test]
    fn gravity_integration_matches_closed_form() {
        // v(t) ~= g*t and y(t) ~= 0.5*g*t^2 for a free fall from rest.
        // Explicit Euler overshoots displacement by a factor (1 + 1/n), so
        // use many small steps and a proportional tolerance.
        let g = 10.0;
        let t = 1.0;
        let n = 1000;
        let dt = t / n as f32;

        let mut body = body_at(KinematicClass::Dynamic, Vec2::zeros(), Vec2::new(1.0, 1.0));
        body.set_gravity_strength(g);
        for _ in 0..n {
            body.integrate(dt);
        }

        assert!((body.velocity.y - g * t).abs() < 1.0e-2);
        let expected = 0.5 * g * t * t;
        assert!((body.position().y - expected).abs() < expected * 2.0e-3 + 1.0e-2);
    }

    #[test]
    fn gravity_flag_off_means_pure_velocity_integration() {
        let mut body = body_at(KinematicClass::Dynamic, Vec2::zeros(), Vec2::new(1.0, 1.0));
        body.feels_gravity = false;
        body.set_gravity_strength(10.0);
        body.velocity = Vec2::new(1.0, -2.0);
        body.integrate(0.5);

        assert!((body.position().x - 0.5).abs() < 1.0e-6);
        assert!((body.position().y + 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn bounds_respect_pivot() {
        let transform = Transform::shared_with_pivot(
            Vec2::new(5.0, 5.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(1.0, 2.0),
        );
        let body = RigidBody::new(transform, KinematicClass::Dynamic);

        let b = body.bounds();
        assert!((b.left - 4.0).abs() < 1.0e-6);
        assert!((b.top - 3.0).abs() < 1.0e-6);
        assert!((b.right - 6.0).abs() < 1.0e-6);
        assert!((b.bottom - 5.0).abs() < 1.0e-6);
        assert_eq!(body.center(), Vec2::new(5.0, 4.0));
    }

    #[test]
    fn position_side_translates_the_whole_body() {
        let mut body = body_at(KinematicClass::Dynamic, Vec2::zeros(), Vec2::new(1.0, 1.0));
        body.position_side(Side::Bottom, 5.0);

        let b = body.bounds();
        assert!((b.bottom - 5.0).abs() < 1.0e-6);
        assert!((b.top - 4.0).abs() < 1.0e-6);
        assert!(b.left.abs() < 1.0e-6);
    }

    #[test]
    fn default_response_separates_and_zeroes_axis_velocity() {
        // A body sunk into a floor below it: Bottom contact pushes it up to
        // the floor top minus the contact offset and kills vertical motion.
        let mut body = body_at(KinematicClass::Dynamic, Vec2::new(0.0, 0.2), Vec2::new(1.0, 1.0));
        body.velocity = Vec2::new(0.5, 3.0);
        let floor = Rect::from_edges(-5.0, 1.0, 5.0, 2.0);

        body.handle_collision(Side::Bottom, &floor);

        assert!((body.bounds().bottom - (1.0 - CONTACT_OFFSET)).abs() < 1.0e-6);
        assert!(body.velocity.y.abs() < 1.0e-6);
        // Horizontal motion is untouched.
        assert!((body.velocity.x - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn default_response_is_a_noop_when_already_separated() {
        let mut body = body_at(KinematicClass::Dynamic, Vec2::zeros(), Vec2::new(1.0, 1.0));
        body.velocity = Vec2::new(0.0, 3.0);
        let far_floor = Rect::from_edges(-5.0, 10.0, 5.0, 11.0);

        body.handle_collision(Side::Bottom, &far_floor);

        assert_eq!(body.position(), Vec2::zeros());
        assert!((body.velocity.y - 3.0).abs() < 1.0e-6);
    }

    #[test]
    fn default_response_is_a_noop_when_responses_are_disabled() {
        let mut body = body_at(KinematicClass::Dynamic, Vec2::new(0.0, 0.2), Vec2::new(1.0, 1.0));
        body.responds_to_collisions = false;
        body.velocity = Vec2::new(0.0, 3.0);
        let floor = Rect::from_edges(-5.0, 1.0, 5.0, 2.0);

        body.handle_collision(Side::Bottom, &floor);

        assert_eq!(body.position(), Vec2::new(0.0, 0.2));
        assert!((body.velocity.y - 3.0).abs() < 1.0e-6);
    }

    #[test]
    fn default_response_is_a_noop_for_non_dynamic_bodies() {
        let mut body = body_at(KinematicClass::Static, Vec2::new(0.0, 0.2), Vec2::new(1.0, 1.0));
        body.velocity = Vec2::new(0.0, 3.0);
        let floor = Rect::from_edges(-5.0, 1.0, 5.0, 2.0);

        body.handle_collision(Side::Bottom, &floor);

        assert_eq!(body.position(), Vec2::new(0.0, 0.2));
        assert!((body.velocity.y - 3.0).abs() < 1.0e-6);
    }
}
