/*!
The collision world: body registries, frame-ordered detection, and dispatch.

The world owns one registry per kinematic class. A body joins exactly one
registry at registration, fixed by its class, and leaves it through the
opaque [`BodyHandle`] returned at registration; bodies hold no
back-reference into the world. Handles are generational, so a handle that
outlives its body resolves to `None` forever instead of aliasing a reused
slot.

Each frame runs integrate → detect → resolve. Resolution dispatches the
frame's contacts one at a time, largest correction first; every dispatch
re-validates the overlap against current bounds, so contacts made
irrelevant by an earlier, larger correction skip harmlessly. A contact
whose participant was removed mid-frame is an expected steady-state case
and dispatches as a silent no-op.
*/

use crate::body::{KinematicClass, RigidBody};
use crate::collision::detect::{classify_pair, PairContact};
use crate::collision::types::{Rect, Side, Vec2};
use crate::settings::DEFAULT_GRAVITY;

/// Opaque handle to a registered body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    class: KinematicClass,
    index: u32,
    generation: u32,
}

impl BodyHandle {
    #[inline]
    pub fn class(&self) -> KinematicClass {
        self.class
    }
}

/// A queued collision event between a dynamic body and an obstacle.
///
/// `overlap`, `push`, and `surface_length` are snapshots from detection
/// time; dispatch re-validates against current bounds before acting.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// The dynamic participant. Sides are relative to this body.
    pub body: BodyHandle,
    pub other: BodyHandle,
    pub side: Side,
    pub overlap: Rect,
    pub push: Vec2,
    pub surface_length: f32,
}

/// Per-dispatch view handed to the contact observer: the queued contact
/// plus the overlap recomputed from both bodies' current bounds.
pub struct ContactView<'a> {
    pub contact: &'a Contact,
    /// Fresh per-axis overlap at dispatch time, unclamped. Check
    /// `intersecting` (or compare extents against a threshold) before
    /// trusting it.
    pub overlap: Rect,
    /// Whether the bodies still strictly overlap at dispatch time.
    pub intersecting: bool,
    pub body_bounds: Rect,
    pub other_bounds: Rect,
}

struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Slab of bodies with generation-checked access.
#[derive(Default)]
struct Registry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Registry {
    fn insert(&mut self, body: RigidBody) -> (u32, u32) {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            (index, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            (self.slots.len() as u32 - 1, 0)
        }
    }

    fn remove(&mut self, index: u32, generation: u32) -> Option<RigidBody> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation || slot.body.is_none() {
            return None;
        }
        let body = slot.body.take();
        // Invalidate outstanding handles before the slot is reused.
        slot.generation += 1;
        self.free.push(index);
        body
    }

    fn get(&self, index: u32, generation: u32) -> Option<&RigidBody> {
        let slot = self.slots.get(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.body.as_ref()
    }

    fn get_mut(&mut self, index: u32, generation: u32) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.body.as_mut()
    }

    fn iter(&self) -> impl Iterator<Item = (u32, u32, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.body.as_ref().map(|b| (i as u32, slot.generation, b))
        })
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.slots.iter_mut().filter_map(|slot| slot.body.as_mut())
    }
}

/// Single-threaded, frame-synchronous collision world.
pub struct CollisionWorld {
    gravity_strength: f32,
    fixed: Registry,
    statics: Registry,
    dynamics: Registry,
}

impl CollisionWorld {
    /// `gravity_strength` is in world units per second squared (+Y down)
    /// and is stamped onto every dynamic body at registration.
    pub fn new(gravity_strength: f32) -> Self {
        Self {
            gravity_strength,
            fixed: Registry::default(),
            statics: Registry::default(),
            dynamics: Registry::default(),
        }
    }

    #[inline]
    pub fn gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    /// Register a body in the registry matching its kinematic class and
    /// return the handle that stands in for it from now on.
    pub fn insert(&mut self, mut body: RigidBody) -> BodyHandle {
        let class = body.class();
        let (index, generation) = match class {
            KinematicClass::Fixed => self.fixed.insert(body),
            KinematicClass::Static => self.statics.insert(body),
            KinematicClass::Dynamic => {
                body.set_gravity_strength(self.gravity_strength);
                self.dynamics.insert(body)
            }
        };
        BodyHandle {
            class,
            index,
            generation,
        }
    }

    /// Remove a body. Contacts already queued for it this frame dispatch as
    /// no-ops. Stale or repeated removals return `None`.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.registry_mut(handle.class)
            .remove(handle.index, handle.generation)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.registry(handle.class).get(handle.index, handle.generation)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.registry_mut(handle.class)
            .get_mut(handle.index, handle.generation)
    }

    /// Current world-space bounds of a registered body.
    pub fn bounds(&self, handle: BodyHandle) -> Option<Rect> {
        self.body(handle).map(|b| b.bounds())
    }

    fn registry(&self, class: KinematicClass) -> &Registry {
        match class {
            KinematicClass::Fixed => &self.fixed,
            KinematicClass::Static => &self.statics,
            KinematicClass::Dynamic => &self.dynamics,
        }
    }

    fn registry_mut(&mut self, class: KinematicClass) -> &mut Registry {
        match class {
            KinematicClass::Fixed => &mut self.fixed,
            KinematicClass::Static => &mut self.statics,
            KinematicClass::Dynamic => &mut self.dynamics,
        }
    }

    /// Integrate every registered body by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        for body in self
            .fixed
            .iter_mut()
            .chain(self.statics.iter_mut())
            .chain(self.dynamics.iter_mut())
        {
            body.integrate(dt);
        }
    }

    /// Classify one dynamic/non-dynamic pair.
    ///
    /// Panics if `dynamic` is not a Dynamic body or `other` is: only
    /// (dynamic, non-dynamic) pairs are ever tested, and violating that is
    /// a programming error, not a runtime condition.
    pub fn detect_pair(dynamic: &RigidBody, other: &RigidBody) -> Option<PairContact> {
        assert!(
            dynamic.class() == KinematicClass::Dynamic
                && other.class() != KinematicClass::Dynamic,
            "detect_pair requires a Dynamic body first and a non-Dynamic body second"
        );
        classify_pair(&dynamic.bounds(), dynamic.velocity, &other.bounds())
    }

    /// Detect all contacts for this frame: every dynamic body against every
    /// static and fixed body. Non-dynamic pairs are never tested.
    pub fn detect(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for (d_index, d_generation, dynamic) in self.dynamics.iter() {
            let bounds = dynamic.bounds();
            let obstacles = self
                .statics
                .iter()
                .map(|(i, g, b)| (KinematicClass::Static, i, g, b))
                .chain(
                    self.fixed
                        .iter()
                        .map(|(i, g, b)| (KinematicClass::Fixed, i, g, b)),
                );
            for (class, o_index, o_generation, obstacle) in obstacles {
                if let Some(pair) = classify_pair(&bounds, dynamic.velocity, &obstacle.bounds()) {
                    contacts.push(Contact {
                        body: BodyHandle {
                            class: KinematicClass::Dynamic,
                            index: d_index,
                            generation: d_generation,
                        },
                        other: BodyHandle {
                            class,
                            index: o_index,
                            generation: o_generation,
                        },
                        side: pair.side,
                        overlap: pair.overlap,
                        push: pair.push,
                        surface_length: pair.surface_length,
                    });
                }
            }
        }
        contacts
    }

    /// Dispatch a frame's contacts in resolution order.
    ///
    /// Contacts are sorted descending by the squared magnitude of their
    /// push-out, ties broken descending by surface length (the stable sort
    /// leaves residual ties in registration order). For each contact the
    /// overlap is recomputed from current bounds, `on_contact` observes the
    /// dispatch, and the dynamic body's default response runs last. The
    /// response re-validates, so contacts invalidated by an earlier, larger
    /// correction are skipped rather than double-applied.
    pub fn resolve<F>(&mut self, mut contacts: Vec<Contact>, mut on_contact: F)
    where
        F: FnMut(&mut RigidBody, &ContactView<'_>),
    {
        contacts.sort_by(|a, b| {
            b.push
                .norm_squared()
                .total_cmp(&a.push.norm_squared())
                .then_with(|| b.surface_length.total_cmp(&a.surface_length))
        });

        for contact in &contacts {
            let Some(other_bounds) = self.bounds(contact.other) else {
                log::trace!("dropping contact: obstacle removed mid-frame");
                continue;
            };
            let Some(body) = self
                .dynamics
                .get_mut(contact.body.index, contact.body.generation)
            else {
                log::trace!("dropping contact: dynamic body removed mid-frame");
                continue;
            };

            let body_bounds = body.bounds();
            let (overlap, intersecting) = body_bounds.intersect(&other_bounds);
            on_contact(
                body,
                &ContactView {
                    contact,
                    overlap,
                    intersecting,
                    body_bounds,
                    other_bounds,
                },
            );
            body.handle_collision(contact.side, &other_bounds);
        }
    }

    /// One physics frame: integrate, detect, then resolve in order.
    /// `on_contact` is the specialization hook for dynamic bodies (e.g. the
    /// actor controller's state machine).
    pub fn step<F>(&mut self, dt: f32, on_contact: F)
    where
        F: FnMut(&mut RigidBody, &ContactView<'_>),
    {
        self.integrate(dt);
        let contacts = self.detect();
        self.resolve(contacts, on_contact);
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}
