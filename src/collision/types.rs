/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- detect (pairwise overlap and side classification)
- world (registries, ordering, dispatch)
- body (default collision response)
- the actor controller

Conventions
- Y grows downward: `top < bottom` for a well-formed rect, gravity is +Y.
- Rotation is not supported. Every body is an axis-aligned box; using the
  engine with rotated game objects results in undefined behavior.
*/

use nalgebra as na;

/// Common math alias for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;

/// The side of a dynamic body on which a contact occurred.
///
/// Sides are always named from the dynamic participant's point of view: a
/// body landing on a floor collides on its `Bottom`, a body pushed against
/// a wall to its left collides on its `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// True for `Top`/`Bottom`: the contacted surface runs horizontally.
    #[inline]
    pub fn is_horizontal_surface(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// The opposing side on the same axis.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An axis-aligned rectangle stored by its four edge coordinates.
///
/// A `Rect` produced by [`Rect::intersect`] may have negative width or
/// height; intersection is signaled by the returned flag, never inferred
/// from the extents' signs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Build a rect from its top-left corner and size.
    #[inline]
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            left: top_left.x,
            top: top_left.y,
            right: top_left.x + size.x,
            bottom: top_left.y + size.y,
        }
    }

    /// Build a rect directly from its edge coordinates.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Coordinate of the named edge.
    #[inline]
    pub fn side(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// This rect shifted by `delta`.
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            left: self.left + delta.x,
            top: self.top + delta.y,
            right: self.right + delta.x,
            bottom: self.bottom + delta.y,
        }
    }

    /// Per-axis overlap with `other`, plus whether the rects truly intersect.
    ///
    /// Intersection requires strictly positive width and height; touching
    /// edges do not count. The rect is returned unclamped, so on a miss its
    /// extents carry the (negative) separation distances, useful to callers
    /// that compare against a threshold, but always gated by the flag.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> (Rect, bool) {
        let overlap = Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        let intersects = overlap.width() > 0.0 && overlap.height() > 0.0;
        (overlap, intersects)
    }

    /// Intersection test only.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersect(other).1
    }
}
