/*!
Pairwise overlap detection and contact-side classification.

Classification is velocity-swept rather than purely geometric: for a moving
body the contact side is derived from the direction of travel, by asking
"which axis would this box have crossed into the obstacle last?". Raw
intersection geometry alone misclassifies corner contacts: a body falling
past a platform edge has a narrow horizontal overlap and a tall vertical
one, which a naive smallest-extent rule reads as a wall hit instead of a
landing.

For a body at rest the swept question is meaningless, so a static fallback
classifies by which of the body's edges lie strictly inside the obstacle's
span, with ambiguous orientations dropped and fully-nested overlap
defaulting to `Bottom`.
*/

use super::types::{Rect, Side, Vec2};

/// A classified contact between a dynamic body and one obstacle.
#[derive(Clone, Copy, Debug)]
pub struct PairContact {
    /// Contact side, relative to the dynamic body.
    pub side: Side,
    /// Raw AABB intersection at detection time.
    pub overlap: Rect,
    /// Signed push-out that separates the body along the contact axis.
    pub push: Vec2,
    /// Contact extent along the axis perpendicular to the contact axis,
    /// used only to break resolution-order ties.
    pub surface_length: f32,
}

/// Classify the contact between a dynamic body's `bounds` moving at
/// `velocity` and a non-dynamic obstacle's `other` bounds.
///
/// Returns `None` when the boxes do not strictly overlap.
pub fn classify_pair(bounds: &Rect, velocity: Vec2, other: &Rect) -> Option<PairContact> {
    let (overlap, intersects) = bounds.intersect(other);
    if !intersects {
        return None;
    }

    if velocity.x != 0.0 || velocity.y != 0.0 {
        Some(classify_swept(bounds, velocity, other, overlap))
    } else {
        Some(classify_static(bounds, other, overlap))
    }
}

/// Swept classification for a moving body.
///
/// Per axis with nonzero velocity, the penetration depth is measured from
/// the body's leading edge to the obstacle edge it would have crossed
/// first, i.e. the overlap as if the body had approached from its velocity
/// direction. The contact axis is the one crossed most recently (smaller
/// back-projection time `depth / |v|`); an axis the body is not moving on
/// can never have been crossed this frame. The side then follows from the
/// velocity sign on the chosen axis.
///
/// A body approaching exactly diagonally, with equal projected overlaps on
/// both axes, resolves to the vertical axis. The tie is not meaningful
/// physically; vertical is chosen so that a pixel-perfect diagonal landing
/// counts as a landing rather than a wall hit.
fn classify_swept(bounds: &Rect, velocity: Vec2, other: &Rect, overlap: Rect) -> PairContact {
    // Leading-edge penetration depths. Positive whenever the boxes overlap.
    let depth_x = if velocity.x > 0.0 {
        bounds.right - other.left
    } else if velocity.x < 0.0 {
        other.right - bounds.left
    } else {
        overlap.width()
    };
    let depth_y = if velocity.y > 0.0 {
        bounds.bottom - other.top
    } else if velocity.y < 0.0 {
        other.bottom - bounds.top
    } else {
        overlap.height()
    };

    // Compare back-projection times without dividing: the vertical axis wins
    // when depth_y / |v.y| <= depth_x / |v.x|.
    let vertical = if velocity.x == 0.0 {
        true
    } else if velocity.y == 0.0 {
        false
    } else {
        depth_y * velocity.x.abs() <= depth_x * velocity.y.abs()
    };

    if vertical {
        let side = if velocity.y > 0.0 { Side::Bottom } else { Side::Top };
        let push = Vec2::new(0.0, if side == Side::Bottom { -depth_y } else { depth_y });
        // Back-project the body to the moment of contact on this axis and
        // take the horizontal extent still shared with the obstacle.
        let t = depth_y / velocity.y.abs();
        let at_contact = bounds.translated(-velocity * t);
        let surface_length =
            (at_contact.right.min(other.right) - at_contact.left.max(other.left)).max(0.0);
        PairContact {
            side,
            overlap,
            push,
            surface_length,
        }
    } else {
        let side = if velocity.x > 0.0 { Side::Right } else { Side::Left };
        let push = Vec2::new(if side == Side::Right { -depth_x } else { depth_x }, 0.0);
        let t = depth_x / velocity.x.abs();
        let at_contact = bounds.translated(-velocity * t);
        let surface_length =
            (at_contact.bottom.min(other.bottom) - at_contact.top.max(other.top)).max(0.0);
        PairContact {
            side,
            overlap,
            push,
            surface_length,
        }
    }
}

/// Static fallback for a body at rest.
///
/// A side is a candidate when the body's corresponding edge lies strictly
/// inside the obstacle's span on that axis. If both sides of one
/// orientation qualify the whole orientation is ambiguous and dropped; if
/// both orientations survive, the one whose contact surface in the raw
/// overlap is longer wins (a wide, shallow overlap is a floor/ceiling
/// contact, a tall, thin one is a wall contact), ties to vertical. With no
/// candidates at all (fully nested either way) the contact defaults to
/// `Bottom`.
fn classify_static(bounds: &Rect, other: &Rect, overlap: Rect) -> PairContact {
    let vertical_side = match (bounds.top > other.top, bounds.bottom < other.bottom) {
        (true, false) => Some(Side::Top),
        (false, true) => Some(Side::Bottom),
        _ => None,
    };
    let horizontal_side = match (bounds.left > other.left, bounds.right < other.right) {
        (true, false) => Some(Side::Left),
        (false, true) => Some(Side::Right),
        _ => None,
    };

    let side = match (vertical_side, horizontal_side) {
        (Some(v), Some(h)) => {
            if overlap.width() >= overlap.height() {
                v
            } else {
                h
            }
        }
        (Some(v), None) => v,
        (None, Some(h)) => h,
        (None, None) => Side::Bottom,
    };

    let (depth, surface_length) = if side.is_horizontal_surface() {
        (overlap.height(), overlap.width())
    } else {
        (overlap.width(), overlap.height())
    };
    let push = match side {
        Side::Top => Vec2::new(0.0, depth),
        Side::Bottom => Vec2::new(0.0, -depth),
        Side::Left => Vec2::new(depth, 0.0),
        Side::Right => Vec2::new(-depth, 0.0),
    };

    PairContact {
        side,
        overlap,
        push,
        surface_length,
    }
}
