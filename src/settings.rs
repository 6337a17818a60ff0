/*!
Engine-wide tolerances and defaults.

These constants centralize the parameters shared by the collision world and
the default rigid-body response. Keeping them together makes tuning easier
and helps ensure deterministic behavior across platforms.

Notes
- Distances are in world units, time in seconds. Y grows downward, so
  gravity is a positive acceleration and a jump is a negative impulse.
- Favor practical world-space tolerances over machine epsilon for robust
  contact behavior.
- Per-actor tuning lives in [`crate::actor::ActorTuning`]; only values shared
  by every body belong here.
*/

/// Separation left between a resolved body and the obstacle it hit
/// (world units). This is also the minimum contact extent the actor
/// controller accepts as a real surface touch.
///
/// Too large creates visible gaps; too small re-triggers the same contact
/// on the very next detection pass.
pub const CONTACT_OFFSET: f32 = 1.0e-4;

/// Default downward gravity in world units per second squared (positive
/// because +Y points down). Stamped onto dynamic bodies at registration
/// unless the world was built with another value.
pub const DEFAULT_GRAVITY: f32 = 10.0;
