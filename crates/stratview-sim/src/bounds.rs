//! Arena bounds checks.

use glam::DVec2;

use stratview_core::curve::CubicCurve;
use stratview_core::types::Arena;

/// Parameters sampled by [`curve_violates_bounds`].
pub const CURVE_SAMPLES: [f64; 2] = [0.5, 1.0];

/// True if `point` lies outside the table. Edges count as inside.
pub fn is_out_of_bounds(point: DVec2, arena: &Arena) -> bool {
    point.x < 0.0 || point.x > arena.width_mm || point.y < 0.0 || point.y > arena.height_mm
}

/// Cheap path check: only the midpoint and the endpoint are tested, so a
/// curve that bows out of the table between those samples is not flagged.
pub fn curve_violates_bounds(curve: &CubicCurve, arena: &Arena) -> bool {
    CURVE_SAMPLES
        .iter()
        .any(|&t| is_out_of_bounds(curve.point_at(t), arena))
}
