//! Cubic Bézier curve model.
//!
//! A segment is built from two oriented poses: the inner control points are
//! projected `force` millimetres forward from the start along its heading and
//! backward from the end along its heading. `force = 0` collapses the control
//! points onto the endpoints and yields a straight segment.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_TANGENT_LENGTH;
use crate::enums::HeadingMode;
use crate::types::{Pose, SourceId};

/// Four control points in arena millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

/// A curve tagged with the editor element that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub curve: CubicCurve,
    pub source_id: SourceId,
}

impl CubicCurve {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Build the segment joining `start` to `end`.
    pub fn from_poses(start: &Pose, end: &Pose, force: f64) -> Self {
        let p0 = start.position();
        let p3 = end.position();
        Self {
            p0,
            p1: p0 + start.direction() * force,
            p2: p3 - end.direction() * force,
            p3,
        }
    }

    /// Bernstein-basis evaluation. The polynomial is defined for any `t`,
    /// but only `[0, 1]` lies on the segment.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        let uu = u * u;
        let tt = t * t;
        self.p0 * (uu * u) + self.p1 * (3.0 * uu * t) + self.p2 * (3.0 * u * tt) + self.p3 * (tt * t)
    }

    /// Exact first derivative `B'(t)`.
    pub fn derivative_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * u * u)
            + (self.p2 - self.p1) * (6.0 * u * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Travel direction at `t`, in degrees (atan2 range, (-180, 180]).
    ///
    /// Returns `None` when the tangent is too short to define a direction,
    /// e.g. a zero-force segment whose endpoints coincide.
    pub fn heading_at(&self, t: f64, mode: HeadingMode, epsilon: f64) -> Option<f64> {
        let tangent = match mode {
            HeadingMode::FiniteDifference => self.point_at(t + epsilon) - self.point_at(t),
            HeadingMode::Analytic => self.derivative_at(t),
        };
        if tangent.length() < MIN_TANGENT_LENGTH {
            return None;
        }
        Some(tangent.y.atan2(tangent.x).to_degrees())
    }

    /// Distance between the endpoints.
    pub fn chord_length(&self) -> f64 {
        self.p0.distance(self.p3)
    }
}

impl CurveSegment {
    pub fn new(curve: CubicCurve, source_id: SourceId) -> Self {
        Self { curve, source_id }
    }
}
