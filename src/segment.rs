//! Straight line segment between two measured points.

use nalgebra::Vector2;

use crate::point::MPoint;

/// A straight line segment between two points of a measured path.
///
/// The segment borrows its endpoints from the path it was taken from. All of the segment math is
/// done in the 2d plane; z ordinates of the endpoints do not participate.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a MPoint, pub &'a MPoint);

impl Segment<'_> {
    /// Shortest euclidean distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value
    ///   is the squared length of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned
    ///   value is the smaller one of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &MPoint) -> f64 {
        if self.0.equal_2d(self.1) {
            return self.0.sub_2d(point).magnitude_squared();
        }

        let ds = self.1.sub_2d(self.0);
        let dp = point.sub_2d(self.0);
        let ds_len = ds.magnitude_squared();

        let r = dp.dot(&ds) / ds_len;
        if r <= 0.0 {
            self.0.sub_2d(point).magnitude_squared()
        } else if r >= 1.0 {
            self.1.sub_2d(point).magnitude_squared()
        } else {
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }

    /// Position of the projection of `point` onto the segment line, as a fraction of the segment
    /// length from the start point. The value is clamped into `[0, 1]`, so the projection always
    /// lies on the segment itself. Zero for a degenerate zero-length segment.
    pub fn projection_factor(&self, point: &MPoint) -> f64 {
        let ds = self.1.sub_2d(self.0);
        let ds_len = ds.magnitude_squared();
        if ds_len == 0.0 {
            return 0.0;
        }

        let r = point.sub_2d(self.0).dot(&ds) / ds_len;
        r.clamp(0.0, 1.0)
    }

    /// The point of the segment closest to the given point, with a measure interpolated between
    /// the endpoint measures by the projection position.
    ///
    /// The z ordinate of the result is NaN since the projection is done in the 2d plane.
    pub fn closest_point(&self, point: &MPoint) -> MPoint {
        let r = self.projection_factor(point);
        let ds: Vector2<f64> = self.1.sub_2d(self.0);
        MPoint::xym(
            self.0.x() + r * ds.x,
            self.0.y() + r * ds.y,
            self.0.m() + r * (self.1.m() - self.0.m()),
        )
    }
}
