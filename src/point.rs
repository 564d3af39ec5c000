//! Measured points.
//!
//! An [`MPoint`] is a point in up to 3-dimensional cartesian space that additionally carries a
//! *measure* (M-value) used for linear referencing. The measure is independent of the positional
//! ordinates: a point can have a measure without using its z ordinate, and vice versa. Unused
//! ordinates are set to NaN.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::MGeometryError;
use crate::tolerance::approx_eq;

/// A point with a measure value attached.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MPoint {
    x: f64,
    y: f64,
    z: f64,
    m: f64,
}

/// Exact per-ordinate equality. Unlike IEEE comparison, two NaN ordinates are considered equal,
/// so points with unassigned z or measure ordinates compare equal as values. For geometric
/// comparisons use the explicit tiers: [`MPoint::equal_2d`], [`MPoint::equal_3d`] and
/// [`MPoint::equal_2d_with_m`].
impl PartialEq for MPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x.total_cmp(&other.x).is_eq()
            && self.y.total_cmp(&other.y).is_eq()
            && self.z.total_cmp(&other.z).is_eq()
            && self.m.total_cmp(&other.m).is_eq()
    }
}

impl MPoint {
    /// Index of the x ordinate for [`MPoint::ordinate`].
    pub const X: usize = 0;
    /// Index of the y ordinate for [`MPoint::ordinate`].
    pub const Y: usize = 1;
    /// Index of the z ordinate for [`MPoint::ordinate`].
    pub const Z: usize = 2;
    /// Index of the measure ordinate for [`MPoint::ordinate`].
    pub const M: usize = 3;

    /// Creates a new point with the given ordinates and measure.
    pub const fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// Creates a 2d point without a measure. The z ordinate and the measure are set to NaN.
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, f64::NAN, f64::NAN)
    }

    /// Creates a 2d point with a measure. The z ordinate is set to NaN.
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self::new(x, y, f64::NAN, m)
    }

    /// Creates a 3d point without a measure. The measure is set to NaN.
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, f64::NAN)
    }

    /// Returns the x ordinate of the point.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y ordinate of the point.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the z ordinate of the point. NaN if the point is 2-dimensional.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Returns the measure of the point. NaN if no measure is assigned.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Updates the measure of the point.
    pub fn set_m(&mut self, m: f64) {
        self.m = m;
    }

    /// Returns the ordinate with the given index (see [`MPoint::X`] and friends).
    pub fn ordinate(&self, index: usize) -> Result<f64, MGeometryError> {
        match index {
            Self::X => Ok(self.x),
            Self::Y => Ok(self.y),
            Self::Z => Ok(self.z),
            Self::M => Ok(self.m),
            other => Err(MGeometryError::InvalidOrdinate(other)),
        }
    }

    /// Updates the ordinate with the given index (see [`MPoint::X`] and friends).
    pub fn set_ordinate(&mut self, index: usize, value: f64) -> Result<(), MGeometryError> {
        match index {
            Self::X => self.x = value,
            Self::Y => self.y = value,
            Self::Z => self.z = value,
            Self::M => self.m = value,
            other => return Err(MGeometryError::InvalidOrdinate(other)),
        }
        Ok(())
    }

    /// Returns true if the points have exactly equal x and y ordinates. The z ordinates and
    /// measures are not compared.
    pub fn equal_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns true if the points have exactly equal x, y and z ordinates. Two NaN z ordinates
    /// are considered equal.
    pub fn equal_3d(&self, other: &Self) -> bool {
        self.equal_2d(other) && (self.z == other.z || self.z.is_nan() && other.z.is_nan())
    }

    /// Returns true if the points are [equal in 2d](MPoint::equal_2d) and their measures are
    /// equal under the [tolerance comparator](crate::tolerance::approx_eq). Two NaN measures are
    /// considered equal.
    pub fn equal_2d_with_m(&self, other: &Self) -> bool {
        self.equal_2d(other) && approx_eq(self.m, other.m)
    }

    /// Returns the difference of the positional 2d parts of the points.
    pub fn sub_2d(&self, other: &Self) -> Vector2<f64> {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    /// Returns the difference of the positional 3d parts of the points.
    pub fn sub_3d(&self, other: &Self) -> Vector3<f64> {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Euclidean distance between the points in the 2d plane.
    pub fn distance_2d(&self, other: &Self) -> f64 {
        self.sub_2d(other).magnitude()
    }

    /// Euclidean distance between the points in 3d space. NaN if either point has no z ordinate.
    pub fn distance_3d(&self, other: &Self) -> f64 {
        self.sub_3d(other).magnitude()
    }
}

impl From<(f64, f64, f64, f64)> for MPoint {
    fn from((x, y, z, m): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, z, m)
    }
}

impl AbsDiffEq for MPoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for MPoint {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
