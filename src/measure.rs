//! Measure capability shared by measured geometries.
//!
//! Geometries that carry measures implement the [`Measured`] trait, which provides every query
//! that only depends on the measure ordering: monotonicity, measure bounds, locating a point by
//! measure and slicing by a measure range. Algorithms that work with any linearly referenced
//! geometry (e.g. the [`locator`](crate::locator) module) are generic over this trait instead of
//! a concrete path type.

use serde::{Deserialize, Serialize};

use crate::error::MGeometryError;
use crate::path::MPath;
use crate::point::MPoint;

/// Direction of the measure values with respect to the direction of the geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureDirection {
    /// Measures are increasing in the direction of the geometry.
    Increasing,
    /// Measures are constant across the geometry.
    Constant,
    /// Measures are decreasing in the direction of the geometry.
    Decreasing,
    /// Measures are not monotone along the geometry.
    NonMonotone,
}

/// A geometry that carries measure values in its vertices.
///
/// Monotonicity of the measure sequence is a precondition for all measure-based queries. A
/// sequence is *monotone* when its measures never reverse direction (equal consecutive measures
/// are allowed, NaN measures are not), and *strictly monotone* when additionally no two
/// consecutive measures are equal. Examples on a path:
///
/// * `[0, 1, 2, 3, 4]` — strictly monotone increasing
/// * `[4, 3, 2, 1]` — strictly monotone decreasing
/// * `[0, 1, 1, 2, 3]` — non-strictly monotone increasing
/// * `[0, 2, 1]` — not monotone
pub trait Measured {
    /// Returns true if the measures of the geometry are monotone. With `strict`, equal
    /// consecutive measures make the result false.
    fn is_monotone(&self, strict: bool) -> bool;

    /// The minimum measure value of the geometry. NaN if the geometry is empty.
    fn min_m(&self) -> f64;

    /// The maximum measure value of the geometry. NaN if the geometry is empty.
    fn max_m(&self) -> f64;

    /// Assigns measures to all vertices based on the cumulative 2d euclidean length of the
    /// geometry from its first vertex.
    ///
    /// If `keep_begin_measure` is true and the first vertex already has a measure, the
    /// cumulative distances are offset so that the first vertex retains it. Otherwise the first
    /// vertex gets measure 0.
    fn measure_on_length(&mut self, keep_begin_measure: bool);

    /// Returns the point of the geometry at the given measure value, or `None` if the measure
    /// lies outside of the geometry's measure range.
    ///
    /// Returns an error if the measures of the geometry are not monotone.
    fn coordinate_at_m(&self, m: f64) -> Result<Option<MPoint>, MGeometryError>;

    /// Returns the contiguous stretches of the geometry with measures between `begin` and `end`.
    ///
    /// The bounds are treated as an unordered closed interval. Where an interval bound falls
    /// inside a segment of the geometry, a vertex is interpolated at exactly that measure.
    ///
    /// Returns an error if the measures of the geometry are not monotone.
    fn coordinates_between(&self, begin: f64, end: f64) -> Result<Vec<MPath>, MGeometryError>;

    /// Returns the measure value at the point of the geometry closest to `point`, searching only
    /// within `tolerance` distance from it. NaN if nothing is found within tolerance.
    ///
    /// Where several points of the geometry are equally close (e.g. on a self-intersecting
    /// path), the lowest measure wins.
    ///
    /// Returns an error if the measures of the geometry are not monotone.
    fn measure_at(&self, point: &MPoint, tolerance: f64) -> Result<f64, MGeometryError>;
}
