//! Measure-aware geometry types and linear referencing algorithms.
//!
//! Linear referencing locates things along a route by a *measure* (distance-along-path in an
//! application-defined unit, e.g. road kilometers) instead of by raw coordinates. This crate
//! provides the geometry types for it:
//!
//! * [`MPoint`] — a point with x, y, optional z and an optional measure ordinate;
//! * [`MPath`] — a polyline with a measure at every vertex, with measure assignment
//!   ([`measure_on_length`](Measured::measure_on_length), [`interpolate`](MPath::interpolate)),
//!   point-at-measure and range queries, and measure-preserving union;
//! * [`MMultiPath`] — an ordered collection of paths sharing one measure axis (a route with
//!   holes);
//! * the [`locator`] module — translating measure events into point and line geometries.
//!
//! Measure-based queries require the measures of the geometry to be monotone (see
//! [`Measured::is_monotone`]); querying a non-monotone geometry reports
//! [`MGeometryError::NotMonotone`] rather than producing garbage.
//!
//! ```
//! use mgeo::{Measured, MPath, MPoint};
//!
//! # fn main() -> Result<(), mgeo::MGeometryError> {
//! let mut road: MPath = vec![
//!     MPoint::xy(0.0, 0.0),
//!     MPoint::xy(5.0, 0.0),
//!     MPoint::xy(10.0, 0.0),
//! ]
//! .into();
//! road.measure_on_length(false);
//!
//! let marker = road.coordinate_at_m(7.5)?.expect("measure is on the road");
//! assert_eq!(marker.x(), 7.5);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod locator;
mod measure;
mod multi_path;
mod path;
mod point;
pub mod segment;
pub mod tolerance;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use error::MGeometryError;
pub use measure::{MeasureDirection, Measured};
pub use multi_path::MMultiPath;
pub use path::MPath;
pub use point::MPoint;
pub use segment::Segment;
