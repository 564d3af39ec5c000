//! Locating events on linearly referenced geometries.
//!
//! An *event* on a route is either a point at a single measure (a mile marker, a transit stop)
//! or a stretch between two measures (a speed limit zone, a construction site). The functions in
//! this module translate such events into geometries.

use crate::error::MGeometryError;
use crate::measure::Measured;
use crate::multi_path::MMultiPath;
use crate::path::MPath;
use crate::point::MPoint;

/// Returns the point of the geometry where its measure equals `position`, or `None` if the
/// position is outside of the geometry's measure range.
///
/// Returns an error if the measures of the geometry are not monotone.
pub fn point_at_m(
    lrs: &impl Measured,
    position: f64,
) -> Result<Option<MPoint>, MGeometryError> {
    lrs.coordinate_at_m(position)
}

/// Returns the stretches of the geometry with measures between `begin` and `end`, packaged as a
/// path collection. Degenerate stretches with fewer than two vertices are dropped, since they
/// cannot form a line.
///
/// Returns an error if the measures of the geometry are not monotone.
pub fn multi_path_between(
    lrs: &impl Measured,
    begin: f64,
    end: f64,
) -> Result<MMultiPath, MGeometryError> {
    let parts: Vec<MPath> = lrs
        .coordinates_between(begin, end)?
        .into_iter()
        .filter(|part| part.len() >= 2)
        .collect();
    Ok(MMultiPath::new(parts))
}
