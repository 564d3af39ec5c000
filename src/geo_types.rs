//! Conversions between the measured types of this crate and the `geo-types` crate.
//!
//! `geo-types` geometries do not carry measures, so converting out of this crate drops the
//! measure and z ordinates, and converting in leaves them unassigned (NaN).

use geo_types::{Coord, LineString, Point};

use crate::path::MPath;
use crate::point::MPoint;

impl From<MPoint> for Coord<f64> {
    fn from(point: MPoint) -> Self {
        Coord {
            x: point.x(),
            y: point.y(),
        }
    }
}

impl From<MPoint> for Point<f64> {
    fn from(point: MPoint) -> Self {
        Point::new(point.x(), point.y())
    }
}

impl From<Coord<f64>> for MPoint {
    fn from(coord: Coord<f64>) -> Self {
        MPoint::xy(coord.x, coord.y)
    }
}

impl From<Point<f64>> for MPoint {
    fn from(point: Point<f64>) -> Self {
        MPoint::xy(point.x(), point.y())
    }
}

impl From<&MPath> for LineString<f64> {
    fn from(path: &MPath) -> Self {
        LineString::new(path.points().iter().map(|p| Coord::from(*p)).collect())
    }
}

impl From<LineString<f64>> for MPath {
    fn from(line: LineString<f64>) -> Self {
        line.into_iter().map(MPoint::from).collect()
    }
}
