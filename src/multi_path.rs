//! Collections of measured paths.
//!
//! An [`MMultiPath`] represents a linearly referenced route with holes: an ordered sequence of
//! [`MPath`] segments that together form one measure axis. A logical measure distance (the
//! *gap*) can be configured between the end of one segment and the start of the next for use by
//! length-based measure assignment.

use serde::{Deserialize, Serialize};

use crate::error::MGeometryError;
use crate::measure::{MeasureDirection, Measured};
use crate::path::MPath;
use crate::point::MPoint;

/// An ordered collection of measured paths sharing one measure axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MMultiPathParts", into = "MMultiPathParts")]
pub struct MMultiPath {
    paths: Vec<MPath>,
    gap: f64,
    monotone: bool,
    strict_monotone: bool,
}

/// Serialized representation of [`MMultiPath`]; the monotonicity cache is rebuilt on
/// deserialization instead of being stored.
#[derive(Serialize, Deserialize)]
struct MMultiPathParts {
    paths: Vec<MPath>,
    gap: f64,
}

impl MMultiPath {
    /// Creates a new collection from the given paths, with a zero measure gap between them.
    pub fn new(paths: Vec<MPath>) -> Self {
        Self::with_gap(paths, 0.0)
    }

    /// Creates a new collection from the given paths and the measure gap between consecutive
    /// paths.
    pub fn with_gap(paths: Vec<MPath>, gap: f64) -> Self {
        let mut collection = Self {
            paths,
            gap,
            monotone: false,
            strict_monotone: false,
        };
        collection.update_monotone();
        collection
    }

    /// Returns true if the collection contains no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of paths in the collection.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Paths of the collection.
    pub fn paths(&self) -> &[MPath] {
        &self.paths
    }

    /// The measure distance between the end of one path and the start of the next, used by
    /// [`measure_on_length`](Measured::measure_on_length).
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Updates the measure gap. Does not change already assigned measures.
    pub fn set_gap(&mut self, gap: f64) {
        self.gap = gap;
    }

    /// Appends a path to the collection.
    pub fn push(&mut self, path: MPath) {
        self.paths.push(path);
        self.update_monotone();
    }

    /// The measure direction shared by the non-empty paths of the collection, or
    /// [`MeasureDirection::NonMonotone`] if the collection is not monotone. Empty and
    /// constant-measure collections are reported as [`MeasureDirection::Constant`].
    pub fn measure_direction(&self) -> MeasureDirection {
        if !self.monotone {
            return MeasureDirection::NonMonotone;
        }
        self.paths
            .iter()
            .map(|p| p.measure_direction())
            .find(|d| *d != MeasureDirection::Constant)
            .unwrap_or(MeasureDirection::Constant)
    }

    /// The collection is monotone iff all of its non-empty paths are monotone in the same
    /// direction (constant paths are compatible with either direction), and the measure ranges
    /// of consecutive paths follow that direction without overlapping. Strict monotonicity
    /// additionally requires strictly monotone paths and no shared boundary measures.
    fn update_monotone(&mut self) {
        self.monotone = true;
        self.strict_monotone = true;

        // constant segments do not pin the shared direction, so the first segment with a
        // definite direction decides it
        let direction = self
            .paths
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.measure_direction())
            .find(|d| *d != MeasureDirection::Constant)
            .unwrap_or(MeasureDirection::Constant);

        let mut prev: Option<&MPath> = None;
        for path in &self.paths {
            if path.is_empty() {
                continue;
            }

            let path_direction = path.measure_direction();
            if !path.is_monotone(false)
                || path_direction != direction && path_direction != MeasureDirection::Constant
            {
                self.monotone = false;
                break;
            }
            if !path.is_monotone(true) || path_direction != direction {
                self.strict_monotone = false;
            }

            if let Some(prev) = prev {
                if direction == MeasureDirection::Increasing {
                    if prev.max_m() > path.min_m() {
                        self.monotone = false;
                        break;
                    } else if prev.max_m() >= path.min_m() {
                        self.strict_monotone = false;
                    }
                } else if prev.min_m() < path.max_m() {
                    self.monotone = false;
                    break;
                } else if prev.min_m() <= path.max_m() {
                    self.strict_monotone = false;
                }
            }
            prev = Some(path);
        }

        self.strict_monotone &= self.monotone;
    }
}

impl Measured for MMultiPath {
    fn is_monotone(&self, strict: bool) -> bool {
        if strict {
            self.strict_monotone
        } else {
            self.monotone
        }
    }

    fn min_m(&self) -> f64 {
        self.paths
            .iter()
            .map(|p| p.min_m())
            .fold(f64::NAN, f64::min)
    }

    fn max_m(&self) -> f64 {
        self.paths
            .iter()
            .map(|p| p.max_m())
            .fold(f64::NAN, f64::max)
    }

    /// Measures the first path by its own rule; every following path is measured from zero and
    /// shifted so that it starts at the end measure of the previous path plus the
    /// [gap](MMultiPath::gap).
    fn measure_on_length(&mut self, keep_begin_measure: bool) {
        let gap = self.gap;
        let mut start_m = 0.0;
        for (i, path) in self.paths.iter_mut().enumerate() {
            path.measure_on_length(if i == 0 { keep_begin_measure } else { false });
            if start_m != 0.0 {
                path.shift_measure(start_m);
            }
            let end_m = path.points().last().map(|p| p.m()).unwrap_or(start_m);
            start_m = end_m + gap;
        }
        self.update_monotone();
    }

    fn coordinate_at_m(&self, m: f64) -> Result<Option<MPoint>, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        for path in &self.paths {
            if let Some(point) = path.coordinate_at_m(m)? {
                return Ok(Some(point));
            }
        }
        Ok(None)
    }

    fn coordinates_between(&self, begin: f64, end: f64) -> Result<Vec<MPath>, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        let mut parts = Vec::new();
        for path in &self.paths {
            parts.extend(
                path.coordinates_between(begin, end)?
                    .into_iter()
                    .filter(|part| !part.is_empty()),
            );
        }
        Ok(parts)
    }

    fn measure_at(&self, point: &MPoint, tolerance: f64) -> Result<f64, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        let mut measure = f64::NAN;
        let mut min_distance = f64::INFINITY;
        for path in &self.paths {
            if let Some(closest) = path.closest_point(point, tolerance)? {
                let distance = closest.distance_2d(point);
                if distance <= tolerance && distance < min_distance {
                    min_distance = distance;
                    measure = closest.m();
                }
            }
        }
        Ok(measure)
    }
}

impl Default for MMultiPath {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<MPath>> for MMultiPath {
    fn from(paths: Vec<MPath>) -> Self {
        Self::new(paths)
    }
}

impl FromIterator<MPath> for MMultiPath {
    fn from_iter<T: IntoIterator<Item = MPath>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<MMultiPathParts> for MMultiPath {
    fn from(parts: MMultiPathParts) -> Self {
        Self::with_gap(parts.paths, parts.gap)
    }
}

impl From<MMultiPath> for MMultiPathParts {
    fn from(collection: MMultiPath) -> Self {
        Self {
            paths: collection.paths,
            gap: collection.gap,
        }
    }
}

impl std::ops::Deref for MMultiPath {
    type Target = [MPath];

    fn deref(&self) -> &Self::Target {
        &self.paths
    }
}
