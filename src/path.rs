//! Measured paths.
//!
//! An [`MPath`] is an open polyline whose vertices carry measure values. The measure of a vertex
//! is an application-defined scalar (a road kilometer, a pipeline station, a timestamp) that
//! grows or shrinks along the path, which makes it possible to locate positions on the path by
//! measure instead of by raw coordinates.
//!
//! The path caches whether its measure sequence is monotone. Every mutating method recomputes
//! the cache before returning, so queries never observe a stale flag. This is also why the
//! vertex storage is not exposed mutably: all mutations go through the methods of the path.

use serde::{Deserialize, Serialize};

use crate::error::MGeometryError;
use crate::measure::{MeasureDirection, Measured};
use crate::point::MPoint;
use crate::segment::Segment;
use crate::tolerance::approx_eq;

/// A polyline with a measure value assigned to every vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MPoint>", into = "Vec<MPoint>")]
pub struct MPath {
    points: Vec<MPoint>,
    monotone: bool,
    strict_monotone: bool,
}

impl Default for MPath {
    fn default() -> Self {
        // an empty path is vacuously monotone
        Self {
            points: Vec::new(),
            monotone: true,
            strict_monotone: true,
        }
    }
}

impl MPath {
    /// Creates a new path from the given vertices.
    pub fn new(points: Vec<MPoint>) -> Self {
        let mut path = Self {
            points,
            monotone: false,
            strict_monotone: false,
        };
        path.update_monotone();
        path
    }

    /// Returns true if the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Vertices of the path.
    pub fn points(&self) -> &[MPoint] {
        &self.points
    }

    /// Iterates over the straight segments between consecutive vertices of the path.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.points.windows(2).map(|pair| Segment(&pair[0], &pair[1]))
    }

    /// Measure values of all vertices, in vertex order. `None` if the path is empty.
    pub fn measures(&self) -> Option<Vec<f64>> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.points.iter().map(|p| p.m()).collect())
        }
    }

    /// Measure of the vertex with the given index, or `None` if there is no such vertex.
    pub fn measure_at_index(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.m())
    }

    /// Direction of the measures with respect to the vertex order of the path.
    ///
    /// An empty path is reported as [`MeasureDirection::Constant`].
    pub fn measure_direction(&self) -> MeasureDirection {
        if !self.monotone {
            return MeasureDirection::NonMonotone;
        }

        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return MeasureDirection::Constant;
        };

        if first.m() < last.m() {
            MeasureDirection::Increasing
        } else if first.m() > last.m() {
            MeasureDirection::Decreasing
        } else {
            MeasureDirection::Constant
        }
    }

    /// The measure length of the path: the absolute difference between the measures of its last
    /// and first vertices.
    ///
    /// NaN if the path is empty or either end has no measure; 0 for a single-vertex path.
    pub fn m_length(&self) -> f64 {
        match self.points.len() {
            0 => f64::NAN,
            1 => 0.0,
            len => (self.points[len - 1].m() - self.points[0].m()).abs(),
        }
    }

    /// The 2d euclidean length of the path.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[1].distance_2d(&pair[0]))
            .sum()
    }

    fn update_monotone(&mut self) {
        self.monotone = true;
        self.strict_monotone = true;
        if self.points.is_empty() {
            return;
        }

        if self.points[0].m().is_nan() {
            self.monotone = false;
            self.strict_monotone = false;
            return;
        }

        let mut prev_direction = 0;
        for pair in self.points.windows(2) {
            if pair[1].m().is_nan() {
                self.monotone = false;
                break;
            }
            let direction = pair[0].m().total_cmp(&pair[1].m()) as i32;
            if direction * prev_direction < 0 {
                self.monotone = false;
                break;
            }
            self.strict_monotone &= direction != 0;
            if direction != 0 {
                prev_direction = direction;
            }
        }

        self.strict_monotone &= self.monotone;
    }

    fn min_max_m(&self) -> (f64, f64) {
        if self.points.is_empty() {
            return (f64::NAN, f64::NAN);
        }

        match self.measure_direction() {
            MeasureDirection::Increasing => {
                (self.points[0].m(), self.points[self.points.len() - 1].m())
            }
            MeasureDirection::Decreasing | MeasureDirection::Constant => {
                (self.points[self.points.len() - 1].m(), self.points[0].m())
            }
            MeasureDirection::NonMonotone => self.points.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), p| {
                    let m = p.m();
                    (if m < min { m } else { min }, if m > max { m } else { max })
                },
            ),
        }
    }

    fn interpolate_between(p0: &MPoint, p1: &MPoint, m: f64) -> MPoint {
        let (p0, p1) = if p0.m() > p1.m() { (p1, p0) } else { (p0, p1) };
        debug_assert!(
            m >= p0.m() && m <= p1.m(),
            "measure not in the bracketing segment interval"
        );

        if p0.m() == p1.m() {
            // flat segment, any of its points matches the measure
            return MPoint::new(p0.x(), p0.y(), p0.z(), m);
        }

        let r = (m - p0.m()) / (p1.m() - p0.m());
        MPoint::new(
            p0.x() + r * (p1.x() - p0.x()),
            p0.y() + r * (p1.y() - p0.y()),
            p0.z() + r * (p1.z() - p0.z()),
            m,
        )
    }

    /// Assigns, to every vertex, the measure value proportional to its 2d offset along the path
    /// between `begin_measure` at the first vertex and `end_measure` at the last one.
    ///
    /// If the two bounds are equal under the [tolerance comparator](crate::tolerance::approx_eq),
    /// every vertex receives that same measure. For a degenerate path of zero 2d length the
    /// measures are spread evenly by vertex index instead of by offset.
    ///
    /// The resulting path is always monotone.
    pub fn interpolate(&mut self, begin_measure: f64, end_measure: f64) {
        if self.points.is_empty() {
            return;
        }

        let total_length = self.length();
        let m_length = end_measure - begin_measure;
        let continuous = approx_eq(begin_measure, end_measure);

        self.points[0].set_m(begin_measure);
        let point_count = self.points.len();
        let mut offset = 0.0;
        for i in 1..point_count {
            let m = if continuous {
                begin_measure
            } else if total_length == 0.0 {
                begin_measure + i as f64 / (point_count - 1) as f64 * m_length
            } else {
                offset += self.points[i].distance_2d(&self.points[i - 1]);
                begin_measure + offset / total_length * m_length
            };
            self.points[i].set_m(m);
        }

        self.update_monotone();
        debug_assert!(self.monotone, "interpolation must leave the path monotone");
    }

    /// Reverses the assignment of measures over the vertices without changing the vertex
    /// positions: the first vertex receives the measure of the last one and so on.
    pub fn reverse_measures(&mut self) {
        let point_count = self.points.len();
        for i in 0..point_count / 2 {
            let m_front = self.points[i].m();
            let m_back = self.points[point_count - 1 - i].m();
            self.points[i].set_m(m_back);
            self.points[point_count - 1 - i].set_m(m_front);
        }
        self.update_monotone();
    }

    /// Adds `delta` to the measure of every vertex. A negative `delta` subtracts, which can
    /// produce negative measures.
    pub fn shift_measure(&mut self, delta: f64) {
        for point in &mut self.points {
            let m = point.m();
            point.set_m(m + delta);
        }
        self.update_monotone();
    }

    /// Sets the measure of the vertex with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_measure_at(&mut self, index: usize, m: f64) {
        self.points[index].set_m(m);
        self.update_monotone();
    }

    /// The point of the path closest to the given point, with the measure interpolated at the
    /// projection position. Only segments within `tolerance` of the point are considered; `None`
    /// if there are none.
    ///
    /// Where two segments are equally distant (e.g. around a shared vertex), the smaller
    /// interpolated measure wins.
    ///
    /// Returns an error if the measures of the path are not monotone.
    pub fn closest_point(
        &self,
        point: &MPoint,
        tolerance: f64,
    ) -> Result<Option<MPoint>, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        let mut min_distance = f64::INFINITY;
        let mut closest: Option<MPoint> = None;
        for segment in self.iter_segments() {
            let distance = segment.distance_to_point_sq(point).sqrt();
            if distance <= tolerance && distance <= min_distance {
                let candidate = segment.closest_point(point);
                let better = match &closest {
                    Some(current) => distance < min_distance || candidate.m() < current.m(),
                    None => true,
                };
                if better {
                    closest = Some(candidate);
                    min_distance = distance;
                }
            }
        }

        Ok(closest)
    }

    /// Concatenates this path with another one into a single path with monotone measures.
    ///
    /// Both paths are first normalized to increasing measure direction by reversing their vertex
    /// order if needed. The paths must then share an endpoint: the last vertex of one path must
    /// coincide (2d position exactly, measure under the tolerance comparator) with the first
    /// vertex of the other. The shared vertex is not duplicated in the result.
    ///
    /// An empty path acts as the union identity.
    ///
    /// Returns [`MGeometryError::NotMonotone`] if either path is not monotone, and
    /// [`MGeometryError::DisjointUnion`] if the paths share no endpoint.
    pub fn union(&self, other: &MPath) -> Result<MPath, MGeometryError> {
        if !self.monotone || !other.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        let mut this_points = self.points.clone();
        if self.measure_direction() == MeasureDirection::Decreasing {
            log::debug!("reversing left operand of union to increasing measures");
            this_points.reverse();
        }
        let mut other_points = other.points.clone();
        if other.measure_direction() == MeasureDirection::Decreasing {
            log::debug!("reversing right operand of union to increasing measures");
            other_points.reverse();
        }

        if this_points.is_empty() {
            return Ok(MPath::new(other_points));
        }
        if other_points.is_empty() {
            return Ok(MPath::new(this_points));
        }

        let this_first = this_points[0];
        let this_last = this_points[this_points.len() - 1];
        let other_first = other_points[0];
        let other_last = other_points[other_points.len() - 1];

        let joined = if this_last.equal_2d_with_m(&other_first) {
            let mut joined = this_points;
            joined.extend_from_slice(&other_points[1..]);
            joined
        } else if other_last.equal_2d_with_m(&this_first) {
            let mut joined = other_points;
            joined.extend_from_slice(&this_points[1..]);
            joined
        } else {
            return Err(MGeometryError::DisjointUnion);
        };

        let result = MPath::new(joined);
        debug_assert!(result.monotone, "union must produce a monotone path");
        Ok(result)
    }

    /// Returns true if the measure interval of the path overlaps the closed interval between
    /// `begin` and `end`. Assumes the path is monotone. NaN bounds overlap nothing.
    fn overlaps(&self, begin: f64, end: f64) -> bool {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return false;
        };
        f64::min(begin, end) <= f64::max(first.m(), last.m())
            && f64::max(begin, end) >= f64::min(first.m(), last.m())
    }

    /// Collects the vertices with measures inside `[from_m, to_m]`, and the indices of the first
    /// collected vertex and of the last vertex visited before the measures left the interval.
    fn copy_coordinates_between(
        &self,
        from_m: f64,
        to_m: f64,
        increasing: bool,
    ) -> (Option<usize>, usize, Vec<MPoint>) {
        let mut first_index = None;
        let mut last_index = 0;
        let mut vertices = Vec::new();

        for (i, point) in self.points.iter().enumerate() {
            let m = point.m();
            if m >= from_m && m <= to_m {
                vertices.push(*point);
                first_index.get_or_insert(i);
            }

            if increasing {
                if m > to_m {
                    break;
                }
            } else if m < from_m {
                break;
            }
            last_index = i;
        }

        (first_index, last_index, vertices)
    }

    fn add_interpolated_end_points(
        &self,
        from_m: f64,
        to_m: f64,
        first_index: Option<usize>,
        last_index: usize,
        increasing: bool,
        vertices: &mut Vec<MPoint>,
    ) {
        // first and last interval bounds in vertex traversal order
        let (first_m, last_m) = if increasing {
            (from_m, to_m)
        } else {
            (to_m, from_m)
        };

        match first_index {
            None => {
                // the whole interval falls inside a single bracketing segment
                let p0 = &self.points[last_index];
                let p1 = &self.points[last_index + 1];
                vertices.push(Self::interpolate_between(p0, p1, first_m));
                vertices.push(Self::interpolate_between(p0, p1, last_m));
            }
            Some(first_index) => {
                let first = &self.points[first_index];
                if first_index > 0
                    && (increasing && first.m() > from_m || !increasing && first.m() < to_m)
                {
                    let interpolated = Self::interpolate_between(
                        &self.points[first_index - 1],
                        first,
                        first_m,
                    );
                    vertices.insert(0, interpolated);
                }

                let last = &self.points[last_index];
                if last_index < self.points.len() - 1
                    && (increasing && last.m() < to_m || !increasing && last.m() > from_m)
                {
                    let interpolated = Self::interpolate_between(
                        last,
                        &self.points[last_index + 1],
                        last_m,
                    );
                    vertices.push(interpolated);
                }
            }
        }
    }
}

impl Measured for MPath {
    fn is_monotone(&self, strict: bool) -> bool {
        if strict {
            self.strict_monotone
        } else {
            self.monotone
        }
    }

    fn min_m(&self) -> f64 {
        self.min_max_m().0
    }

    fn max_m(&self) -> f64 {
        self.min_max_m().1
    }

    fn measure_on_length(&mut self, keep_begin_measure: bool) {
        let Some(first) = self.points.first_mut() else {
            return;
        };

        let offset = if keep_begin_measure && !first.m().is_nan() {
            first.m()
        } else {
            first.set_m(0.0);
            0.0
        };

        let mut distance = 0.0;
        for i in 1..self.points.len() {
            distance += self.points[i].distance_2d(&self.points[i - 1]);
            self.points[i].set_m(offset + distance);
        }

        self.update_monotone();
    }

    fn coordinate_at_m(&self, m: f64) -> Result<Option<MPoint>, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }
        if self.points.is_empty() {
            return Ok(None);
        }

        let (lower, upper) = self.min_max_m();
        if m < lower || m > upper {
            return Ok(None);
        }

        for pair in self.points.windows(2) {
            let m0 = pair[0].m();
            let m1 = pair[1].m();
            let bracketed = m0 <= m && m <= m1 || m1 <= m && m <= m0;
            if !bracketed {
                continue;
            }

            if m0 == m1 {
                // a flat stretch queried exactly at its measure: the first bracket wins, and
                // within it the start vertex position is as good an answer as any
                log::warn!("measure {m} falls on a constant-measure stretch of the path");
                return Ok(Some(MPoint::new(
                    pair[0].x(),
                    pair[0].y(),
                    pair[0].z(),
                    m,
                )));
            }

            let r = (m - m0) / (m1 - m0);
            return Ok(Some(MPoint::new(
                pair[0].x() + r * (pair[1].x() - pair[0].x()),
                pair[0].y() + r * (pair[1].y() - pair[0].y()),
                pair[0].z() + r * (pair[1].z() - pair[0].z()),
                m,
            )));
        }

        Ok(None)
    }

    fn coordinates_between(&self, begin: f64, end: f64) -> Result<Vec<MPath>, MGeometryError> {
        if !self.monotone {
            return Err(MGeometryError::NotMonotone);
        }

        let (from_m, to_m) = if begin > end { (end, begin) } else { (begin, end) };
        if !self.overlaps(from_m, to_m) {
            return Ok(Vec::new());
        }

        let increasing = self.measure_direction() == MeasureDirection::Increasing;
        let (first_index, last_index, mut vertices) =
            self.copy_coordinates_between(from_m, to_m, increasing);
        self.add_interpolated_end_points(
            from_m,
            to_m,
            first_index,
            last_index,
            increasing,
            &mut vertices,
        );

        Ok(vec![MPath::new(vertices)])
    }

    fn measure_at(&self, point: &MPoint, tolerance: f64) -> Result<f64, MGeometryError> {
        Ok(self
            .closest_point(point, tolerance)?
            .map(|closest| closest.m())
            .unwrap_or(f64::NAN))
    }
}

impl From<Vec<MPoint>> for MPath {
    fn from(points: Vec<MPoint>) -> Self {
        Self::new(points)
    }
}

impl From<MPath> for Vec<MPoint> {
    fn from(path: MPath) -> Self {
        path.points
    }
}

impl FromIterator<MPoint> for MPath {
    fn from_iter<T: IntoIterator<Item = MPoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::ops::Deref for MPath {
    type Target = [MPoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn path(points: &[(f64, f64, f64)]) -> MPath {
        points
            .iter()
            .map(|&(x, y, m)| MPoint::xym(x, y, m))
            .collect()
    }

    #[test]
    fn monotonicity() {
        assert!(path(&[]).is_monotone(true));

        let increasing = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 1.0), (2.0, 0.0, 2.0)]);
        assert!(increasing.is_monotone(false));
        assert!(increasing.is_monotone(true));
        assert_eq!(increasing.measure_direction(), MeasureDirection::Increasing);

        let decreasing = path(&[(0.0, 0.0, 5.0), (1.0, 0.0, 3.0), (2.0, 0.0, 0.0)]);
        assert!(decreasing.is_monotone(true));
        assert_eq!(decreasing.measure_direction(), MeasureDirection::Decreasing);

        let with_plateau = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 1.0), (2.0, 0.0, 1.0)]);
        assert!(with_plateau.is_monotone(false));
        assert!(!with_plateau.is_monotone(true));

        let constant = path(&[(0.0, 0.0, 2.0), (1.0, 0.0, 2.0)]);
        assert!(constant.is_monotone(false));
        assert_eq!(constant.measure_direction(), MeasureDirection::Constant);

        let reversal = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 2.0), (2.0, 0.0, 1.0)]);
        assert!(!reversal.is_monotone(false));
        assert!(!reversal.is_monotone(true));
        assert_eq!(reversal.measure_direction(), MeasureDirection::NonMonotone);
    }

    #[test]
    fn nan_measure_is_not_monotone() {
        let unassigned = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, f64::NAN)]);
        assert!(!unassigned.is_monotone(false));

        let unassigned_first = path(&[(0.0, 0.0, f64::NAN), (1.0, 0.0, 1.0)]);
        assert!(!unassigned_first.is_monotone(false));
    }

    #[test]
    fn measure_on_length_assigns_distances() {
        let mut path = MPath::new(vec![MPoint::xym(0.0, 0.0, 0.0), MPoint::xy(10.0, 0.0)]);
        path.measure_on_length(false);

        assert_eq!(path.measures(), Some(vec![0.0, 10.0]));
        assert!(path.is_monotone(true));
        assert_eq!(path.measure_direction(), MeasureDirection::Increasing);
    }

    #[test]
    fn measure_on_length_is_idempotent() {
        let mut path = path(&[(0.0, 0.0, 7.0), (3.0, 4.0, 1.0), (3.0, 10.0, 4.0)]);
        path.measure_on_length(false);
        let first_run = path.measures();
        path.measure_on_length(false);
        assert_eq!(path.measures(), first_run);
        assert_eq!(first_run, Some(vec![0.0, 5.0, 11.0]));
    }

    #[test]
    fn measure_on_length_keeps_begin_measure() {
        let mut path = path(&[(0.0, 0.0, 100.0), (3.0, 4.0, f64::NAN)]);
        path.measure_on_length(true);
        assert_eq!(path.measures(), Some(vec![100.0, 105.0]));

        let mut path = MPath::new(vec![MPoint::xy(0.0, 0.0), MPoint::xy(3.0, 4.0)]);
        path.measure_on_length(true);
        assert_eq!(path.measures(), Some(vec![0.0, 5.0]));
    }

    #[test]
    fn interpolate_spreads_measures_by_length() {
        let mut path = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (4.0, 0.0, 0.0)]);
        path.interpolate(10.0, 18.0);
        let measures = path.measures().expect("non-empty path");
        assert_abs_diff_eq!(measures[0], 10.0);
        assert_abs_diff_eq!(measures[1], 12.0);
        assert_abs_diff_eq!(measures[2], 18.0);
        assert!(path.is_monotone(false));
    }

    #[test]
    fn interpolate_decreasing() {
        let mut path = path(&[(0.0, 0.0, 0.0), (5.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
        path.interpolate(20.0, 10.0);
        assert_eq!(path.measures(), Some(vec![20.0, 15.0, 10.0]));
        assert_eq!(path.measure_direction(), MeasureDirection::Decreasing);
    }

    #[test]
    fn interpolate_equal_bounds_makes_constant_path() {
        let mut path = path(&[(0.0, 0.0, 1.0), (5.0, 0.0, 2.0), (10.0, 0.0, 3.0)]);
        path.interpolate(42.0, 42.0);
        assert_eq!(path.measures(), Some(vec![42.0, 42.0, 42.0]));
        assert_eq!(path.measure_direction(), MeasureDirection::Constant);
        assert!(path.is_monotone(false));
    }

    #[test]
    fn interpolate_zero_length_path_stays_monotone() {
        let mut path = path(&[(1.0, 1.0, 0.0), (1.0, 1.0, 0.0), (1.0, 1.0, 0.0)]);
        path.interpolate(0.0, 10.0);
        assert_eq!(path.measures(), Some(vec![0.0, 5.0, 10.0]));
        assert!(path.is_monotone(false));
    }

    #[test]
    fn m_length_conventions() {
        assert!(MPath::default().m_length().is_nan());
        assert_eq!(path(&[(1.0, 1.0, 7.0)]).m_length(), 0.0);
        assert_eq!(path(&[(0.0, 0.0, 2.0), (1.0, 0.0, 12.0)]).m_length(), 10.0);
        assert_eq!(path(&[(0.0, 0.0, 12.0), (1.0, 0.0, 2.0)]).m_length(), 10.0);
        assert!(MPath::new(vec![MPoint::xy(0.0, 0.0), MPoint::xy(1.0, 0.0)])
            .m_length()
            .is_nan());
    }

    #[test]
    fn min_max_m() {
        let empty = MPath::default();
        assert!(empty.min_m().is_nan());
        assert!(empty.max_m().is_nan());

        let increasing = path(&[(0.0, 0.0, 1.0), (1.0, 0.0, 5.0)]);
        assert_eq!(increasing.min_m(), 1.0);
        assert_eq!(increasing.max_m(), 5.0);

        let decreasing = path(&[(0.0, 0.0, 5.0), (1.0, 0.0, 1.0)]);
        assert_eq!(decreasing.min_m(), 1.0);
        assert_eq!(decreasing.max_m(), 5.0);

        let non_monotone = path(&[(0.0, 0.0, 1.0), (1.0, 0.0, 7.0), (2.0, 0.0, 3.0)]);
        assert_eq!(non_monotone.min_m(), 1.0);
        assert_eq!(non_monotone.max_m(), 7.0);
    }

    #[test]
    fn coordinate_at_m_interpolates() {
        let path = path(&[(0.0, 0.0, 0.0), (5.0, 0.0, 5.0), (10.0, 0.0, 10.0)]);
        let point = path
            .coordinate_at_m(7.5)
            .expect("monotone path")
            .expect("measure in range");
        assert_abs_diff_eq!(point.x(), 7.5);
        assert_abs_diff_eq!(point.y(), 0.0);
        assert_eq!(point.m(), 7.5);
    }

    #[test]
    fn coordinate_at_m_existing_vertex() {
        let path = path(&[(0.0, 0.0, 0.0), (5.0, 3.0, 5.0), (10.0, 0.0, 10.0)]);
        let point = path
            .coordinate_at_m(5.0)
            .expect("monotone path")
            .expect("measure in range");
        assert_eq!((point.x(), point.y(), point.m()), (5.0, 3.0, 5.0));
    }

    #[test]
    fn coordinate_at_m_on_decreasing_path() {
        let path = path(&[(0.0, 0.0, 10.0), (10.0, 0.0, 0.0)]);
        let point = path
            .coordinate_at_m(2.5)
            .expect("monotone path")
            .expect("measure in range");
        assert_abs_diff_eq!(point.x(), 7.5);
    }

    #[test]
    fn coordinate_at_m_on_flat_stretch_picks_first_bracket() {
        let path = path(&[(0.0, 0.0, 0.0), (5.0, 0.0, 5.0), (8.0, 0.0, 5.0), (10.0, 0.0, 7.0)]);
        let point = path
            .coordinate_at_m(5.0)
            .expect("monotone path")
            .expect("measure in range");
        // the first segment bracketing measure 5 ends at x == 5
        assert_eq!((point.x(), point.m()), (5.0, 5.0));

        let constant = path_constant();
        let point = constant
            .coordinate_at_m(2.0)
            .expect("monotone path")
            .expect("measure in range");
        assert_eq!((point.x(), point.m()), (0.0, 2.0));
    }

    fn path_constant() -> MPath {
        path(&[(0.0, 0.0, 2.0), (5.0, 0.0, 2.0), (10.0, 0.0, 2.0)])
    }

    #[test]
    fn coordinate_at_m_out_of_range() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        assert_matches!(path.coordinate_at_m(-1.0), Ok(None));
        assert_matches!(path.coordinate_at_m(10.1), Ok(None));
        assert_matches!(MPath::default().coordinate_at_m(0.0), Ok(None));
    }

    #[test]
    fn coordinate_at_m_requires_monotone() {
        let path = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 2.0), (2.0, 0.0, 1.0)]);
        assert_matches!(
            path.coordinate_at_m(1.5),
            Err(MGeometryError::NotMonotone)
        );
    }

    #[test]
    fn coordinate_at_m_interpolates_z() {
        let path = MPath::new(vec![
            MPoint::new(0.0, 0.0, 0.0, 0.0),
            MPoint::new(10.0, 0.0, 20.0, 10.0),
        ]);
        let point = path
            .coordinate_at_m(5.0)
            .expect("monotone path")
            .expect("measure in range");
        assert_abs_diff_eq!(point.z(), 10.0);
    }

    #[test]
    fn coordinates_between_interpolates_bounds() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let parts = path.coordinates_between(3.0, 7.0).expect("monotone path");
        assert_eq!(parts.len(), 1);
        let part = &parts[0];
        assert_eq!(part.len(), 2);
        assert_abs_diff_eq!(part[0].x(), 3.0);
        assert_eq!(part[0].m(), 3.0);
        assert_abs_diff_eq!(part[1].x(), 7.0);
        assert_eq!(part[1].m(), 7.0);
    }

    #[test]
    fn coordinates_between_swaps_reversed_bounds() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let parts = path.coordinates_between(7.0, 3.0).expect("monotone path");
        assert_eq!(parts[0].measures(), Some(vec![3.0, 7.0]));
    }

    #[test]
    fn coordinates_between_collects_inner_vertices() {
        let path = path(&[
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 2.0),
            (4.0, 0.0, 4.0),
            (6.0, 0.0, 6.0),
        ]);
        let parts = path.coordinates_between(1.0, 5.0).expect("monotone path");
        assert_eq!(parts[0].measures(), Some(vec![1.0, 2.0, 4.0, 5.0]));
    }

    #[test]
    fn coordinates_between_without_overlap() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        assert!(path
            .coordinates_between(11.0, 20.0)
            .expect("monotone path")
            .is_empty());
        assert!(MPath::default()
            .coordinates_between(0.0, 1.0)
            .expect("empty path is monotone")
            .is_empty());
    }

    #[test]
    fn coordinates_between_whole_range() {
        let path = path(&[(0.0, 0.0, 0.0), (5.0, 0.0, 5.0), (10.0, 0.0, 10.0)]);
        let parts = path
            .coordinates_between(-5.0, 15.0)
            .expect("monotone path");
        assert_eq!(parts[0].measures(), Some(vec![0.0, 5.0, 10.0]));
    }

    #[test]
    fn coordinates_between_on_decreasing_path() {
        let path = path(&[(0.0, 0.0, 10.0), (5.0, 0.0, 5.0), (10.0, 0.0, 0.0)]);
        let parts = path.coordinates_between(2.0, 7.0).expect("monotone path");
        let part = &parts[0];
        assert_eq!(part.measures(), Some(vec![7.0, 5.0, 2.0]));
        assert_eq!(part.measure_direction(), MeasureDirection::Decreasing);
        assert_abs_diff_eq!(part[0].x(), 3.0);
        assert_abs_diff_eq!(part[2].x(), 8.0);
    }

    #[test]
    fn coordinates_between_inside_single_segment() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let parts = path.coordinates_between(4.0, 6.0).expect("monotone path");
        assert_eq!(parts[0].measures(), Some(vec![4.0, 6.0]));
        assert_abs_diff_eq!(parts[0][0].x(), 4.0);
        assert_abs_diff_eq!(parts[0][1].x(), 6.0);
    }

    #[test]
    fn coordinates_between_stays_monotone() {
        let path = path(&[
            (0.0, 0.0, 0.0),
            (2.0, 1.0, 2.0),
            (4.0, 0.0, 4.0),
            (6.0, 1.0, 6.0),
        ]);
        let parts = path.coordinates_between(0.5, 5.5).expect("monotone path");
        assert!(parts[0].is_monotone(false));
        assert_eq!(parts[0].measure_direction(), MeasureDirection::Increasing);
    }

    #[test]
    fn closest_point_projects_and_interpolates() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let closest = path
            .closest_point(&MPoint::xy(4.0, 1.0), 2.0)
            .expect("monotone path")
            .expect("point within tolerance");
        assert_abs_diff_eq!(closest.x(), 4.0);
        assert_abs_diff_eq!(closest.y(), 0.0);
        assert_abs_diff_eq!(closest.m(), 4.0);
    }

    #[test]
    fn closest_point_outside_tolerance() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        assert_matches!(path.closest_point(&MPoint::xy(4.0, 5.0), 2.0), Ok(None));
    }

    #[test]
    fn closest_point_tie_prefers_smaller_measure() {
        // a path that doubles back right next to itself: both passes are equally distant
        let path = path(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 10.0),
            (10.0, 2.0, 12.0),
            (0.0, 2.0, 22.0),
        ]);
        let closest = path
            .closest_point(&MPoint::xy(5.0, 1.0), 1.5)
            .expect("monotone path")
            .expect("point within tolerance");
        assert_abs_diff_eq!(closest.m(), 5.0);
    }

    #[test]
    fn measure_at_returns_nan_when_out_of_tolerance() {
        let path = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        assert_eq!(
            path.measure_at(&MPoint::xy(2.0, 1.0), 1.5).expect("monotone path"),
            2.0
        );
        assert!(path
            .measure_at(&MPoint::xy(2.0, 10.0), 1.5)
            .expect("monotone path")
            .is_nan());
    }

    #[test]
    fn reverse_measures_twice_restores_original() {
        let original = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 3.0), (2.0, 0.0, 7.0)]);
        let mut reversed = original.clone();
        reversed.reverse_measures();
        assert_eq!(reversed.measures(), Some(vec![7.0, 3.0, 0.0]));
        assert_eq!(reversed.measure_direction(), MeasureDirection::Decreasing);
        assert_eq!(reversed[0].x(), 0.0);

        reversed.reverse_measures();
        assert_eq!(reversed, original);
    }

    #[test]
    fn shift_measure_moves_all_measures() {
        let mut path = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 5.0)]);
        path.shift_measure(-7.0);
        assert_eq!(path.measures(), Some(vec![-7.0, -2.0]));
        assert!(path.is_monotone(true));
    }

    #[test]
    fn set_measure_at_recomputes_monotonicity() {
        let mut path = path(&[(0.0, 0.0, 0.0), (1.0, 0.0, 5.0), (2.0, 0.0, 10.0)]);
        path.set_measure_at(1, 20.0);
        assert!(!path.is_monotone(false));
        path.set_measure_at(1, 5.0);
        assert!(path.is_monotone(true));
    }

    #[test]
    fn union_joins_at_shared_endpoint() {
        let a = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let b = path(&[(10.0, 0.0, 10.0), (20.0, 0.0, 20.0)]);

        let union = a.union(&b).expect("paths share an endpoint");
        assert_eq!(union.len(), 3);
        assert_eq!(union.measures(), Some(vec![0.0, 10.0, 20.0]));
        assert!(union.is_monotone(false));
    }

    #[test]
    fn union_is_symmetric() {
        let a = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let b = path(&[(10.0, 0.0, 10.0), (20.0, 0.0, 20.0)]);
        assert_eq!(
            a.union(&b).expect("paths share an endpoint"),
            b.union(&a).expect("paths share an endpoint")
        );
    }

    #[test]
    fn union_normalizes_decreasing_operands() {
        let a = path(&[(10.0, 0.0, 10.0), (0.0, 0.0, 0.0)]);
        let b = path(&[(20.0, 0.0, 20.0), (10.0, 0.0, 10.0)]);

        let union = a.union(&b).expect("paths share an endpoint");
        assert_eq!(union.measures(), Some(vec![0.0, 10.0, 20.0]));
        assert_eq!(union[0].x(), 0.0);
        assert_eq!(union[2].x(), 20.0);
    }

    #[test]
    fn union_of_disjoint_paths_fails() {
        let a = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let c = path(&[(50.0, 50.0, 50.0), (60.0, 60.0, 60.0)]);
        assert_matches!(a.union(&c), Err(MGeometryError::DisjointUnion));
    }

    #[test]
    fn union_requires_monotone_operands() {
        let a = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        let bad = path(&[(10.0, 0.0, 10.0), (20.0, 0.0, 5.0), (30.0, 0.0, 7.0)]);
        assert_matches!(a.union(&bad), Err(MGeometryError::NotMonotone));
    }

    #[test]
    fn union_with_empty_path() {
        let a = path(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0)]);
        assert_eq!(a.union(&MPath::default()).expect("identity union"), a);
        assert_eq!(MPath::default().union(&a).expect("identity union"), a);
    }

    #[test]
    fn serde_round_trip() {
        let path = path(&[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0)]);
        let json = serde_json::to_string(&path).expect("serializable");
        let restored: MPath = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(restored, path);
        assert!(restored.is_monotone(true));
    }
}
