//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum MGeometryError {
    /// A measure-based query was issued on a geometry whose measures are not monotone.
    ///
    /// Recoverable by assigning monotone measures first, e.g. with
    /// [`measure_on_length`](crate::Measured::measure_on_length).
    #[error("operation requires a geometry with monotone measures")]
    NotMonotone,

    /// Two paths were unioned that share no endpoint.
    #[error("cannot union M-paths that are disjoint")]
    DisjointUnion,

    /// An ordinate index outside of X, Y, Z, M was requested on a vertex.
    #[error("invalid ordinate index: {0}")]
    InvalidOrdinate(usize),
}
