//! Validation errors

use crate::float_types::Real;
use geo::Coord;
use std::fmt::Display;

/// All the possible validation issues we might encounter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (TooFewPoints) A polyline or control set has fewer than the minimal #points
    TooFewPoints { index: usize, count: usize },
    /// (EmptyBatch) A batch operation received zero curves
    EmptyBatch,
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    InvalidCoordinate(Coord<Real>),
    /// (DegenerateShape) Coincident points leave a centroid with no usable spread
    DegenerateShape(Coord<Real>),
    /// (MalformedRecord) A record line does not parse as figure,segment,x,y
    MalformedRecord { line: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewPoints { index, count } => write!(
                f,
                "(TooFewPoints) Polyline {} has {} points, fewer than the minimal 2",
                index, count
            ),
            ValidationError::EmptyBatch => {
                write!(f, "(EmptyBatch) A batch operation received zero curves")
            },
            ValidationError::InvalidCoordinate(coord) => write!(
                f,
                "(InvalidCoordinate) The coordinate ({}, {}) has a NaN or infinite",
                coord.x, coord.y
            ),
            ValidationError::DegenerateShape(coord) => write!(
                f,
                "(DegenerateShape) Coincident points leave no usable spread about: ({}, {})",
                coord.x, coord.y
            ),
            ValidationError::MalformedRecord { line } => write!(
                f,
                "(MalformedRecord) Line {} does not parse as figure,segment,x,y",
                line
            ),
        }
    }
}
