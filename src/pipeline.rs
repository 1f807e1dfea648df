//! Batch orchestration.
//!
//! A [`Figure`] groups the strokes of one logical sketch object. The
//! regularize path classifies and canonicalizes each stroke on its own; the
//! completion path hands all strokes of a figure to the stitcher in a single
//! pass, since candidate connections must see every curve of the figure at
//! once. With the `parallel` feature, figures fan out across a rayon pool on
//! the regularize path; completion always runs sequentially, figure by
//! figure.

use crate::classify::{ShapeKind, classify};
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::geometry::validate_polyline;
use crate::regularize::regularize;
use crate::stitch::complete;
use geo::LineString;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One logical sketch object: the strokes drawn for it, in drawing order.
///
/// Purely a pass-through container. Nothing in classification or
/// regularization looks across strokes; completion looks across exactly the
/// strokes of one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub id: u32,
    pub strokes: Vec<LineString<Real>>,
}

/// A stroke after regularization, with the kind the classifier assigned.
///
/// The kind is recorded from the input stroke, not the output. The two can
/// differ for one documented case: a canonicalized 4-gon is a perfect
/// square, which re-reads as a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizedStroke {
    pub kind: ShapeKind,
    pub points: LineString<Real>,
}

/// A figure after the classify/regularize pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizedFigure {
    pub id: u32,
    pub strokes: Vec<RegularizedStroke>,
}

/// Classify and regularize every stroke of one figure.
///
/// Strokes are validated up front so a malformed one is reported with its
/// index before any output is built. A figure with no strokes is an error,
/// not an empty answer.
pub fn regularize_figure(figure: &Figure) -> Result<RegularizedFigure, ValidationError> {
    if figure.strokes.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    for (index, stroke) in figure.strokes.iter().enumerate() {
        validate_polyline(index, stroke)?;
    }
    let strokes = figure
        .strokes
        .iter()
        .map(|stroke| {
            let kind = classify(stroke);
            let points = regularize(stroke, kind)?;
            Ok(RegularizedStroke { kind, points })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;
    log::debug!("figure {}: regularized {} strokes", figure.id, strokes.len());
    Ok(RegularizedFigure {
        id: figure.id,
        strokes,
    })
}

/// Regularize a batch of figures independently.
pub fn regularize_batch(figures: &[Figure]) -> Result<Vec<RegularizedFigure>, ValidationError> {
    #[cfg(feature = "parallel")]
    let collected: Result<Vec<_>, _> = figures.par_iter().map(regularize_figure).collect();
    #[cfg(not(feature = "parallel"))]
    let collected: Result<Vec<_>, _> = figures.iter().map(regularize_figure).collect();
    collected
}

/// Run curve completion over all strokes of one figure.
pub fn complete_figure(
    figure: &Figure,
    max_join_distance: Real,
) -> Result<Figure, ValidationError> {
    let strokes = complete(&figure.strokes, max_join_distance)?;
    Ok(Figure {
        id: figure.id,
        strokes,
    })
}

/// Complete a batch of figures, one stitching pass per figure.
pub fn complete_batch(
    figures: &[Figure],
    max_join_distance: Real,
) -> Result<Vec<Figure>, ValidationError> {
    figures
        .iter()
        .map(|figure| complete_figure(figure, max_join_distance))
        .collect()
}
