//! Plain-text record ingestion.
//!
//! Input is one point per line, `figure_id,segment_id,x,y`, with `#`
//! comments and blank lines skipped. Records sharing a figure id become one
//! [`Figure`]; records sharing a segment id within it become one stroke.
//! Both groupings preserve first-encounter order, so the caller's drawing
//! order survives a round trip.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::pipeline::Figure;
use geo::{Coord, LineString};

/// Parse a record stream into figures.
///
/// Ids must be non-negative integers; an integral float such as `3.0` is
/// accepted since some exporters write every column as a float. Coordinates
/// must be finite. Errors carry the 1-based line number of the offending
/// record. No geometric validation happens here; degenerate strokes are
/// rejected later, when a pipeline operation consumes them.
pub fn parse_records(input: &str) -> Result<Vec<Figure>, ValidationError> {
    let mut figures: Vec<(u32, Vec<(u32, LineString<Real>)>)> = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let &[figure, segment, x, y] = fields.as_slice() else {
            return Err(ValidationError::MalformedRecord { line: number });
        };

        let figure_id =
            parse_id(figure).ok_or(ValidationError::MalformedRecord { line: number })?;
        let segment_id =
            parse_id(segment).ok_or(ValidationError::MalformedRecord { line: number })?;
        let x: Real = x
            .parse()
            .map_err(|_| ValidationError::MalformedRecord { line: number })?;
        let y: Real = y
            .parse()
            .map_err(|_| ValidationError::MalformedRecord { line: number })?;
        let coord = Coord { x, y };
        if !x.is_finite() || !y.is_finite() {
            return Err(ValidationError::InvalidCoordinate(coord));
        }

        let slot = match figures.iter().position(|(id, _)| *id == figure_id) {
            Some(i) => i,
            None => {
                figures.push((figure_id, Vec::new()));
                figures.len() - 1
            },
        };
        let strokes = &mut figures[slot].1;
        match strokes.iter_mut().find(|(id, _)| *id == segment_id) {
            Some((_, stroke)) => stroke.0.push(coord),
            None => strokes.push((segment_id, LineString::new(vec![coord]))),
        }
    }

    Ok(figures
        .into_iter()
        .map(|(id, strokes)| Figure {
            id,
            strokes: strokes.into_iter().map(|(_, stroke)| stroke).collect(),
        })
        .collect())
}

/// Id column parser. Plain `u32` first, then the integral-float fallback.
fn parse_id(field: &str) -> Option<u32> {
    if let Ok(id) = field.parse::<u32>() {
        return Some(id);
    }
    let value: Real = field.parse().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as Real {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_figure_then_segment() {
        let input = "\
0,0,0.0,0.0
0,0,1.0,0.0
0,1,5.0,5.0
1,0,9.0,9.0
";
        let figures = parse_records(input).unwrap();
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].id, 0);
        assert_eq!(figures[0].strokes.len(), 2);
        assert_eq!(figures[0].strokes[0].0.len(), 2);
        assert_eq!(figures[1].id, 1);
        assert_eq!(figures[1].strokes[0].0[0], Coord { x: 9.0, y: 9.0 });
    }

    #[test]
    fn interleaved_records_rejoin_their_figure() {
        let input = "\
7,0,0.0,0.0
2,0,1.0,1.0
7,0,2.0,0.0
";
        let figures = parse_records(input).unwrap();
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].id, 7);
        assert_eq!(figures[0].strokes[0].0.len(), 2);
        assert_eq!(figures[1].id, 2);
    }

    #[test]
    fn encounter_order_wins_over_numeric_order() {
        let input = "9,0,0.0,0.0\n3,0,1.0,1.0\n";
        let ids: Vec<u32> = parse_records(input).unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![9, 3]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = "\
# exported sketch
0,0,0.0,0.0

  # trailing section
0,0,1.0,1.0
";
        let figures = parse_records(input).unwrap();
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].strokes[0].0.len(), 2);
    }

    #[test]
    fn integral_float_ids_are_accepted() {
        let figures = parse_records("2.0,0.0,1.5,2.5\n").unwrap();
        assert_eq!(figures[0].id, 2);
    }

    #[test]
    fn short_record_reports_its_line_number() {
        let input = "# header\n0,0,0.0,0.0\n0,0,1.0\n";
        assert_eq!(
            parse_records(input),
            Err(ValidationError::MalformedRecord { line: 3 })
        );
    }

    #[test]
    fn fractional_or_negative_ids_are_malformed() {
        assert_eq!(
            parse_records("1.5,0,0.0,0.0\n"),
            Err(ValidationError::MalformedRecord { line: 1 })
        );
        assert_eq!(
            parse_records("-1,0,0.0,0.0\n"),
            Err(ValidationError::MalformedRecord { line: 1 })
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let err = parse_records("0,0,nan,1.0\n").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCoordinate(_)));
    }
}
