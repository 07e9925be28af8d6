use super::{COEFFICIENT_EPSILON, LineEquation, Point, Segment, Viewport};

/// Clip an infinite line to the square viewport.
///
/// Candidates are gathered in a fixed order (left edge, right edge, bottom edge, top edge),
/// near-duplicates (e.g. a corner hit from two edges) are merged, and the first two distinct
/// candidates become the endpoints. Fewer than two yields a sentinel segment.
pub fn clip_line(line: &LineEquation, viewport: &Viewport) -> Segment {
    let mut candidates: Vec<Point> = Vec::with_capacity(4);
    if line.b.abs() > COEFFICIENT_EPSILON {
        for x in [viewport.min, viewport.max] {
            let y = -(line.a * x + line.c) / line.b;
            if viewport.contains_coord(y) {
                candidates.push(Point::new(x, y));
            }
        }
    }
    if line.a.abs() > COEFFICIENT_EPSILON {
        for y in [viewport.min, viewport.max] {
            let x = -(line.b * y + line.c) / line.a;
            if viewport.contains_coord(x) {
                candidates.push(Point::new(x, y));
            }
        }
    }

    let tol = viewport.dedup_tolerance();
    let mut distinct: Vec<Point> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let seen = distinct
            .iter()
            .any(|p| (p.x - candidate.x).abs() < tol && (p.y - candidate.y).abs() < tol);
        if !seen {
            distinct.push(candidate);
        }
    }

    let endpoints = match distinct.as_slice() {
        [start, end, ..] => Some([*start, *end]),
        _ => None,
    };
    Segment {
        pair: line.pair,
        endpoints,
    }
}
