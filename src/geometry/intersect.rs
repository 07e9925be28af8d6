use super::{IntersectionPoint, LineEquation, PARALLEL_EPSILON, Point, Viewport};

/// Solve two line equations with Cramer's rule; `None` for (near-)parallel lines.
pub fn intersect(first: &LineEquation, second: &LineEquation) -> Option<Point> {
    let det = first.a * second.b - second.a * first.b;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let x = (first.b * second.c - second.b * first.c) / det;
    let y = (second.a * first.c - first.a * second.c) / det;
    Some(Point::new(x, y))
}

/// Crossings of every unordered pair of `lines` that fall inside the viewport.
pub fn intersections(lines: &[LineEquation], viewport: &Viewport) -> Vec<IntersectionPoint> {
    let mut out = Vec::new();
    for (idx, first) in lines.iter().enumerate() {
        for second in &lines[idx + 1..] {
            let Some(point) = intersect(first, second) else {
                continue;
            };
            if viewport.contains(point) {
                out.push(IntersectionPoint {
                    point,
                    lines: (first.pair, second.pair),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ClassPair;

    fn line(a: f32, b: f32, c: f32, first: usize, second: usize) -> LineEquation {
        LineEquation {
            a,
            b,
            c,
            pair: ClassPair { first, second },
        }
    }

    #[test]
    fn crossing_at_origin_yields_one_point() {
        let lines = [line(1.0, 1.0, 0.0, 0, 1), line(1.0, -1.0, 0.0, 0, 2)];
        let found = intersections(&lines, &Viewport::UNIT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].point, Point::new(0.0, 0.0));
        assert_eq!(found[0].lines.0, ClassPair { first: 0, second: 1 });
        assert_eq!(found[0].lines.1, ClassPair { first: 0, second: 2 });
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let lines = [line(1.0, 2.0, 0.0, 0, 1), line(1.0, 2.0, 0.5, 0, 2)];
        assert!(intersections(&lines, &Viewport::UNIT).is_empty());
        assert!(intersect(&lines[0], &lines[1]).is_none());
    }

    #[test]
    fn crossing_outside_viewport_is_dropped() {
        // x = 3 and y = 0 meet at (3, 0).
        let lines = [line(1.0, 0.0, -3.0, 0, 1), line(0.0, 1.0, 0.0, 1, 2)];
        assert!(intersections(&lines, &Viewport::UNIT).is_empty());
        assert_eq!(intersect(&lines[0], &lines[1]), Some(Point::new(3.0, 0.0)));
    }

    #[test]
    fn solves_offset_crossing() {
        // x - 0.5 = 0 and y + 0.25 = 0.
        let point = intersect(&line(1.0, 0.0, -0.5, 0, 1), &line(0.0, 1.0, 0.25, 0, 2)).unwrap();
        assert!((point.x - 0.5).abs() < 1e-6);
        assert!((point.y + 0.25).abs() < 1e-6);
    }

    #[test]
    fn crossing_on_edge_is_kept() {
        let lines = [line(1.0, 0.0, -1.0, 0, 1), line(0.0, 1.0, 1.0, 1, 2)];
        let found = intersections(&lines, &Viewport::UNIT);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].point, Point::new(1.0, -1.0));
    }
}
