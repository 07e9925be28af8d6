//! Decision-boundary geometry derived from classifier weights.
//! Everything here is a pure function of the weight rows and the viewport, so the UI can
//! recompute it every frame without caching.

mod clip;
mod intersect;

pub use clip::clip_line;
pub use intersect::{intersect, intersections};

/// Coefficient magnitude below which a line term is treated as zero.
pub const COEFFICIENT_EPSILON: f32 = 1e-8;
/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-8;
/// Containment slack for a unit half-extent viewport.
const CONTAINMENT_TOLERANCE: f32 = 1e-6;
/// Distance under which two clip candidates are the same point, for a unit half-extent.
const DEDUP_TOLERANCE: f32 = 1e-4;

/// A 2-D coordinate in feature space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The two classes a boundary separates; `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassPair {
    pub first: usize,
    pub second: usize,
}

/// The line `a·x + b·y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub pair: ClassPair,
}

impl LineEquation {
    /// Boundary where the logits of `rows[first]` and `rows[second]` are equal.
    ///
    /// `None` when either index is out of range.
    pub fn between(rows: &[[f32; 3]], first: usize, second: usize) -> Option<Self> {
        let (wi, wj) = (rows.get(first)?, rows.get(second)?);
        Some(Self {
            a: wi[1] - wj[1],
            b: wi[2] - wj[2],
            c: wi[0] - wj[0],
            pair: ClassPair { first, second },
        })
    }
}

/// Axis-aligned square viewport `[min, max]²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: f32,
    pub max: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Viewport {
    /// The normalized feature square `[-1, 1]²`.
    pub const UNIT: Self = Self {
        min: -1.0,
        max: 1.0,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn half_extent(&self) -> f32 {
        (self.max - self.min) * 0.5
    }

    /// Containment slack scaled to this viewport's size.
    pub fn containment_tolerance(&self) -> f32 {
        CONTAINMENT_TOLERANCE * self.half_extent()
    }

    /// Candidate merge distance scaled to this viewport's size.
    pub fn dedup_tolerance(&self) -> f32 {
        DEDUP_TOLERANCE * self.half_extent()
    }

    /// Whether `value` lies in `[min, max]` within the containment tolerance.
    pub fn contains_coord(&self, value: f32) -> bool {
        let tol = self.containment_tolerance();
        value >= self.min - tol && value <= self.max + tol
    }

    pub fn contains(&self, point: Point) -> bool {
        self.contains_coord(point.x) && self.contains_coord(point.y)
    }

    /// A point well outside the viewport, used to park invisible segments.
    pub fn off_viewport_point(&self) -> Point {
        let far = self.max + 10.0 * self.half_extent();
        Point::new(far, far)
    }
}

/// A boundary line clipped to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pair: ClassPair,
    /// `None` when the line misses the viewport or is degenerate.
    pub endpoints: Option<[Point; 2]>,
}

impl Segment {
    pub fn is_sentinel(&self) -> bool {
        self.endpoints.is_none()
    }

    /// Endpoints to draw; sentinels collapse to a point outside `viewport`.
    pub fn render_endpoints(&self, viewport: &Viewport) -> [Point; 2] {
        self.endpoints.unwrap_or_else(|| {
            let far = viewport.off_viewport_point();
            [far, far]
        })
    }
}

/// Where two boundary lines cross inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    pub point: Point,
    pub lines: (ClassPair, ClassPair),
}

/// One boundary line per unordered class pair, in `(0,1), (0,2), …, (1,2), …` order.
pub fn boundary_lines(rows: &[[f32; 3]]) -> Vec<LineEquation> {
    let k = rows.len();
    (0..k)
        .flat_map(|first| (first + 1..k).map(move |second| (first, second)))
        .filter_map(|(first, second)| LineEquation::between(rows, first, second))
        .collect()
}

/// Segments and intersection markers for the current weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryGeometry {
    pub lines: Vec<LineEquation>,
    pub segments: Vec<Segment>,
    pub intersections: Vec<IntersectionPoint>,
}

impl BoundaryGeometry {
    /// Derive, clip and intersect the pairwise boundaries of `rows`.
    pub fn compute(rows: &[[f32; 3]], viewport: &Viewport) -> Self {
        let lines = boundary_lines(rows);
        let segments = lines.iter().map(|line| clip_line(line, viewport)).collect();
        let intersections = intersections(&lines, viewport);
        Self {
            lines,
            segments,
            intersections,
        }
    }

    /// Segments that actually cross the viewport.
    pub fn visible_segments(&self) -> impl Iterator<Item = (&ClassPair, [Point; 2])> {
        self.segments
            .iter()
            .filter_map(|segment| segment.endpoints.map(|ends| (&segment.pair, ends)))
    }
}
