//! Expand a projected path into a constant-width filled ribbon.
//!
//! Each vertex is pushed sideways along its join normal, producing a closed
//! contour of length 2N from an N-point path: indices `0..N` are the left
//! offsets in input order, `N..2N` the right offsets reversed. Joints are
//! mitered: the offset at a vertex is scaled by `1 / cos(theta/2)` so the
//! adjacent edges meet at a sharp corner, clamped to a miter limit to avoid
//! spikes at very sharp turns.

use super::Contour;

/// Below this squared length the averaged join normal of two near
/// anti-parallel segments is numerically meaningless; the join falls back
/// to the incoming segment normal, unscaled.
const JOIN_EPSILON: f64 = 1e-12;

/// Tolerance for treating a path's first and last points as coincident
const CLOSE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct StrokeOptions {
    /// Full ribbon width, in projection output units
    pub width: f64,
    /// Maximum miter extension as a multiple of the half-width.
    /// 4.0 clips at roughly 30-degree turns, the SVG default.
    pub miter_limit: f64,
    /// When false, every joint is offset by the constant half-width
    /// regardless of angle. This under-covers sharp corners; it exists to
    /// reproduce output of older datasets built that way.
    pub scaled_joins: bool,
}

impl StrokeOptions {
    pub fn new(width: f64) -> StrokeOptions {
        StrokeOptions {
            width,
            miter_limit: 4.0,
            scaled_joins: true,
        }
    }

    pub fn legacy(width: f64) -> StrokeOptions {
        StrokeOptions {
            scaled_joins: false,
            ..StrokeOptions::new(width)
        }
    }
}

/// Expand an already-projected path into a closed ribbon contour.
///
/// Paths whose first and last points coincide are treated as closed: the
/// shared endpoint gets the join normal of the wrapping segment pair.
/// Returns an empty contour for paths shorter than two points.
pub fn stroke_path(points: &[(f64, f64)], options: &StrokeOptions) -> Contour {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let closed = n > 3 && points_coincide(points[0], points[n - 1]);
    let half_width = options.width / 2.0;

    let mut ribbon = vec![(0.0, 0.0); 2 * n];
    for (i, &(x, y)) in points.iter().enumerate() {
        let (nx, ny, miter) = join_normal(points, i, closed);

        let mut dx = nx * half_width;
        let mut dy = ny * half_width;
        if options.scaled_joins {
            let m = miter.min(options.miter_limit);
            dx *= m;
            dy *= m;
        }

        ribbon[i] = (x - dx, y - dy);
        ribbon[2 * n - 1 - i] = (x + dx, y + dy);
    }

    ribbon
}

/// Stroke a polygon ring into a closed ribbon contour.
///
/// The ring is cyclic: every vertex joins its two neighbours, with no open
/// endpoints. A duplicated closing point is dropped first, so a square ring
/// strokes into 8 ribbon points whether or not its source repeats the first
/// coordinate. Rings with fewer than 3 distinct points degrade to
/// [`stroke_path`].
pub fn stroke_ring(ring: &[(f64, f64)], options: &StrokeOptions) -> Contour {
    let mut points = ring;
    if points.len() > 1 && points_coincide(points[0], points[points.len() - 1]) {
        points = &points[..points.len() - 1];
    }

    let n = points.len();
    if n < 3 {
        return stroke_path(points, options);
    }

    let half_width = options.width / 2.0;
    let mut ribbon = vec![(0.0, 0.0); 2 * n];
    for (i, &(x, y)) in points.iter().enumerate() {
        let incoming = segment_normal(points[(i + n - 1) % n], points[i]);
        let outgoing = segment_normal(points[i], points[(i + 1) % n]);
        let (nx, ny, miter) = combine_normals(incoming, outgoing);

        let mut dx = nx * half_width;
        let mut dy = ny * half_width;
        if options.scaled_joins {
            let m = miter.min(options.miter_limit);
            dx *= m;
            dy *= m;
        }

        ribbon[i] = (x - dx, y - dy);
        ribbon[2 * n - 1 - i] = (x + dx, y + dy);
    }

    ribbon
}

/// Join normal and miter length factor at vertex `i`.
///
/// Interior vertices average the unit normals of the incoming and outgoing
/// segments; the factor `1 / cos(theta/2)` stretches the offset to the
/// miter tip. Endpoints of open paths use their single adjacent segment
/// with factor 1.
fn join_normal(points: &[(f64, f64)], i: usize, closed: bool) -> (f64, f64, f64) {
    let n = points.len();

    let incoming = if i > 0 {
        segment_normal(points[i - 1], points[i])
    } else if closed {
        // for a closed path the last point repeats the first
        segment_normal(points[n - 2], points[0])
    } else {
        None
    };

    let outgoing = if i + 1 < n {
        segment_normal(points[i], points[i + 1])
    } else if closed {
        segment_normal(points[0], points[1])
    } else {
        None
    };

    combine_normals(incoming, outgoing)
}

fn combine_normals(
    incoming: Option<(f64, f64)>,
    outgoing: Option<(f64, f64)>,
) -> (f64, f64, f64) {
    match (incoming, outgoing) {
        (Some((ax, ay)), Some((bx, by))) => {
            let sx = ax + bx;
            let sy = ay + by;
            let len_sq = sx * sx + sy * sy;
            if len_sq < JOIN_EPSILON {
                // near-180 reversal: the miter tip runs to infinity, so
                // keep the incoming normal at unit extension
                return (ax, ay, 1.0);
            }
            let len = len_sq.sqrt();
            let (mx, my) = (sx / len, sy / len);
            // dot(m, a) = cos of half the turn angle; bounded away from
            // zero by the reversal check above
            let miter = 1.0 / (mx * ax + my * ay);
            (mx, my, miter)
        }
        (Some((ax, ay)), None) => (ax, ay, 1.0),
        (None, Some((bx, by))) => (bx, by, 1.0),
        // every adjacent segment degenerate; no usable direction
        (None, None) => (0.0, 0.0, 1.0),
    }
}

/// Unit left normal of the segment a -> b, `None` for zero-length segments
fn segment_normal(a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return None;
    }
    Some((-dy / len, dx / len))
}

fn points_coincide(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < CLOSE_EPSILON && (a.1 - b.1).abs() < CLOSE_EPSILON
}
