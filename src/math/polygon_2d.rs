use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the centroid of a polygon with the given non-zero signed area.
///
/// The first moments are accumulated over every edge, including the closing
/// edge, and divided by `6A`.
#[must_use]
pub fn centroid_2d(points: &[Point2], signed_area: f64) -> Point2 {
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let k = 6.0 * signed_area;
    Point2::new(cx / k, cy / k)
}

/// Collapses consecutive coincident vertices, including a closing vertex that
/// repeats the first one.
#[must_use]
pub fn dedup_vertices(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &pt in points {
        if out.last().is_some_and(|last| coincident(last, &pt)) {
            continue;
        }
        out.push(pt);
    }
    while out.len() > 1 && out.first().zip(out.last()).is_some_and(|(a, b)| coincident(a, b)) {
        out.pop();
    }
    out
}

/// Returns `true` if two points coincide within [`TOLERANCE`].
#[must_use]
pub fn coincident(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}
