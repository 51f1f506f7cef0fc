//! Convex hulls and hull-based line trimming.
//!
//! Hulls are used in two places: the whole-molecule outline consumed by
//! layout code, and per-atom label hulls that bond lines are trimmed
//! against so they stop at the label boundary instead of the atom centre.

use nalgebra::Point2;

/// Cross product of (b - a) and (c - a). Positive when `c` lies to the
/// left of the directed line a→b.
fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Computes the convex hull of a point set with the monotone chain
/// algorithm. Points are returned in counter-clockwise order without
/// repeating the first point. Degenerate inputs (fewer than three distinct
/// points, or all collinear) return the surviving chain as-is.
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut sorted: Vec<Point2<f64>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(sorted.len() * 2);

    // Lower chain, then upper chain over the reversed order.
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Even-odd ray-cast point-in-polygon test. Points exactly on an edge may
/// report either way; callers treat the hull as an exclusion zone where
/// that ambiguity is harmless.
pub fn point_in_polygon(p: Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Intersection of segments a→b and c→d, as the parameter `t` along a→b,
/// or `None` when they do not cross.
fn segment_intersection_t(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> Option<f64> {
    let r = b - a;
    let s = d - c;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let qp = c - a;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Trims the `moving` endpoint of the segment moving→fixed to the boundary
/// of `hull`.
///
/// When `moving` lies inside the hull the segment exits through exactly one
/// edge; the exit point becomes the new endpoint. When `moving` is already
/// outside (or the hull is degenerate) the endpoint is left untouched.
pub fn trim_to_hull(
    moving: Point2<f64>,
    fixed: Point2<f64>,
    hull: &[Point2<f64>],
) -> Point2<f64> {
    if hull.len() < 3 || !point_in_polygon(moving, hull) {
        return moving;
    }
    let mut best_t: Option<f64> = None;
    let mut j = hull.len() - 1;
    for i in 0..hull.len() {
        if let Some(t) = segment_intersection_t(moving, fixed, hull[j], hull[i]) {
            best_t = Some(best_t.map_or(t, |b: f64| b.max(t)));
        }
        j = i;
    }
    match best_t {
        Some(t) => moving + (fixed - moving) * t,
        None => moving,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn hull_of_square_with_interior_point_drops_the_interior() {
        let mut points = square();
        points.push(Point2::new(2.0, 2.0));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2::new(2.0, 2.0)));
        for corner in square() {
            assert!(hull.contains(&corner));
        }
    }

    #[test]
    fn hull_drops_collinear_edge_points() {
        let mut points = square();
        points.push(Point2::new(2.0, 0.0));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn hull_of_two_points_is_the_two_points() {
        let points = [Point2::new(1.0, 1.0), Point2::new(3.0, 2.0)];
        assert_eq!(convex_hull(&points).len(), 2);
    }

    #[test]
    fn point_in_polygon_distinguishes_inside_and_outside() {
        let poly = square();
        assert!(point_in_polygon(Point2::new(2.0, 2.0), &poly));
        assert!(!point_in_polygon(Point2::new(5.0, 2.0), &poly));
        assert!(!point_in_polygon(Point2::new(-0.1, 2.0), &poly));
    }

    #[test]
    fn trim_moves_interior_endpoint_to_hull_boundary() {
        let hull = square();
        let trimmed = trim_to_hull(Point2::new(2.0, 2.0), Point2::new(10.0, 2.0), &hull);
        assert!((trimmed.x - 4.0).abs() < 1e-9);
        assert!((trimmed.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn trim_leaves_exterior_endpoint_alone() {
        let hull = square();
        let outside = Point2::new(8.0, 2.0);
        assert_eq!(trim_to_hull(outside, Point2::new(10.0, 2.0), &hull), outside);
    }

    #[test]
    fn trim_with_degenerate_hull_is_a_no_op() {
        let p = Point2::new(1.0, 1.0);
        assert_eq!(trim_to_hull(p, Point2::new(2.0, 2.0), &[]), p);
        assert_eq!(
            trim_to_hull(p, Point2::new(2.0, 2.0), &[Point2::origin()]),
            p
        );
    }
}
