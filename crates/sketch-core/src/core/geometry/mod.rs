//! Pure 2D geometry shared by the graph model and the bond-drawing code:
//! axis-aligned rectangles, line segments, convex hulls, and the bond-line
//! construction consumed by the rendering layer.

pub mod bond_lines;
pub mod hull;

use nalgebra::{Point2, Vector2};

/// An axis-aligned bounding rectangle. Degenerate (zero-area) rectangles are
/// valid; emptiness is modelled by `Option<Rect>` at the call sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Rect {
    /// Smallest rectangle enclosing all points, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect {
            min: first,
            max: first,
        };
        for p in iter {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::from((self.min.coords + self.max.coords) / 2.0)
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A directed line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn vector(&self) -> Vector2<f64> {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::from((self.start.coords + self.end.coords) / 2.0)
    }
}

/// Arithmetic mean of a point set, or `None` when empty.
pub fn centroid(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector2<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point2::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_points_encloses_all_points() {
        let rect = Rect::from_points([
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(rect.min, Point2::new(-2.0, -1.0));
        assert_eq!(rect.max, Point2::new(4.0, 5.0));
        assert_eq!(rect.width(), 6.0);
        assert_eq!(rect.height(), 6.0);
    }

    #[test]
    fn rect_from_no_points_is_none() {
        assert!(Rect::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn rect_union_covers_both() {
        let a = Rect::from_points([Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]).unwrap();
        let b = Rect::from_points([Point2::new(2.0, -1.0), Point2::new(3.0, 0.5)]).unwrap();
        let u = a.union(&b);
        assert_eq!(u.min, Point2::new(0.0, -1.0));
        assert_eq!(u.max, Point2::new(3.0, 1.0));
    }

    #[test]
    fn segment_midpoint_and_length() {
        let seg = Segment::new(Point2::new(0.0, 0.0), Point2::new(6.0, 8.0));
        assert_eq!(seg.length(), 10.0);
        assert_eq!(seg.midpoint(), Point2::new(3.0, 4.0));
    }

    #[test]
    fn centroid_of_square_is_center() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(centroid(&points), Some(Point2::new(1.0, 1.0)));
        assert_eq!(centroid(&[]), None);
    }
}
