//! Pure geometry for image map regions: construction helpers, point-in-shape
//! classification, bounds and coordinate serialization.
//!
//! Coordinates are on-screen pixels relative to the displayed image's top-left
//! corner. Nothing here knows about egui.

use serde::{Deserialize, Serialize};

// ── Primitives ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned box in left/top/width/height form. Width and height are never
/// negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

// ── Shapes ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(rename = "rect")]
    Rectangle,
    Circle,
    #[serde(rename = "poly")]
    Polygon,
}

impl ShapeKind {
    /// Value of the `shape` attribute on an `<area>` tag.
    pub fn html_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "poly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Polygon => "Polygon",
        }
    }

    pub fn all() -> [ShapeKind; 3] {
        [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Polygon]
    }
}

/// Shape-specific coordinate payload.
///
/// Rectangle corners are stored exactly as drawn; normalization happens when
/// the rectangle is consumed. Polygon vertices are open: the first vertex is
/// never repeated at the end.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Rectangle { x1: f32, y1: f32, x2: f32, y2: f32 },
    Circle { cx: f32, cy: f32, r: f32 },
    Polygon { vertices: Vec<Point> },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Rectangle { .. } => ShapeKind::Rectangle,
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Zero-size rectangle anchored at `p`.
    pub fn rect_at(p: Point) -> Self {
        Geometry::Rectangle {
            x1: p.x,
            y1: p.y,
            x2: p.x,
            y2: p.y,
        }
    }

    /// Zero-radius circle centered at `p`.
    pub fn circle_at(p: Point) -> Self {
        Geometry::Circle {
            cx: p.x,
            cy: p.y,
            r: 0.0,
        }
    }

    /// Rectangle spanning two corners in the order they were drawn.
    pub fn rect_from_corners(anchor: Point, far: Point) -> Self {
        Geometry::Rectangle {
            x1: anchor.x,
            y1: anchor.y,
            x2: far.x,
            y2: far.y,
        }
    }

    /// Circle centered at `center` passing through `edge`.
    pub fn circle_through(center: Point, edge: Point) -> Self {
        Geometry::Circle {
            cx: center.x,
            cy: center.y,
            r: center.distance_to(edge),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            Geometry::Rectangle { x1, y1, x2, y2 } => {
                let r = normalize_rect(*x1, *y1, *x2, *y2);
                p.x >= r.left && p.x <= r.right() && p.y >= r.top && p.y <= r.bottom()
            }
            Geometry::Circle { cx, cy, r } => Point::new(*cx, *cy).distance_to(p) <= *r,
            Geometry::Polygon { vertices } => polygon_contains(vertices, p),
        }
    }

    /// Coordinate list in `<area coords>` order.
    pub fn coords(&self) -> Vec<f32> {
        match self {
            Geometry::Rectangle { x1, y1, x2, y2 } => vec![*x1, *y1, *x2, *y2],
            Geometry::Circle { cx, cy, r } => vec![*cx, *cy, *r],
            Geometry::Polygon { vertices } => vertices.iter().flat_map(|v| [v.x, v.y]).collect(),
        }
    }
}

impl AsRef<Geometry> for Geometry {
    fn as_ref(&self) -> &Geometry {
        self
    }
}

// ── Operations ──────────────────────────────────────────────────────────────

pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> NormalizedRect {
    NormalizedRect {
        left: x1.min(x2),
        top: y1.min(y2),
        width: (x2 - x1).abs(),
        height: (y2 - y1).abs(),
    }
}

pub fn contains_point(geometry: &Geometry, x: f32, y: f32) -> bool {
    geometry.contains(Point::new(x, y))
}

/// Even-odd rule. A point on an edge may land on either side, but the answer
/// for a given point and polygon is always the same.
fn polygon_contains(vertices: &[Point], p: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Bounding box of a vertex list, `None` when empty.
pub fn polygon_bounds(vertices: &[Point]) -> Option<Bounds> {
    let first = vertices.first()?;
    let init = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    Some(vertices.iter().skip(1).fold(init, |b, v| Bounds {
        min_x: b.min_x.min(v.x),
        min_y: b.min_y.min(v.y),
        max_x: b.max_x.max(v.x),
        max_y: b.max_y.max(v.y),
    }))
}

/// First item, in order, whose geometry contains the point. Earlier items win
/// where shapes overlap.
pub fn first_hit<T: AsRef<Geometry>>(items: &[T], x: f32, y: f32) -> Option<&T> {
    let p = Point::new(x, y);
    items.iter().find(|item| item.as_ref().contains(p))
}

pub fn serialize_coords(geometry: &Geometry) -> Vec<f32> {
    geometry.coords()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Geometry {
        Geometry::Polygon {
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
        }
    }

    #[test]
    fn normalize_rect_handles_reversed_corners() {
        let r = normalize_rect(50.0, 50.0, 10.0, 10.0);
        assert_eq!(r.left, 10.0);
        assert_eq!(r.top, 10.0);
        assert_eq!(r.width, 40.0);
        assert_eq!(r.height, 40.0);

        let mixed = normalize_rect(10.0, 80.0, 60.0, 20.0);
        assert_eq!((mixed.left, mixed.top), (10.0, 20.0));
        assert_eq!((mixed.width, mixed.height), (50.0, 60.0));
    }

    #[test]
    fn rectangle_contains_is_inclusive() {
        let rect = Geometry::Rectangle {
            x1: 0.0,
            y1: 0.0,
            x2: 100.0,
            y2: 100.0,
        };
        assert!(contains_point(&rect, 50.0, 50.0));
        assert!(contains_point(&rect, 0.0, 100.0));
        assert!(!contains_point(&rect, 150.0, 150.0));

        // drawn bottom-right to top-left
        let reversed = Geometry::Rectangle {
            x1: 100.0,
            y1: 100.0,
            x2: 0.0,
            y2: 0.0,
        };
        assert!(contains_point(&reversed, 50.0, 50.0));
    }

    #[test]
    fn circle_contains_by_distance() {
        let c = Geometry::Circle {
            cx: 50.0,
            cy: 50.0,
            r: 10.0,
        };
        assert!(contains_point(&c, 55.0, 50.0));
        assert!(contains_point(&c, 60.0, 50.0));
        assert!(!contains_point(&c, 65.0, 50.0));
    }

    #[test]
    fn polygon_contains_even_odd() {
        let sq = square();
        assert!(contains_point(&sq, 50.0, 50.0));
        assert!(!contains_point(&sq, 150.0, 150.0));

        // concave "U": the notch is outside
        let u = Geometry::Polygon {
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(30.0, 0.0),
                Point::new(30.0, 70.0),
                Point::new(70.0, 70.0),
                Point::new(70.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
        };
        assert!(contains_point(&u, 15.0, 50.0));
        assert!(!contains_point(&u, 50.0, 30.0));
        assert!(contains_point(&u, 50.0, 85.0));
    }

    #[test]
    fn polygon_edge_classification_is_stable() {
        let sq = square();
        let first = contains_point(&sq, 100.0, 50.0);
        for _ in 0..10 {
            assert_eq!(contains_point(&sq, 100.0, 50.0), first);
        }
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = Geometry::Polygon {
            vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        };
        assert!(!contains_point(&line, 5.0, 5.0));
    }

    #[test]
    fn circle_through_is_euclidean() {
        let g = Geometry::circle_through(Point::new(10.0, 10.0), Point::new(13.0, 14.0));
        assert_eq!(g, Geometry::Circle { cx: 10.0, cy: 10.0, r: 5.0 });

        let behind = Geometry::circle_through(Point::new(10.0, 10.0), Point::new(7.0, 6.0));
        assert_eq!(behind, Geometry::Circle { cx: 10.0, cy: 10.0, r: 5.0 });
    }

    #[test]
    fn bounds_of_vertices() {
        let b = polygon_bounds(&[
            Point::new(20.0, 5.0),
            Point::new(-4.0, 30.0),
            Point::new(12.0, 40.0),
        ])
        .unwrap();
        assert_eq!(b, Bounds { min_x: -4.0, min_y: 5.0, max_x: 20.0, max_y: 40.0 });
        assert_eq!(b.width(), 24.0);
        assert_eq!(b.height(), 35.0);
        assert!(polygon_bounds(&[]).is_none());
    }

    #[test]
    fn first_hit_prefers_earliest() {
        let shapes = vec![
            Geometry::Rectangle { x1: 0.0, y1: 0.0, x2: 50.0, y2: 50.0 },
            Geometry::Circle { cx: 40.0, cy: 40.0, r: 30.0 },
        ];
        assert_eq!(first_hit(&shapes, 45.0, 45.0), Some(&shapes[0]));
        assert_eq!(first_hit(&shapes, 60.0, 60.0), Some(&shapes[1]));
        assert_eq!(first_hit(&shapes, 200.0, 200.0), None);
    }

    #[test]
    fn serialized_coords_keep_drawn_order() {
        let rect = Geometry::Rectangle { x1: 90.0, y1: 80.0, x2: 10.0, y2: 20.0 };
        assert_eq!(serialize_coords(&rect), vec![90.0, 80.0, 10.0, 20.0]);

        let circle = Geometry::Circle { cx: 30.0, cy: 40.0, r: 15.0 };
        assert_eq!(serialize_coords(&circle), vec![30.0, 40.0, 15.0]);

        assert_eq!(
            serialize_coords(&square()),
            vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0]
        );
    }
}
