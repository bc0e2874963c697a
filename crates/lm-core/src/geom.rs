#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DbPoint {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle in database units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbRect {
    pub min: DbPoint,
    pub max: DbPoint,
}

impl DbRect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: DbPoint { x: min_x, y: min_y },
            max: DbPoint { x: max_x, y: max_y },
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.min.x + dx,
            self.min.y + dy,
            self.max.x + dx,
            self.max.y + dy,
        )
    }

    /// Outward growth by `d` on every side (inward for negative `d`).
    pub fn inflated(&self, d: f64) -> Self {
        Self::new(
            self.min.x - d,
            self.min.y - d,
            self.max.x + d,
            self.max.y + d,
        )
    }

    pub fn intersects(&self, other: &DbRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Corners in counter-clockwise order starting at the minimum.
    pub fn corners(&self) -> [DbPoint; 4] {
        [
            self.min,
            DbPoint {
                x: self.max.x,
                y: self.min.y,
            },
            self.max,
            DbPoint {
                x: self.min.x,
                y: self.max.y,
            },
        ]
    }
}

/// Simple polygon with straight edges; vertices are not repeated at the
/// end of the ring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Poly {
    pub points: Vec<DbPoint>,
}

impl Poly {
    pub fn from_rect(rect: &DbRect) -> Self {
        Self {
            points: rect.corners().to_vec(),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| DbPoint {
                    x: p.x + dx,
                    y: p.y + dy,
                })
                .collect(),
        }
    }

    pub fn bbox(&self) -> Option<DbRect> {
        let first = self.points.first()?;
        let mut rect = DbRect::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for (i, a) in self.points.iter().enumerate() {
            let b = &self.points[(i + 1) % self.points.len()];
            twice += a.x * b.y - b.x * a.y;
        }
        (twice / 2.0).abs()
    }
}

/// Bounding box over a polygon set; `None` when no vertex exists.
pub fn bounding_box(polys: &[Poly]) -> Option<DbRect> {
    let mut acc: Option<DbRect> = None;
    for poly in polys {
        let Some(b) = poly.bbox() else {
            continue;
        };
        acc = Some(match acc {
            None => b,
            Some(r) => DbRect::new(
                r.min.x.min(b.min.x),
                r.min.y.min(b.min.y),
                r.max.x.max(b.max.x),
                r.max.y.max(b.max.y),
            ),
        });
    }
    acc
}
