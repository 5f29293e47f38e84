//! 2D vector type and the batched geometry kernels shared by every layer:
//! point-in-polygon, closest-point-on-polygon (signed), rectangle signed
//! distance, and tangent direction.
//!
//! All kernels are pure functions over coordinate data; per-polygon
//! precomputation (edge vectors, lengths, outward normals) happens once in
//! [`Polygon::new`], not on every query.

/// A 2D point or displacement in single precision.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Unit vector along `self`, or `Vec2::ZERO` if `self` is (near) zero.
    #[inline]
    pub fn normalized_or_zero(self, eps: f32) -> Vec2 {
        let len = self.length();
        if len < eps {
            Vec2::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Unit vector along `self`, with a small epsilon added to the length to
    /// avoid division by zero (matches the reference `norm()` helper, which
    /// never returns an exact zero vector).
    #[inline]
    pub fn normalized_eps(self, eps: f32) -> Vec2 {
        self * (1.0 / (self.length() + eps))
    }

    /// Rotate by +90°: `(x, y) -> (-y, x)`. Used to derive a tangent from a
    /// normal.
    #[inline]
    pub fn tangent(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn clamp_length(self, max: f32) -> Vec2 {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A ring of vertices with precomputed per-edge geometry.
///
/// Vertices need not be explicitly closed — the last vertex implicitly
/// connects back to the first, matching the ray-casting and edge-projection
/// kernels below.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
    /// `edges[i] = vertices[i+1] - vertices[i]` (wrapping).
    edges: Vec<Vec2>,
    edge_len_sq: Vec<f32>,
    /// Outward unit normal of each edge (assumes counter-clockwise winding).
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Precompute edge vectors, lengths, and outward normals once.
    ///
    /// # Errors
    /// Returns `None` if fewer than 3 vertices are supplied — a degenerate
    /// polygon is a configuration error at the call site, not here.
    pub fn new(vertices: Vec<Vec2>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let n = vertices.len();
        let mut edges = Vec::with_capacity(n);
        let mut edge_len_sq = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let v1 = vertices[i];
            let v2 = vertices[(i + 1) % n];
            let e = v2 - v1;
            edges.push(e);
            edge_len_sq.push(e.length_sq());
            // Outward normal for a CCW polygon: rotate the edge by -90°.
            let len = e.length();
            let normal = if len > 1e-9 {
                Vec2::new(e.y / len, -e.x / len)
            } else {
                Vec2::ZERO
            };
            normals.push(normal);
        }
        Some(Self { vertices, edges, edge_len_sq, normals })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ray-cast point-in-polygon test (§4.1).
    ///
    /// Casts a ray from `p` along +x and counts edge crossing parity. An edge
    /// `(v1, v2)` crosses iff `(v1.y > p.y) != (v2.y > p.y)` and the
    /// x-intercept at `y = p.y` exceeds `p.x`.
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            if (v1.y > p.y) != (v2.y > p.y) {
                if v2.y != v1.y {
                    let x_intersect = (p.y - v1.y) * (v2.x - v1.x) / (v2.y - v1.y) + v1.x;
                    if p.x < x_intersect {
                        inside = !inside;
                    }
                }
            }
        }
        inside
    }

    /// Batched point-in-polygon.
    pub fn contains_batch(&self, points: &[Vec2]) -> Vec<bool> {
        points.iter().map(|&p| self.contains(p)).collect()
    }

    /// Closest point on the polygon boundary, its outward unit normal, and
    /// the signed distance (negative when `p` is inside).
    pub fn closest_point(&self, p: Vec2) -> ClosestPoint {
        let n = self.vertices.len();
        let mut best_dist_sq = f32::INFINITY;
        let mut best_point = self.vertices[0];
        let mut best_normal = Vec2::ZERO;

        for i in 0..n {
            let v1 = self.vertices[i];
            let len_sq = self.edge_len_sq[i];
            if len_sq < 1e-9 {
                let d = (p - v1).length_sq();
                if d < best_dist_sq {
                    best_dist_sq = d;
                    best_point = v1;
                    best_normal = self.normals[i];
                }
                continue;
            }
            let edge = self.edges[i];
            let t = ((p - v1).dot(edge) / len_sq).clamp(0.0, 1.0);
            let candidate = v1 + edge * t;
            let d = (p - candidate).length_sq();
            if d < best_dist_sq {
                best_dist_sq = d;
                best_point = candidate;
                best_normal = self.normals[i];
            }
        }

        let dist = best_dist_sq.sqrt();
        let sign = if self.contains(p) { -1.0 } else { 1.0 };
        ClosestPoint { point: best_point, normal: best_normal, signed_distance: sign * dist }
    }
}

/// Result of a closest-point-on-polygon (or rectangle) query.
#[derive(Copy, Clone, Debug)]
pub struct ClosestPoint {
    pub point: Vec2,
    pub normal: Vec2,
    pub signed_distance: f32,
}

/// Over all polygons, the one minimizing `|signed_distance|`.
///
/// Returns `None` if `polygons` is empty.
pub fn nearest_polygon(p: Vec2, polygons: &[Polygon]) -> Option<ClosestPoint> {
    polygons
        .iter()
        .map(|poly| poly.closest_point(p))
        .min_by(|a, b| a.signed_distance.abs().total_cmp(&b.signed_distance.abs()))
}

/// Axis-aligned rectangle `[xmin, xmax] x [ymin, ymax]`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl Rect {
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.xmin + self.xmax) * 0.5, (self.ymin + self.ymax) * 0.5)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Signed distance to the nearest wall, with the inward-pointing
    /// axis-aligned unit normal of that wall (§4.1).
    ///
    /// Positive when `p` is inside the rectangle — the opposite convention
    /// from `Polygon::closest_point`, matching the keep-out band test in
    /// `keepout::build_correction` (`world_keep_out - signed_distance > 0`
    /// near a wall).
    pub fn signed_distance_inward(self, p: Vec2) -> ClosestPoint {
        let d_left = p.x - self.xmin;
        let d_right = self.xmax - p.x;
        let d_bottom = p.y - self.ymin;
        let d_top = self.ymax - p.y;

        // Each distance is positive when `p` is on the interior side of that
        // wall. The nearest wall is the one with the smallest such distance;
        // that distance is the signed distance to the interior (positive =
        // inside).
        let (dist, normal, point) = [
            (d_left, Vec2::new(1.0, 0.0), Vec2::new(self.xmin, p.y)),
            (d_right, Vec2::new(-1.0, 0.0), Vec2::new(self.xmax, p.y)),
            (d_bottom, Vec2::new(0.0, 1.0), Vec2::new(p.x, self.ymin)),
            (d_top, Vec2::new(0.0, -1.0), Vec2::new(p.x, self.ymax)),
        ]
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap();

        ClosestPoint { point, normal, signed_distance: dist }
    }
}

/// Rotate a normal by +90° to get the corresponding tangent direction.
#[inline]
pub fn tangent_direction(normal: Vec2) -> Vec2 {
    normal.tangent()
}

/// `smooth_push(dist, rs)`: 1.0 at distance 0, linearly falling to 0.0 at
/// `rs`, clamped to never go negative beyond `rs` (§4.3, §4.3b).
#[inline]
pub fn smooth_push(dist: f32, rs: f32) -> f32 {
    (1.0 - dist / rs).max(0.0)
}

/// `lerp_clamped(a, b, t1, t2, t)`: linear interpolation between `a` and `b`
/// with the interpolation factor clamped to `[0, 1]` (§4.8).
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t1: f32, t2: f32, t: f32) -> f32 {
    let u = ((t - t1) / (t2 - t1)).clamp(0.0, 1.0);
    a + (b - a) * u
}