use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

const W_EPS: f64 = 1e-12;

/// A 3x3 projective transform acting on homogeneous 2D coordinates.
///
/// The matrix is defined only up to a nonzero scale; values produced by
/// [`estimate_homography`](crate::estimate_homography) are normalized so
/// that `h[2][2] == 1`. Array conversions are row-major.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    /// Build from row-major rows.
    pub fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    /// Row-major rows.
    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.h[(0, 0)], self.h[(0, 1)], self.h[(0, 2)]],
            [self.h[(1, 0)], self.h[(1, 1)], self.h[(1, 2)]],
            [self.h[(2, 0)], self.h[(2, 1)], self.h[(2, 2)]],
        ]
    }

    /// Map a single point. The caller must ensure `p` does not lie on the
    /// line sent to infinity; use [`Homography::apply_points`] for a checked
    /// variant.
    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.h * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0] / v[2], v[1] / v[2])
    }

    /// Map a batch of points, failing if any image is non-finite or its
    /// homogeneous scale vanishes.
    pub fn apply_points(&self, pts: &[Point2<f64>]) -> Option<Vec<Point2<f64>>> {
        let mut out = Vec::with_capacity(pts.len());
        for p in pts {
            let v = self.h * Vector3::new(p.x, p.y, 1.0);
            let w = v[2];
            if !w.is_finite() || w.abs() <= W_EPS || !v[0].is_finite() || !v[1].is_finite() {
                return None;
            }
            out.push(Point2::new(v[0] / w, v[1] / w));
        }
        Some(out)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

impl std::ops::Mul for Homography {
    type Output = Homography;

    /// Composition: `(a * b).apply(p) == a.apply(b.apply(p))`.
    fn mul(self, rhs: Homography) -> Homography {
        Homography::new(self.h * rhs.h)
    }
}
