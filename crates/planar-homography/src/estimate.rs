use log::{debug, warn};
use nalgebra::{DMatrix, Matrix3, Point2, Vector3};

use crate::{Homography, HomographyError};

/// Rank threshold on the Hartley-normalized system, whose singular values
/// are O(1). The stacked matrix must have rank 8 for a unique null space.
const RANK_TOL: f64 = 1e-8;

fn hartley_normalization(cx: f64, cy: f64, mean_dist: f64) -> Matrix3<f64> {
    let s = if mean_dist > 1e-12 {
        (2.0_f64).sqrt() / mean_dist
    } else {
        1.0
    };

    Matrix3::<f64>::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}

fn normalize_points(pts: &[Point2<f64>]) -> (Vec<Point2<f64>>, Matrix3<f64>) {
    // Hartley normalization: translate to centroid, scale so mean distance = sqrt(2)
    let n = pts.len() as f64;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in pts {
        cx += p.x;
        cy += p.y;
    }
    cx /= n;
    cy /= n;

    let mut mean_dist = 0.0;
    for p in pts {
        let dx = p.x - cx;
        let dy = p.y - cy;
        mean_dist += (dx * dx + dy * dy).sqrt();
    }
    mean_dist /= n;

    let t = hartley_normalization(cx, cy, mean_dist);

    let mut out = Vec::with_capacity(pts.len());
    for p in pts {
        let v = t * Vector3::new(p.x, p.y, 1.0);
        out.push(Point2::new(v[0], v[1]));
    }
    (out, t)
}

fn normalize_homography(h: Matrix3<f64>) -> Option<Matrix3<f64>> {
    let s = h[(2, 2)];
    if s.abs() < 1e-12 {
        return None;
    }
    Some(h / s)
}

fn denormalize_homography(
    hn: Matrix3<f64>,
    t_src: Matrix3<f64>,
    t_dst: Matrix3<f64>,
) -> Option<Matrix3<f64>> {
    let t_dst_inv = t_dst.try_inverse()?;
    Some(t_dst_inv * hn * t_src)
}

/// Estimate H such that:  dst ~ H * src  (projective, homogeneous scale free).
///
/// Both slices are zipped positionally into correspondences and must hold at
/// least four points each. Four correspondences determine H exactly; more
/// are solved in the algebraic least-squares sense. The result is normalized
/// so that `h[2][2] == 1`.
///
/// # Errors
///
/// [`HomographyError::InsufficientPoints`] for short or mismatched inputs,
/// [`HomographyError::DegenerateConfiguration`] when the points do not span
/// a unique solution (e.g. collinear or repeated points).
pub fn estimate_homography(
    src_pts: &[Point2<f64>],
    dst_pts: &[Point2<f64>],
) -> Result<Homography, HomographyError> {
    if src_pts.len() != dst_pts.len() || src_pts.len() < 4 {
        return Err(HomographyError::InsufficientPoints {
            src: src_pts.len(),
            dst: dst_pts.len(),
        });
    }

    let (s, ts) = normalize_points(src_pts);
    let (d, td) = normalize_points(dst_pts);

    // Build A (2N x 9). With N = 4 the system is 8 x 9; pad with zero rows
    // up to 9 so the thin SVD always carries the full right singular basis.
    let n = src_pts.len();
    let rows = (2 * n).max(9);
    let mut a = DMatrix::<f64>::zeros(rows, 9);

    for k in 0..n {
        let x = s[k].x;
        let y = s[k].y;
        let u = d[k].x;
        let v = d[k].y;

        // [ -x -y -1   0  0  0   u*x u*y u ]
        a[(2 * k, 0)] = -x;
        a[(2 * k, 1)] = -y;
        a[(2 * k, 2)] = -1.0;
        a[(2 * k, 6)] = u * x;
        a[(2 * k, 7)] = u * y;
        a[(2 * k, 8)] = u;

        // [ 0  0  0  -x -y -1   v*x v*y v ]
        a[(2 * k + 1, 3)] = -x;
        a[(2 * k + 1, 4)] = -y;
        a[(2 * k + 1, 5)] = -1.0;
        a[(2 * k + 1, 6)] = v * x;
        a[(2 * k + 1, 7)] = v * y;
        a[(2 * k + 1, 8)] = v;
    }

    // Solve Ah = 0 -> h is the right singular vector with smallest singular
    // value. Singular values come back in descending order.
    let svd = a.svd(true, true);
    let vt = svd
        .v_t
        .ok_or(HomographyError::DegenerateConfiguration)?;
    let sv = &svd.singular_values;

    // Rank check: a configuration is usable only if exactly one singular
    // value is (near) zero. Collinear or repeated points leave sv[7] in the
    // noise floor as well.
    if sv[0] <= 0.0 || sv[7] <= RANK_TOL * sv[0] {
        warn!(
            "degenerate correspondences: sv0={:.3e} sv7={:.3e} sv8={:.3e}",
            sv[0], sv[7], sv[8]
        );
        return Err(HomographyError::DegenerateConfiguration);
    }
    debug!(
        "dlt solved for n={}: sv7/sv0={:.3e} sv8/sv0={:.3e}",
        n,
        sv[7] / sv[0],
        sv[8] / sv[0]
    );

    let h = vt.row(8); // last row of V^T = last column of V

    let hn =
        Matrix3::<f64>::from_row_slice(&[h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]]);

    // Denormalize: H = Td^{-1} * Hn * Ts, then fix scale so h[2][2] = 1.
    let h_den = denormalize_homography(hn, ts, td)
        .and_then(normalize_homography)
        .ok_or(HomographyError::DegenerateConfiguration)?;

    Ok(Homography::new(h_den))
}
