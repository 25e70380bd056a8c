//! C ABI for planar-homography.
//!
//! Points cross the boundary as interleaved `f32` x,y pairs and matrices as
//! nine row-major `f32` values; the solve itself runs in `f64`. Functions
//! return `0` on success and a negative status code otherwise.

use nalgebra::{Matrix3, Point2};
use planar_homography::{estimate_homography, Homography, HomographyError};

pub const STATUS_OK: i32 = 0;
pub const STATUS_NULL_POINTER: i32 = -1;
pub const STATUS_INSUFFICIENT_POINTS: i32 = -2;
pub const STATUS_DEGENERATE: i32 = -3;
pub const STATUS_UNMAPPABLE_POINT: i32 = -4;

fn points_from_raw(buf: &[f32], count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|k| Point2::new(buf[2 * k] as f64, buf[2 * k + 1] as f64))
        .collect()
}

fn write_matrix(h: &Homography, out: &mut [f32]) {
    let rows = h.to_array();
    for i in 0..3 {
        for j in 0..3 {
            out[i * 3 + j] = rows[i][j] as f32;
        }
    }
}

fn read_matrix(buf: &[f32]) -> Homography {
    let mut m = Matrix3::zeros();
    for i in 0..3 {
        for j in 0..3 {
            m[(i, j)] = buf[i * 3 + j] as f64;
        }
    }
    Homography::new(m)
}

/// Estimate the homography mapping `src` points onto `dst` points.
///
/// `src_ptr` and `dst_ptr` each hold `point_count` interleaved x,y pairs;
/// `out_ptr` receives 9 row-major values with `h[2][2] == 1`.
///
/// # Safety
/// Dereferences raw pointers
#[no_mangle]
pub unsafe extern "C" fn planar_homography_from_points(
    src_ptr: *const f32,
    dst_ptr: *const f32,
    point_count: usize,
    out_ptr: *mut f32,
) -> i32 {
    if src_ptr.is_null() || dst_ptr.is_null() || out_ptr.is_null() {
        return STATUS_NULL_POINTER;
    }
    let src_raw = unsafe { std::slice::from_raw_parts(src_ptr, point_count * 2) };
    let dst_raw = unsafe { std::slice::from_raw_parts(dst_ptr, point_count * 2) };
    let src = points_from_raw(src_raw, point_count);
    let dst = points_from_raw(dst_raw, point_count);

    match estimate_homography(&src, &dst) {
        Ok(h) => {
            let out = unsafe { std::slice::from_raw_parts_mut(out_ptr, 9) };
            write_matrix(&h, out);
            STATUS_OK
        }
        Err(HomographyError::InsufficientPoints { .. }) => STATUS_INSUFFICIENT_POINTS,
        Err(HomographyError::DegenerateConfiguration) => STATUS_DEGENERATE,
    }
}

/// Map `point_count` points through a row-major 3x3 matrix.
///
/// Returns the number of points written, or a negative status code if a
/// pointer is null or some point cannot be mapped (vanishing homogeneous
/// scale).
///
/// # Safety
/// Dereferences raw pointers
#[no_mangle]
pub unsafe extern "C" fn planar_homography_apply_points(
    matrix_ptr: *const f32,
    pts_ptr: *const f32,
    point_count: usize,
    out_ptr: *mut f32,
) -> i32 {
    if matrix_ptr.is_null() || pts_ptr.is_null() || out_ptr.is_null() {
        return STATUS_NULL_POINTER;
    }
    let h = read_matrix(unsafe { std::slice::from_raw_parts(matrix_ptr, 9) });
    let pts_raw = unsafe { std::slice::from_raw_parts(pts_ptr, point_count * 2) };
    let pts = points_from_raw(pts_raw, point_count);

    match h.apply_points(&pts) {
        Some(mapped) => {
            let out = unsafe { std::slice::from_raw_parts_mut(out_ptr, point_count * 2) };
            for (k, p) in mapped.iter().enumerate() {
                out[2 * k] = p.x as f32;
                out[2 * k + 1] = p.y as f32;
            }
            point_count as i32
        }
        None => STATUS_UNMAPPABLE_POINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates_and_applies_through_the_c_abi() {
        let src: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let dst: [f32; 8] = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];
        let mut h = [0.0f32; 9];

        let status = unsafe {
            planar_homography_from_points(src.as_ptr(), dst.as_ptr(), 4, h.as_mut_ptr())
        };
        assert_eq!(status, STATUS_OK);
        assert!((h[8] - 1.0).abs() < 1e-6);

        let center: [f32; 2] = [0.5, 0.5];
        let mut mapped = [0.0f32; 2];
        let written = unsafe {
            planar_homography_apply_points(h.as_ptr(), center.as_ptr(), 1, mapped.as_mut_ptr())
        };
        assert_eq!(written, 1);
        assert!((mapped[0] - 1.0).abs() < 1e-4 && (mapped[1] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn null_pointers_are_rejected() {
        let src: [f32; 8] = [0.0; 8];
        let mut out = [0.0f32; 9];
        let status = unsafe {
            planar_homography_from_points(src.as_ptr(), std::ptr::null(), 4, out.as_mut_ptr())
        };
        assert_eq!(status, STATUS_NULL_POINTER);
    }

    #[test]
    fn too_few_points_report_status() {
        let src: [f32; 6] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let dst: [f32; 6] = [0.0, 0.0, 2.0, 0.0, 0.0, 2.0];
        let mut out = [0.0f32; 9];
        let status = unsafe {
            planar_homography_from_points(src.as_ptr(), dst.as_ptr(), 3, out.as_mut_ptr())
        };
        assert_eq!(status, STATUS_INSUFFICIENT_POINTS);
    }

    #[test]
    fn collinear_points_report_degenerate() {
        let src: [f32; 8] = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let dst: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let mut out = [0.0f32; 9];
        let status = unsafe {
            planar_homography_from_points(src.as_ptr(), dst.as_ptr(), 4, out.as_mut_ptr())
        };
        assert_eq!(status, STATUS_DEGENERATE);
    }
}
