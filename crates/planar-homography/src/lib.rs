//! Planar homography estimation from 2D point correspondences.
//!
//! This crate is intentionally small and purely geometric: it takes two
//! equal-length slices of points (at least four) and returns the 3x3
//! projective transform mapping the first onto the second, solved with the
//! normalized Direct Linear Transform. It does *not* depend on any image
//! type, feature detector, or outlier-rejection scheme; the caller owns
//! point acquisition.
//!
//! Matrices are `f64` and row-major in array form, normalized so that
//! `h[2][2] == 1`.

mod error;
mod estimate;
mod homography;
mod logger;

pub use error::HomographyError;
pub use estimate::estimate_homography;
pub use homography::Homography;
pub use logger::init_with_level;
