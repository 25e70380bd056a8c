/// Errors returned by the homography estimator.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomographyError {
    /// Fewer than four correspondences, or the two point slices differ in
    /// length. Raised before any numerical work.
    #[error("need >= 4 matched points, got src={src} dst={dst}")]
    InsufficientPoints { src: usize, dst: usize },
    /// The correspondences do not pin down a unique homography (collinear
    /// or duplicate points), so no stable solution exists.
    #[error("degenerate point configuration, homography is not determined")]
    DegenerateConfiguration,
}
