use thiserror::Error;

/// Error type for every fallible operation in the crate.
///
/// All variants are local, deterministic precondition failures: they are
/// detected immediately and carry enough context to be actionable. The crate
/// never returns silently-wrong geometry (e.g. a NaN distance without an
/// error).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlypastError {
    #[error("track contains no samples")]
    EmptyTrack,

    #[error("tracks share no common time window")]
    EmptyOverlap,

    #[error("circle fit requires at least 3 points, got {0}")]
    InsufficientPoints(usize),

    #[error("RANSAC refit has no valid inlier set ({0} inliers, need at least 3)")]
    FittingFailed(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("coordinate arrays must have the same length: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("track samples must be strictly increasing in time")]
    NonMonotonicTime,

    #[error("track carries no altitude channel")]
    MissingAltitude,

    #[error("no sample above {0} m altitude")]
    NeverAirborne(f64),
}
