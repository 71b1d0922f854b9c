#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Calibration matrices and the frame transforms built on them.
pub mod calibration;

/// Image size and pinhole intrinsics derived from a projection matrix.
pub mod camera;

/// Fixed-size matrix types.
pub mod linalg;

/// Lidar scan container.
pub mod pointcloud;

/// Homogeneous coordinate helpers.
pub mod transforms;
