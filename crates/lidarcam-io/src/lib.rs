#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Calibration file parsing.
///
/// Reads the text calibration files (see [`calib::read_calibration_file`]) and
/// the JSON form of the matrices (see [`calib::read_calibration_json`]).
pub mod calib;

/// Error types for I/O operations.
pub mod error;

/// Image probing functions.
pub mod functional;

/// Raw lidar scan reading and writing.
pub mod lidar;

/// Calibration construction from a file or from parsed matrices.
pub mod loader;

pub use calib::{read_calibration_file, read_calibration_json};
pub use functional::read_image_size;
pub use lidar::{read_lidar_bin, write_lidar_bin};
pub use loader::{load_calibration, CalibrationSource};
