use std::io::Write;
use std::path::Path;

use lidarcam_3d::pointcloud::LidarScan;

// x, y, z, intensity as little-endian f32
const POINT_STEP: usize = 16;

/// Error types for the lidar module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LidarError {
    /// Failed to read or write the scan file
    #[error("Failed to read or write lidar file")]
    Io(#[from] std::io::Error),

    /// Invalid lidar file extension
    #[error("Invalid lidar file extension. Got:{0}")]
    InvalidFileExtension(String),

    /// File size is not a whole number of points
    #[error("Truncated lidar record: {num_bytes} bytes is not a multiple of {POINT_STEP}")]
    TruncatedRecord {
        /// Size of the file in bytes
        num_bytes: usize,
    },
}

fn check_extension(path: &Path) -> Result<(), LidarError> {
    let Some(file_ext) = path.extension() else {
        return Err(LidarError::InvalidFileExtension("".into()));
    };

    if file_ext != "bin" {
        return Err(LidarError::InvalidFileExtension(
            file_ext.to_string_lossy().to_string(),
        ));
    }

    Ok(())
}

/// Read a raw lidar scan.
///
/// The file is a flat stream of little-endian `f32` values read four at a
/// time as `(x, y, z, intensity)`.
///
/// # Arguments
///
/// * `path` - Path to a `.bin` file.
///
/// # Returns
///
/// A [`LidarScan`] with one row per point, in file order.
pub fn read_lidar_bin(path: impl AsRef<Path>) -> Result<LidarScan, LidarError> {
    let path = path.as_ref();
    check_extension(path)?;

    let bytes = std::fs::read(path)?;
    if bytes.len() % POINT_STEP != 0 {
        return Err(LidarError::TruncatedRecord {
            num_bytes: bytes.len(),
        });
    }

    let points = bytes
        .chunks_exact(POINT_STEP)
        .map(|record| {
            let mut point = [0.0f32; 4];
            for (value, b) in point.iter_mut().zip(record.chunks_exact(4)) {
                *value = f32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            }
            point
        })
        .collect::<Vec<_>>();

    log::debug!("read {} points from {}", points.len(), path.display());

    Ok(LidarScan::new(points))
}

/// Write a lidar scan in the raw `.bin` layout read by [`read_lidar_bin`].
pub fn write_lidar_bin(path: impl AsRef<Path>, scan: &LidarScan) -> Result<(), LidarError> {
    let path = path.as_ref();
    check_extension(path)?;

    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for point in scan.points() {
        for value in point {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()?;

    log::debug!("wrote {} points to {}", scan.len(), path.display());

    Ok(())
}
