use std::path::{Path, PathBuf};

use lidarcam_3d::calibration::{Calibration, CalibrationMatrices};

use crate::{calib::read_calibration_file, error::IoError, functional::read_image_size};

/// Where the calibration matrices come from.
#[derive(Debug, Clone)]
pub enum CalibrationSource {
    /// A KITTI text calibration file.
    FromFile(PathBuf),
    /// Matrices already in memory.
    FromMatrices(CalibrationMatrices),
}

impl CalibrationSource {
    /// Resolve the source into calibration matrices, reading the file if needed.
    pub fn into_matrices(self) -> Result<CalibrationMatrices, IoError> {
        match self {
            CalibrationSource::FromFile(path) => {
                if !path.exists() {
                    return Err(IoError::FileDoesNotExist(path));
                }
                Ok(read_calibration_file(&path)?)
            }
            CalibrationSource::FromMatrices(matrices) => Ok(matrices),
        }
    }
}

impl From<PathBuf> for CalibrationSource {
    fn from(path: PathBuf) -> Self {
        CalibrationSource::FromFile(path)
    }
}

impl From<&Path> for CalibrationSource {
    fn from(path: &Path) -> Self {
        CalibrationSource::FromFile(path.to_path_buf())
    }
}

impl From<CalibrationMatrices> for CalibrationSource {
    fn from(matrices: CalibrationMatrices) -> Self {
        CalibrationSource::FromMatrices(matrices)
    }
}

/// Build a [`Calibration`] for a frame.
///
/// The image is only probed for its size, its pixels are never decoded.
///
/// # Arguments
///
/// * `source` - The calibration file or the matrices.
/// * `image_path` - The left color image of the frame.
///
/// # Example
///
/// ```no_run
/// use lidarcam_io::{load_calibration, CalibrationSource};
///
/// let source = CalibrationSource::FromFile("calib/000000.txt".into());
/// let calib = load_calibration(source, "image_2/000000.png").unwrap();
/// println!("{}", calib.image_size());
/// ```
pub fn load_calibration(
    source: impl Into<CalibrationSource>,
    image_path: impl AsRef<Path>,
) -> Result<Calibration, IoError> {
    let matrices = source.into().into_matrices()?;
    let image_size = read_image_size(image_path)?;
    Ok(Calibration::new(matrices, image_size)?)
}
