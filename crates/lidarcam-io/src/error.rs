/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to parse the calibration file.
    #[error("Failed to read the calibration. {0}")]
    CalibFileError(#[from] crate::calib::CalibFileError),

    /// Error to build the calibration from its matrices.
    #[error("Invalid calibration. {0}")]
    CalibrationError(#[from] lidarcam_3d::calibration::CalibrationError),
}
