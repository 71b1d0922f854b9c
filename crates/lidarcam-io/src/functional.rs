use std::path::Path;

use lidarcam_3d::camera::ImageSize;

use crate::error::IoError;

/// Reads the size of an image without decoding its pixels.
///
/// The format is guessed from the file content, falling back to the file
/// extension. Only the header is decoded: a file with a valid header and
/// truncated pixel data is accepted.
///
/// # Arguments
///
/// * `file_path` - The path to the image.
///
/// # Returns
///
/// The width and height of the image.
///
/// # Errors
///
/// - [`IoError::FileDoesNotExist`] if the path does not exist.
/// - [`IoError::ImageDecodeError`] if the file is not a recognizable image.
pub fn read_image_size(file_path: impl AsRef<Path>) -> Result<ImageSize, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let (width, height) = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .into_dimensions()?;

    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    log::debug!("read {} from {}", size, file_path.display());

    Ok(size)
}
