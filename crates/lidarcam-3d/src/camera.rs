use glam::Mat3;

use crate::{calibration::CalibrationError, linalg::Mat3x4};

/// Image size in pixels.
///
/// Example:
///
/// ```
/// use lidarcam_3d::camera::ImageSize;
///
/// let image_size = ImageSize {
///   width: 1242,
///   height: 375,
/// };
///
/// assert_eq!(image_size.shape(), [375, 1242]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The `[height, width]` pair, in the order image arrays are indexed.
    pub fn shape(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    /// Whether the pixel coordinate `(u, v)` falls inside `[0, width) x [0, height)`.
    ///
    /// NaN coordinates are never inside.
    #[inline]
    pub fn contains(&self, u: f32, v: f32) -> bool {
        u >= 0.0 && u < self.width as f32 && v >= 0.0 && v < self.height as f32
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    /// Build from `[width, height]`.
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Pinhole intrinsics read off a 3x4 projection matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraIntrinsics {
    /// The focal length in pixels (fu, fv)
    pub focal_length: (f32, f32),
    /// The principal point in pixels (cu, cv)
    pub principal_point: (f32, f32),
    /// The camera offset relative to the reference camera in meters (tx, ty)
    pub offset: (f32, f32),
}

impl CameraIntrinsics {
    /// Extract the intrinsics from a projection matrix of the form
    /// `K * [I | -t]`.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::DegenerateFocalLength`] if either focal length is zero.
    pub fn from_projection(p: &Mat3x4) -> Result<Self, CalibrationError> {
        let fu = p.get(0, 0);
        let fv = p.get(1, 1);

        if fu == 0.0 || fv == 0.0 {
            return Err(CalibrationError::DegenerateFocalLength { fu, fv });
        }

        Ok(Self {
            focal_length: (fu, fv),
            principal_point: (p.get(0, 2), p.get(1, 2)),
            offset: (p.get(0, 3) / -fu, p.get(1, 3) / -fv),
        })
    }

    /// Focal length along the image columns.
    #[inline]
    pub fn fu(&self) -> f32 {
        self.focal_length.0
    }

    /// Focal length along the image rows.
    #[inline]
    pub fn fv(&self) -> f32 {
        self.focal_length.1
    }

    /// Principal point column.
    #[inline]
    pub fn cu(&self) -> f32 {
        self.principal_point.0
    }

    /// Principal point row.
    #[inline]
    pub fn cv(&self) -> f32 {
        self.principal_point.1
    }

    /// Horizontal offset.
    #[inline]
    pub fn tx(&self) -> f32 {
        self.offset.0
    }

    /// Vertical offset.
    #[inline]
    pub fn ty(&self) -> f32 {
        self.offset.1
    }

    /// Returns the camera matrix K.
    pub fn camera_matrix(&self) -> Mat3 {
        Mat3::from_cols_array(&[
            self.fu(), 0.0, 0.0, //
            0.0, self.fv(), 0.0, //
            self.cu(), self.cv(), 1.0,
        ])
    }
}
