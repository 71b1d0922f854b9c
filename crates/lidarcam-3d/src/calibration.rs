use glam::{Mat3, Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::{
    camera::{CameraIntrinsics, ImageSize},
    linalg::Mat3x4,
    pointcloud::LidarScan,
    transforms::cart_to_hom,
};

/// Error types for the calibration module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CalibrationError {
    /// A focal length of the projection matrix is zero
    #[error("Degenerate focal length in projection matrix (fu: {fu}, fv: {fv})")]
    DegenerateFocalLength {
        /// Focal length along the image columns
        fu: f32,
        /// Focal length along the image rows
        fv: f32,
    },

    /// The combined lidar to rectified camera transform cannot be inverted
    #[error("Lidar to rectified camera transform is singular (det: {0})")]
    SingularTransform(f32),

    /// Per-point inputs of different lengths
    #[error("Mismatched input lengths: u {0}, v {1}, depth {2}")]
    LengthMismatch(usize, usize, usize),
}

/// The four matrices of a KITTI object calibration file.
///
/// Serializes as the mapping `{P2, P3, R0, Tr_velo2cam}` of flat row-major
/// arrays, see [`CalibrationRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "CalibrationRecord", into = "CalibrationRecord")]
pub struct CalibrationMatrices {
    /// Projection matrix of the left color camera
    pub p2: Mat3x4,
    /// Projection matrix of the right color camera
    pub p3: Mat3x4,
    /// Rectifying rotation of the reference camera
    pub r0: Mat3,
    /// Rigid transform from the lidar frame to the reference camera frame
    pub tr_velo2cam: Mat3x4,
}

/// Flat row-major form of [`CalibrationMatrices`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// P2, 3x4
    #[serde(rename = "P2")]
    pub p2: [f32; 12],
    /// P3, 3x4
    #[serde(rename = "P3")]
    pub p3: [f32; 12],
    /// R0_rect, 3x3
    #[serde(rename = "R0")]
    pub r0: [f32; 9],
    /// Tr_velo_to_cam, 3x4
    #[serde(rename = "Tr_velo2cam")]
    pub tr_velo2cam: [f32; 12],
}

impl From<CalibrationRecord> for CalibrationMatrices {
    fn from(record: CalibrationRecord) -> Self {
        Self {
            p2: Mat3x4::from_row_slice(&record.p2),
            p3: Mat3x4::from_row_slice(&record.p3),
            // glam is column-major
            r0: Mat3::from_cols_array(&record.r0).transpose(),
            tr_velo2cam: Mat3x4::from_row_slice(&record.tr_velo2cam),
        }
    }
}

impl From<CalibrationMatrices> for CalibrationRecord {
    fn from(matrices: CalibrationMatrices) -> Self {
        Self {
            p2: matrices.p2.to_row_array(),
            p3: matrices.p3.to_row_array(),
            r0: matrices.r0.transpose().to_cols_array(),
            tr_velo2cam: matrices.tr_velo2cam.to_row_array(),
        }
    }
}

/// Calibration of one scene: the sensor matrices, the image size and the
/// intrinsics of the left color camera.
///
/// Immutable once built. Points are converted between three frames:
///
/// - lidar: the laser scanner frame,
/// - rect: the reference camera frame after the R0 rectification,
/// - img: pixel coordinates of the left color camera (P2) plus a depth.
#[derive(Clone, Debug)]
pub struct Calibration {
    matrices: CalibrationMatrices,
    image_size: ImageSize,
    intrinsics: CameraIntrinsics,
    // R0_ext * V2C_ext
    rect_from_lidar: Mat4,
    lidar_from_rect: Mat4,
}

impl Calibration {
    /// Build a calibration from its matrices and the image size.
    ///
    /// The inverse of `R0_ext * V2C_ext` used by [`Calibration::rect_to_lidar`]
    /// is computed here, so a singular transform is rejected at construction
    /// even if only the forward transforms would be used.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::DegenerateFocalLength`] if P2 has a zero focal length.
    /// - [`CalibrationError::SingularTransform`] if `R0_ext * V2C_ext` cannot be inverted.
    pub fn new(
        matrices: CalibrationMatrices,
        image_size: ImageSize,
    ) -> Result<Self, CalibrationError> {
        let intrinsics = CameraIntrinsics::from_projection(&matrices.p2)?;

        // pad R0 with a zero row and column and V2C with a zero row, both with [3, 3] = 1
        let r0_ext = Mat4::from_mat3(matrices.r0);
        let v2c_ext = matrices.tr_velo2cam.to_homogeneous();
        let rect_from_lidar = r0_ext * v2c_ext;

        let det = rect_from_lidar.determinant();
        if !det.is_finite() || det.abs() < f32::EPSILON {
            return Err(CalibrationError::SingularTransform(det));
        }
        let lidar_from_rect = rect_from_lidar.inverse();

        log::debug!(
            "calibration: {image_size}, fu: {}, fv: {}, cu: {}, cv: {}",
            intrinsics.fu(),
            intrinsics.fv(),
            intrinsics.cu(),
            intrinsics.cv()
        );

        Ok(Self {
            matrices,
            image_size,
            intrinsics,
            rect_from_lidar,
            lidar_from_rect,
        })
    }

    /// Get as reference the calibration matrices.
    pub fn matrices(&self) -> &CalibrationMatrices {
        &self.matrices
    }

    /// The size of the left color image.
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    /// The intrinsics derived from P2.
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Transform points from the lidar frame to the rectified camera frame.
    ///
    /// Computes `P_hom * (V2C^T * R0^T)` row by row.
    ///
    /// # Arguments
    ///
    /// * `pts_lidar` - N points in the lidar frame.
    ///
    /// # Returns
    ///
    /// The N points in the rectified camera frame, in the same order.
    pub fn lidar_to_rect(&self, pts_lidar: &[[f32; 3]]) -> Vec<[f32; 3]> {
        Self::apply(&self.rect_from_lidar, pts_lidar)
    }

    /// Transform points from the rectified camera frame to the lidar frame.
    ///
    /// Computes `P_hom * inv((R0_ext * V2C_ext)^T)` row by row and keeps the
    /// first three columns.
    pub fn rect_to_lidar(&self, pts_rect: &[[f32; 3]]) -> Vec<[f32; 3]> {
        Self::apply(&self.lidar_from_rect, pts_rect)
    }

    /// Project points in the rectified camera frame to the left color image.
    ///
    /// # Arguments
    ///
    /// * `pts_rect` - N points in the rectified camera frame.
    ///
    /// # Returns
    ///
    /// A tuple of the N pixel coordinates `[u, v]` and the N depths.
    ///
    /// The pixel coordinates are the first two homogeneous components divided
    /// by the third. The depth is the third homogeneous component minus
    /// `P2[2, 3]`. Points on or behind the camera plane may produce very large,
    /// infinite or NaN pixels; they are left for [`Calibration::get_fov_flag`]
    /// to reject.
    ///
    /// Example:
    ///
    /// ```
    /// use glam::Mat3;
    /// use lidarcam_3d::{
    ///     calibration::{Calibration, CalibrationMatrices},
    ///     camera::ImageSize,
    ///     linalg::Mat3x4,
    /// };
    ///
    /// let matrices = CalibrationMatrices {
    ///     p2: Mat3x4::IDENTITY,
    ///     p3: Mat3x4::IDENTITY,
    ///     r0: Mat3::IDENTITY,
    ///     tr_velo2cam: Mat3x4::IDENTITY,
    /// };
    /// let calib = Calibration::new(matrices, ImageSize { width: 10, height: 10 }).unwrap();
    ///
    /// let (pts_img, depth) = calib.rect_to_img(&[[0.0, 0.0, 5.0]]);
    /// assert_eq!(pts_img, vec![[0.0, 0.0]]);
    /// assert_eq!(depth, vec![5.0]);
    /// ```
    pub fn rect_to_img(&self, pts_rect: &[[f32; 3]]) -> (Vec<[f32; 2]>, Vec<f32>) {
        let p2 = &self.matrices.p2;
        let depth_offset = p2.get(2, 3);

        cart_to_hom(pts_rect)
            .into_iter()
            .map(|p| {
                let pts_2d_hom = p2.mul_vec4(Vec4::from_array(p));
                (
                    [pts_2d_hom.x / pts_2d_hom.z, pts_2d_hom.y / pts_2d_hom.z],
                    pts_2d_hom.z - depth_offset,
                )
            })
            .unzip()
    }

    /// Project points in the lidar frame to the left color image.
    pub fn lidar_to_img(&self, pts_lidar: &[[f32; 3]]) -> (Vec<[f32; 2]>, Vec<f32>) {
        self.rect_to_img(&self.lidar_to_rect(pts_lidar))
    }

    /// Back-project pixels with a known depth to the rectified camera frame.
    ///
    /// Uses the pinhole intrinsics of P2: `x = (u - cu) * d / fu + tx`,
    /// `y = (v - cv) * d / fv + ty`, `z = d`.
    ///
    /// # Errors
    ///
    /// [`CalibrationError::LengthMismatch`] if the three slices differ in length.
    pub fn img_to_rect(
        &self,
        u: &[f32],
        v: &[f32],
        depth_rect: &[f32],
    ) -> Result<Vec<[f32; 3]>, CalibrationError> {
        if u.len() != v.len() || u.len() != depth_rect.len() {
            return Err(CalibrationError::LengthMismatch(
                u.len(),
                v.len(),
                depth_rect.len(),
            ));
        }

        let k = &self.intrinsics;
        Ok(u.iter()
            .zip(v)
            .zip(depth_rect)
            .map(|((&u, &v), &d)| {
                [
                    (u - k.cu()) * d / k.fu() + k.tx(),
                    (v - k.cv()) * d / k.fv() + k.ty(),
                    d,
                ]
            })
            .collect())
    }

    /// Compute the field of view mask of points in the rectified camera frame.
    ///
    /// A point is valid iff its projection lies in `[0, width) x [0, height)`,
    /// its depth is non-negative and it lies in front of the camera plane
    /// (rectified `z > 0`). With a non-zero `P2[2, 3]` a point at `z = 0`
    /// still projects to a finite pixel, so the last test is not implied by
    /// the first two.
    ///
    /// # Arguments
    ///
    /// * `pts_rect` - N points in the rectified camera frame.
    ///
    /// # Returns
    ///
    /// One flag per input point.
    pub fn get_fov_flag(&self, pts_rect: &[[f32; 3]]) -> Vec<bool> {
        let (pts_img, pts_rect_depth) = self.rect_to_img(pts_rect);
        pts_rect
            .iter()
            .zip(pts_img)
            .zip(pts_rect_depth)
            .map(|((p, [u, v]), depth)| {
                p[2] > 0.0 && depth >= 0.0 && self.image_size.contains(u, v)
            })
            .collect()
    }

    /// Keep the points of a lidar scan that project inside the left color image.
    ///
    /// The surviving rows are returned unchanged, intensity included, in
    /// their original order.
    pub fn cutout_scene(&self, scan: &LidarScan) -> LidarScan {
        let pts_rect = self.lidar_to_rect(&scan.xyz());
        let fov_flag = self.get_fov_flag(&pts_rect);
        let cropped = scan.select(&fov_flag);
        log::debug!("cutout scene: kept {} of {} points", cropped.len(), scan.len());
        cropped
    }

    fn apply(dst_from_src: &Mat4, points: &[[f32; 3]]) -> Vec<[f32; 3]> {
        cart_to_hom(points)
            .into_iter()
            .map(|p| {
                dst_from_src
                    .mul_vec4(Vec4::from_array(p))
                    .truncate()
                    .to_array()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // KITTI object training frame 000000
    const P2: [f32; 12] = [
        7.215377e2, 0.0, 6.095593e2, 4.485728e1, //
        0.0, 7.215377e2, 1.728540e2, 2.163791e-1, //
        0.0, 0.0, 1.0, 2.745884e-3,
    ];
    const P3: [f32; 12] = [
        7.215377e2, 0.0, 6.095593e2, -3.395242e2, //
        0.0, 7.215377e2, 1.728540e2, 2.199936, //
        0.0, 0.0, 1.0, 2.729905e-3,
    ];
    const R0: [f32; 9] = [
        9.999239e-1, 9.837760e-3, -7.445048e-3, //
        -9.869795e-3, 9.999421e-1, -4.278459e-3, //
        7.402527e-3, 4.351614e-3, 9.999631e-1,
    ];
    const TR_VELO2CAM: [f32; 12] = [
        7.533745e-3, -9.999714e-1, -6.166020e-4, -4.069766e-3, //
        1.480249e-2, 7.280733e-4, -9.999902e-1, -7.631618e-2, //
        9.998621e-1, 7.523790e-3, 1.480755e-2, -2.717806e-1,
    ];
    const IDENTITY_P2: [f32; 12] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0,
    ];

    fn kitti_calibration(image_size: ImageSize) -> Calibration {
        let record = CalibrationRecord {
            p2: P2,
            p3: P3,
            r0: R0,
            tr_velo2cam: TR_VELO2CAM,
        };
        Calibration::new(record.into(), image_size).expect("valid calibration")
    }

    fn identity_calibration(image_size: ImageSize) -> Calibration {
        let matrices = CalibrationMatrices {
            p2: Mat3x4::from_row_slice(&IDENTITY_P2),
            p3: Mat3x4::from_row_slice(&IDENTITY_P2),
            r0: Mat3::IDENTITY,
            tr_velo2cam: Mat3x4::IDENTITY,
        };
        Calibration::new(matrices, image_size).expect("valid calibration")
    }

    fn kitti_image_size() -> ImageSize {
        ImageSize {
            width: 1242,
            height: 375,
        }
    }

    fn grid_points() -> Vec<[f32; 3]> {
        let mut points = Vec::new();
        for i in -10..=10 {
            for j in -5..=5 {
                for k in [-20.0, -2.0, 0.5, 5.0, 30.0] {
                    points.push([i as f32 * 2.0, j as f32, k]);
                }
            }
        }
        points
    }

    #[test]
    fn test_record_layout() {
        let calib = kitti_calibration(kitti_image_size());
        let matrices = calib.matrices();
        assert_eq!(matrices.p2.get(0, 2), 6.095593e2);
        assert_eq!(matrices.p3.get(0, 3), -3.395242e2);
        // row 0, col 1 of R0
        assert_eq!(matrices.r0.y_axis.x, 9.837760e-3);
        // row 1, col 0 of R0
        assert_eq!(matrices.r0.x_axis.y, -9.869795e-3);
        assert_eq!(matrices.tr_velo2cam.get(2, 3), -2.717806e-1);

        let record = CalibrationRecord::from(*matrices);
        assert_eq!(record.r0, R0);
        assert_eq!(record.tr_velo2cam, TR_VELO2CAM);
    }

    #[test]
    fn test_derived_intrinsics() {
        let calib = kitti_calibration(kitti_image_size());
        let k = calib.intrinsics();
        assert_eq!(k.fu(), 7.215377e2);
        assert_eq!(k.fv(), 7.215377e2);
        assert_eq!(k.cu(), 6.095593e2);
        assert_eq!(k.cv(), 1.728540e2);
        assert_relative_eq!(k.tx(), 4.485728e1 / -7.215377e2);
        assert_relative_eq!(k.ty(), 2.163791e-1 / -7.215377e2);
        assert_eq!(calib.image_size().shape(), [375, 1242]);
    }

    #[test]
    fn test_lidar_to_rect_matches_matrix_product() {
        let calib = kitti_calibration(kitti_image_size());
        let pts_lidar = [[10.0, 1.0, -0.5], [-3.0, 7.5, 2.0]];

        let r0 = Mat3::from_cols_array(&R0).transpose();
        let v2c = Mat3x4::from_row_slice(&TR_VELO2CAM);
        let pts_rect = calib.lidar_to_rect(&pts_lidar);

        for (p, rect) in pts_lidar.iter().zip(pts_rect.iter()) {
            let cam = v2c.mul_vec4(Vec4::new(p[0], p[1], p[2], 1.0));
            let expected = r0 * cam;
            assert_relative_eq!(rect[0], expected.x, epsilon = 1e-5);
            assert_relative_eq!(rect[1], expected.y, epsilon = 1e-5);
            assert_relative_eq!(rect[2], expected.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_lidar_rect_roundtrip() {
        let calib = kitti_calibration(kitti_image_size());
        let points = grid_points();

        let pts_rect = calib.lidar_to_rect(&calib.rect_to_lidar(&points));
        for (p, q) in points.iter().zip(pts_rect.iter()) {
            for i in 0..3 {
                assert_relative_eq!(p[i], q[i], epsilon = 1e-4);
            }
        }

        let pts_lidar = calib.rect_to_lidar(&calib.lidar_to_rect(&points));
        for (p, q) in points.iter().zip(pts_lidar.iter()) {
            for i in 0..3 {
                assert_relative_eq!(p[i], q[i], epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_rect_to_img_on_optical_axis() {
        let calib = identity_calibration(ImageSize {
            width: 10,
            height: 10,
        });
        let (pts_img, depth) = calib.rect_to_img(&[[0.0, 0.0, 5.0]]);
        assert_eq!(pts_img, vec![[0.0, 0.0]]);
        assert_eq!(depth, vec![5.0]);
    }

    #[test]
    fn test_rect_to_img_kitti() {
        let calib = kitti_calibration(kitti_image_size());
        let (pts_img, depth) = calib.rect_to_img(&[[1.0, -0.5, 10.0]]);

        let h = Mat3x4::from_row_slice(&P2).mul_vec4(Vec4::new(1.0, -0.5, 10.0, 1.0));
        assert_relative_eq!(pts_img[0][0], h.x / h.z, epsilon = 1e-3);
        assert_relative_eq!(pts_img[0][1], h.y / h.z, epsilon = 1e-3);
        // the third row of P2 is [0, 0, 1, t]: the depth is the rect z
        assert_relative_eq!(depth[0], 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fov_flag_rejects_points_behind_camera() {
        let calib = identity_calibration(ImageSize {
            width: 100,
            height: 100,
        });
        let pts_rect = [
            [1.0, 1.0, 1.0],
            [0.0, 0.0, -5.0],
            [-1.0, -1.0, -1.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ];
        let flag = calib.get_fov_flag(&pts_rect);
        assert_eq!(flag, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_fov_flag_rejects_camera_plane_with_kitti_p2() {
        let matrices = CalibrationMatrices {
            p2: Mat3x4::from_row_slice(&P2),
            p3: Mat3x4::from_row_slice(&P3),
            r0: Mat3::IDENTITY,
            tr_velo2cam: Mat3x4::IDENTITY,
        };
        let calib = Calibration::new(matrices, kitti_image_size()).expect("valid calibration");
        let pts_rect = [
            [-0.06, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [-0.06, 0.0, -1e-4],
            [0.0, 0.0, -1e-3],
            [-0.06, 0.0, 5.0],
        ];

        // on the camera plane the pixel is finite and the depth is zero
        let (pts_img, depth) = calib.rect_to_img(&pts_rect[..1]);
        assert!(kitti_image_size().contains(pts_img[0][0], pts_img[0][1]));
        assert_relative_eq!(depth[0], 0.0);

        let flag = calib.get_fov_flag(&pts_rect);
        assert_eq!(flag, vec![false, false, false, false, true]);
    }

    #[test]
    fn test_fov_flag_image_bounds() {
        let calib = identity_calibration(ImageSize {
            width: 4,
            height: 2,
        });
        // pixel = (x / z, y / z)
        let pts_rect = [
            [0.0, 0.0, 1.0],
            [3.9, 1.9, 1.0],
            [4.0, 0.0, 1.0],
            [0.0, 2.0, 1.0],
            [-0.1, 0.0, 1.0],
            [7.0, 3.0, 2.0],
        ];
        let flag = calib.get_fov_flag(&pts_rect);
        assert_eq!(flag, vec![true, true, false, false, false, true]);
    }

    #[test]
    fn test_fov_count_shrinks_with_image() {
        let points = grid_points();
        let rect = kitti_calibration(kitti_image_size()).lidar_to_rect(&points);

        let count = |calib: &Calibration| calib.get_fov_flag(&rect).iter().filter(|&&f| f).count();
        let full = count(&kitti_calibration(kitti_image_size()));
        let small = count(&kitti_calibration(ImageSize {
            width: 10,
            height: 10,
        }));
        assert!(full > 0);
        assert!(small <= full);
    }

    #[test]
    fn test_cutout_scene_keeps_rows_verbatim() {
        let calib = kitti_calibration(kitti_image_size());
        let scan = LidarScan::new(vec![
            [10.0, 0.0, 0.0, 0.1],  // ahead
            [-10.0, 0.0, 0.0, 0.2], // behind
            [20.0, 1.0, -1.0, 0.3], // ahead
            [0.0, 30.0, 0.0, 0.4],  // far left
            [15.0, -2.0, 0.5, 0.5], // ahead
        ]);
        let cropped = calib.cutout_scene(&scan);
        assert_eq!(
            cropped.points(),
            &[
                [10.0, 0.0, 0.0, 0.1],
                [20.0, 1.0, -1.0, 0.3],
                [15.0, -2.0, 0.5, 0.5]
            ]
        );
    }

    #[test]
    fn test_cutout_scene_subset_in_order() {
        let calib = kitti_calibration(kitti_image_size());
        let scan = LidarScan::new(
            grid_points()
                .into_iter()
                .enumerate()
                .map(|(i, p)| [p[2].abs(), p[0], p[1], i as f32])
                .collect(),
        );
        let cropped = calib.cutout_scene(&scan);
        assert!(cropped.len() <= scan.len());
        assert!(!cropped.is_empty());

        // the intensity column carries the original index
        let indices = cropped.intensities();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for p in cropped.points() {
            assert_eq!(&scan.points()[p[3] as usize], p);
        }
    }

    #[test]
    fn test_img_to_rect_inverts_rect_to_img() -> Result<(), CalibrationError> {
        let mut p2 = P2;
        p2[11] = 0.0;
        let matrices = CalibrationMatrices {
            p2: Mat3x4::from_row_slice(&p2),
            p3: Mat3x4::from_row_slice(&P3),
            r0: Mat3::IDENTITY,
            tr_velo2cam: Mat3x4::IDENTITY,
        };
        let calib = Calibration::new(matrices, kitti_image_size())?;

        let pts_rect = [[1.0, -0.5, 10.0], [-4.0, 1.5, 25.0]];
        let (pts_img, depth) = calib.rect_to_img(&pts_rect);
        let u = pts_img.iter().map(|p| p[0]).collect::<Vec<_>>();
        let v = pts_img.iter().map(|p| p[1]).collect::<Vec<_>>();

        let restored = calib.img_to_rect(&u, &v, &depth)?;
        for (p, q) in pts_rect.iter().zip(restored.iter()) {
            for i in 0..3 {
                assert_relative_eq!(p[i], q[i], epsilon = 1e-3);
            }
        }
        Ok(())
    }

    #[test]
    fn test_img_to_rect_length_mismatch() {
        let calib = identity_calibration(kitti_image_size());
        let res = calib.img_to_rect(&[1.0, 2.0], &[1.0], &[1.0, 2.0]);
        assert!(matches!(res, Err(CalibrationError::LengthMismatch(2, 1, 2))));
    }

    #[test]
    fn test_lidar_to_img_composes() {
        let calib = kitti_calibration(kitti_image_size());
        let pts_lidar = [[12.0, -1.0, 0.3]];
        let (a, da) = calib.lidar_to_img(&pts_lidar);
        let (b, db) = calib.rect_to_img(&calib.lidar_to_rect(&pts_lidar));
        assert_eq!(a, b);
        assert_eq!(da, db);
    }

    #[test]
    fn test_singular_transform() {
        let matrices = CalibrationMatrices {
            p2: Mat3x4::from_row_slice(&IDENTITY_P2),
            p3: Mat3x4::from_row_slice(&IDENTITY_P2),
            r0: Mat3::ZERO,
            tr_velo2cam: Mat3x4::IDENTITY,
        };
        let res = Calibration::new(matrices, kitti_image_size());
        assert!(matches!(res, Err(CalibrationError::SingularTransform(_))));

        let matrices = CalibrationMatrices {
            r0: Mat3::IDENTITY,
            tr_velo2cam: Mat3x4::ZERO,
            ..matrices
        };
        let res = Calibration::new(matrices, kitti_image_size());
        assert!(matches!(res, Err(CalibrationError::SingularTransform(_))));
    }

    #[test]
    fn test_degenerate_p2() {
        let mut p2 = P2;
        p2[5] = 0.0;
        let record = CalibrationRecord {
            p2,
            p3: P3,
            r0: R0,
            tr_velo2cam: TR_VELO2CAM,
        };
        let res = Calibration::new(record.into(), kitti_image_size());
        assert!(matches!(
            res,
            Err(CalibrationError::DegenerateFocalLength { .. })
        ));
    }

    #[test]
    fn test_serde_mapping() -> Result<(), serde_json::Error> {
        let json = r#"{
            "P2": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0],
            "P3": [1, 0, 0, -0.5, 0, 1, 0, 0, 0, 0, 1, 0],
            "R0": [1, 0, 0, 0, 1, 0, 0, 0, 1],
            "Tr_velo2cam": [0, -1, 0, 0, 0, 0, -1, 0, 1, 0, 0, 0]
        }"#;
        let matrices: CalibrationMatrices = serde_json::from_str(json)?;
        assert_eq!(matrices.p3.get(0, 3), -0.5);
        assert_eq!(matrices.r0, Mat3::IDENTITY);
        assert_eq!(matrices.tr_velo2cam.get(0, 1), -1.0);
        assert_eq!(matrices.tr_velo2cam.get(2, 0), 1.0);

        let back: CalibrationMatrices = serde_json::from_str(&serde_json::to_string(&matrices)?)?;
        assert_eq!(back, matrices);

        let short = r#"{"P2": [1, 0], "P3": [], "R0": [], "Tr_velo2cam": []}"#;
        assert!(serde_json::from_str::<CalibrationMatrices>(short).is_err());
        Ok(())
    }
}
