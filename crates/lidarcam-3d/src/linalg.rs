use glam::{Mat4, Vec3, Vec4};

/// A 3x4 matrix stored as three row vectors.
///
/// Used for the camera projection matrices (P2, P3) and the rigid lidar to
/// camera transform (Tr_velo_to_cam), all of which are given row-major in
/// the calibration files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3x4 {
    rows: [Vec4; 3],
}

impl Mat3x4 {
    /// The 3x4 identity, `[I | 0]`.
    pub const IDENTITY: Self = Self {
        rows: [Vec4::X, Vec4::Y, Vec4::Z],
    };

    /// All zeros.
    pub const ZERO: Self = Self {
        rows: [Vec4::ZERO; 3],
    };

    /// Create a matrix from its rows.
    pub fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        Self {
            rows: rows.map(Vec4::from_array),
        }
    }

    /// Create a matrix from 12 values in row-major order.
    ///
    /// Example:
    ///
    /// ```
    /// use lidarcam_3d::linalg::Mat3x4;
    ///
    /// let m = Mat3x4::from_row_slice(&[
    ///     1.0, 0.0, 0.0, 4.0, //
    ///     0.0, 2.0, 0.0, 5.0, //
    ///     0.0, 0.0, 3.0, 6.0, //
    /// ]);
    /// assert_eq!(m.get(1, 1), 2.0);
    /// assert_eq!(m.get(2, 3), 6.0);
    /// ```
    pub fn from_row_slice(values: &[f32; 12]) -> Self {
        Self {
            rows: [
                Vec4::new(values[0], values[1], values[2], values[3]),
                Vec4::new(values[4], values[5], values[6], values[7]),
                Vec4::new(values[8], values[9], values[10], values[11]),
            ],
        }
    }

    /// The 12 values in row-major order.
    pub fn to_row_array(&self) -> [f32; 12] {
        let mut values = [0.0; 12];
        for (chunk, row) in values.chunks_exact_mut(4).zip(self.rows.iter()) {
            chunk.copy_from_slice(&row.to_array());
        }
        values
    }

    /// Get a row of the matrix.
    ///
    /// PRECONDITION: `index < 3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        self.rows[index]
    }

    /// Get the element at `(row, col)`.
    ///
    /// PRECONDITION: `row < 3` and `col < 4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }

    /// Multiply by a homogeneous 4-vector, returning the 3-vector `M * v`.
    #[inline]
    pub fn mul_vec4(&self, v: Vec4) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    /// Extend to a 4x4 homogeneous matrix by appending the row `[0, 0, 0, 1]`.
    pub fn to_homogeneous(&self) -> Mat4 {
        // glam is column-major: place the rows as columns and transpose
        Mat4::from_cols(self.rows[0], self.rows[1], self.rows[2], Vec4::W).transpose()
    }
}

impl Default for Mat3x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
