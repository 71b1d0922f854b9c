use glam::Vec3;

/// A lidar scan of `(x, y, z, intensity)` points in the lidar frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LidarScan {
    // The points in the scan, one row per return.
    points: Vec<[f32; 4]>,
}

impl LidarScan {
    /// Create a new scan from `(x, y, z, intensity)` rows.
    pub fn new(points: Vec<[f32; 4]>) -> Self {
        Self { points }
    }

    /// Get the number of points in the scan.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the scan is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the scan.
    pub fn points(&self) -> &[[f32; 4]] {
        &self.points
    }

    /// Consume the scan and return its rows.
    pub fn into_points(self) -> Vec<[f32; 4]> {
        self.points
    }

    /// The XYZ part of every point.
    pub fn xyz(&self) -> Vec<[f32; 3]> {
        self.points.iter().map(|p| [p[0], p[1], p[2]]).collect()
    }

    /// The intensity column.
    pub fn intensities(&self) -> Vec<f32> {
        self.points.iter().map(|p| p[3]).collect()
    }

    /// Keep the points whose mask entry is `true`, preserving their order.
    ///
    /// # Panics
    ///
    /// If `mask` does not have one entry per point.
    pub fn select(&self, mask: &[bool]) -> Self {
        assert_eq!(
            mask.len(),
            self.points.len(),
            "mask length must match the number of points"
        );
        let points = self
            .points
            .iter()
            .zip(mask)
            .filter_map(|(p, &keep)| keep.then_some(*p))
            .collect();
        Self { points }
    }

    /// Get the minimum and maximum XYZ bounds, or `None` for an empty scan.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Self::point_to_vec3(self.points.first()?);
        Some(
            self.points
                .iter()
                .map(Self::point_to_vec3)
                .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))),
        )
    }

    fn point_to_vec3(point: &[f32; 4]) -> Vec3 {
        Vec3::new(point[0], point[1], point[2])
    }
}

impl From<Vec<[f32; 4]>> for LidarScan {
    fn from(points: Vec<[f32; 4]>) -> Self {
        Self::new(points)
    }
}
