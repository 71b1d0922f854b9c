/// A cartesian point type with a homogeneous counterpart one dimension larger.
pub trait Homogeneous: Copy {
    /// The homogeneous representation.
    type Hom: Copy;

    /// Append a `1` as the last coordinate.
    fn to_hom(self) -> Self::Hom;

    /// Drop the last coordinate.
    fn from_hom(hom: Self::Hom) -> Self;
}

impl Homogeneous for [f32; 2] {
    type Hom = [f32; 3];

    #[inline]
    fn to_hom(self) -> [f32; 3] {
        [self[0], self[1], 1.0]
    }

    #[inline]
    fn from_hom(hom: [f32; 3]) -> Self {
        [hom[0], hom[1]]
    }
}

impl Homogeneous for [f32; 3] {
    type Hom = [f32; 4];

    #[inline]
    fn to_hom(self) -> [f32; 4] {
        [self[0], self[1], self[2], 1.0]
    }

    #[inline]
    fn from_hom(hom: [f32; 4]) -> Self {
        [hom[0], hom[1], hom[2]]
    }
}

/// Convert a set of cartesian points to homogeneous coordinates.
///
/// # Arguments
///
/// * `points` - A set of N points with 2 or 3 coordinates.
///
/// # Returns
///
/// The N points with a column of ones appended, in the same order.
///
/// Example:
///
/// ```
/// use lidarcam_3d::transforms::cart_to_hom;
///
/// let points = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let points_hom = cart_to_hom(&points);
/// assert_eq!(points_hom, vec![[1.0, 2.0, 3.0, 1.0], [4.0, 5.0, 6.0, 1.0]]);
/// ```
pub fn cart_to_hom<P: Homogeneous>(points: &[P]) -> Vec<P::Hom> {
    points.iter().map(|&p| p.to_hom()).collect()
}

/// Drop the last column of a set of homogeneous points.
///
/// NOTE: this does not divide by the last coordinate; it is the exact inverse
/// of [`cart_to_hom`] only.
///
/// Example:
///
/// ```
/// use lidarcam_3d::transforms::hom_to_cart;
///
/// let points: Vec<[f32; 2]> = hom_to_cart(&[[1.0, 2.0, 1.0]]);
/// assert_eq!(points, vec![[1.0, 2.0]]);
/// ```
pub fn hom_to_cart<P: Homogeneous>(points: &[P::Hom]) -> Vec<P> {
    points.iter().map(|&p| P::from_hom(p)).collect()
}
