//! Axis-aligned bounding boxes and unit normalization

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Box that contains nothing: `+inf` minimum, `-inf` maximum
    pub const EMPTY: Self = Self {
        min: [f32::INFINITY; 3],
        max: [f32::NEG_INFINITY; 3],
    };

    /// Calculate the bounding box of a set of points
    ///
    /// No points gives [`BoundingBox::EMPTY`].
    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut bbox = Self::EMPTY;
        for p in points {
            for i in 0..3 {
                bbox.min[i] = bbox.min[i].min(p[i]);
                bbox.max[i] = bbox.max[i].max(p[i]);
            }
        }
        bbox
    }

    /// Check if the box contains no points
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3 {
        (Vec3::from(self.min) + Vec3::from(self.max)) / 2.0
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        Vec3::from(self.max) - Vec3::from(self.min)
    }

    /// Largest extent over the three axes
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}

/// Recenter points on the box center and scale them uniformly by its largest extent
///
/// The dominant axis ends up spanning exactly 1.0. A box with zero or non-finite extent
/// is only recentred.
pub(crate) fn normalize_points(points: &mut [[f32; 3]], bbox: &BoundingBox) {
    if points.is_empty() {
        return;
    }

    let center = bbox.center();
    let scale = bbox.max_extent();
    let scale = if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        tracing::warn!("Degenerate bounding box (extent {}), recentering only", scale);
        1.0
    };

    for p in points.iter_mut() {
        *p = ((Vec3::from(*p) - center) / scale).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(&[[0.0, 5.0, -10.0], [10.0, 0.0, 0.0], [3.0, 10.0, -2.0]]);
        assert_eq!(bbox.min, [0.0, 0.0, -10.0]);
        assert_eq!(bbox.max, [10.0, 10.0, 0.0]);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.center(), Vec3::new(5.0, 5.0, -5.0));
        assert_eq!(bbox.size(), Vec3::splat(10.0));
    }

    #[test]
    fn test_empty() {
        let bbox = BoundingBox::from_points(&[]);
        assert_eq!(bbox, BoundingBox::EMPTY);
        assert!(bbox.is_empty());
    }

    #[test]
    fn test_single_point_is_not_empty() {
        let bbox = BoundingBox::from_points(&[[1.0, 2.0, 3.0]]);
        assert!(!bbox.is_empty());
        assert_eq!(bbox.max_extent(), 0.0);
    }

    #[test]
    fn test_normalize_uniform_scale() {
        let mut points = vec![[0.0, 0.0, 0.0], [4.0, 2.0, 1.0]];
        let bbox = BoundingBox::from_points(&points);
        normalize_points(&mut points, &bbox);

        assert_eq!(points[0], [-0.5, -0.25, -0.125]);
        assert_eq!(points[1], [0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_normalize_degenerate_recenters() {
        let mut points = vec![[2.0, 2.0, 2.0], [2.0, 2.0, 2.0]];
        let bbox = BoundingBox::from_points(&points);
        normalize_points(&mut points, &bbox);
        assert_eq!(points, vec![[0.0; 3]; 2]);
    }
}
