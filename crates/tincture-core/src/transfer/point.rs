//! A single control point on the transfer-function curve.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, clamp_unit};

/// A `(position, opacity, color)` sample on the curve.
///
/// `position` is normalized: 0.0 maps to the model's `range_min` and 1.0
/// to `range_max`. Opacity and color are clamped to [0, 1] on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Normalized scalar position.
    pub position: f64,
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Color with channels in [0, 1].
    pub color: Rgb,
}

impl ControlPoint {
    /// Create a point. The position is stored as given; opacity and color are clamped.
    pub fn new(position: f64, opacity: f64, color: impl Into<Rgb>) -> Self {
        Self {
            position,
            opacity: clamp_unit(opacity),
            color: color.into().clamped(),
        }
    }

    /// Whether opacity and color are inside their storage domain and the
    /// position is a finite number.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.opacity.is_finite()
            && (0.0..=1.0).contains(&self.opacity)
            && self.color.is_normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_opacity_and_color() {
        let p = ControlPoint::new(0.5, 1.7, (2.0, -1.0, 0.5));
        assert_eq!(p.opacity, 1.0);
        assert_eq!(p.color, Rgb::new(1.0, 0.0, 0.5));
        assert!(p.is_valid());
    }

    #[test]
    fn test_new_keeps_out_of_range_position() {
        let p = ControlPoint::new(1.25, 0.5, Rgb::BLACK);
        assert_eq!(p.position, 1.25);
        assert!(p.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_non_finite_position() {
        let p = ControlPoint::new(f64::INFINITY, 0.5, Rgb::BLACK);
        assert!(!p.is_valid());
    }
}
