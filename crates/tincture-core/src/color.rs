//! RGB color with channels normalized to [0, 1].

use serde::{Deserialize, Serialize};

/// Linear RGB color. Channels are always within [0, 1].
///
/// Fields are public for pattern matching and serialization; values
/// entering the model go through [`Rgb::new`], which clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build a color, clamping each channel to [0, 1]. NaN maps to 0.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Re-clamp a color whose fields may have been written directly.
    pub fn clamped(self) -> Self {
        Self::new(self.r, self.g, self.b)
    }

    /// Per-channel linear blend: `self + (other - self) × t`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Multiply every channel by `factor` (result clamped).
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether every channel is finite and inside [0, 1].
    pub fn is_normalized(&self) -> bool {
        self.to_array()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<(f64, f64, f64)> for Rgb {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self::new(r, g, b)
    }
}

/// Clamp to [0, 1]; NaN becomes 0.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_new_clamps_out_of_range_channels() {
        let c = Rgb::new(-0.5, 0.25, 3.0);
        assert_eq!(c, Rgb::new(0.0, 0.25, 1.0));
    }

    #[test]
    fn test_new_maps_nan_to_zero() {
        let c = Rgb::new(f64::NAN, 0.5, 0.5);
        assert_eq!(c.r, 0.0);
        assert!(c.is_normalized());
    }

    #[test]
    fn test_lerp_midpoint_is_gray() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        for c in mid.to_array() {
            assert!((c - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_scaled_halves_intensity() {
        let c = Rgb::new(1.0, 0.5, 0.0).scaled(0.5);
        assert!((c.r - 0.5).abs() < EPSILON);
        assert!((c.g - 0.25).abs() < EPSILON);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_is_normalized_rejects_direct_field_writes() {
        let c = Rgb {
            r: 1.5,
            g: 0.0,
            b: 0.0,
        };
        assert!(!c.is_normalized());
        assert!(c.clamped().is_normalized());
    }
}
