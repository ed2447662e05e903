//! 1D RGBA LUT baking.
//!
//! Samples a transfer function at uniformly spaced normalized positions.
//! Renderers that want a texture instead of step functions upload these
//! texels directly; the editor uses them for gradient previews.
//!
//! # Complexity
//! - Bake: O(size × log N)

use crate::transfer::function::TransferFunction;

/// Baked texels, `[r, g, b, opacity]` per entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaLut {
    pub texels: Vec<[f32; 4]>,
}

impl RgbaLut {
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// Raw texel bytes, tightly packed `f32 × 4`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Quantize to 8-bit RGBA.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.texels
            .iter()
            .map(|t| t.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }
}

/// Bake a transfer function into `size` RGBA texels over positions [0, 1].
///
/// `size == 1` samples position 0.0; `size == 0` yields an empty LUT.
pub fn bake_rgba_lut(tf: &TransferFunction, size: usize) -> RgbaLut {
    let texels = (0..size)
        .map(|i| {
            let t = i as f64 / (size - 1).max(1) as f64;
            let s = tf.interpolate(t);
            [
                s.color.r as f32,
                s.color.g as f32,
                s.color.b as f32,
                s.opacity as f32,
            ]
        })
        .collect();
    RgbaLut { texels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    const EPSILON: f32 = 1e-6;

    fn ramp() -> TransferFunction {
        let mut tf = TransferFunction::new();
        tf.add_point(0.0, 0.0, Rgb::BLACK);
        tf.add_point(1.0, 1.0, Rgb::WHITE);
        tf
    }

    #[test]
    fn test_bake_ramp_endpoints_and_middle() {
        let lut = bake_rgba_lut(&ramp(), 3);
        assert_eq!(lut.texels[0], [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(lut.texels[2], [1.0, 1.0, 1.0, 1.0]);
        for c in lut.texels[1] {
            assert!((c - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_bake_degenerate_sizes() {
        assert!(bake_rgba_lut(&ramp(), 0).is_empty());
        let single = bake_rgba_lut(&ramp(), 1);
        assert_eq!(single.texels, vec![[0.0, 0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_as_bytes_length() {
        let lut = bake_rgba_lut(&ramp(), 256);
        assert_eq!(lut.as_bytes().len(), 256 * 16);
    }

    #[test]
    fn test_to_rgba8_quantizes() {
        let lut = bake_rgba_lut(&ramp(), 2);
        assert_eq!(lut.to_rgba8(), vec![[0, 0, 0, 0], [255, 255, 255, 255]]);
    }
}
