//! Export into a volume renderer's opacity and color step functions.
//!
//! The renderer owns two parallel functions keyed by data-space scalar: a
//! piecewise opacity function and an RGB color function. The transfer
//! function registers one sample per control point in each and hands both
//! to the renderer through [`VolumeProperty`].

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::transfer::function::TransferFunction;

/// Scalar → opacity samples, evaluated piecewise-linearly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseFunction {
    points: Vec<(f64, f64)>,
}

impl PiecewiseFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an opacity sample at `scalar`. Samples stay ordered by scalar.
    pub fn add_point(&mut self, scalar: f64, opacity: f64) {
        let index = self.points.partition_point(|&(s, _)| s <= scalar);
        self.points.insert(index, (scalar, opacity));
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Opacity at `scalar`, flat outside the sampled range. Empty → 0.
    pub fn evaluate(&self, scalar: f64) -> f64 {
        let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
        evaluate_linear(&self.points, scalar, |&(s, _)| s, |&(_, v)| v, lerp).unwrap_or(0.0)
    }
}

/// Scalar → RGB samples, evaluated piecewise-linearly per channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTransferFunction {
    points: Vec<(f64, Rgb)>,
}

impl ColorTransferFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an RGB sample at `scalar`.
    pub fn add_rgb_point(&mut self, scalar: f64, r: f64, g: f64, b: f64) {
        let index = self.points.partition_point(|&(s, _)| s <= scalar);
        self.points.insert(index, (scalar, Rgb::new(r, g, b)));
    }

    pub fn points(&self) -> &[(f64, Rgb)] {
        &self.points
    }

    /// Color at `scalar`, flat outside the sampled range. Empty → black.
    pub fn evaluate(&self, scalar: f64) -> Rgb {
        let lerp = |a: Rgb, b: Rgb, t: f64| a.lerp(b, t);
        evaluate_linear(&self.points, scalar, |&(s, _)| s, |&(_, c)| c, lerp).unwrap_or(Rgb::BLACK)
    }
}

/// Shared piecewise-linear lookup over scalar-sorted samples.
fn evaluate_linear<P, V: Copy>(
    points: &[P],
    scalar: f64,
    key: impl Fn(&P) -> f64,
    value: impl Fn(&P) -> V,
    lerp: impl Fn(V, V, f64) -> V,
) -> Option<V> {
    let (first, last) = (points.first()?, points.last()?);
    if scalar <= key(first) || scalar.is_nan() {
        return Some(value(first));
    }
    if scalar >= key(last) {
        return Some(value(last));
    }
    let hi = points.partition_point(|p| key(p) < scalar);
    let (a, b) = (&points[hi - 1], &points[hi]);
    let span = key(b) - key(a);
    let t = if span > 0.0 { (scalar - key(a)) / span } else { 1.0 };
    Some(lerp(value(a), value(b), t))
}

/// Renderer-side receiver for the exported step functions.
///
/// Each call replaces whatever function the renderer held before.
pub trait VolumeProperty {
    fn set_scalar_opacity(&mut self, opacity: PiecewiseFunction);
    fn set_color(&mut self, color: ColorTransferFunction);
}

impl TransferFunction {
    /// Build fresh opacity and color functions in scalar space and install
    /// them on `target`.
    pub fn set_on_volume_property<V: VolumeProperty + ?Sized>(&self, target: &mut V) {
        let mut opacity = PiecewiseFunction::new();
        let mut color = ColorTransferFunction::new();
        for point in self.points() {
            let scalar = self.map_to_scalar_space(point);
            opacity.add_point(scalar, point.opacity);
            color.add_rgb_point(scalar, point.color.r, point.color.g, point.color.b);
        }
        tracing::debug!(
            points = self.len(),
            range_min = self.range_min(),
            range_max = self.range_max(),
            "installing transfer function on volume property"
        );
        target.set_scalar_opacity(opacity);
        target.set_color(color);
    }
}
