//! Rescaling a transfer function to the scalar range of its data.
//!
//! A curve is authored in normalized position space. Before it is handed to
//! a renderer, its `[range_min, range_max]` is replaced with the scalar range
//! of the dataset being rendered, or with an explicit range.

use crate::transfer::function::TransferFunction;

/// Anything that can report a `(min, max)` scalar range.
pub trait ScalarRangeSource {
    /// The scalar range, or `None` if it cannot be determined (e.g. no data).
    fn scalar_range(&self) -> Option<(f64, f64)>;
}

impl ScalarRangeSource for (f64, f64) {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        Some(*self)
    }
}

impl ScalarRangeSource for [f64] {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        finite_min_max(self.iter().copied())
    }
}

impl ScalarRangeSource for [f32] {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        finite_min_max(self.iter().map(|&v| f64::from(v)))
    }
}

impl ScalarRangeSource for Vec<f64> {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        self.as_slice().scalar_range()
    }
}

impl ScalarRangeSource for Vec<f32> {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        self.as_slice().scalar_range()
    }
}

impl<T: ScalarRangeSource + ?Sized> ScalarRangeSource for &T {
    fn scalar_range(&self) -> Option<(f64, f64)> {
        (**self).scalar_range()
    }
}

fn finite_min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

impl TransferFunction {
    /// A copy of this function with its range taken from `source`.
    ///
    /// The original is left untouched. If the source has no range, the copy
    /// keeps the current one.
    pub fn rescaled<S: ScalarRangeSource + ?Sized>(&self, source: &S) -> TransferFunction {
        let mut scaled = self.clone();
        match source.scalar_range() {
            Some((min, max)) => scaled.set_range(min, max),
            None => tracing::warn!("scalar range unavailable; keeping current range"),
        }
        scaled
    }
}
