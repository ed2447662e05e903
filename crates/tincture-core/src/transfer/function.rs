//! Piecewise-linear transfer function over a scalar data range.
//!
//! The curve is an ordered arena of [`ControlPoint`]s. Neighbours are found
//! by index, so there is no linked structure to keep consistent: the
//! segment between points `i` and `i + 1` is implied by the ordering.
//!
//! # Invariants
//! - `points` is sorted by position; equal positions keep insertion order.
//! - Opacity and color channels are clamped to [0, 1] before storage.
//! - The first and last points are corners and cannot be removed.
//!
//! `range_min <= range_max` is not enforced; consumers map positions into
//! data space with `range_min + (range_max - range_min) × position`.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, clamp_unit};
use crate::transfer::point::ControlPoint;

/// Minimum gap kept between an interior point and its neighbours while dragging.
pub const DRAG_EPSILON: f64 = 1e-6;

/// Opacity and color produced by [`TransferFunction::interpolate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub opacity: f64,
    pub color: Rgb,
}

impl Sample {
    /// Fully transparent black, returned for an empty model.
    pub const TRANSPARENT: Self = Self {
        opacity: 0.0,
        color: Rgb::BLACK,
    };
}

impl From<&ControlPoint> for Sample {
    fn from(p: &ControlPoint) -> Self {
        Self {
            opacity: p.opacity,
            color: p.color,
        }
    }
}

/// Ordered control points mapping normalized position to opacity and color.
///
/// `PartialEq` is structural: same range and pairwise-equal points in order.
/// `Clone` is a deep copy; points are plain values and never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    range_min: f64,
    range_max: f64,
    points: Vec<ControlPoint>,
}

impl Default for TransferFunction {
    /// Two transparent black corners at 0.0 and 1.0 over the range [0, 1].
    fn default() -> Self {
        let mut tf = Self::new();
        tf.ensure_corners();
        tf
    }
}

impl TransferFunction {
    /// An empty model over [0, 1]. Call [`ensure_corners`](Self::ensure_corners)
    /// before handing it to a renderer.
    pub fn new() -> Self {
        Self {
            range_min: 0.0,
            range_max: 1.0,
            points: Vec::new(),
        }
    }

    /// Build a model from points, inserting each one with [`add_point`](Self::add_point).
    pub fn from_points(
        range_min: f64,
        range_max: f64,
        points: impl IntoIterator<Item = ControlPoint>,
    ) -> Self {
        let mut tf = Self {
            range_min,
            range_max,
            points: Vec::new(),
        };
        for p in points {
            tf.add_point(p.position, p.opacity, p.color);
        }
        tf
    }

    /// Rebuild from already-ordered parts without re-sorting. Used by the codec.
    pub(crate) fn from_parts(range_min: f64, range_max: f64, points: Vec<ControlPoint>) -> Self {
        Self {
            range_min,
            range_max,
            points,
        }
    }

    /// Install the default corners if the model has no points.
    pub fn ensure_corners(&mut self) {
        if self.points.is_empty() {
            self.points.push(ControlPoint::new(0.0, 0.0, Rgb::BLACK));
            self.points.push(ControlPoint::new(1.0, 0.0, Rgb::BLACK));
        }
    }

    pub fn range_min(&self) -> f64 {
        self.range_min
    }

    pub fn range_max(&self) -> f64 {
        self.range_max
    }

    /// `(range_min, range_max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    /// Replace the data range. Points are untouched.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.range_min = min;
        self.range_max = max;
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether `index` is the first or last point.
    pub fn is_corner(&self, index: usize) -> bool {
        !self.points.is_empty() && (index == 0 || index == self.points.len() - 1)
    }

    /// Left and right neighbours of the point at `index`.
    pub fn neighbors(&self, index: usize) -> (Option<&ControlPoint>, Option<&ControlPoint>) {
        if index >= self.points.len() {
            return (None, None);
        }
        let left = index.checked_sub(1).and_then(|i| self.points.get(i));
        (left, self.points.get(index + 1))
    }

    /// Adjacent point pairs, left to right.
    pub fn segments(&self) -> impl Iterator<Item = (&ControlPoint, &ControlPoint)> {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Insert a point, keeping the sequence sorted by position.
    ///
    /// The position is stored as given, including values outside [0, 1].
    /// A point at an existing position is placed after the existing ones.
    /// Returns the index of the new point, or `None` for a non-finite position.
    pub fn add_point(&mut self, position: f64, opacity: f64, color: impl Into<Rgb>) -> Option<usize> {
        if !position.is_finite() {
            tracing::warn!(position, "rejected control point with non-finite position");
            return None;
        }
        let point = ControlPoint::new(position, opacity, color);
        let index = self.points.partition_point(|p| p.position <= position);
        self.points.insert(index, point);
        tracing::debug!(index, position, opacity = point.opacity, "added control point");
        Some(index)
    }

    /// Remove the point at `index`.
    ///
    /// Corners and out-of-range indices are left alone and return `false`.
    pub fn remove_point(&mut self, index: usize) -> bool {
        if index >= self.points.len() || self.is_corner(index) {
            return false;
        }
        let removed = self.points.remove(index);
        tracing::debug!(index, position = removed.position, "removed control point");
        true
    }

    /// Opacity and color at normalized `position`.
    ///
    /// Finds the first point whose position is `>=` the query and blends it
    /// linearly with its left neighbour. Queries at or before the first point
    /// return the first point; at or after the last, the last point. An exact
    /// knot match returns that knot. An empty model is transparent black.
    pub fn interpolate(&self, position: f64) -> Sample {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return Sample::TRANSPARENT;
        };
        if position <= first.position || position.is_nan() {
            return Sample::from(first);
        }
        if position >= last.position {
            return Sample::from(last);
        }

        let ix = self.points.partition_point(|p| p.position < position);
        let left = &self.points[ix - 1];
        let right = &self.points[ix];
        let span = right.position - left.position;
        let t = if span > 0.0 {
            (position - left.position) / span
        } else {
            1.0
        };

        Sample {
            opacity: clamp_unit(left.opacity + (right.opacity - left.opacity) * t),
            color: left.color.lerp(right.color, t),
        }
    }

    /// Data-space scalar for a point: `range_min + (range_max - range_min) × position`.
    pub fn map_to_scalar_space(&self, point: &ControlPoint) -> f64 {
        self.scalar_at(point.position)
    }

    /// Data-space scalar for a normalized position.
    pub fn scalar_at(&self, position: f64) -> f64 {
        self.range_min + (self.range_max - self.range_min) * position
    }

    /// Drag the point at `index` to `(position, opacity)`.
    ///
    /// Opacity is clamped to [0, 1]. The first point snaps to 0.0 and the
    /// last to 1.0, unless a neighbour lies beyond that edge, in which case
    /// the corner stops at the neighbour. Interior points stay between their
    /// neighbours, so the ordering never changes. A non-finite position keeps
    /// the current one. A lone point does not move. Returns `None` if `index`
    /// is out of range.
    pub fn move_point(&mut self, index: usize, position: f64, opacity: f64) -> Option<usize> {
        let len = self.points.len();
        if index >= len {
            return None;
        }

        let new_position = if len == 1 {
            self.points[0].position
        } else if index == 0 {
            0.0_f64.min(self.points[1].position)
        } else if index == len - 1 {
            1.0_f64.max(self.points[len - 2].position)
        } else if !position.is_finite() {
            self.points[index].position
        } else {
            let lo = self.points[index - 1].position + DRAG_EPSILON;
            let hi = self.points[index + 1].position - DRAG_EPSILON;
            if lo > hi {
                (self.points[index - 1].position + self.points[index + 1].position) * 0.5
            } else {
                position.clamp(lo, hi)
            }
        };

        let point = &mut self.points[index];
        point.position = new_position;
        point.opacity = clamp_unit(opacity);
        Some(index)
    }

    /// Recolor the point at `index`. Returns `false` if out of range.
    pub fn set_point_color(&mut self, index: usize, color: impl Into<Rgb>) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.color = color.into().clamped();
                true
            }
            None => false,
        }
    }

    /// Split the segment starting at `left_index` with a new point.
    ///
    /// The position is clamped onto the segment and the color is blended
    /// from the segment's endpoints at that position. Returns the new
    /// point's index, or `None` when `left_index` does not start a segment.
    pub fn insert_on_segment(&mut self, left_index: usize, position: f64, opacity: f64) -> Option<usize> {
        let right_index = left_index.checked_add(1)?;
        let (left, right) = (self.points.get(left_index)?, self.points.get(right_index)?);

        let position = if position.is_finite() {
            position.clamp(left.position, right.position)
        } else {
            (left.position + right.position) * 0.5
        };
        let span = right.position - left.position;
        let t = if span > 0.0 {
            (position - left.position) / span
        } else {
            0.0
        };
        let color = left.color.lerp(right.color, t);

        self.points
            .insert(right_index, ControlPoint::new(position, opacity, color));
        tracing::debug!(index = right_index, position, "inserted control point on segment");
        Some(right_index)
    }
}
