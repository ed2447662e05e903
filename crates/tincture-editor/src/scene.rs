//! Renderer-agnostic drawing data for the transfer-function editor.
//!
//! The editor view is drawn in curve space (x = position, y = opacity) over
//! the unit square. Layers, bottom to top:
//! - grid and border
//! - the filled area under the curve, shaded by a horizontal gradient
//! - one band per segment, shaded from its left to its right endpoint
//! - one elliptical marker per control point
//!
//! Marker and band sizes are divided by the view scale so they keep a
//! constant on-screen size when the widget is resized.

use glam::DVec2;
use tincture_core::{ControlPoint, Rgb, TransferFunction};

use crate::config::EditorConfig;

pub const AREA_Z: f64 = 1.25;
pub const SEGMENT_Z: f64 = 1.5;
pub const MARKER_Z: f64 = 2.0;

/// Outline colors are the fill colors at this intensity.
const OUTLINE_INTENSITY: f64 = 0.5;

/// Gradient stop on the area fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Normalized position along x.
    pub offset: f64,
    pub color: Rgb,
    /// Stop alpha, equal to the point's opacity.
    pub alpha: f64,
}

/// Filled area under the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPolygon {
    /// `(first.x, 0)`, every point, `(last.x, 0)`.
    pub vertices: Vec<DVec2>,
    pub stops: Vec<GradientStop>,
}

/// Band drawn for the segment between two adjacent points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentQuad {
    /// Left point index; the segment ends at `left_index + 1`.
    pub left_index: usize,
    pub corners: [DVec2; 4],
    pub start: DVec2,
    pub end: DVec2,
    pub fill: (Rgb, Rgb),
    pub outline: (Rgb, Rgb),
}

/// Marker drawn for a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMarker {
    pub center: DVec2,
    pub half_extents: DVec2,
    pub fill: Rgb,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: DVec2,
    pub to: DVec2,
}

/// Everything needed to draw the editor for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub border: [DVec2; 4],
    pub grid: Vec<GridLine>,
    pub area: AreaPolygon,
    pub segments: Vec<SegmentQuad>,
    pub markers: Vec<PointMarker>,
}

impl SceneGeometry {
    pub fn build(
        tf: &TransferFunction,
        config: &EditorConfig,
        scale: DVec2,
        selected: Option<usize>,
    ) -> Self {
        let segments = tf
            .segments()
            .enumerate()
            .map(|(i, (a, b))| segment_quad(i, a, b, config.line_half_width, scale))
            .collect();

        let markers = tf
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| PointMarker {
                center: point_pos(p),
                half_extents: marker_half_extents(config.point_radius, scale),
                fill: p.color,
                selected: selected == Some(i),
            })
            .collect();

        Self {
            border: [
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(0.0, 1.0),
            ],
            grid: grid_lines(config.grid_divisions),
            area: area_polygon(tf),
            segments,
            markers,
        }
    }
}

/// Curve-space location of a point.
pub fn point_pos(p: &ControlPoint) -> DVec2 {
    DVec2::new(p.position, p.opacity)
}

pub fn marker_half_extents(radius: f64, scale: DVec2) -> DVec2 {
    DVec2::new(radius / scale.x, radius / scale.y)
}

/// Band around the segment `a → b`, offset along its normal.
///
/// A zero-length segment collapses to a line with zero area.
pub fn segment_quad(
    left_index: usize,
    a: &ControlPoint,
    b: &ControlPoint,
    half_width: f64,
    scale: DVec2,
) -> SegmentQuad {
    let (start, end) = (point_pos(a), point_pos(b));
    let d = end - start;
    let len = d.length();
    let normal = if len > 0.0 {
        DVec2::new(d.y, -d.x) / len * half_width / scale
    } else {
        DVec2::ZERO
    };

    SegmentQuad {
        left_index,
        corners: [start + normal, end + normal, end - normal, start - normal],
        start,
        end,
        fill: (a.color, b.color),
        outline: (
            a.color.scaled(OUTLINE_INTENSITY),
            b.color.scaled(OUTLINE_INTENSITY),
        ),
    }
}

impl SegmentQuad {
    /// Whether `p` lies inside the band (edges inclusive).
    pub fn contains(&self, p: DVec2) -> bool {
        let mut sign = 0.0_f64;
        for i in 0..4 {
            let (a, b) = (self.corners[i], self.corners[(i + 1) % 4]);
            let cross = (b - a).perp_dot(p - a);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        sign != 0.0
    }
}

fn area_polygon(tf: &TransferFunction) -> AreaPolygon {
    let points = tf.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return AreaPolygon {
            vertices: Vec::new(),
            stops: Vec::new(),
        };
    };

    let mut vertices = Vec::with_capacity(points.len() + 2);
    vertices.push(DVec2::new(first.position, 0.0));
    vertices.extend(points.iter().map(point_pos));
    vertices.push(DVec2::new(last.position, 0.0));

    let stops = points
        .iter()
        .map(|p| GradientStop {
            offset: p.position,
            color: p.color,
            alpha: p.opacity,
        })
        .collect();

    AreaPolygon { vertices, stops }
}

fn grid_lines(divisions: u32) -> Vec<GridLine> {
    let n = divisions.max(1);
    (0..=n)
        .flat_map(|i| {
            let u = f64::from(i) / f64::from(n);
            [
                GridLine {
                    from: DVec2::new(u, 0.0),
                    to: DVec2::new(u, 1.0),
                },
                GridLine {
                    from: DVec2::new(0.0, u),
                    to: DVec2::new(1.0, u),
                },
            ]
        })
        .collect()
}

/// Hover text for a point.
pub fn tooltip(p: &ControlPoint) -> String {
    format!(
        "Double-click to change color\nRight-click to remove point\nScalar: {:.5}, Opacity: {:.5}",
        p.position, p.opacity
    )
}
