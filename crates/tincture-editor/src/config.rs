//! View constants for the transfer-function editor.

/// Marker radius for a control point, in view units before scaling.
const DEFAULT_POINT_RADIUS: f64 = 0.025;
/// Half-width of the band drawn for a segment.
const DEFAULT_LINE_HALF_WIDTH: f64 = 0.010;
/// Number of grid cells per axis.
const DEFAULT_GRID_DIVISIONS: u32 = 50;
/// Pixels per view-scale unit: a widget `w` pixels wide has scale `w / divisor`.
const DEFAULT_SCALE_DIVISOR: f64 = 2000.0 / 9.0;

/// Editor view configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Control point marker radius.
    pub point_radius: f64,
    /// Segment band half-width.
    pub line_half_width: f64,
    /// Grid divisions per axis.
    pub grid_divisions: u32,
    /// Divisor converting widget pixels into view scale.
    pub scale_divisor: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            point_radius: DEFAULT_POINT_RADIUS,
            line_half_width: DEFAULT_LINE_HALF_WIDTH,
            grid_divisions: DEFAULT_GRID_DIVISIONS,
            scale_divisor: DEFAULT_SCALE_DIVISOR,
        }
    }
}
