//! Interactive transfer-function editor.
//!
//! Owns one [`TransferFunction`] plus view state (scale and selection) and
//! turns [`EditorCommand`]s into model edits. Edits accumulate locally and
//! reach the host when the view loses focus or [`commit`] is called; a commit
//! that leaves the model equal to the last committed one is skipped.
//!
//! [`commit`]: TransferFunctionEditor::commit

use glam::DVec2;
use tincture_core::{Rgb, TransferFunction, decode, encode};

use crate::config::EditorConfig;
use crate::error::WidgetError;
use crate::protocol::{EditorCommand, HostNotification, PointerButton};
use crate::scene::{self, SceneGeometry};
use crate::widget::ConstantWidget;

pub struct TransferFunctionEditor {
    tf: TransferFunction,
    committed: TransferFunction,
    config: EditorConfig,
    scale: DVec2,
    selected: Option<usize>,
    outbox: Vec<HostNotification>,
}

impl TransferFunctionEditor {
    /// Create an editor from persisted contents. Empty contents give the
    /// default two-corner curve.
    pub fn new(contents: &str, config: EditorConfig) -> Result<Self, WidgetError> {
        Ok(Self::with_transfer_function(decode(contents)?, config))
    }

    /// Create an editor around an existing model. A model without points
    /// gets the default corners.
    pub fn with_transfer_function(mut tf: TransferFunction, config: EditorConfig) -> Self {
        tf.ensure_corners();
        Self {
            committed: tf.clone(),
            tf,
            config,
            scale: DVec2::ONE,
            selected: None,
            outbox: Vec::new(),
        }
    }

    /// The model as currently edited.
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.tf
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether there are edits the host has not seen yet.
    pub fn is_dirty(&self) -> bool {
        self.tf != self.committed
    }

    /// Apply one input event.
    ///
    /// Errors are also queued as [`HostNotification::Error`] so a toolkit
    /// that only polls notifications still sees them.
    pub fn handle(&mut self, command: EditorCommand) -> Result<(), WidgetError> {
        let result = self.apply(command);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "editor command failed");
            self.outbox.push(HostNotification::Error {
                message: e.to_string(),
            });
        }
        result
    }

    fn apply(&mut self, command: EditorCommand) -> Result<(), WidgetError> {
        match command {
            EditorCommand::PointerPress { x, y, button } => {
                let hit = self.hit_point(DVec2::new(x, y));
                match button {
                    PointerButton::Left => self.selected = hit,
                    PointerButton::Right => {
                        if let Some(index) = hit {
                            self.remove_point(index);
                        }
                    }
                    PointerButton::Middle => {}
                }
                Ok(())
            }
            EditorCommand::PointerDoubleClick { x, y } => {
                let at = DVec2::new(x, y);
                if let Some(index) = self.hit_point(at) {
                    self.request_color(index);
                } else if let Some(left_index) = self.hit_segment(at) {
                    self.add_knot(left_index, at);
                }
                Ok(())
            }
            EditorCommand::Drag { index, x, y } => self.drag_point(index, DVec2::new(x, y)),
            EditorCommand::KeyPress { key } => {
                if matches!(key.as_str(), "Delete" | "Backspace") {
                    if let Some(index) = self.selected {
                        self.remove_point(index);
                    }
                }
                Ok(())
            }
            EditorCommand::SetColor { index, color } => self.set_point_color(index, color),
            EditorCommand::Resize { width, height } => {
                self.resize(width, height);
                Ok(())
            }
            EditorCommand::FocusOut => self.commit(),
        }
    }

    /// Index of the point whose marker contains `at`, nearest first.
    pub fn hit_point(&self, at: DVec2) -> Option<usize> {
        let half = scene::marker_half_extents(self.config.point_radius, self.scale);
        self.tf
            .points()
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let d = (at - scene::point_pos(p)) / half;
                let dist = d.length_squared();
                (dist <= 1.0).then_some((i, dist))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Left index of the segment whose band contains `at`.
    pub fn hit_segment(&self, at: DVec2) -> Option<usize> {
        self.tf
            .segments()
            .enumerate()
            .map(|(i, (a, b))| {
                scene::segment_quad(i, a, b, self.config.line_half_width, self.scale)
            })
            .find(|quad| quad.contains(at))
            .map(|quad| quad.left_index)
    }

    /// Insert a knot on the segment starting at `left_index`, at the
    /// pointer's x with opacity from its y.
    pub fn add_knot(&mut self, left_index: usize, at: DVec2) -> Option<usize> {
        let index = self.tf.insert_on_segment(left_index, at.x, at.y)?;
        if let Some(selected) = self.selected.as_mut() {
            if *selected >= index {
                *selected += 1;
            }
        }
        Some(index)
    }

    /// Move a point. Corners stay pinned to x = 0 and x = 1; interior
    /// points cannot cross their neighbours.
    pub fn drag_point(&mut self, index: usize, to: DVec2) -> Result<(), WidgetError> {
        self.tf
            .move_point(index, to.x, to.y)
            .map(|_| ())
            .ok_or(WidgetError::IndexOutOfBounds {
                index,
                len: self.tf.len(),
            })
    }

    /// Remove a point. Corners are kept; returns whether anything changed.
    pub fn remove_point(&mut self, index: usize) -> bool {
        if !self.tf.remove_point(index) {
            return false;
        }
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        true
    }

    pub fn set_point_color(&mut self, index: usize, color: Rgb) -> Result<(), WidgetError> {
        if self.tf.set_point_color(index, color) {
            Ok(())
        } else {
            Err(WidgetError::IndexOutOfBounds {
                index,
                len: self.tf.len(),
            })
        }
    }

    fn request_color(&mut self, index: usize) {
        if let Some(p) = self.tf.point(index) {
            self.outbox.push(HostNotification::ColorRequested {
                index,
                current: p.color,
            });
        }
    }

    /// Update the view scale from the widget's pixel size.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            tracing::warn!(width, height, "ignoring non-positive editor size");
            return;
        }
        self.scale = DVec2::new(width, height) / self.config.scale_divisor;
    }

    /// Send pending edits to the host, if any.
    pub fn commit(&mut self) -> Result<(), WidgetError> {
        if !self.is_dirty() {
            return Ok(());
        }
        let contents = encode(&self.tf)?;
        self.committed = self.tf.clone();
        self.outbox.push(HostNotification::ContentsChanged { contents });
        tracing::debug!(points = self.tf.len(), "committed transfer function");
        Ok(())
    }

    /// Drawing data for the current state.
    pub fn scene(&self) -> SceneGeometry {
        SceneGeometry::build(&self.tf, &self.config, self.scale, self.selected)
    }

    /// Hover text for the point at `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.tf.point(index).map(scene::tooltip)
    }
}

impl ConstantWidget for TransferFunctionEditor {
    fn contents(&self) -> Result<String, WidgetError> {
        Ok(encode(&self.tf)?)
    }

    fn set_contents(&mut self, value: &str, silent: bool) -> Result<(), WidgetError> {
        let mut tf = decode(value)?;
        tf.ensure_corners();
        self.tf = tf;
        self.committed = self.tf.clone();
        self.selected = None;
        if !silent {
            self.outbox.push(HostNotification::ContentsChanged {
                contents: encode(&self.tf)?,
            });
        }
        Ok(())
    }

    fn poll_notifications(&mut self) -> Vec<HostNotification> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> TransferFunctionEditor {
        TransferFunctionEditor::new("", EditorConfig::default()).unwrap()
    }

    fn editor_with_knot() -> TransferFunctionEditor {
        let mut tf = TransferFunction::default();
        tf.add_point(0.5, 0.5, (1.0, 0.0, 0.0));
        TransferFunctionEditor::with_transfer_function(tf, EditorConfig::default())
    }

    #[test]
    fn test_empty_contents_give_default_corners() {
        let ed = editor();
        assert_eq!(ed.transfer_function(), &TransferFunction::default());
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_empty_model_gets_corners() {
        let ed = TransferFunctionEditor::with_transfer_function(
            TransferFunction::new(),
            EditorConfig::default(),
        );
        assert_eq!(ed.transfer_function().len(), 2);
    }

    #[test]
    fn test_left_press_selects_point() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerPress {
            x: 0.51,
            y: 0.5,
            button: PointerButton::Left,
        })
        .unwrap();
        assert_eq!(ed.selected(), Some(1));

        ed.handle(EditorCommand::PointerPress {
            x: 0.8,
            y: 0.9,
            button: PointerButton::Left,
        })
        .unwrap();
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn test_right_press_removes_interior_point() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerPress {
            x: 0.5,
            y: 0.5,
            button: PointerButton::Right,
        })
        .unwrap();
        assert_eq!(ed.transfer_function().len(), 2);
    }

    #[test]
    fn test_right_press_on_corner_is_ignored() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerPress {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Right,
        })
        .unwrap();
        assert_eq!(ed.transfer_function().len(), 3);
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerPress {
            x: 0.5,
            y: 0.5,
            button: PointerButton::Left,
        })
        .unwrap();
        ed.handle(EditorCommand::KeyPress {
            key: "Delete".to_string(),
        })
        .unwrap();
        assert_eq!(ed.transfer_function().len(), 2);
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn test_double_click_on_segment_inserts_knot_with_blended_color() {
        let mut ed = editor_with_knot();
        // Segment from (0.5, 0.5) red to (1.0, 0.0) black passes through (0.75, 0.25).
        ed.handle(EditorCommand::PointerDoubleClick { x: 0.75, y: 0.25 })
            .unwrap();
        let tf = ed.transfer_function();
        assert_eq!(tf.len(), 4);
        let knot = tf.points()[2];
        assert_eq!(knot.position, 0.75);
        assert_eq!(knot.opacity, 0.25);
        assert!((knot.color.r - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_double_click_on_point_requests_color() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerDoubleClick { x: 0.5, y: 0.5 })
            .unwrap();
        assert_eq!(
            ed.poll_notifications(),
            vec![HostNotification::ColorRequested {
                index: 1,
                current: Rgb::new(1.0, 0.0, 0.0)
            }]
        );
        assert_eq!(ed.transfer_function().len(), 3);
    }

    #[test]
    fn test_double_click_on_empty_space_does_nothing() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerDoubleClick { x: 0.2, y: 0.9 })
            .unwrap();
        assert_eq!(ed.transfer_function().len(), 3);
        assert!(ed.poll_notifications().is_empty());
    }

    #[test]
    fn test_drag_out_of_bounds_reports_error() {
        let mut ed = editor();
        let err = ed
            .handle(EditorCommand::Drag {
                index: 9,
                x: 0.5,
                y: 0.5,
            })
            .unwrap_err();
        assert!(matches!(err, WidgetError::IndexOutOfBounds { index: 9, len: 2 }));
        assert!(matches!(
            ed.poll_notifications().as_slice(),
            [HostNotification::Error { .. }]
        ));
    }

    #[test]
    fn test_focus_out_commits_once() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::Drag {
            index: 1,
            x: 0.4,
            y: 0.9,
        })
        .unwrap();
        assert!(ed.is_dirty());

        ed.handle(EditorCommand::FocusOut).unwrap();
        ed.handle(EditorCommand::FocusOut).unwrap();
        let notes = ed.poll_notifications();
        assert_eq!(notes.len(), 1);
        let HostNotification::ContentsChanged { contents } = &notes[0] else {
            panic!("expected ContentsChanged, got {notes:?}");
        };
        assert_eq!(&decode(contents).unwrap(), ed.transfer_function());
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_set_contents_silent_queues_nothing() {
        let mut ed = editor();
        let contents = editor_with_knot().contents().unwrap();
        ed.set_contents(&contents, true).unwrap();
        assert_eq!(ed.transfer_function().len(), 3);
        assert!(ed.poll_notifications().is_empty());
    }

    #[test]
    fn test_set_contents_loud_notifies_host() {
        let mut ed = editor();
        let contents = editor_with_knot().contents().unwrap();
        ed.set_contents(&contents, false).unwrap();
        assert_eq!(
            ed.poll_notifications(),
            vec![HostNotification::ContentsChanged { contents }]
        );
    }

    #[test]
    fn test_set_contents_rejects_garbage() {
        let mut ed = editor_with_knot();
        assert!(matches!(
            ed.set_contents("not hex", false),
            Err(WidgetError::Codec(_))
        ));
        assert_eq!(ed.transfer_function().len(), 3);
    }

    #[test]
    fn test_resize_scales_markers() {
        let mut ed = editor();
        ed.handle(EditorCommand::Resize {
            width: 2000.0 / 9.0 * 2.0,
            height: 2000.0 / 9.0,
        })
        .unwrap();
        assert!((ed.scale().x - 2.0).abs() < 1e-9);
        assert!((ed.scale().y - 1.0).abs() < 1e-9);

        ed.resize(0.0, 100.0);
        assert!((ed.scale().x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_shifts_after_insert_before_it() {
        let mut ed = editor_with_knot();
        ed.handle(EditorCommand::PointerPress {
            x: 0.5,
            y: 0.5,
            button: PointerButton::Left,
        })
        .unwrap();
        // Segment from (0, 0) to (0.5, 0.5).
        ed.add_knot(0, DVec2::new(0.25, 0.25));
        assert_eq!(ed.selected(), Some(2));
    }
}
