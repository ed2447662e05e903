//! Message contracts between a UI toolkit and the editor widgets.
//!
//! Commands flow from the toolkit's event loop into the editor; notifications
//! flow back to the host. Both use the `#[serde(tag = "type", content = "data")]`
//! layout so they can cross a JSON bridge unchanged.
//!
//! Pointer coordinates are in curve space: `x` is normalized position and
//! `y` is opacity, both nominally in [0, 1].

use serde::{Deserialize, Serialize};
use tincture_core::Rgb;

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Input events delivered to [`TransferFunctionEditor`](crate::TransferFunctionEditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorCommand {
    /// Button pressed. Left selects the point under the pointer, right
    /// removes it.
    PointerPress { x: f64, y: f64, button: PointerButton },

    /// Double-click. On a point, asks the host for a new color; on a
    /// segment, inserts a knot.
    PointerDoubleClick { x: f64, y: f64 },

    /// A point was dragged to a new location.
    Drag { index: usize, x: f64, y: f64 },

    /// Key pressed while the editor has focus. `"Delete"` and
    /// `"Backspace"` remove the selected point.
    KeyPress { key: String },

    /// The host's color dialog returned a color for a point.
    SetColor { index: usize, color: Rgb },

    /// The view was resized, in physical pixels.
    Resize { width: f64, height: f64 },

    /// The view lost focus; edits are committed to the host.
    FocusOut,
}

/// Messages from a widget to the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostNotification {
    /// The widget's value changed; dependents should be updated.
    ContentsChanged {
        /// Serialized contents.
        contents: String,
    },

    /// The user asked to recolor a point. The host answers with
    /// [`EditorCommand::SetColor`].
    ColorRequested {
        /// Point index.
        index: usize,
        /// Current color, for initializing the dialog.
        current: Rgb,
    },

    /// An input could not be applied.
    Error {
        /// Error description.
        message: String,
    },
}
