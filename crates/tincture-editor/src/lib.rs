//! Tincture Editor — interactive layer over the transfer-function model.
//!
//! Defines the [`ConstantWidget`] contract the host application uses to
//! read and write a parameter's persisted contents, the transfer-function
//! editor that turns pointer and key input into model edits, renderer-agnostic
//! scene geometry, and the enumeration selector widget. Input and output
//! messages are plain serde enums so any UI toolkit can drive the editor.

pub mod config;
pub mod editor;
pub mod enumeration;
pub mod error;
pub mod protocol;
pub mod scene;
pub mod widget;

pub use config::EditorConfig;
pub use editor::TransferFunctionEditor;
pub use enumeration::{EnumerationCatalog, EnumerationSelector};
pub use error::WidgetError;
pub use protocol::{EditorCommand, HostNotification, PointerButton};
pub use scene::SceneGeometry;
pub use widget::ConstantWidget;
