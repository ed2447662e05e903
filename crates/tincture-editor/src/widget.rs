//! Host-facing constant widget contract.

use crate::error::WidgetError;
use crate::protocol::HostNotification;

/// An editor for one constant parameter of a host module.
///
/// The host persists a parameter as a single string. It reads it back with
/// [`contents`](Self::contents) and pushes stored values in with
/// [`set_contents`](Self::set_contents). Changes the host should propagate
/// to dependent modules are queued and collected with
/// [`poll_notifications`](Self::poll_notifications), once per frame.
pub trait ConstantWidget {
    /// Serialized value currently shown by the widget.
    fn contents(&self) -> Result<String, WidgetError>;

    /// Replace the widget's value. With `silent == false` a
    /// [`HostNotification::ContentsChanged`] is queued so the host
    /// propagates the new value.
    fn set_contents(&mut self, value: &str, silent: bool) -> Result<(), WidgetError>;

    /// Drain queued notifications (non-blocking).
    fn poll_notifications(&mut self) -> Vec<HostNotification>;
}
