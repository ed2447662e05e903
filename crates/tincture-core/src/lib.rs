//! Tincture Core — domain layer for volume-rendering transfer functions.
//!
//! This crate contains the control-point model, interpolation, range
//! remapping, the persisted contents codec, and the export path into a
//! renderer's opacity/color step functions. No GUI dependencies.

pub mod codec;
pub mod color;
pub mod error;
pub mod lut;
pub mod transfer;
pub mod volume;

// Re-exports for convenience.
pub use codec::{decode, encode};
pub use color::Rgb;
pub use error::CodecError;
pub use lut::{RgbaLut, bake_rgba_lut};
pub use transfer::function::{Sample, TransferFunction};
pub use transfer::point::ControlPoint;
pub use transfer::range::ScalarRangeSource;
pub use volume::{ColorTransferFunction, PiecewiseFunction, VolumeProperty};
