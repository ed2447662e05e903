//! Persisted contents: a versioned bincode envelope, hex-encoded.
//!
//! The host stores a transfer function as a single printable string. The
//! string is lowercase hex over a bincode payload:
//!
//! ```text
//! version: u8 | range_min: f64 | range_max: f64 | len: u64 | points[len]
//! point = position: f64 | opacity: f64 | r: f64 | g: f64 | b: f64
//! ```
//!
//! Decoding is all-or-nothing. Bad hex, truncated or trailing bytes, an
//! unknown version, non-finite numbers, unsorted positions, or opacity/color
//! outside [0, 1] are errors. An empty string is the default model.

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::transfer::function::TransferFunction;
use crate::transfer::point::ControlPoint;

/// Current envelope version.
pub const CONTENTS_VERSION: u8 = 1;

/// Upper bound on decoded payload size.
const MAX_PAYLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u8,
    range_min: f64,
    range_max: f64,
    points: &'a [ControlPoint],
}

#[derive(Deserialize)]
struct Envelope {
    version: u8,
    range_min: f64,
    range_max: f64,
    points: Vec<ControlPoint>,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_PAYLOAD_BYTES)
        .reject_trailing_bytes()
}

/// Serialize a transfer function to its contents string.
///
/// Fails on a non-finite range, which [`decode`] would reject.
pub fn encode(tf: &TransferFunction) -> Result<String, CodecError> {
    check_range(tf.range_min(), tf.range_max())?;
    let envelope = EnvelopeRef {
        version: CONTENTS_VERSION,
        range_min: tf.range_min(),
        range_max: tf.range_max(),
        points: tf.points(),
    };
    let bytes = options().serialize(&envelope).map_err(CodecError::Encode)?;
    Ok(hex::encode(bytes))
}

/// Parse a contents string back into a transfer function.
pub fn decode(contents: &str) -> Result<TransferFunction, CodecError> {
    let contents = contents.trim();
    if contents.is_empty() {
        return Ok(TransferFunction::default());
    }

    let bytes = hex::decode(contents)?;
    let envelope: Envelope = options().deserialize(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "transfer function contents failed to decode");
        CodecError::Decode(e)
    })?;

    if envelope.version != CONTENTS_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.version));
    }
    validate(&envelope)?;

    Ok(TransferFunction::from_parts(
        envelope.range_min,
        envelope.range_max,
        envelope.points,
    ))
}

fn check_range(range_min: f64, range_max: f64) -> Result<(), CodecError> {
    for (field, value) in [("range_min", range_min), ("range_max", range_max)] {
        if !value.is_finite() {
            return Err(CodecError::InvalidValue { field, value });
        }
    }
    Ok(())
}

fn validate(envelope: &Envelope) -> Result<(), CodecError> {
    check_range(envelope.range_min, envelope.range_max)?;

    let mut previous = f64::NEG_INFINITY;
    for point in &envelope.points {
        if !point.position.is_finite() || point.position < previous {
            return Err(CodecError::InvalidValue {
                field: "position",
                value: point.position,
            });
        }
        previous = point.position;

        if !point.is_valid() {
            let value = [point.opacity, point.color.r, point.color.g, point.color.b]
                .into_iter()
                .find(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
                .unwrap_or(point.opacity);
            return Err(CodecError::InvalidValue {
                field: "opacity/color",
                value,
            });
        }
    }
    Ok(())
}

impl TransferFunction {
    /// Contents string for the host's parameter store.
    pub fn to_contents(&self) -> Result<String, CodecError> {
        encode(self)
    }

    /// Decode a contents string. Empty contents give the default model.
    pub fn from_contents(contents: &str) -> Result<Self, CodecError> {
        decode(contents)
    }
}
