/// Errors raised while decoding or encoding persisted contents.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("contents are not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("failed to decode transfer function: {0}")]
    Decode(#[source] bincode::Error),
    #[error("failed to encode transfer function: {0}")]
    Encode(#[source] bincode::Error),
    #[error("unsupported contents version {0}")]
    UnsupportedVersion(u8),
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
