use tincture_core::CodecError;

/// Errors that can occur in widget operations.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("index {index} out of bounds for {len} entries")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("unknown enumeration value: {0}")]
    UnknownOption(String),

    #[error("enumeration has no values")]
    EmptyEnumeration,

    #[error("no enumeration registered for {0}")]
    UnknownEnumeration(String),
}
