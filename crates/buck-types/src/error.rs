use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Malformed quantity in field `{field}`: {reason}")]
    MalformedQuantity { field: &'static str, reason: String },
    #[error("Quantity in field `{field}` is out of range: {value}")]
    QuantityOutOfRange { field: &'static str, value: String },
}

impl ConversionError {
    /// Name of the payload field the failed conversion was applied to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MalformedQuantity { field, .. } | Self::QuantityOutOfRange { field, .. } => field,
        }
    }
}

/// Failure to turn a node response into one of the block types.
///
/// Node-side errors and corrupted bytes end up in the same place: callers only care that the
/// payload could not be used.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("Received JSON response, but no result property in it")]
    NoResult,
    #[error("Node returned error (code {code}): {message}")]
    NodeError { code: i64, message: String },
    #[error("Failed to convert block field: {0}")]
    ConversionError(#[from] ConversionError),
}

impl ParseError {
    /// The payload field that caused the failure, when it is known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::ConversionError(err) => Some(err.field()),
            _ => None,
        }
    }
}

pub type ParseResult<T, E = ParseError> = Result<T, E>;
