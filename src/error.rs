use thiserror::Error;

/// Errors reported while reading dial configuration from host attributes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialError {
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("attribute `{name}` is not a number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("attribute `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("unknown arrow direction: {0:?}")]
    UnknownDirection(String),

    #[error("attribute `{name}` needs at least two colors, got {count}")]
    TooFewColors { name: &'static str, count: usize },
}
