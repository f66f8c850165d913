use std::fmt;

/// Result type for openbook-lister operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for openbook-lister
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Invalid configuration
    Config(String),

    /// Invalid parameter
    InvalidParameter(String),

    /// API error response
    Api { status: u16, message: String },

    /// JSON-RPC error object returned by the ledger node
    Rpc { code: i64, message: String },

    /// Decimal conversion error
    Decimal(rust_decimal::Error),

    /// Address does not resolve to a token mint on the ledger
    InvalidMint(String),

    /// Missing required field
    MissingField(String),

    /// No non-deprecated venue program is configured
    NoActiveVenueProgram,

    /// The submission collaborator rejected the listing
    SubmissionFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            Error::Rpc { code, message } => write!(f, "RPC error ({}): {}", code, message),
            Error::Decimal(e) => write!(f, "Decimal error: {}", e),
            Error::InvalidMint(addr) => write!(f, "Not a token mint: {}", addr),
            Error::MissingField(field) => write!(f, "Missing required field: {}", field),
            Error::NoActiveVenueProgram => {
                write!(f, "Selected market program was deprecated or does not exist")
            }
            Error::SubmissionFailed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Decimal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Decimal(err)
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidParameter(err.to_string())
    }
}
