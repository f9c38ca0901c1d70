use std::error;
use std::fmt;

/// All possible submission errors.
/// Transport errors are recoverable: the controller falls through to the
/// next strategy and only surfaces the last one once the chain is spent.
#[derive(Clone, Debug)]
pub enum Error {
    MissingField(&'static str),
    InvalidEmail(String),
    Network(String),
    Timeout,
    Server { status: u16, message: String },
    AllTransportsFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingField(field) => write!(f, "Missing required field: {}", field),
            Error::InvalidEmail(ref addr) => write!(f, "Invalid email address: {}", addr),
            Error::Network(ref msg) => write!(f, "Network error: {}", msg),
            Error::Timeout => f.write_str("Request timed out. Please try again."),
            Error::Server { ref message, .. } => f.write_str(message),
            Error::AllTransportsFailed(ref msg) => f.write_str(msg),
        }
    }
}

impl error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::Network(err.to_string())
    }
}
