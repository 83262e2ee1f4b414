use crate::error::StatusError;
use std::fmt;

/// The five classes an HTTP status code falls into, by its leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    pub const ALL: [StatusClass; 5] = [
        StatusClass::Informational,
        StatusClass::Success,
        StatusClass::Redirection,
        StatusClass::ClientError,
        StatusClass::ServerError,
    ];

    pub fn classify(code: u16) -> Result<StatusClass, StatusError> {
        match code {
            100..=199 => Ok(StatusClass::Informational),
            200..=299 => Ok(StatusClass::Success),
            300..=399 => Ok(StatusClass::Redirection),
            400..=499 => Ok(StatusClass::ClientError),
            500..=599 => Ok(StatusClass::ServerError),
            _ => Err(StatusError::InvalidCode(code)),
        }
    }

    /// Inclusive bounds of the codes in this class.
    pub fn range(&self) -> (u16, u16) {
        let low = 100 * (*self as u16 + 1);
        (low, low + 99)
    }

    pub fn contains(&self, code: u16) -> bool {
        let (low, high) = self.range();
        (low..=high).contains(&code)
    }

    /// "1xx" style shorthand.
    pub fn label(&self) -> &'static str {
        match self {
            StatusClass::Informational => "1xx",
            StatusClass::Success => "2xx",
            StatusClass::Redirection => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusClass::Informational => "Informational",
            StatusClass::Success => "Success",
            StatusClass::Redirection => "Redirection",
            StatusClass::ClientError => "Client Error",
            StatusClass::ServerError => "Server Error",
        };
        write!(f, "{} ({})", name, self.label())
    }
}
