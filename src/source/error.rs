use thiserror::Error;

/// Rejected image URL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageUrlError {
    #[error("image URL is empty")]
    Empty,
}

/// Failure of a single image request, and therefore of the batch it belongs to
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection, TLS or transport failure (no status code)
    #[error("Network Error: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} - {description}")]
    Status { status: u16, description: String },

    /// Body was not `{"url": "<non-empty string>"}`
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl NetworkError {
    pub fn from_status(status: u16) -> Self {
        Self::Status {
            status,
            description: describe_status(status),
        }
    }

    /// Status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::MalformedBody(_) => None,
        }
    }
}

/// Human readable description of an HTTP status code
fn describe_status(status: u16) -> String {
    match status {
        400 => "Bad Request".to_string(),
        401 => "Unauthorized".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Not Found".to_string(),
        410 => "Gone".to_string(),
        429 => "Too Many Requests".to_string(),
        500 => "Internal Server Error".to_string(),
        502 => "Bad Gateway".to_string(),
        503 => "Service Unavailable".to_string(),
        504 => "Gateway Timeout".to_string(),
        // Generic fallbacks
        400..=499 => format!("Client Error ({})", status),
        500.. => format!("Server Error ({})", status),
        _ => format!("HTTP Error ({})", status),
    }
}
