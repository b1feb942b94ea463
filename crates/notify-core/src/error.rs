//! Transport Errors

/// Failures talking to the notification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted fetch)
    Network(String),
    /// The service answered with a non-success status
    Status(u16),
    /// The response body did not match the expected shape
    Decode(String),
    /// No anti-forgery token could be found on the page
    MissingCsrfToken,
    /// The service sent us to its error page instead of the expected one
    Rejected,
}

impl ApiError {
    /// Short label shown next to a notification whose mark-read failed
    pub fn item_label(&self) -> String {
        match self {
            ApiError::Status(code) => format!("Could not mark as read (HTTP {})", code),
            ApiError::MissingCsrfToken => "Could not mark as read (session expired)".to_string(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Rejected => "Could not mark as read".to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code) => write!(f, "Unexpected status: {}", code),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::MissingCsrfToken => write!(f, "Missing anti-forgery token"),
            ApiError::Rejected => write!(f, "Rejected by the service"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_label_mentions_status() {
        assert_eq!(ApiError::Status(403).item_label(), "Could not mark as read (HTTP 403)");
        assert_eq!(ApiError::Network("offline".into()).item_label(), "Could not mark as read");
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::Status(500).to_string(), "Unexpected status: 500");
        assert_eq!(ApiError::MissingCsrfToken.to_string(), "Missing anti-forgery token");
        assert_eq!(ApiError::Rejected.to_string(), "Rejected by the service");
        assert_eq!(ApiError::Rejected.item_label(), "Could not mark as read");
    }
}
