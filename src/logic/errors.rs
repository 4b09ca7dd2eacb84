use anyhow::Error;

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Classify an API error directly
pub fn classify_api_error(error: &ApiError) -> ErrorType {
    match error {
        ApiError::Unauthorized => ErrorType::Unauthorized,
        ApiError::Status { status, .. } => match status {
            401 => ErrorType::Unauthorized,
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        },
        ApiError::Transport(e) if e.is_timeout() => ErrorType::Timeout,
        ApiError::Transport(e) => classify_message(&e.to_string()),
        ApiError::MissingReportId | ApiError::File { .. } => ErrorType::Other,
    }
}

fn classify_message(message: &str) -> ErrorType {
    let error_msg = message.to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns")
        || error_msg.contains("network")
        || error_msg.contains("error sending request")
    {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    if let Some(api_err) = error.downcast_ref::<ApiError>() {
        return classify_api_error(api_err);
    }

    classify_message(&error.to_string())
}

/// Format error message for display - show raw error details
pub fn format_error_message(error: &Error) -> String {
    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// Short toast text for an API failure
pub fn api_error_toast(error: &ApiError) -> String {
    match classify_api_error(error) {
        ErrorType::ConnectionRefused | ErrorType::NetworkError => {
            "Error: server unreachable".to_string()
        }
        ErrorType::Timeout => "Error: request timed out".to_string(),
        ErrorType::Unauthorized => "Error: session expired, please log in".to_string(),
        ErrorType::NotFound => "Error: not found".to_string(),
        _ => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("Connection Refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("request timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_dns_error() {
        let err = anyhow::anyhow!("dns lookup failed");
        assert_eq!(classify_error(&err), ErrorType::NetworkError);
    }

    #[test]
    fn test_classify_api_statuses() {
        let not_found = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        let server = ApiError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };

        assert_eq!(classify_api_error(&ApiError::Unauthorized), ErrorType::Unauthorized);
        assert_eq!(classify_api_error(&not_found), ErrorType::NotFound);
        assert_eq!(classify_api_error(&server), ErrorType::ServerError);
        assert_eq!(classify_api_error(&ApiError::MissingReportId), ErrorType::Other);
    }

    #[test]
    fn test_classify_wrapped_api_error() {
        let err = anyhow::Error::new(ApiError::Unauthorized).context("Failed to load user");
        assert_eq!(classify_error(&err), ErrorType::Unauthorized);
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to fetch report");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_format_preserves_simple_errors() {
        let err = anyhow::anyhow!("custom error message");
        assert_eq!(format_error_message(&err), "custom error message");
    }

    #[test]
    fn test_api_error_toast() {
        let status = ApiError::Status {
            status: 422,
            body: "bad csv".to_string(),
        };
        assert_eq!(api_error_toast(&status), "Error: server returned 422: bad csv");
        assert_eq!(
            api_error_toast(&ApiError::Unauthorized),
            "Error: session expired, please log in"
        );
    }
}
