use thiserror::Error;

// =========================================================
// API 错误
// =========================================================

/// Failure of a single HTTP call. Every call is fire-once; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// An authenticated endpoint was called without a session token.
    #[error("not signed in")]
    MissingToken,
}

impl ApiError {
    #[allow(dead_code)]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided message when there is one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 表单校验错误
// =========================================================

/// Client-side presence/positivity check on a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a valid {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

/// Parses a form field as a strictly positive number.
pub fn parse_positive(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ValidationError { field }),
    }
}

/// Outcome of a submitting form: either blocked locally or rejected remotely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FormError {
    /// Inline text for the form: validation guidance, or the server message
    /// with `fallback` when the server gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FormError::Invalid(e) => e.to_string(),
            FormError::Api(e) => e.user_message(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Rate must be positive".into()),
        };
        assert_eq!(err.user_message("Failed"), "Rate must be positive");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn fallback_without_server_message() {
        let blank = ApiError::Status {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message("Failed"), "Failed");
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Failed"),
            "Failed"
        );
    }

    #[test]
    fn form_error_prefers_validation_text() {
        let invalid = FormError::from(ValidationError { field: "rate" });
        assert_eq!(invalid.user_message("Failed"), "Please enter a valid rate");
        let remote = FormError::from(ApiError::Status {
            status: 502,
            message: None,
        });
        assert_eq!(remote.user_message("Failed to update rate"), "Failed to update rate");
    }

    #[test]
    fn positive_numbers_only() {
        assert_eq!(parse_positive(" 2.5 ", "land area"), Ok(2.5));
        for bad in ["", "0", "-1", "abc", "NaN", "inf"] {
            let err = parse_positive(bad, "land area").unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid land area");
        }
    }
}
