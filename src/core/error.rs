use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed line items or totals configuration
    #[error("Invalid totals input: {0}")]
    InvalidTotalsInput(String),

    /// Malformed payment record, or a removal index that does not exist
    #[error("Invalid payment record: {0}")]
    InvalidPaymentRecord(String),

    /// Document-level business rule violations
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short machine-readable name used in the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidTotalsInput(_) => "invalid_totals_input",
            AppError::InvalidPaymentRecord(_) => "invalid_payment_record",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Configuration(_) => "configuration",
            AppError::Json(_) => "invalid_json",
            AppError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
                "kind": self.kind(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidTotalsInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPaymentRecord(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Display prefixes of the input variants, matched when those errors come
// back wrapped in a serde_json error
const INVALID_TOTALS_PREFIX: &str = "Invalid totals input: ";
const INVALID_PAYMENT_PREFIX: &str = "Invalid payment record: ";

// Helper functions for common error scenarios
impl AppError {
    /// Classify a request body that failed to deserialize.
    ///
    /// `TaxMethod` and `PaymentRecord` validate inside serde via `try_from`,
    /// so their errors reach the JSON extractor as serde_json errors. Those
    /// keep their own kind; anything else is `Json`.
    pub fn from_json_body(err: serde_json::Error) -> Self {
        let message = err.to_string();
        if let Some(detail) = message.strip_prefix(INVALID_TOTALS_PREFIX) {
            AppError::InvalidTotalsInput(detail.to_string())
        } else if let Some(detail) = message.strip_prefix(INVALID_PAYMENT_PREFIX) {
            AppError::InvalidPaymentRecord(detail.to_string())
        } else {
            AppError::Json(err)
        }
    }

    pub fn invalid_totals(msg: impl Into<String>) -> Self {
        AppError::InvalidTotalsInput(msg.into())
    }

    pub fn invalid_payment(msg: impl Into<String>) -> Self {
        AppError::InvalidPaymentRecord(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
