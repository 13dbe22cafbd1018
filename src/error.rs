use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("OAuth2 authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Google Sheets API error: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

// The service answers 400 rather than 404 for a range naming a missing sheet
const UNKNOWN_RANGE_PREFIX: &str = "Unable to parse range";

impl AppError {
    /// Classify a failed service call by HTTP status code.
    pub fn from_status(code: u16, context: &str, message: &str) -> Self {
        let detail = format!("{}: {} ({})", context, message, code);
        match code {
            400 if message.starts_with(UNKNOWN_RANGE_PREFIX) => AppError::NotFound(detail),
            400 => AppError::Validation(detail),
            401 => AppError::Auth(detail),
            404 => AppError::NotFound(detail),
            _ => AppError::Remote(detail),
        }
    }

    /// Classify an error returned by the generated Sheets hub.
    pub fn from_sheets(err: google_sheets4::Error, context: &str) -> Self {
        use google_sheets4::Error;

        match err {
            Error::BadRequest(body) => {
                let error = body.get("error");
                let code = error
                    .and_then(|e| e.get("code"))
                    .and_then(|c| c.as_u64())
                    .and_then(|c| u16::try_from(c).ok());
                let message = error
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| body.to_string());
                match code {
                    Some(code) => Self::from_status(code, context, &message),
                    None => AppError::Remote(format!("{}: {}", context, message)),
                }
            }
            Error::Failure(response) => {
                let status = response.status();
                Self::from_status(
                    status.as_u16(),
                    context,
                    status.canonical_reason().unwrap_or("request failed"),
                )
            }
            Error::MissingToken(e) => AppError::Auth(format!("{}: {}", context, e)),
            other => AppError::Remote(format!("{}: {}", context, other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
