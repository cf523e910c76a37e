use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Failed to generate newsletter content: {0}")]
    GenerationError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to send SMS: {0}")]
    SmsError(String),

    #[error("Failed to store newsletter: {0}")]
    StorageError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<reqwest::Error> for NewsletterError {
    fn from(error: reqwest::Error) -> Self {
        NewsletterError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for NewsletterError {
    fn from(error: anyhow::Error) -> Self {
        NewsletterError::GeneralError(error.to_string())
    }
}

impl From<std::io::Error> for NewsletterError {
    fn from(error: std::io::Error) -> Self {
        NewsletterError::StorageError(error.to_string())
    }
}
