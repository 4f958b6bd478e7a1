use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("product container {index} has no {field} element")]
    MissingField { index: usize, field: &'static str },

    #[error("product detail page has no {field} element")]
    MissingDetailField { field: &'static str },

    #[error("invalid base URL \"{base}\": {reason}")]
    InvalidBaseUrl { base: String, reason: String },
}
