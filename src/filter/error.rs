use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter: {0}")]
    UnknownKey(String),

    #[error("Filter given more than once: {0}")]
    DuplicateKey(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("{min} cannot be greater than {max}")]
    InvertedRange { min: &'static str, max: &'static str },
}

impl FilterError {
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        FilterError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
