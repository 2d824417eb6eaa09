use std::fmt::{self, Debug, Display};

/// Provides `RosterError` and conversions into it.
#[derive(Debug)]
pub enum RosterError {
    /// Construction of a concrete entity model failed. Carries the
    /// constructor's own description of the failure; the directory adds the
    /// model name and entity id when it reports the error.
    ModelInstantiation(String),
}

impl From<String> for RosterError {
    fn from(error: String) -> Self {
        RosterError::ModelInstantiation(error)
    }
}

impl From<&str> for RosterError {
    fn from(error: &str) -> Self {
        RosterError::ModelInstantiation(error.to_string())
    }
}

impl std::error::Error for RosterError {}

impl Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RosterError::ModelInstantiation(message) => {
                write!(f, "model instantiation failed: {message}")
            }
        }
    }
}
