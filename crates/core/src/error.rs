use std::fmt;

/// Validation failure raised before the pipeline runs. Empty candidate sets, zero
/// weight totals and rounding drift are not errors and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidInput { field: &'static str, detail: String },
}

impl EngineError {
    pub fn invalid_input(field: &'static str, detail: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput { field, detail } => {
                write!(f, "invalid input (field={field}): {detail}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
