use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// input category that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputField {
    Price,
    DownPayment,
    RateOrTerm,
    Charges,
    Scenario,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputField::Price => "price",
            InputField::DownPayment => "down payment",
            InputField::RateOrTerm => "rate or term",
            InputField::Charges => "recurring charges",
            InputField::Scenario => "scenario",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("invalid input: {field}")]
    InvalidInput {
        field: InputField,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl CalculatorError {
    pub fn invalid(field: InputField) -> Self {
        CalculatorError::InvalidInput { field }
    }

    /// failing field, if this is an input error
    pub fn field(&self) -> Option<InputField> {
        match self {
            CalculatorError::InvalidInput { field } => Some(*field),
            CalculatorError::InvalidConfiguration { .. } | CalculatorError::CalculationError { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalculatorError::invalid(InputField::DownPayment);
        assert_eq!(err.to_string(), "invalid input: down payment");
        assert_eq!(err.field(), Some(InputField::DownPayment));

        let err = CalculatorError::InvalidConfiguration {
            message: "max_months must be between 1 and 600".to_string(),
        };
        assert!(err.to_string().starts_with("invalid configuration"));
        assert_eq!(err.field(), None);

        let err = CalculatorError::CalculationError {
            message: "report serialization failed".to_string(),
        };
        assert_eq!(err.to_string(), "calculation error: report serialization failed");
        assert_eq!(err.field(), None);
    }
}
