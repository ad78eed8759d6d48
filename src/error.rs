//! Input validation errors
//!
//! Every quantity entering the scoring pipeline is checked by a constructor
//! in [`crate::models`]. Rejections are reported with the offending field so
//! the submitter can correct the request.

use thiserror::Error;

/// Reasons an evaluation or REP submission is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("recycled waste ({recycled} kg) exceeds total waste ({total} kg)")]
    RecycledExceedsTotal { recycled: f64, total: f64 },

    #[error("generated quantity must be greater than zero (got {0} kg)")]
    NothingGenerated(f64),

    #[error("valorized quantity ({valorized} kg) exceeds generated quantity ({generated} kg)")]
    ValorizedExceedsGenerated { valorized: f64, generated: f64 },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} score must be within 0..=100 (got {value})")]
    ScoreOutOfRange { field: &'static str, value: u8 },
}

pub type InputResult<T> = Result<T, InputError>;

/// Check that a quantity is finite and non-negative.
pub(crate) fn non_negative(field: &'static str, value: f64) -> InputResult<f64> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(non_negative("gas_kg", 0.0), Ok(0.0));
    }

    #[test]
    fn test_non_negative_rejects() {
        assert_eq!(
            non_negative("gas_kg", -1.5),
            Err(InputError::Negative {
                field: "gas_kg",
                value: -1.5
            })
        );
        assert!(matches!(
            non_negative("gas_kg", f64::NAN),
            Err(InputError::NotFinite { .. })
        ));
        assert!(matches!(
            non_negative("gas_kg", f64::INFINITY),
            Err(InputError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = InputError::RecycledExceedsTotal {
            recycled: 12.0,
            total: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "recycled waste (12 kg) exceeds total waste (10 kg)"
        );
        let err = InputError::Negative {
            field: "water_liters",
            value: -3.0,
        };
        assert!(err.to_string().starts_with("water_liters"));
    }
}
