use thiserror::Error;
use uuid::Uuid;

/// Errors raised by domain operations and the in-memory store
#[derive(Debug, Error)]
pub enum DomainError {
    /// The operation is not allowed in the entity's current state
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A numeric input was not a usable number (NaN or infinite)
    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    #[error("{field} out of range [{min}, {max}]: {value}")]
    OutOfRange { field: &'static str, value: f64, min: f64, max: f64 },

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, Uuid),
}

/// Reject NaN and infinite values at the boundary
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::InvalidNumber { field, value })
    }
}

/// Reject non-finite values and values outside `[min, max]`
pub(crate) fn ensure_within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, DomainError> {
    let value = ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(DomainError::OutOfRange { field, value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_within() {
        assert_eq!(ensure_within("lat", 90.0, -90.0, 90.0).unwrap(), 90.0);
        assert!(matches!(
            ensure_within("lat", 1e308, -90.0, 90.0),
            Err(DomainError::OutOfRange { field: "lat", .. })
        ));
        assert!(matches!(
            ensure_within("lat", f64::NAN, -90.0, 90.0),
            Err(DomainError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("amount", 9.99).unwrap(), 9.99);
        assert!(matches!(
            ensure_finite("amount", f64::NAN),
            Err(DomainError::InvalidNumber { field: "amount", .. })
        ));
        assert!(ensure_finite("lat", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let id = Uuid::nil();
        let err = DomainError::NotFound("match", id);
        assert_eq!(err.to_string(), format!("match not found with ID {}", id));

        let err = DomainError::InvalidOperation("sender not in conversation".to_string());
        assert_eq!(err.to_string(), "invalid operation: sender not in conversation");
    }
}
