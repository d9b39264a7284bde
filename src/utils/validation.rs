use crate::utils::error::{ReportError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_amounts(field_name: &str, amounts: &[u64]) -> Result<()> {
    if amounts.is_empty() {
        return Err(ReportError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for &amount in amounts {
        validate_positive_number(field_name, amount, 1)?;
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 年份區間必須落在 1..=horizon 內且不得倒置
pub fn validate_year_span(first_year: u32, last_year: u32, horizon: u32) -> Result<()> {
    validate_positive_number("horizon", horizon as u64, 1)?;
    validate_range("first_year", first_year, 1, horizon)?;
    validate_range("last_year", last_year, 1, horizon)?;

    if first_year > last_year {
        return Err(ReportError::ConfigValidationError {
            field: "first_year".to_string(),
            message: format!(
                "first_year ({}) must not be after last_year ({})",
                first_year, last_year
            ),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// 基準價格用作除數，必須為正
pub fn validate_baseline(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Baseline price must be greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ReportError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("horizon", 10, 1).is_ok());
        assert!(validate_positive_number("horizon", 0, 1).is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_amounts("amounts", &[10_000, 50_000, 100_000]).is_ok());
        assert!(validate_amounts("amounts", &[10_000, 0]).is_err());
        assert!(matches!(
            validate_amounts("amounts", &[]),
            Err(ReportError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_year_span() {
        assert!(validate_year_span(1, 10, 10).is_ok());
        assert!(validate_year_span(3, 3, 10).is_ok());
        assert!(validate_year_span(0, 10, 10).is_err());
        assert!(validate_year_span(1, 11, 10).is_err());
        assert!(validate_year_span(7, 2, 10).is_err());
        assert!(validate_year_span(1, 1, 0).is_err());
    }

    #[test]
    fn test_validate_baseline() {
        assert!(validate_baseline("baseline_price", 1.0).is_ok());
        assert!(validate_baseline("baseline_price", 0.0).is_err());
        assert!(validate_baseline("baseline_price", -2.5).is_err());
        assert!(validate_baseline("baseline_price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("program", "python3").is_ok());
        assert!(validate_non_empty_string("program", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(5u64);
        let absent: Option<u64> = None;
        assert_eq!(*validate_required_field("timeout", &present).unwrap(), 5);
        assert!(validate_required_field("timeout", &absent).is_err());
    }
}
