//! Numeric normalization utilities.

use thiserror::Error;

/// Why a cell could not become a value. Callers drop the cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("empty value")]
    Empty,
    #[error("'{value}' is not a number")]
    NotNumeric { value: String },
    #[error("'{value}' is not a finite number")]
    NonFinite { value: String },
}

/// Parses a spreadsheet cell such as `" 1,234.50 "` into a finite f64.
///
/// Thousands separators are removed before parsing. Placeholders (`-`,
/// `n.a.`) and text are rejected rather than mapped to zero.
pub fn coerce_value(raw: &str) -> Result<f64, CoercionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoercionError::Empty);
    }
    let stripped: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    let value = stripped
        .trim()
        .parse::<f64>()
        .map_err(|_| CoercionError::NotNumeric {
            value: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(CoercionError::NonFinite {
            value: trimmed.to_string(),
        });
    }
    Ok(value)
}

/// Formats a value with `,` thousands separators and fixed decimals.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let mut grouped = String::with_capacity(rendered.len() + integer.len() / 3 + 1);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    // "-0.00" reads as noise in a table.
    let is_zero = rendered.chars().all(|ch| ch == '0' || ch == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_plain_and_separated_numbers() {
        assert_eq!(coerce_value("42"), Ok(42.0));
        assert_eq!(coerce_value(" 1,234.5 "), Ok(1234.5));
        assert_eq!(coerce_value("-12,000"), Ok(-12000.0));
        assert_eq!(coerce_value("1,00,000"), Ok(100000.0));
    }

    #[test]
    fn rejects_placeholders_and_text() {
        assert_eq!(coerce_value(""), Err(CoercionError::Empty));
        assert_eq!(coerce_value("   "), Err(CoercionError::Empty));
        assert!(matches!(coerce_value("-"), Err(CoercionError::NotNumeric { .. })));
        assert!(matches!(coerce_value(","), Err(CoercionError::NotNumeric { .. })));
        assert!(matches!(coerce_value("Annual"), Err(CoercionError::NotNumeric { .. })));
        assert!(matches!(coerce_value("NaN"), Err(CoercionError::NonFinite { .. })));
        assert!(matches!(coerce_value("inf"), Err(CoercionError::NonFinite { .. })));
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(1000.0, 0), "1,000");
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(-45000.5, 1), "-45,000.5");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
    }
}
