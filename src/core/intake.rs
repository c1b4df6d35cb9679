use thiserror::Error;
use crate::models::{Measurements, RawField, RawMeasurements};

pub use crate::models::domain::{
    Field, FieldError, Reason, AGE_BOUNDS, CIRCUMFERENCE_BOUNDS, HEIGHT_BOUNDS, WEIGHT_BOUNDS,
};

/// Every invalid field of a measurement submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid measurements: {}", describe(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }

    pub fn reason_for(&self, field: Field) -> Option<Reason> {
        self.fields.iter().find(|e| e.field == field).map(|e| e.reason)
    }
}

/// Parse a raw answer into a number. Blank text is treated as absent.
fn parse_number(raw: Option<&RawField>) -> Result<Option<f64>, Reason> {
    let value = match raw {
        None => return Ok(None),
        Some(RawField::Number(n)) => *n,
        Some(RawField::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|_| Reason::NonNumeric)?
        }
        Some(RawField::Other(_)) => return Err(Reason::NonNumeric),
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(Reason::NonNumeric)
    }
}

fn check_field(field: Field, raw: Option<&RawField>) -> Result<Option<f64>, Reason> {
    match parse_number(raw)? {
        Some(value) => {
            let (min, max) = field.bounds();
            if value < min || value > max {
                return Err(Reason::OutOfRange);
            }
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Check one field, recording any problem and returning the value if usable
fn collect(
    errors: &mut Vec<FieldError>,
    field: Field,
    raw: Option<&RawField>,
    required: bool,
) -> Option<f64> {
    match check_field(field, raw) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            if required {
                errors.push(FieldError { field, reason: Reason::Missing });
            }
            None
        }
        Err(reason) => {
            errors.push(FieldError { field, reason });
            None
        }
    }
}

/// Validate raw quiz answers into a measurement set
///
/// All fields are checked before returning, so the error lists every
/// offending field rather than only the first one.
pub fn validate_measurements(raw: &RawMeasurements) -> Result<Measurements, ValidationError> {
    let mut errors = Vec::new();

    let bust = collect(&mut errors, Field::Bust, raw.bust.as_ref(), true);
    let waist = collect(&mut errors, Field::Waist, raw.waist.as_ref(), true);
    let hip = collect(&mut errors, Field::Hip, raw.hip.as_ref(), true);
    let height = collect(&mut errors, Field::Height, raw.height.as_ref(), false);
    let weight = collect(&mut errors, Field::Weight, raw.weight.as_ref(), false);

    // Age must be a whole number of years
    let age = match parse_number(raw.age.as_ref()) {
        Ok(Some(value)) if value.fract() != 0.0 => {
            errors.push(FieldError { field: Field::Age, reason: Reason::NonNumeric });
            None
        }
        Ok(_) => collect(&mut errors, Field::Age, raw.age.as_ref(), false),
        Err(reason) => {
            errors.push(FieldError { field: Field::Age, reason });
            None
        }
    };

    match (bust, waist, hip) {
        (Some(bust), Some(waist), Some(hip)) if errors.is_empty() => Ok(Measurements {
            bust,
            waist,
            hip,
            height,
            weight,
            age: age.map(|a| a as u8),
        }),
        _ => Err(ValidationError { fields: errors }),
    }
}

/// Validate only the fields gathered on the quiz's basic-info step
pub(crate) fn check_optional(field: Field, raw: Option<&RawField>) -> Result<Option<f64>, Reason> {
    check_field(field, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers_and_strings() {
        let raw = RawMeasurements {
            bust: Some(95.0.into()),
            waist: Some(" 78 ".into()),
            hip: Some("103.5".into()),
            height: Some("170".into()),
            weight: Some(62.0.into()),
            age: Some("34".into()),
        };

        let m = validate_measurements(&raw).unwrap();
        assert_eq!(m.bust, 95.0);
        assert_eq!(m.waist, 78.0);
        assert_eq!(m.hip, 103.5);
        assert_eq!(m.height, Some(170.0));
        assert_eq!(m.age, Some(34));
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let raw = RawMeasurements {
            bust: None,
            waist: Some("abc".into()),
            hip: Some(150.0.into()),
            height: Some(100.0.into()),
            weight: Some(250.0.into()),
            age: Some(30.5.into()),
        };

        let err = validate_measurements(&raw).unwrap_err();
        assert_eq!(err.fields.len(), 6);
        assert_eq!(err.reason_for(Field::Bust), Some(Reason::Missing));
        assert_eq!(err.reason_for(Field::Waist), Some(Reason::NonNumeric));
        assert_eq!(err.reason_for(Field::Hip), Some(Reason::OutOfRange));
        assert_eq!(err.reason_for(Field::Height), Some(Reason::OutOfRange));
        assert_eq!(err.reason_for(Field::Weight), Some(Reason::OutOfRange));
        assert_eq!(err.reason_for(Field::Age), Some(Reason::NonNumeric));
    }

    #[test]
    fn test_blank_strings_are_missing() {
        let raw = RawMeasurements {
            bust: Some("".into()),
            waist: Some(78.0.into()),
            hip: Some(103.0.into()),
            height: Some("  ".into()),
            ..Default::default()
        };

        let err = validate_measurements(&raw).unwrap_err();
        assert_eq!(err.fields, vec![FieldError { field: Field::Bust, reason: Reason::Missing }]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let raw = RawMeasurements::circumferences(40.0, 140.0, 90.0).with_height_weight(220.0, 30.0);
        assert!(validate_measurements(&raw).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let raw = RawMeasurements::circumferences(f64::NAN, 78.0, 103.0);
        let err = validate_measurements(&raw).unwrap_err();
        assert_eq!(err.reason_for(Field::Bust), Some(Reason::NonNumeric));
    }

    #[test]
    fn test_non_scalar_answers_are_non_numeric() {
        let raw: RawMeasurements = serde_json::from_value(serde_json::json!({
            "bust": true,
            "waist": [78],
            "hip": { "value": 103 },
            "age": false
        }))
        .unwrap();

        let err = validate_measurements(&raw).unwrap_err();
        let fields: Vec<Field> = err.fields.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Bust, Field::Waist, Field::Hip, Field::Age]);
        assert!(err.fields.iter().all(|e| e.reason == Reason::NonNumeric));
    }

    #[test]
    fn test_error_message_names_fields() {
        let raw = RawMeasurements::circumferences(95.0, 78.0, 103.0).with_height_weight(170.0, 250.0);
        let err = validate_measurements(&raw).unwrap_err();
        assert!(err.has_field(Field::Weight));
        assert!(err.to_string().contains("weight must be between 30 and 200"));
    }
}
