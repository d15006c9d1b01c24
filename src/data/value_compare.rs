use crate::data::datatable::DataValue;
use std::cmp::Ordering;

/// Utility function to compare two DataValues
/// This centralizes comparison logic so every sort path orders cells the same way
pub fn compare_values(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        // Integer comparisons
        (DataValue::Integer(a), DataValue::Integer(b)) => a.cmp(b),

        // Float comparisons
        (DataValue::Float(a), DataValue::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),

        // String comparisons
        (DataValue::String(a), DataValue::String(b)) => a.cmp(b),

        // Boolean comparisons
        (DataValue::Boolean(a), DataValue::Boolean(b)) => a.cmp(b),

        // DateTime comparisons (ISO 8601 strings order lexicographically)
        (DataValue::DateTime(a), DataValue::DateTime(b)) => a.cmp(b),

        // Null handling
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,

        // Numeric cross-type comparisons use the actual values, not the types
        (DataValue::Integer(i), DataValue::Float(f)) => {
            (*i as f64).partial_cmp(f).unwrap_or(Ordering::Equal)
        }
        (DataValue::Float(f), DataValue::Integer(i)) => {
            f.partial_cmp(&(*i as f64)).unwrap_or(Ordering::Equal)
        }

        // Remaining cross-type comparisons - consistent ordering for mixed columns
        // Order: Null < Boolean < Integer/Float < String < DateTime
        (DataValue::Boolean(_), _) => Ordering::Less,
        (_, DataValue::Boolean(_)) => Ordering::Greater,

        (DataValue::Integer(_), DataValue::String(_)) => Ordering::Less,
        (DataValue::Integer(_), DataValue::DateTime(_)) => Ordering::Less,
        (DataValue::Float(_), DataValue::String(_)) => Ordering::Less,
        (DataValue::Float(_), DataValue::DateTime(_)) => Ordering::Less,

        (DataValue::String(_), DataValue::Integer(_)) => Ordering::Greater,
        (DataValue::String(_), DataValue::Float(_)) => Ordering::Greater,
        (DataValue::String(_), DataValue::DateTime(_)) => Ordering::Less,

        (DataValue::DateTime(_), _) => Ordering::Greater,
    }
}

/// Compare DataValues with optional values (handling None)
/// A missing cell sorts before any present one
pub fn compare_optional_values(a: Option<&DataValue>, b: Option<&DataValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}
