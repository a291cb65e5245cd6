//! Conversion error taxonomy.

use std::fmt;

use thiserror::Error;

/// The single failure kind raised by every converter.
///
/// It covers unavailable backing services, absent required domain state,
/// enumeration values without a wire representation and unresolvable
/// receiver references. The cause is carried as a human-readable message
/// only; callers at the transport boundary turn it into a failure response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConversionError {
    message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn service_unavailable(service: &str) -> Self {
        Self::new(format!("{service} not available"))
    }

    pub fn missing_field(field: &str) -> Self {
        MissingField::named(field).into()
    }

    pub fn unknown_value(kind: &str, value: impl fmt::Display) -> Self {
        Self::new(format!("unknown {kind}: {value}"))
    }

    pub fn unresolved_receiver(receiver_type: &str, id: &str) -> Self {
        Self::new(format!("{receiver_type} '{id}' not found"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A required piece of domain state was absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required field `{field}` is missing")]
pub struct MissingField {
    pub field: String,
}

impl MissingField {
    pub fn named(field: &str) -> Self {
        Self {
            field: field.to_owned(),
        }
    }
}

impl From<MissingField> for ConversionError {
    fn from(err: MissingField) -> Self {
        ConversionError::new(err.to_string())
    }
}

/// Typed accessor for required domain state.
///
/// ```
/// use webclient_converter::error::required;
///
/// assert_eq!(required(Some(3), "size"), Ok(3));
/// assert_eq!(required::<i32>(None, "size").unwrap_err().field, "size");
/// ```
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, MissingField> {
    value.ok_or_else(|| MissingField::named(field))
}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_rewraps_with_field_name() {
        let err: ConversionError = required::<String>(None, "fileData").unwrap_err().into();
        assert_eq!(err.message(), "required field `fileData` is missing");
    }

    #[test]
    fn constructors_render_cause() {
        assert_eq!(
            ConversionError::unknown_value("message type", "DATE_SEPARATOR").to_string(),
            "unknown message type: DATE_SEPARATOR"
        );
        assert_eq!(
            ConversionError::unresolved_receiver("group", "42").to_string(),
            "group '42' not found"
        );
        assert_eq!(
            ConversionError::service_unavailable("file service").to_string(),
            "file service not available"
        );
    }
}
