//! Error types for the PDF assembly library.
//!
//! This module defines all error types that can occur while building or
//! serializing a document.

/// Result type alias for PDF assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document construction and serialization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A recognized configuration field received a value outside its allowed set
    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue {
        /// Configuration field name
        key: &'static str,
        /// The rejected value
        value: String,
    },

    /// No width table exists for the requested base font
    #[error("No metrics table for font: {0}")]
    MetricsNotFound(String),

    /// Character outside the 256-entry width table range
    #[error("Codepoint U+{codepoint:04X} is outside the single-byte width table for {font}")]
    UnsupportedCodepoint {
        /// The out-of-range character
        codepoint: u32,
        /// Base font whose table was consulted
        font: String,
    },

    /// An operation requiring a fixed tuple of numeric values received the wrong count
    #[error("Operator {operator} requires {expected} components, found {found}")]
    ParameterCount {
        /// Operator mnemonic
        operator: &'static str,
        /// Required component count
        expected: usize,
        /// Supplied component count
        found: usize,
    },

    /// A numeric operand was NaN or infinite and cannot be emitted
    #[error("Non-finite numeric operand for {operator}: {value}")]
    NonFiniteOperand {
        /// Operator mnemonic
        operator: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A mandatory inherited page attribute was never defined on the path to the root
    #[error("Page attribute /{0} is unresolved on the path to the root")]
    MissingAttribute(&'static str),

    /// A referenced object id was never registered
    #[error("Referenced object was never registered: {0}")]
    UnregisteredObject(crate::object::ObjectRef),

    /// Text emission was requested before any font was selected
    #[error("No font has been selected for this page")]
    NoFontSelected,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_value_message() {
        let err = Error::InvalidConfigValue {
            key: "Subtype",
            value: "Type6".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Subtype"));
        assert!(msg.contains("Type6"));
    }

    #[test]
    fn test_metrics_not_found_message() {
        let err = Error::MetricsNotFound("Symbol".to_string());
        assert!(format!("{}", err).contains("Symbol"));
    }

    #[test]
    fn test_parameter_count_message() {
        let err = Error::ParameterCount {
            operator: "RG",
            expected: 3,
            found: 2,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("RG"));
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_unregistered_object_message() {
        let err = Error::UnregisteredObject(crate::object::ObjectRef::new(9));
        assert!(format!("{}", err).contains("9 0 R"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
