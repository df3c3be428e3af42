//! Field mapping loaded from the JSON mapping file.
//!
//! The mapping serves two purposes: it is passed through verbatim as the
//! index `properties` at index creation, and it provides the per-field
//! type tags that drive CSV value coercion.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading the field mapping.
#[derive(Error, Debug)]
pub enum MappingError {
    /// Failed to read the mapping file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The mapping file is not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The mapping document has an unexpected shape.
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
}

impl MappingError {
    /// Create an invalid mapping error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidMapping(msg.into())
    }
}

/// Declared field types recognized for value conversion.
///
/// `Double` coerces to a floating-point value; all other tags coerce to an
/// integer truncated toward zero. Any other declared type is left out of
/// the typed view and its values pass through unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Integer,
    Long,
    Date,
    Double,
}

impl FieldType {
    /// Look up the tag for a declared type name.
    ///
    /// Returns `None` for type names outside the recognized set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "integer" => Some(Self::Integer),
            "long" => Some(Self::Long),
            "date" => Some(Self::Date),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// Whether values of this type are truncated to an integer.
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::Double)
    }
}

/// Declarative schema mapping field names to value types.
///
/// Loaded once at startup and immutable for the run.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    types: HashMap<String, FieldType>,
    properties: Value,
}

impl FieldMapping {
    /// Load the mapping from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_value(value)
    }

    /// Build the mapping from an already-parsed JSON document.
    ///
    /// The root must be an object mapping field names to objects with a
    /// `type` key. Fields without a recognized `type` are kept in the raw
    /// properties but excluded from the typed view.
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        let properties = value
            .as_object()
            .ok_or_else(|| MappingError::invalid("mapping root must be a JSON object"))?;

        let mut types = HashMap::new();
        for (name, spec) in properties {
            if let Some(type_name) = spec.get("type").and_then(Value::as_str) {
                if let Some(field_type) = FieldType::from_name(type_name) {
                    types.insert(name.clone(), field_type);
                }
            }
        }

        Ok(Self {
            types,
            properties: value,
        })
    }

    /// The declared type tag for a field, if it is in the recognized set.
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.types.get(field).copied()
    }

    /// The raw mapping object, used as the index `properties` at creation.
    pub fn properties(&self) -> &Value {
        &self.properties
    }
}
