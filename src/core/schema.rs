//! Declarative field schemas
//!
//! A [`FieldSchema`] describes the expected type and constraints of a single
//! input field; an [`EntitySchema`] is the ordered set of schemas an entity
//! declares once. Schemas carry no logic; the validator dispatches on them.

use indexmap::IndexMap;

/// The wire-level type a field is validated as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Enum,
    Boolean,
    Integer,
    Float,
    Date,
    DateTime,
    Time,
    Array,
}

/// Validation rules for a single field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub required: bool,

    /// Length bounds for `String` and `Array` fields
    pub min_length: usize,
    pub max_length: usize,

    /// Value bounds for `Integer` and `Float` fields
    pub min_value: f64,
    pub max_value: f64,

    /// Allowed values for `Enum` fields, optionally also for `Array` elements
    pub options: Vec<&'static str>,
}

impl FieldSchema {
    /// A required or optional field of the given type, with open bounds
    pub fn new(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type,
            required,
            min_length: 0,
            max_length: usize::MAX,
            min_value: f64::MIN,
            max_value: f64::MAX,
            options: Vec::new(),
        }
    }

    /// String field with length bounds
    pub fn string(required: bool, min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            ..Self::new(FieldType::String, required)
        }
    }

    /// Enum field restricted to the given options
    pub fn enumeration(required: bool, options: &[&'static str]) -> Self {
        Self {
            options: options.to_vec(),
            ..Self::new(FieldType::Enum, required)
        }
    }

    /// Integer field with value bounds
    pub fn integer(required: bool, min_value: i64, max_value: i64) -> Self {
        Self {
            min_value: min_value as f64,
            max_value: max_value as f64,
            ..Self::new(FieldType::Integer, required)
        }
    }

    /// Float field with value bounds
    pub fn float(required: bool, min_value: f64, max_value: f64) -> Self {
        Self {
            min_value,
            max_value,
            ..Self::new(FieldType::Float, required)
        }
    }

    /// Array field with length bounds and optional element options
    pub fn array(required: bool, min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
            ..Self::new(FieldType::Array, required)
        }
    }

    /// Restrict array elements to the given options
    pub fn with_options(mut self, options: &[&'static str]) -> Self {
        self.options = options.to_vec();
        self
    }
}

/// Ordered field name → schema map, declared once per entity type.
///
/// Insertion order matters: the "missing required fields" aggregate error lists
/// names in declaration order.
pub type EntitySchema = IndexMap<&'static str, FieldSchema>;
