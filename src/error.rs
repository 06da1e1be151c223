//! Error types with fix suggestions

use thiserror::Error;

use crate::value::AttrValue;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All binding errors are fatal to the enclosing `bind` call: there is no
/// field-level recovery or best-effort continuation. A caller that wants
/// partial binding must catch and re-invoke per field itself.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("BIND-001: type '{type_name}' is not bindable")]
    Unbindable { type_name: String },

    #[error("BIND-002: could not create instance of '{type_name}' for attribute '{key}'")]
    Instantiation { type_name: String, key: String },

    #[error("BIND-003: value {value:?} rejected by constraint {constraint} for attribute '{key}'")]
    ConstraintViolation {
        key: String,
        constraint: String,
        value: AttrValue,
    },

    #[error("BIND-004: circular reference at attribute '{key}' (binding circular references is not supported)")]
    CircularReference { key: String },

    #[error("BIND-005: field access failed on {type_name}::{field}: {details}")]
    FieldAccess {
        type_name: String,
        field: String,
        details: String,
    },
}

impl BindError {
    /// Field-access failures indicate a descriptor defect rather than bad
    /// input data.
    pub fn field_access(
        type_name: impl Into<String>,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        BindError::FieldAccess {
            type_name: type_name.into(),
            field: field.into(),
            details: details.into(),
        }
    }
}

impl FixSuggestion for BindError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            BindError::Unbindable { .. } => {
                Some("Register the type's descriptor with the TypeRegistry before binding")
            }
            BindError::Instantiation { .. } => {
                Some("Register the referenced type with a constructor (register::<T>, T: Default)")
            }
            BindError::ConstraintViolation { .. } => {
                Some("Supply a store value accepted by the field's declared constraint")
            }
            BindError::CircularReference { .. } => {
                Some("Break the cycle in the object graph - an instance cannot bind itself")
            }
            BindError::FieldAccess { .. } => {
                Some("Check the field's get/set accessors match the declaring type and value shape")
            }
        }
    }
}
