//! TypeRegistry - qualified name to descriptor/constructor lookup
//!
//! Explicit registration stands in for annotation scanning: a type is
//! "bindable by name" once its descriptor is registered, and
//! "constructible" once registered with a constructor. The registry is a
//! plain value owned by the caller and lent to the binder - no ambient
//! global state.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::descriptor::{Bindable, FieldDescriptor, TypeDescriptor};
use crate::error::BindError;
use crate::value::{handle, Handle};

struct RegisteredType {
    descriptor: &'static TypeDescriptor,
    construct: Option<fn() -> Handle>,
}

/// Lookup table backing dynamic descriptor resolution and class coercion.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<&'static str, RegisteredType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructible bindable type. Class coercion of a type
    /// reference naming this descriptor constructs via `T::default()`.
    pub fn register<T>(&mut self, descriptor: &'static TypeDescriptor)
    where
        T: Bindable + Default + 'static,
    {
        debug!(type_name = descriptor.type_name(), "registering type");
        self.types.insert(
            descriptor.type_name(),
            RegisteredType {
                descriptor,
                construct: Some(|| handle(T::default())),
            },
        );
    }

    /// Register a descriptor without a constructor (an abstract or
    /// externally-constructed type). Resolvable, but not coercible.
    pub fn register_abstract(&mut self, descriptor: &'static TypeDescriptor) {
        debug!(type_name = descriptor.type_name(), "registering abstract type");
        self.types.insert(
            descriptor.type_name(),
            RegisteredType {
                descriptor,
                construct: None,
            },
        );
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Look up a registered descriptor. Unknown names fail with an
    /// unbindable-type error, never a silent empty result.
    pub fn descriptor(&self, type_name: &str) -> Result<&'static TypeDescriptor, BindError> {
        self.types
            .get(type_name)
            .map(|t| t.descriptor)
            .ok_or_else(|| BindError::Unbindable {
                type_name: type_name.to_string(),
            })
    }

    /// Resolve the full field table for a registered type name.
    pub fn resolve_fields(&self, type_name: &str) -> Result<&'static [FieldDescriptor], BindError> {
        Ok(self.descriptor(type_name)?.fields())
    }

    /// Construct a fresh instance of a registered type for class
    /// coercion. `key` identifies the attribute that requested the
    /// instance, for error reporting.
    pub(crate) fn construct(&self, type_name: &str, key: &str) -> Result<Handle, BindError> {
        let registered = self.types.get(type_name).ok_or_else(|| BindError::Unbindable {
            type_name: type_name.to_string(),
        })?;
        let construct = registered.construct.ok_or_else(|| BindError::Instantiation {
            type_name: type_name.to_string(),
            key: key.to_string(),
        })?;
        Ok(construct())
    }
}
