//! Type descriptors - the per-type field table and its builder
//!
//! Building a descriptor performs the bindable-hierarchy walk up front:
//! `extends` flattens an ancestor's fields (with their already-resolved
//! keys) through an embedded-parent projection, so binding passes iterate
//! a single precomputed table. Field order follows declaration order but
//! carries no semantic weight; keys fully disambiguate targets.

use crate::descriptor::{Bindable, FieldDescriptor, FieldSpec};

/// Immutable per-type attribute metadata. Derived once for a type's
/// lifetime, usually inside a `once_cell::sync::Lazy` static.
#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: &'static str,
    prefix: Option<&'static str>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn builder(type_name: &'static str) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            type_name,
            prefix: None,
            inherited: Vec::new(),
            own: Vec::new(),
        }
    }

    /// Qualified type name (the default key namespace)
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared namespace prefix, if any
    pub fn prefix(&self) -> Option<&'static str> {
        self.prefix
    }

    /// All participating fields, bindable ancestors included
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by resolved key
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key() == key)
    }
}

/// Assembles a [`TypeDescriptor`]. The prefix may be declared before or
/// after fields - keys resolve at `build` time.
pub struct TypeDescriptorBuilder {
    type_name: &'static str,
    prefix: Option<&'static str>,
    inherited: Vec<FieldDescriptor>,
    own: Vec<FieldSpec>,
}

impl TypeDescriptorBuilder {
    /// Namespace prefix replacing the qualified-type-name component of
    /// this type's own default keys. Explicit keys and ancestor fields
    /// are unaffected. Lets multiple differently-configured instances of
    /// one reusable component type avoid key collisions.
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Inherit the fields of a bindable ancestor embedded in this type.
    /// Ancestor fields keep their own keys (declared-by semantics), so a
    /// same-named field on this type resolves to a distinct key.
    pub fn extends<T, P>(
        mut self,
        parent: &TypeDescriptor,
        project: fn(&T) -> &P,
        project_mut: fn(&mut T) -> &mut P,
    ) -> Self
    where
        T: Bindable + 'static,
        P: Bindable + 'static,
    {
        for field in parent.fields() {
            self.inherited.push(field.reproject(project, project_mut));
        }
        self
    }

    /// Declare one of this type's own fields
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.own.push(spec);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        let mut fields = self.inherited;
        for spec in self.own {
            fields.push(spec.into_descriptor(self.type_name, self.prefix));
        }
        TypeDescriptor {
            type_name: self.type_name,
            prefix: self.prefix,
            fields,
        }
    }
}
