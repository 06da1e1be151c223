//! Field descriptors - one entry per attribute-bearing field
//!
//! Accessors are type-erased over `&dyn Bindable` with an internal
//! downcast to the declaring type; a failed downcast is a field-access
//! error (a descriptor defect, not bad input). Setter closures report
//! value-shape mismatches as plain strings and get wrapped with the
//! declaring type and field name here.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::constraint::{All, Constraint};
use crate::descriptor::{Bindable, Direction, Phase};
use crate::error::BindError;
use crate::value::AttrValue;

pub(crate) type Getter =
    Arc<dyn Fn(&dyn Bindable) -> Result<AttrValue, BindError> + Send + Sync>;
pub(crate) type Setter =
    Arc<dyn Fn(&mut dyn Bindable, AttrValue) -> Result<(), BindError> + Send + Sync>;

/// Declares one field of a bindable type. Consumed by
/// [`TypeDescriptorBuilder::field`](crate::descriptor::TypeDescriptorBuilder::field),
/// which resolves the attribute key against the declaring type.
pub struct FieldSpec {
    name: &'static str,
    explicit_key: Option<&'static str>,
    phases: Vec<Phase>,
    directions: Vec<Direction>,
    constraints: Vec<Arc<dyn Constraint>>,
    get: Getter,
    set: Setter,
}

impl FieldSpec {
    /// Declare a field with typed accessors. A field with no phases is
    /// read purely to discover nested bindable values; a field with no
    /// directions never transfers in either direction.
    pub fn new<T, G, S>(name: &'static str, get: G, set: S) -> Self
    where
        T: Bindable + 'static,
        G: Fn(&T) -> AttrValue + Send + Sync + 'static,
        S: Fn(&mut T, AttrValue) -> Result<(), String> + Send + Sync + 'static,
    {
        let declaring = type_name::<T>();
        let getter: Getter = Arc::new(move |obj| {
            let typed = obj.as_any().downcast_ref::<T>().ok_or_else(|| {
                BindError::field_access(declaring, name, "instance is not the declaring type")
            })?;
            Ok(get(typed))
        });
        let setter: Setter = Arc::new(move |obj, value| {
            let typed = obj.as_any_mut().downcast_mut::<T>().ok_or_else(|| {
                BindError::field_access(declaring, name, "instance is not the declaring type")
            })?;
            set(typed, value).map_err(|details| BindError::field_access(declaring, name, details))
        });
        Self {
            name,
            explicit_key: None,
            phases: Vec::new(),
            directions: Vec::new(),
            constraints: Vec::new(),
            get: getter,
            set: setter,
        }
    }

    /// Explicit key override; bypasses prefix and type-name resolution.
    pub fn key(mut self, key: &'static str) -> Self {
        self.explicit_key = Some(key);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        if !self.phases.contains(&phase) {
            self.phases.push(phase);
        }
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        if !self.directions.contains(&direction) {
            self.directions.push(direction);
        }
        self
    }

    /// Declare a constraint. Several declarations fold into a single
    /// compound predicate.
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    pub(crate) fn into_descriptor(
        self,
        declared_by: &'static str,
        prefix: Option<&'static str>,
    ) -> FieldDescriptor {
        let key = match (self.explicit_key, prefix) {
            (Some(key), _) => key.to_string(),
            (None, Some(prefix)) => format!("{}.{}", prefix, self.name),
            (None, None) => format!("{}.{}", declared_by, self.name),
        };
        let constraint = match self.constraints.len() {
            0 => None,
            1 => Some(self.constraints.into_iter().next().unwrap()),
            _ => Some(Arc::new(All::new(self.constraints)) as Arc<dyn Constraint>),
        };
        FieldDescriptor {
            key,
            declared_by,
            name: self.name,
            phases: self.phases,
            directions: self.directions,
            constraint,
            get: self.get,
            set: self.set,
        }
    }
}

/// Resolved per-field metadata, derived once per type (never per
/// instance) and immutable for the type's lifetime.
pub struct FieldDescriptor {
    key: String,
    declared_by: &'static str,
    name: &'static str,
    phases: Vec<Phase>,
    directions: Vec<Direction>,
    constraint: Option<Arc<dyn Constraint>>,
    get: Getter,
    set: Setter,
}

impl FieldDescriptor {
    /// The resolved value-store lookup key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Local field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Qualified name of the declaring type
    pub fn declared_by(&self) -> &'static str {
        self.declared_by
    }

    pub fn has_phase(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn has_direction(&self, direction: Direction) -> bool {
        self.directions.contains(&direction)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    pub fn constraint(&self) -> Option<&dyn Constraint> {
        self.constraint.as_deref()
    }

    /// Read the field's current value from an instance
    pub fn read(&self, instance: &dyn Bindable) -> Result<AttrValue, BindError> {
        (self.get)(instance)
    }

    /// Write a value into the field of an instance
    pub fn write(&self, instance: &mut dyn Bindable, value: AttrValue) -> Result<(), BindError> {
        (self.set)(instance, value)
    }

    /// Re-target this field's accessors through an embedded-parent
    /// projection, keeping key and metadata intact. Used when a type
    /// extends a bindable ancestor.
    pub(crate) fn reproject<T, P>(
        &self,
        project: fn(&T) -> &P,
        project_mut: fn(&mut T) -> &mut P,
    ) -> FieldDescriptor
    where
        T: Bindable + 'static,
        P: Bindable + 'static,
    {
        let extending = type_name::<T>();
        let name = self.name;
        let parent_get = Arc::clone(&self.get);
        let parent_set = Arc::clone(&self.set);
        let get: Getter = Arc::new(move |obj| {
            let typed = obj.as_any().downcast_ref::<T>().ok_or_else(|| {
                BindError::field_access(extending, name, "instance is not the extending type")
            })?;
            parent_get(project(typed))
        });
        let set: Setter = Arc::new(move |obj, value| {
            let typed = obj.as_any_mut().downcast_mut::<T>().ok_or_else(|| {
                BindError::field_access(extending, name, "instance is not the extending type")
            })?;
            parent_set(project_mut(typed), value)
        });
        FieldDescriptor {
            key: self.key.clone(),
            declared_by: self.declared_by,
            name: self.name,
            phases: self.phases.clone(),
            directions: self.directions.clone(),
            constraint: self.constraint.clone(),
            get,
            set,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("declared_by", &self.declared_by)
            .field("phases", &self.phases)
            .field("directions", &self.directions)
            .field("constrained", &self.constraint.is_some())
            .finish()
    }
}
