//! Descriptor Module - per-type attribute metadata (the reflection stand-in)
//!
//! Each bindable type carries a precomputed descriptor table built once,
//! typically inside a `once_cell::sync::Lazy` static:
//! - `field`: one [`FieldDescriptor`] per participating field (resolved
//!   key, phase set, direction set, optional constraint, type-erased
//!   get/set accessors)
//! - `type_desc`: the [`TypeDescriptor`] assembling a type's table,
//!   including fields contributed by bindable ancestor types
//!
//! Key resolution, per field:
//! 1. explicit key override -> used verbatim (prefix not applied)
//! 2. declaring type has a namespace prefix -> `prefix + "." + field`
//! 3. otherwise -> `qualified_type_name + "." + field`

use std::any::Any;
use std::fmt;

mod field;
mod type_desc;

pub use field::{FieldDescriptor, FieldSpec};
pub use type_desc::{TypeDescriptor, TypeDescriptorBuilder};

/// Binding stage scoping which fields participate in a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// One-time initialization
    Init,
    /// Recurring per-invocation processing
    Processing,
}

/// Transfer direction of one binding pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Store -> field
    Input,
    /// Field -> store
    Output,
}

/// Capability marker: only instances of bindable types may be bound or
/// descended into. The `as_any` pair backs the typed accessor downcasts.
pub trait Bindable: Any {
    fn type_descriptor(&self) -> &'static TypeDescriptor;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl fmt::Debug for dyn Bindable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_descriptor().type_name())
    }
}

/// Wire a type to its descriptor table. The expression must yield a
/// `&'static TypeDescriptor` (usually a `Lazy` static).
///
/// ```ignore
/// bindable!(Widget => &WIDGET_DESCRIPTOR);
/// ```
#[macro_export]
macro_rules! bindable {
    ($ty:ty => $desc:expr) => {
        impl $crate::Bindable for $ty {
            fn type_descriptor(&self) -> &'static $crate::TypeDescriptor {
                $desc
            }
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }
        }
    };
}
