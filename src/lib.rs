//! Attrbind - attribute binding for component graphs
//!
//! Wires configuration values and computed results into and out of a
//! graph of cooperating components without the components knowing about
//! the storage format. A component declares, per field, which binding
//! phase (Init vs Processing) and direction (Input vs Output) it
//! participates in; a flat [`AttributeStore`] supplies and receives the
//! values; the [`AttributeBinder`] walks the object graph, applies
//! phase/direction filters, validates against declared constraints,
//! resolves type references by instantiating registered implementations,
//! and recurses into nested bindable values.

pub mod binder;
pub mod constraint;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod store;
pub mod value;

pub use binder::AttributeBinder;
pub use constraint::{All, Constraint};
pub use descriptor::{
    Bindable, Direction, FieldDescriptor, FieldSpec, Phase, TypeDescriptor, TypeDescriptorBuilder,
};
pub use error::{BindError, FixSuggestion};
pub use registry::TypeRegistry;
pub use store::AttributeStore;
pub use value::{handle, AttrValue, Handle};
