//! AttributeBinder - one phase/direction pass over a bindable graph
//!
//! The engine walks the root's descriptor table and classifies every
//! field independently:
//! - phases don't include the requested phase: read only, to discover
//!   nested bindable values to descend into (never mutated or validated)
//! - phase matches, Input pass, field declares Input: assign from the
//!   store (absent key skips the field entirely this pass; explicit null
//!   is written through; type references coerce to fresh instances;
//!   constraints gate the assignment)
//! - phase matches, Output pass, field declares Output: collect the
//!   field's value into the store, overwriting unconditionally
//! - phase matches but directions don't: skip - no read, no write, no
//!   recursion
//!
//! Nested bindable values re-enter through the public `bind` surface,
//! which reseeds the visited set; only a direct self-loop is guaranteed
//! to be caught (see DESIGN.md on multi-hop cycles).

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::descriptor::{Direction, Phase};
use crate::error::BindError;
use crate::registry::TypeRegistry;
use crate::store::AttributeStore;
use crate::value::{object_id, AttrValue, Handle, ObjectId};

/// Binding engine. Borrows the registry for descriptor resolution and
/// class coercion; holds no state between passes.
pub struct AttributeBinder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> AttributeBinder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Run one binding pass over `root` and its reachable bindable graph.
    ///
    /// Contract:
    /// - attributes are optional; fields without a store entry keep their
    ///   current value
    /// - an explicit null entry is transferred to the field
    /// - class coercion applies on every Input pass regardless of phase
    /// - any error aborts the whole pass
    pub fn bind(
        &self,
        root: &Handle,
        store: &mut AttributeStore,
        phase: Phase,
        direction: Direction,
    ) -> Result<(), BindError> {
        let mut visited = FxHashSet::default();
        self.bind_step(root, store, phase, direction, &mut visited)
    }

    fn bind_step(
        &self,
        root: &Handle,
        store: &mut AttributeStore,
        phase: Phase,
        direction: Direction,
        visited: &mut FxHashSet<ObjectId>,
    ) -> Result<(), BindError> {
        // Current root participates in self-reference detection before
        // any of its fields are processed.
        visited.insert(object_id(root));

        let descriptor = root.borrow().type_descriptor();
        debug!(
            type_name = descriptor.type_name(),
            ?phase,
            ?direction,
            "binding pass"
        );

        for field in descriptor.fields() {
            let value: Option<AttrValue>;

            if field.has_phase(phase) {
                match direction {
                    Direction::Input if field.has_direction(Direction::Input) => {
                        // Absent key: the designed "leave unchanged" path.
                        // The entry itself may still map to explicit null.
                        let mut incoming = match store.get(field.key()) {
                            Some(v) => v.clone(),
                            None => {
                                trace!(key = field.key(), "no store entry, field unchanged");
                                continue;
                            }
                        };

                        if let AttrValue::TypeRef(type_name) = incoming {
                            incoming =
                                AttrValue::Object(self.coerce(type_name, store, field.key())?);
                        }

                        if !incoming.is_null() {
                            if let Some(constraint) = field.constraint() {
                                if !constraint.accepts(&incoming) {
                                    return Err(BindError::ConstraintViolation {
                                        key: field.key().to_string(),
                                        constraint: format!("{:?}", constraint),
                                        value: incoming,
                                    });
                                }
                            }
                        }

                        field.write(&mut *root.borrow_mut(), incoming.clone())?;
                        debug!(key = field.key(), value = ?incoming, "input assign");
                        value = Some(incoming);
                    }
                    Direction::Output if field.has_direction(Direction::Output) => {
                        let outgoing = field.read(&*root.borrow())?;
                        debug!(key = field.key(), value = ?outgoing, "output collect");
                        store.insert(field.key().to_string(), outgoing.clone());
                        value = Some(outgoing);
                    }
                    // Declared directions don't cover this pass: no read,
                    // no write, no recursion.
                    _ => {
                        trace!(key = field.key(), "direction mismatch, field skipped");
                        value = None;
                    }
                }
            } else {
                // Phase mismatch: read only, to find nested bindables.
                value = Some(field.read(&*root.borrow())?);
            }

            if let Some(AttrValue::Object(child)) = value {
                if visited.contains(&object_id(&child)) {
                    return Err(BindError::CircularReference {
                        key: field.key().to_string(),
                    });
                }
                // Re-entry through the public surface: the nested pass
                // tracks visitation from the child down.
                self.bind(&child, store, phase, direction)?;
            }
        }

        Ok(())
    }

    /// Class coercion: construct the referenced type and initialize it
    /// with Init/Input bindings from the same store, so a
    /// polymorphically-selected component receives its one-time defaults
    /// from the configuration data that selected it.
    pub fn coerce(
        &self,
        type_name: &str,
        store: &mut AttributeStore,
        key: &str,
    ) -> Result<Handle, BindError> {
        debug!(type_name, key, "class coercion");
        let instance = self.registry.construct(type_name, key)?;
        self.bind(&instance, store, Phase::Init, Direction::Input)?;
        Ok(instance)
    }
}
