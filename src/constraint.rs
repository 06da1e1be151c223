//! Constraint capability - opaque acceptance predicates over input values
//!
//! The binder never inspects a constraint beyond asking "is this value
//! acceptable". Concrete constraints (ranges, modulo checks, ...) are the
//! caller's business; this module only fixes the contract and provides the
//! combinator that folds several declared constraints into one predicate.

use std::fmt;
use std::sync::Arc;

use crate::value::AttrValue;

/// Acceptance predicate evaluated before an Input value is assigned.
///
/// `Debug` feeds the constraint reference carried by
/// [`BindError::ConstraintViolation`](crate::error::BindError).
pub trait Constraint: fmt::Debug + Send + Sync {
    fn accepts(&self, value: &AttrValue) -> bool;
}

/// Conjunction of constraints. A field declaring several constraints gets
/// them folded into one `All`; a compound constraint is just another
/// predicate as far as the binder is concerned.
pub struct All {
    parts: Vec<Arc<dyn Constraint>>,
}

impl All {
    pub fn new(parts: Vec<Arc<dyn Constraint>>) -> Self {
        Self { parts }
    }
}

impl Constraint for All {
    fn accepts(&self, value: &AttrValue) -> bool {
        self.parts.iter().all(|c| c.accepts(value))
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.parts.iter()).finish()
    }
}
