//! Attribute values - the dynamic payload exchanged between store and fields
//!
//! Three forms:
//! - `Data`: scalars / structured config data (`serde_json::Value`);
//!   `Value::Null` is the explicit null marker and a legal input
//! - `Object`: a live bindable instance, shared via `Rc<RefCell<..>>`
//! - `TypeRef`: a variant selector naming a registered implementation,
//!   resolved to a fresh instance by class coercion during Input passes

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::descriptor::Bindable;

/// Shared handle to a bindable instance.
///
/// The binder is single-threaded by design, so plain `Rc`/`RefCell`
/// ownership is sufficient. The binder never retains handles after a
/// pass completes.
pub type Handle = Rc<RefCell<dyn Bindable>>;

/// Wrap a bindable instance into a shared handle.
pub fn handle<T: Bindable + 'static>(value: T) -> Handle {
    Rc::new(RefCell::new(value))
}

/// Identity token for cycle detection. Thin pointer to the shared cell,
/// so two clones of the same handle compare equal and two distinct
/// instances never do.
pub(crate) type ObjectId = *const ();

pub(crate) fn object_id(handle: &Handle) -> ObjectId {
    Rc::as_ptr(handle) as *const ()
}

/// A value read from or written to an [`AttributeStore`](crate::store::AttributeStore).
#[derive(Clone)]
pub enum AttrValue {
    /// Scalar or structured data, including `Value::Null` as explicit null.
    Data(Value),
    /// A live bindable instance.
    Object(Handle),
    /// A variant selector: the qualified name of a registered bindable
    /// type to instantiate via class coercion.
    TypeRef(&'static str),
}

impl AttrValue {
    /// Explicit null marker (equivalent to `Data(Value::Null)`).
    pub fn null() -> Self {
        AttrValue::Data(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Data(Value::Null))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Data(v) => v.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Data(v) => v.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Data(v) => v.as_bool(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Data(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Handle> {
        match self {
            AttrValue::Object(h) => Some(h),
            _ => None,
        }
    }

    /// Extract an integer, reporting the shape mismatch for accessor
    /// error wrapping.
    pub fn expect_i64(&self) -> Result<i64, String> {
        self.as_i64()
            .ok_or_else(|| format!("expected integer, got {:?}", self))
    }

    pub fn expect_f64(&self) -> Result<f64, String> {
        self.as_f64()
            .ok_or_else(|| format!("expected number, got {:?}", self))
    }

    pub fn expect_bool(&self) -> Result<bool, String> {
        self.as_bool()
            .ok_or_else(|| format!("expected boolean, got {:?}", self))
    }

    pub fn expect_str(&self) -> Result<String, String> {
        self.as_str()
            .map(str::to_owned)
            .ok_or_else(|| format!("expected string, got {:?}", self))
    }

    /// Extract an optional instance handle: explicit null maps to `None`,
    /// an object maps to `Some`. Used by setters of reference-typed fields;
    /// null store entries are written through as `None`.
    pub fn into_object(self) -> Result<Option<Handle>, String> {
        match self {
            AttrValue::Data(Value::Null) => Ok(None),
            AttrValue::Object(h) => Ok(Some(h)),
            other => Err(format!("expected instance or null, got {:?}", other)),
        }
    }

    /// JSON rendition for event logging: objects and type references
    /// collapse to their type names.
    pub fn to_log_value(&self) -> Value {
        match self {
            AttrValue::Data(v) => v.clone(),
            AttrValue::Object(h) => match h.try_borrow() {
                Ok(obj) => Value::String(format!("<{}>", obj.type_descriptor().type_name())),
                Err(_) => Value::String("<borrowed>".to_string()),
            },
            AttrValue::TypeRef(name) => Value::String(format!("class {}", name)),
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Data(v) => write!(f, "{}", v),
            AttrValue::Object(h) => match h.try_borrow() {
                Ok(obj) => write!(f, "<{}>", obj.type_descriptor().type_name()),
                Err(_) => write!(f, "<borrowed>"),
            },
            AttrValue::TypeRef(name) => write!(f, "class {}", name),
        }
    }
}

/// `Data` compares by JSON equality, `Object` by handle identity,
/// `TypeRef` by name. Cross-variant comparisons are always unequal.
impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Data(a), AttrValue::Data(b)) => a == b,
            (AttrValue::Object(a), AttrValue::Object(b)) => {
                object_id(a) == object_id(b)
            }
            (AttrValue::TypeRef(a), AttrValue::TypeRef(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for AttrValue {
    fn from(v: Value) -> Self {
        AttrValue::Data(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Data(Value::from(v))
    }
}

impl From<Handle> for AttrValue {
    fn from(h: Handle) -> Self {
        AttrValue::Object(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_roundtrip() {
        let v = AttrValue::null();
        assert!(v.is_null());
        assert_eq!(v, AttrValue::Data(Value::Null));
        assert!(v.into_object().unwrap().is_none());
    }

    #[test]
    fn scalar_accessors() {
        assert_eq!(AttrValue::from(42).as_i64(), Some(42));
        assert_eq!(AttrValue::from(2.5).as_f64(), Some(2.5));
        assert_eq!(AttrValue::from(true).as_bool(), Some(true));
        assert_eq!(AttrValue::from("hi").as_str(), Some("hi"));
        assert_eq!(AttrValue::from(json!({"a": 1})).as_i64(), None);
    }

    #[test]
    fn expect_reports_shape() {
        let err = AttrValue::from("text").expect_i64().unwrap_err();
        assert!(err.contains("expected integer"));

        let err = AttrValue::from(1).into_object().unwrap_err();
        assert!(err.contains("expected instance"));
    }

    #[test]
    fn type_refs_compare_by_name() {
        assert_eq!(AttrValue::TypeRef("a.B"), AttrValue::TypeRef("a.B"));
        assert_ne!(AttrValue::TypeRef("a.B"), AttrValue::TypeRef("a.C"));
        assert_ne!(AttrValue::TypeRef("a.B"), AttrValue::from("a.B"));
    }
}
