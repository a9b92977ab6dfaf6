//! JavaScript objects
//!
//! An object is a prototype link, a property table and an `ObjectKind`
//! holding whatever internal slot the object carries (array elements,
//! a time value, a native function, a wrapped primitive).

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::date::format_date;
use crate::number::number_to_string;
use crate::value::{Symbol, Value};

/// Property key (string, symbol or array index)
#[derive(Clone, Debug)]
pub enum PropertyKey {
    /// String property key
    String(Arc<str>),
    /// Symbol property key
    Symbol(Arc<Symbol>),
    /// Integer index (for arrays)
    Index(u32),
}

impl PropertyKey {
    /// Create a string property key.
    ///
    /// Canonical array indices ("0", "17", ...) become `Index` keys.
    pub fn string(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(i) if i != u32::MAX && i.to_string() == s => Self::Index(i),
            _ => Self::String(Arc::from(s)),
        }
    }

    /// Create a symbol property key
    pub fn symbol(sym: Arc<Symbol>) -> Self {
        Self::Symbol(sym)
    }

    /// Create an index property key
    pub fn index(i: u32) -> Self {
        Self::Index(i)
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a.id == b.id,
            (Self::Index(a), Self::Index(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyKey {}

impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::String(s) => s.hash(state),
            Self::Symbol(sym) => sym.id.hash(state),
            Self::Index(i) => i.hash(state),
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Symbol(sym) => write!(f, "{}", sym.descriptive_string()),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        Self::Index(i)
    }
}

/// Native function handler type
pub type NativeFn =
    Arc<dyn Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync>;

/// A function implemented in Rust
#[derive(Clone)]
pub struct NativeFunction {
    /// Function name (used by `Function.prototype.toString`)
    pub name: String,
    /// The native handler, called with `(this, args, ncx)`
    pub func: NativeFn,
}

/// Largest distance past the dense end an index write may extend storage
const MAX_DENSE_GAP: usize = 1024;

/// Array storage: a dense prefix plus the array's `length`.
///
/// Indices past the dense prefix live in the owning object's property
/// table, so a far write like `arr[4294967294] = x` stays sparse.
#[derive(Debug, Default)]
pub struct ArrayElements {
    dense: Vec<Value>,
    length: u32,
}

impl ArrayElements {
    /// Dense storage holding `values`
    pub fn new(values: Vec<Value>) -> Self {
        let length = u32::try_from(values.len()).unwrap_or(u32::MAX);
        let mut dense = values;
        dense.truncate(length as usize);
        Self { dense, length }
    }

    /// The array's `length`
    pub fn length(&self) -> u32 {
        self.length
    }

    /// The dense prefix
    pub fn dense(&self) -> &[Value] {
        &self.dense
    }
}

/// Validate a value written to an array's `length`
fn array_length(value: &Value) -> VmResult<u32> {
    value
        .as_number()
        .filter(|n| n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(n))
        .map(|n| n as u32)
        .ok_or_else(|| VmError::range_error("Invalid array length"))
}

/// Internal slot carried by an object
pub enum ObjectKind {
    /// Plain object
    Ordinary,
    /// Array exotic object
    Array(RwLock<ArrayElements>),
    /// Date object with its time value (ms since epoch, NaN if invalid)
    Date(f64),
    /// Callable object
    Function(NativeFunction),
    /// Boolean wrapper
    Boolean(bool),
    /// Number wrapper
    Number(f64),
    /// String wrapper
    String(Arc<str>),
    /// Symbol wrapper
    Symbol(Arc<Symbol>),
}

/// A JavaScript object
pub struct JsObject {
    prototype: RwLock<Option<Arc<JsObject>>>,
    properties: RwLock<FxHashMap<PropertyKey, Value>>,
    kind: ObjectKind,
}

impl JsObject {
    /// Create a new object with the given prototype and internal slot
    pub fn new(prototype: Option<Arc<JsObject>>, kind: ObjectKind) -> Arc<Self> {
        Arc::new(Self {
            prototype: RwLock::new(prototype),
            properties: RwLock::new(FxHashMap::default()),
            kind,
        })
    }

    /// The internal slot
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Current prototype
    pub fn prototype(&self) -> Option<Arc<JsObject>> {
        self.prototype.read().clone()
    }

    /// Replace the prototype
    pub fn set_prototype(&self, prototype: Option<Arc<JsObject>>) {
        *self.prototype.write() = prototype;
    }

    /// Is this a function object
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, ObjectKind::Function(_))
    }

    /// Native function slot, if callable
    pub fn as_function(&self) -> Option<&NativeFunction> {
        match &self.kind {
            ObjectKind::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Own property lookup
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        if let ObjectKind::Array(elements) = &self.kind {
            match key {
                PropertyKey::Index(i) => {
                    if let Some(v) = elements.read().dense.get(*i as usize) {
                        return Some(v.clone());
                    }
                }
                PropertyKey::String(s) if &**s == "length" => {
                    return Some(Value::number(elements.read().length() as f64));
                }
                _ => {}
            }
        }
        self.properties.read().get(key).cloned()
    }

    /// Property lookup along the prototype chain
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value);
        }
        let mut current = self.prototype();
        while let Some(obj) = current {
            if let Some(value) = obj.get_own(key) {
                return Some(value);
            }
            current = obj.prototype();
        }
        None
    }

    /// Property lookup, `undefined` when missing
    pub fn get_or_undefined(&self, key: &PropertyKey) -> Value {
        self.get(key).unwrap_or(Value::Undefined)
    }

    /// Set an own property.
    ///
    /// Returns `false` when the write is rejected (an invalid array
    /// `length`); use [`JsObject::set_length`] to get the error.
    pub fn set(&self, key: PropertyKey, value: Value) -> bool {
        if let ObjectKind::Array(elements) = &self.kind {
            match &key {
                PropertyKey::String(s) if &**s == "length" => {
                    return array_length(&value)
                        .map(|len| self.truncate(elements, len))
                        .is_ok();
                }
                PropertyKey::Index(i) => {
                    let mut elements = elements.write();
                    let index = *i as usize;
                    if let Some(slot) = elements.dense.get_mut(index) {
                        *slot = value;
                        return true;
                    }
                    // u32::MAX is not an array index; it stays a plain property
                    if let Some(new_len) = i.checked_add(1) {
                        elements.length = elements.length.max(new_len);
                        if index <= elements.dense.len() + MAX_DENSE_GAP {
                            elements.dense.resize(index, Value::Undefined);
                            elements.dense.push(value);
                            return true;
                        }
                    }
                }
                _ => {}
            }
        }
        self.properties.write().insert(key, value);
        true
    }

    /// `array.length = value`, raising `RangeError` for invalid lengths.
    ///
    /// On non-arrays this is an ordinary `length` property write.
    pub fn set_length(&self, value: Value) -> VmResult<()> {
        match &self.kind {
            ObjectKind::Array(elements) => {
                let len = array_length(&value)?;
                self.truncate(elements, len);
            }
            _ => {
                self.properties.write().insert(PropertyKey::string("length"), value);
            }
        }
        Ok(())
    }

    fn truncate(&self, elements: &RwLock<ArrayElements>, len: u32) {
        let mut elements = elements.write();
        elements.dense.truncate(len as usize);
        if len < elements.length {
            self.properties.write().retain(|key, _| match key {
                PropertyKey::Index(i) => *i < len || *i == u32::MAX,
                _ => true,
            });
        }
        elements.length = len;
    }

    /// Does the object (or its prototype chain) have the property
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove an own property
    pub fn delete(&self, key: &PropertyKey) -> bool {
        if let (ObjectKind::Array(elements), PropertyKey::Index(i)) = (&self.kind, key) {
            if let Some(slot) = elements.write().dense.get_mut(*i as usize) {
                *slot = Value::Undefined;
                return true;
            }
        }
        self.properties.write().remove(key).is_some()
    }

    /// Snapshot of the dense array elements (empty for non-arrays)
    pub fn elements(&self) -> Vec<Value> {
        match &self.kind {
            ObjectKind::Array(elements) => elements.read().dense().to_vec(),
            _ => Vec::new(),
        }
    }

    /// Drop all properties and the prototype link.
    ///
    /// Breaks reference cycles between intrinsics when a realm goes away.
    pub(crate) fn release(&self) {
        self.properties.write().clear();
        *self.prototype.write() = None;
    }

    /// Builtin tag used by `Object.prototype.toString`
    pub fn class_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Ordinary | ObjectKind::Symbol(_) => "Object",
            ObjectKind::Array(_) => "Array",
            ObjectKind::Date(_) => "Date",
            ObjectKind::Function(_) => "Function",
            ObjectKind::Boolean(_) => "Boolean",
            ObjectKind::Number(_) => "Number",
            ObjectKind::String(_) => "String",
        }
    }

    /// Render the object without invoking any of its methods
    pub fn display_string(&self) -> String {
        match &self.kind {
            ObjectKind::Ordinary => "[object Object]".to_string(),
            ObjectKind::Array(elements) => elements
                .read()
                .dense
                .iter()
                .map(|v| match v {
                    Value::Undefined | Value::Null => String::new(),
                    Value::Object(obj) => format!("[object {}]", obj.class_name()),
                    other => other.display_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            ObjectKind::Date(t) => format_date(*t),
            ObjectKind::Function(f) => format!("function {}() {{ [native code] }}", f.name),
            ObjectKind::Boolean(b) => b.to_string(),
            ObjectKind::Number(n) => number_to_string(*n),
            ObjectKind::String(s) => s.to_string(),
            ObjectKind::Symbol(sym) => sym.descriptive_string(),
        }
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsObject")
            .field("class", &self.class_name())
            .field("properties", &self.properties.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_keys_are_canonical() {
        assert_eq!(PropertyKey::string("0"), PropertyKey::Index(0));
        assert_eq!(PropertyKey::string("42"), PropertyKey::Index(42));
        assert!(matches!(PropertyKey::string("01"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::string("-1"), PropertyKey::String(_)));
        assert!(matches!(PropertyKey::string("4294967295"), PropertyKey::String(_)));
    }

    #[test]
    fn test_prototype_chain_lookup() {
        let proto = JsObject::new(None, ObjectKind::Ordinary);
        proto.set(PropertyKey::string("inherited"), Value::number(1.0));
        let obj = JsObject::new(Some(proto.clone()), ObjectKind::Ordinary);
        obj.set(PropertyKey::string("own"), Value::number(2.0));

        assert_eq!(obj.get(&"inherited".into()).and_then(|v| v.as_number()), Some(1.0));
        assert_eq!(obj.get(&"own".into()).and_then(|v| v.as_number()), Some(2.0));
        assert!(obj.get_own(&"inherited".into()).is_none());
        assert!(obj.get(&"missing".into()).is_none());
    }

    #[test]
    fn test_symbol_keys_compare_by_identity() {
        let a = Symbol::new(Some("k".into()));
        let b = Symbol::new(Some("k".into()));
        let obj = JsObject::new(None, ObjectKind::Ordinary);
        obj.set(PropertyKey::symbol(a.clone()), Value::boolean(true));

        assert!(obj.has_property(&PropertyKey::symbol(a)));
        assert!(!obj.has_property(&PropertyKey::symbol(b)));
    }

    fn array(values: Vec<Value>) -> Arc<JsObject> {
        JsObject::new(None, ObjectKind::Array(RwLock::new(ArrayElements::new(values))))
    }

    fn length_of(obj: &JsObject) -> Option<f64> {
        obj.get(&"length".into()).and_then(|v| v.as_number())
    }

    #[test]
    fn test_array_elements_and_length() {
        let arr = array(vec![Value::number(1.0), Value::number(2.0)]);
        assert_eq!(arr.get(&"length".into()).and_then(|v| v.as_number()), Some(2.0));
        arr.set(PropertyKey::index(3), Value::string("x"));
        assert_eq!(arr.elements().len(), 4);
        assert!(arr.get(&PropertyKey::index(2)).is_some_and(|v| v.is_undefined()));
        assert_eq!(arr.display_string(), "1,2,,x");
    }

    #[test]
    fn test_array_length_rejects_invalid_values() {
        let arr = array(vec![Value::number(1.0)]);
        for bad in [1e20, 4294967296.0, -1.0, 1.5, f64::NAN] {
            assert!(!arr.set("length".into(), Value::number(bad)));
            let err = arr.set_length(Value::number(bad)).unwrap_err();
            assert!(matches!(err, VmError::RangeError(ref msg) if msg == "Invalid array length"));
        }
        assert!(!arr.set("length".into(), Value::string("3")));
        assert_eq!(length_of(&arr), Some(1.0));

        assert!(arr.set("length".into(), Value::number(4294967295.0)));
        assert_eq!(length_of(&arr), Some(4294967295.0));
        assert_eq!(arr.elements().len(), 1);
    }

    #[test]
    fn test_far_index_writes_stay_sparse() {
        let arr = array(vec![Value::number(1.0)]);
        assert!(arr.set(PropertyKey::index(4294967294), Value::string("far")));
        assert_eq!(length_of(&arr), Some(4294967295.0));
        assert_eq!(arr.elements().len(), 1);
        assert_eq!(
            arr.get(&PropertyKey::index(4294967294)).and_then(|v| v.as_str().map(str::to_string)),
            Some("far".to_string())
        );

        // 2^32 - 1 is not an array index
        arr.set(PropertyKey::index(u32::MAX), Value::boolean(true));
        assert_eq!(length_of(&arr), Some(4294967295.0));

        arr.set_length(Value::number(2.0)).unwrap();
        assert!(arr.get(&PropertyKey::index(4294967294)).is_none());
        assert_eq!(length_of(&arr), Some(2.0));
    }

    #[test]
    fn test_shrinking_length_truncates_dense_elements() {
        let arr = array(vec![Value::number(1.0), Value::number(2.0), Value::number(3.0)]);
        arr.set_length(Value::number(1.0)).unwrap();
        assert_eq!(arr.elements().len(), 1);
        assert!(arr.get(&PropertyKey::index(2)).is_none());
        arr.set(PropertyKey::index(2), Value::number(9.0));
        assert_eq!(length_of(&arr), Some(3.0));
        assert_eq!(arr.display_string(), "1,,9");
    }
}
