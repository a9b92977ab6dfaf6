//! JavaScript values
//!
//! A `Value` is either a primitive (undefined, null, boolean, number, string,
//! symbol) or a reference to a heap object. Primitives are plain data and
//! keep their identity when cloned: numbers carry their exact bits (NaN and
//! `-0` included) and symbols are shared through `Arc`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::intrinsics::well_known;
use crate::number::number_to_string;
use crate::object::{JsObject, ObjectKind};

/// A JavaScript value
#[derive(Clone)]
pub enum Value {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// Boolean primitive
    Boolean(bool),
    /// Number primitive (IEEE 754 double)
    Number(f64),
    /// String primitive
    String(Arc<str>),
    /// Symbol primitive
    Symbol(Arc<Symbol>),
    /// Object reference
    Object(Arc<JsObject>),
}

/// A JavaScript Symbol
#[derive(Debug)]
pub struct Symbol {
    /// Symbol description
    pub description: Option<String>,
    /// Unique ID
    pub id: u64,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(well_known::FIRST_USER_ID);

impl Symbol {
    /// Create a fresh symbol with a unique identity
    pub fn new(description: Option<String>) -> Arc<Self> {
        let id = NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed);
        Arc::new(Self { description, id })
    }

    pub(crate) fn with_id(id: u64, description: &str) -> Arc<Self> {
        Arc::new(Self {
            description: Some(description.to_string()),
            id,
        })
    }

    /// `SymbolDescriptiveString`: `Symbol(desc)`
    pub fn descriptive_string(&self) -> String {
        format!("Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

impl Value {
    /// Create undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// Create null value
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create boolean value
    #[inline]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Create number value
    #[inline]
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create NaN value explicitly
    #[inline]
    pub const fn nan() -> Self {
        Self::Number(f64::NAN)
    }

    /// Create string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self::String(s.into())
    }

    /// Create symbol value
    pub fn symbol(sym: Arc<Symbol>) -> Self {
        Self::Symbol(sym)
    }

    /// Create object value
    pub fn object(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }

    /// Is `undefined`
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Is `null`
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Is `null` or `undefined`
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Is a boolean primitive
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Is a number primitive
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Is a string primitive
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Is a symbol primitive
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Is an object (including functions)
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Anything that is not an object
    #[inline]
    pub fn is_primitive(&self) -> bool {
        !self.is_object()
    }

    /// Is a callable object
    pub fn is_callable(&self) -> bool {
        self.as_object().is_some_and(|obj| obj.is_callable())
    }

    /// Is an object carrying a time value
    pub fn is_date_object(&self) -> bool {
        self.as_object()
            .is_some_and(|obj| matches!(obj.kind(), ObjectKind::Date(_)))
    }

    /// A symbol primitive or a Symbol wrapper object
    pub fn is_symbol_like(&self) -> bool {
        match self {
            Self::Symbol(_) => true,
            Self::Object(obj) => matches!(obj.kind(), ObjectKind::Symbol(_)),
            _ => false,
        }
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as symbol
    pub fn as_symbol(&self) -> Option<&Arc<Symbol>> {
        match self {
            Self::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&Arc<JsObject>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// `typeof` result
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "object",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Object(obj) if obj.is_callable() => "function",
            Self::Object(_) => "object",
        }
    }

    /// Render the value without running any user code.
    ///
    /// Used for error messages; objects never have their conversion
    /// methods invoked here.
    pub fn display_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Number(n) => number_to_string(*n),
            Self::String(s) => s.to_string(),
            Self::Symbol(sym) => sym.descriptive_string(),
            Self::Object(obj) => obj.display_string(),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", number_to_string(*n)),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(sym) => write!(f, "{}", sym.descriptive_string()),
            Self::Object(obj) => write!(f, "Object({})", obj.class_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<Arc<JsObject>> for Value {
    fn from(obj: Arc<JsObject>) -> Self {
        Self::Object(obj)
    }
}
