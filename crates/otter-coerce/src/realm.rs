//! Realm: intrinsics, configuration and object factories.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::RealmConfig;
use crate::context::{ConversionHost, NativeContext};
use crate::convert::{self, PreferredType};
use crate::error::{VmError, VmResult};
use crate::intrinsics::Intrinsics;
use crate::intrinsics_impl::date::time_clip;
use crate::intrinsics_impl::helpers::{native_function, same_value};
use crate::object::{ArrayElements, JsObject, ObjectKind};
use crate::symbol_registry::SymbolRegistry;
use crate::value::{Symbol, Value};

/// A realm owns one set of intrinsics.
///
/// The `String` and `Number` constructors of a realm are the preferred-type
/// markers `to_primitive` recognizes; markers from another realm are not.
pub struct Realm {
    config: RealmConfig,
    intrinsics: Intrinsics,
    symbol_registry: SymbolRegistry,
}

impl Realm {
    /// Create a realm with the default configuration
    pub fn new() -> Self {
        Self::with_config(RealmConfig::default())
    }

    /// Create a realm with the given configuration.
    ///
    /// A configuration that fails [`RealmConfig::validate`] is repaired
    /// rather than rejected: a zero call depth becomes 1.
    pub fn with_config(mut config: RealmConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "invalid realm config, clamping max_native_depth to 1");
            config.max_native_depth = config.max_native_depth.max(1);
        }
        let intrinsics = Intrinsics::new(&config);
        tracing::debug!(symbols = ?config.symbols, "realm created");
        Self {
            config,
            intrinsics,
            symbol_registry: SymbolRegistry::new(),
        }
    }

    /// Realm configuration
    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    /// Intrinsic objects
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// `Symbol.for` registry
    pub fn symbol_registry(&self) -> &SymbolRegistry {
        &self.symbol_registry
    }

    /// The `String` constructor ("prefer string" marker)
    pub fn string_constructor(&self) -> &Value {
        &self.intrinsics.string_constructor
    }

    /// The `Number` constructor ("prefer number" marker)
    pub fn number_constructor(&self) -> &Value {
        &self.intrinsics.number_constructor
    }

    /// The `Symbol` constructor
    pub fn symbol_constructor(&self) -> &Value {
        &self.intrinsics.symbol_constructor
    }

    /// Is `value` this realm's `String` constructor
    pub fn is_string_constructor(&self, value: &Value) -> bool {
        same_value(value, &self.intrinsics.string_constructor)
    }

    /// Is `value` this realm's `Number` constructor
    pub fn is_number_constructor(&self, value: &Value) -> bool {
        same_value(value, &self.intrinsics.number_constructor)
    }

    /// A fresh native call context
    pub fn context(&self) -> NativeContext<'_> {
        NativeContext::new(self)
    }

    /// New plain object inheriting from `Object.prototype`
    pub fn new_object(&self) -> Arc<JsObject> {
        JsObject::new(
            Some(self.intrinsics.object_prototype.clone()),
            ObjectKind::Ordinary,
        )
    }

    /// New array
    pub fn new_array(&self, elements: Vec<Value>) -> Arc<JsObject> {
        JsObject::new(
            Some(self.intrinsics.array_prototype.clone()),
            ObjectKind::Array(RwLock::new(ArrayElements::new(elements))),
        )
    }

    /// New Date with the given time value (clipped; NaN for invalid dates)
    pub fn new_date(&self, time: f64) -> Arc<JsObject> {
        JsObject::new(
            Some(self.intrinsics.date_prototype.clone()),
            ObjectKind::Date(time_clip(time)),
        )
    }

    /// New native function object
    pub fn new_function<F>(&self, name: &str, f: F) -> Value
    where
        F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value>
            + Send
            + Sync
            + 'static,
    {
        native_function(&self.intrinsics.function_prototype, name, f)
    }

    /// New unique symbol
    pub fn new_symbol(&self, description: Option<&str>) -> Value {
        Value::symbol(Symbol::new(description.map(str::to_string)))
    }

    /// `Symbol.for(key)`
    pub fn symbol_for(&self, key: &str) -> Value {
        Value::symbol(self.symbol_registry.get_or_insert(key))
    }

    /// Prototype used for property lookups on a primitive
    pub fn prototype_for(&self, value: &Value) -> Option<Arc<JsObject>> {
        let proto = match value {
            Value::Undefined | Value::Null => return None,
            Value::Boolean(_) => &self.intrinsics.boolean_prototype,
            Value::Number(_) => &self.intrinsics.number_prototype,
            Value::String(_) => &self.intrinsics.string_prototype,
            Value::Symbol(_) => &self.intrinsics.symbol_prototype,
            Value::Object(obj) => return obj.prototype(),
        };
        Some(proto.clone())
    }

    /// `ToObject(value)`: wrap primitives, pass objects through
    pub fn to_object(&self, value: &Value) -> VmResult<Arc<JsObject>> {
        let (proto, kind) = match value {
            Value::Object(obj) => return Ok(obj.clone()),
            Value::Undefined | Value::Null => {
                return Err(VmError::type_error(
                    "Cannot convert undefined or null to object",
                ));
            }
            Value::Boolean(b) => (&self.intrinsics.boolean_prototype, ObjectKind::Boolean(*b)),
            Value::Number(n) => (&self.intrinsics.number_prototype, ObjectKind::Number(*n)),
            Value::String(s) => (&self.intrinsics.string_prototype, ObjectKind::String(s.clone())),
            Value::Symbol(sym) => (
                &self.intrinsics.symbol_prototype,
                ObjectKind::Symbol(sym.clone()),
            ),
        };
        Ok(JsObject::new(Some(proto.clone()), kind))
    }

    /// `ToPrimitive(input, preferredType)` with a marker value
    pub fn to_primitive(&self, input: &Value, preferred_type: Option<&Value>) -> VmResult<Value> {
        convert::to_primitive(&mut self.context(), input, preferred_type)
    }

    /// `ToPrimitive(input, preferredType)` with a typed preference
    pub fn to_primitive_with(
        &self,
        input: &Value,
        preferred_type: Option<PreferredType>,
    ) -> VmResult<Value> {
        convert::to_primitive_with(&mut self.context(), input, preferred_type)
    }

    /// Call a function with a fresh context
    pub fn call(&self, func: &Value, this: &Value, args: &[Value]) -> VmResult<Value> {
        self.context().call(func, this, args)
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Realm {
    fn drop(&mut self) {
        self.intrinsics.release();
    }
}
