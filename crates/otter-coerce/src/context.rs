//! Native call context
//!
//! Conversions never call functions directly; they go through a
//! `ConversionHost`, which owns the realm reference and the invocation
//! primitive. `NativeContext` is the standard host.

use crate::convert::{self, PreferredType};
use crate::error::{VmError, VmResult};
use crate::operations;
use crate::realm::Realm;
use crate::value::Value;

/// Capabilities a conversion needs from its environment.
pub trait ConversionHost {
    /// The realm providing intrinsics and configuration
    fn realm(&self) -> &Realm;

    /// Call `func` with receiver `this` and `args`.
    ///
    /// Errors raised by the callee propagate unchanged.
    fn call(&mut self, func: &Value, this: &Value, args: &[Value]) -> VmResult<Value>;
}

/// Context handed to native functions.
pub struct NativeContext<'a> {
    realm: &'a Realm,
    depth: usize,
}

impl<'a> NativeContext<'a> {
    /// Create a context at depth zero
    pub fn new(realm: &'a Realm) -> Self {
        Self { realm, depth: 0 }
    }

    /// Current native call nesting
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `ToPrimitive(value, preferredType)`
    pub fn to_primitive(
        &mut self,
        value: &Value,
        preferred_type: Option<PreferredType>,
    ) -> VmResult<Value> {
        convert::to_primitive_with(self, value, preferred_type)
    }

    /// `ToString(value)`
    pub fn to_string_value(&mut self, value: &Value) -> VmResult<String> {
        operations::to_string(self, value)
    }

    /// `ToNumber(value)`
    pub fn to_number_value(&mut self, value: &Value) -> VmResult<f64> {
        operations::to_number(self, value)
    }
}

impl ConversionHost for NativeContext<'_> {
    fn realm(&self) -> &Realm {
        self.realm
    }

    fn call(&mut self, func: &Value, this: &Value, args: &[Value]) -> VmResult<Value> {
        let native = func
            .as_object()
            .and_then(|obj| obj.as_function())
            .map(|f| f.func.clone())
            .ok_or_else(|| {
                VmError::type_error(format!("{} is not a function", func.display_string()))
            })?;

        if self.depth >= self.realm.config().max_native_depth {
            tracing::debug!(depth = self.depth, "native call depth exceeded");
            return Err(VmError::StackOverflow);
        }

        self.depth += 1;
        let result = native(this, args, self);
        self.depth -= 1;
        result
    }
}
