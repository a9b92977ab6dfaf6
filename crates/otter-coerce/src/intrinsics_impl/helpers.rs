//! Helper functions for intrinsics (method installation, SameValue)

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::VmResult;
use crate::object::{JsObject, NativeFunction, ObjectKind, PropertyKey};
use crate::value::Value;

/// Allocate a native function object whose prototype is `fn_proto`.
pub fn native_function<F>(fn_proto: &Arc<JsObject>, name: &str, f: F) -> Value
where
    F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
{
    Value::object(JsObject::new(
        Some(fn_proto.clone()),
        ObjectKind::Function(NativeFunction {
            name: name.to_string(),
            func: Arc::new(f),
        }),
    ))
}

/// Install a native method on `target` and return the function value.
pub fn define_method<F>(
    target: &Arc<JsObject>,
    fn_proto: &Arc<JsObject>,
    key: PropertyKey,
    name: &str,
    f: F,
) -> Value
where
    F: Fn(&Value, &[Value], &mut NativeContext<'_>) -> VmResult<Value> + Send + Sync + 'static,
{
    let func = native_function(fn_proto, name, f);
    target.set(key, func.clone());
    func
}

/// SameValue comparison (ES2026 §7.2.10).
/// Like strict equality but NaN === NaN and +0 !== -0.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x.is_nan() && y.is_nan() {
                return true;
            }
            if *x == 0.0 && *y == 0.0 {
                return x.is_sign_positive() == y.is_sign_positive();
            }
            x == y
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x.id == y.id,
        (Value::Object(x), Value::Object(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}
