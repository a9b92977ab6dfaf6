//! String constructor and String.prototype

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::helpers::{define_method, native_function};
use crate::object::{JsObject, ObjectKind};
use crate::value::Value;

fn this_string_value(this_val: &Value) -> VmResult<Arc<str>> {
    match this_val {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::String(s) => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| VmError::type_error("String.prototype method called on incompatible receiver"))
}

fn string_value_of(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::String(this_string_value(this_val)?))
}

/// Wire String.prototype methods
pub fn init_string_prototype(string_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) {
    define_method(string_proto, fn_proto, "toString".into(), "toString", string_value_of);
    define_method(string_proto, fn_proto, "valueOf".into(), "valueOf", string_value_of);
}

/// `String(value)`: like `ToString`, but symbols render as `Symbol(desc)`
fn string_constructor(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    match args.first() {
        None => Ok(Value::string("")),
        Some(Value::Symbol(sym)) => Ok(Value::string(sym.descriptive_string())),
        Some(value) => Ok(Value::string(ncx.to_string_value(value)?)),
    }
}

/// Create the `String` constructor
pub fn create_string_constructor(string_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) -> Value {
    let ctor = native_function(fn_proto, "String", string_constructor);
    if let Some(obj) = ctor.as_object() {
        obj.set("prototype".into(), Value::object(string_proto.clone()));
    }
    ctor
}
