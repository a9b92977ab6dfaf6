//! Number constructor and Number.prototype

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::helpers::{define_method, native_function};
use crate::number::number_to_string;
use crate::object::{JsObject, ObjectKind};
use crate::value::Value;

fn this_number_value(this_val: &Value) -> VmResult<f64> {
    match this_val {
        Value::Number(n) => Some(*n),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::Number(n) => Some(*n),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| VmError::type_error("Number.prototype method called on incompatible receiver"))
}

/// Wire Number.prototype methods
pub fn init_number_prototype(number_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) {
    define_method(number_proto, fn_proto, "toString".into(), "toString", |this_val, _args, _ncx| {
        Ok(Value::string(number_to_string(this_number_value(this_val)?)))
    });
    define_method(number_proto, fn_proto, "valueOf".into(), "valueOf", |this_val, _args, _ncx| {
        Ok(Value::number(this_number_value(this_val)?))
    });
}

/// `Number(value)`: `ToNumber`, `+0` with no argument
fn number_constructor(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    match args.first() {
        None => Ok(Value::number(0.0)),
        Some(value) => Ok(Value::number(ncx.to_number_value(value)?)),
    }
}

/// Create the `Number` constructor
pub fn create_number_constructor(number_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) -> Value {
    let ctor = native_function(fn_proto, "Number", number_constructor);
    if let Some(obj) = ctor.as_object() {
        obj.set("prototype".into(), Value::object(number_proto.clone()));
    }
    ctor
}
