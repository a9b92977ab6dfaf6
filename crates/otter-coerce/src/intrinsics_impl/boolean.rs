//! Boolean.prototype methods

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::helpers::define_method;
use crate::object::{JsObject, ObjectKind};
use crate::value::Value;

fn this_boolean_value(this_val: &Value) -> VmResult<bool> {
    match this_val {
        Value::Boolean(b) => Some(*b),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::Boolean(b) => Some(*b),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| VmError::type_error("Boolean.prototype method called on incompatible receiver"))
}

/// Wire Boolean.prototype methods
pub fn init_boolean_prototype(boolean_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) {
    define_method(boolean_proto, fn_proto, "toString".into(), "toString", |this_val, _args, _ncx| {
        Ok(Value::string(this_boolean_value(this_val)?.to_string()))
    });
    define_method(boolean_proto, fn_proto, "valueOf".into(), "valueOf", boolean_value_of);
}

fn boolean_value_of(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::boolean(this_boolean_value(this_val)?))
}
