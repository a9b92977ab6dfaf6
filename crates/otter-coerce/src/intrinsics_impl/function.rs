//! Function.prototype.toString

use std::sync::Arc;

use crate::context::NativeContext;
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::helpers::define_method;
use crate::object::{JsObject, NativeFunction};
use crate::value::Value;

/// The internal slot of `Function.prototype` itself (returns undefined)
pub(crate) fn empty_function() -> NativeFunction {
    NativeFunction {
        name: String::new(),
        func: Arc::new(
            |_this: &Value, _args: &[Value], _ncx: &mut NativeContext<'_>| Ok(Value::undefined()),
        ),
    }
}

/// Wire Function.prototype methods
pub fn init_function_prototype(fn_proto: &Arc<JsObject>) {
    define_method(fn_proto, fn_proto, "toString".into(), "toString", function_to_string);
}

fn function_to_string(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let f = this_val
        .as_object()
        .and_then(|obj| obj.as_function())
        .ok_or_else(|| {
            VmError::type_error("Function.prototype.toString requires that 'this' be a Function")
        })?;
    Ok(Value::string(format!(
        "function {}() {{ [native code] }}",
        f.name
    )))
}
