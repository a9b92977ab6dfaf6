//! Array.prototype.join / toString

use std::sync::Arc;

use crate::context::{ConversionHost, NativeContext};
use crate::error::{VmError, VmResult};
use crate::intrinsics_impl::helpers::define_method;
use crate::intrinsics_impl::object::object_to_string;
use crate::object::{JsObject, PropertyKey};
use crate::value::Value;

/// Wire Array.prototype methods
pub fn init_array_prototype(array_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) {
    define_method(array_proto, fn_proto, "join".into(), "join", array_join);
    define_method(array_proto, fn_proto, "toString".into(), "toString", array_to_string);
}

/// Longest string `join` will build (V8's `String::kMaxLength`)
const MAX_STRING_LENGTH: usize = (1 << 29) - 24;

fn invalid_string_length() -> VmError {
    VmError::range_error("Invalid string length")
}

/// `LengthOfArrayLike(obj)`
fn length_of_array_like(ncx: &mut NativeContext<'_>, obj: &Arc<JsObject>) -> VmResult<u64> {
    let len = ncx.to_number_value(&obj.get_or_undefined(&"length".into()))?;
    if len.is_nan() || len <= 0.0 {
        return Ok(0);
    }
    // ToLength clamps to 2^53 - 1
    Ok(len.trunc().min(9007199254740991.0) as u64)
}

fn array_join(this_val: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let obj = ncx.realm().to_object(this_val)?;
    let len = length_of_array_like(ncx, &obj)?;
    let separator = match args.first() {
        None | Some(Value::Undefined) => ",".to_string(),
        Some(sep) => ncx.to_string_value(sep)?,
    };

    // Every element past the first costs at least one separator, and an
    // index beyond u32 range can never hold an element.
    let separators = (len.saturating_sub(1) as usize).saturating_mul(separator.len());
    if len > u64::from(u32::MAX) || separators > MAX_STRING_LENGTH {
        return Err(invalid_string_length());
    }

    let mut out = String::new();
    for i in 0..len as u32 {
        if i > 0 {
            out.push_str(&separator);
        }
        let element = obj.get_or_undefined(&PropertyKey::index(i));
        if !element.is_nullish() {
            out.push_str(&ncx.to_string_value(&element)?);
        }
        if out.len() > MAX_STRING_LENGTH {
            return Err(invalid_string_length());
        }
    }
    Ok(Value::string(out))
}

/// `Array.prototype.toString()`: `this.join()`, falling back to
/// `Object.prototype.toString` when `join` is not callable.
fn array_to_string(
    this_val: &Value,
    _args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = ncx.realm().to_object(this_val)?;
    let join = obj.get_or_undefined(&"join".into());
    if join.is_callable() {
        ncx.call(&join, &Value::object(obj), &[])
    } else {
        object_to_string(this_val, &[], ncx)
    }
}
