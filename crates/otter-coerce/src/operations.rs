//! Abstract operations layered on `ToPrimitive`: `ToString`, `ToNumber`,
//! `ToPropertyKey`.

use crate::context::ConversionHost;
use crate::convert::{PreferredType, to_primitive_with};
use crate::error::{VmError, VmResult};
use crate::number::{number_to_string, string_to_number};
use crate::object::PropertyKey;
use crate::value::Value;

/// `ToString(value)`
pub fn to_string<H: ConversionHost + ?Sized>(host: &mut H, value: &Value) -> VmResult<String> {
    match value {
        Value::Undefined => Ok("undefined".to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(number_to_string(*n)),
        Value::String(s) => Ok(s.to_string()),
        Value::Symbol(_) => Err(VmError::type_error(
            "Cannot convert a Symbol value to a string",
        )),
        Value::Object(_) => {
            let prim = to_primitive_with(host, value, Some(PreferredType::String))?;
            to_string(host, &prim)
        }
    }
}

/// `ToNumber(value)`
pub fn to_number<H: ConversionHost + ?Sized>(host: &mut H, value: &Value) -> VmResult<f64> {
    match value {
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Ok(*n),
        Value::String(s) => Ok(string_to_number(s)),
        Value::Symbol(_) => Err(VmError::type_error(
            "Cannot convert a Symbol value to a number",
        )),
        Value::Object(_) => {
            let prim = to_primitive_with(host, value, Some(PreferredType::Number))?;
            to_number(host, &prim)
        }
    }
}

/// `ToPropertyKey(value)`
pub fn to_property_key<H: ConversionHost + ?Sized>(
    host: &mut H,
    value: &Value,
) -> VmResult<PropertyKey> {
    let key = to_primitive_with(host, value, Some(PreferredType::String))?;
    match key {
        Value::Symbol(sym) => Ok(PropertyKey::symbol(sym)),
        other => Ok(PropertyKey::string(&to_string(host, &other)?)),
    }
}
