//! Object.prototype conversion methods

use std::sync::Arc;

use crate::config::SymbolSupport;
use crate::context::{ConversionHost, NativeContext};
use crate::error::VmResult;
use crate::intrinsics::well_known;
use crate::intrinsics_impl::helpers::define_method;
use crate::object::{JsObject, PropertyKey};
use crate::value::Value;

/// Wire Object.prototype methods
pub fn init_object_prototype(object_proto: &Arc<JsObject>, fn_proto: &Arc<JsObject>) {
    define_method(object_proto, fn_proto, "toString".into(), "toString", object_to_string);
    define_method(object_proto, fn_proto, "valueOf".into(), "valueOf", object_value_of);
}

/// `Object.prototype.toString()`: `"[object <Tag>]"`
pub(crate) fn object_to_string(
    this_val: &Value,
    _args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let obj = match this_val {
        Value::Undefined => return Ok(Value::string("[object Undefined]")),
        Value::Null => return Ok(Value::string("[object Null]")),
        _ => ncx.realm().to_object(this_val)?,
    };

    let tag = if ncx.realm().config().symbols == SymbolSupport::None {
        None
    } else {
        obj.get(&PropertyKey::symbol(well_known::to_string_tag_symbol()))
            .and_then(|v| v.as_str().map(str::to_string))
    };
    let tag = tag.unwrap_or_else(|| obj.class_name().to_string());
    Ok(Value::string(format!("[object {tag}]")))
}

/// `Object.prototype.valueOf()`: `ToObject(this)`
fn object_value_of(
    this_val: &Value,
    _args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::object(ncx.realm().to_object(this_val)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realm::Realm;

    #[test]
    fn test_object_to_string_tags() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let cases = [
            (Value::undefined(), "[object Undefined]"),
            (Value::null(), "[object Null]"),
            (Value::object(realm.new_object()), "[object Object]"),
            (Value::object(realm.new_array(vec![])), "[object Array]"),
            (Value::object(realm.new_date(0.0)), "[object Date]"),
            (Value::number(1.0), "[object Number]"),
            (realm.new_symbol(None), "[object Symbol]"),
        ];
        for (value, expected) in cases {
            let result = object_to_string(&value, &[], &mut ncx).unwrap();
            assert_eq!(result.as_str(), Some(expected));
        }
    }

    #[test]
    fn test_custom_to_string_tag() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let obj = realm.new_object();
        obj.set(
            PropertyKey::symbol(well_known::to_string_tag_symbol()),
            Value::string("Widget"),
        );
        let result = object_to_string(&Value::object(obj), &[], &mut ncx).unwrap();
        assert_eq!(result.as_str(), Some("[object Widget]"));
    }

    #[test]
    fn test_value_of_returns_receiver() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let obj = realm.new_object();
        let result = object_value_of(&Value::object(obj.clone()), &[], &mut ncx).unwrap();
        assert!(result.as_object().is_some_and(|o| Arc::ptr_eq(o, &obj)));
        assert!(object_value_of(&Value::null(), &[], &mut ncx).is_err());
    }
}
