//! Symbol constructor and Symbol.prototype

use std::sync::Arc;

use crate::config::{RealmConfig, SymbolSupport};
use crate::context::{ConversionHost, NativeContext};
use crate::error::{VmError, VmResult};
use crate::intrinsics::well_known;
use crate::intrinsics_impl::helpers::{define_method, native_function};
use crate::object::{JsObject, ObjectKind, PropertyKey};
use crate::value::{Symbol, Value};

/// `thisSymbolValue(value)`: a symbol primitive or the symbol a wrapper holds
fn this_symbol_value(this_val: &Value, method: &str) -> VmResult<Arc<Symbol>> {
    match this_val {
        Value::Symbol(sym) => Some(sym.clone()),
        Value::Object(obj) => match obj.kind() {
            ObjectKind::Symbol(sym) => Some(sym.clone()),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| {
        VmError::type_error(format!(
            "Symbol.prototype.{method} requires that 'this' be a Symbol"
        ))
    })
}

/// Wire Symbol.prototype methods; returns `Symbol.prototype.valueOf`
pub fn init_symbol_prototype(
    symbol_proto: &Arc<JsObject>,
    fn_proto: &Arc<JsObject>,
    config: &RealmConfig,
) -> Value {
    define_method(symbol_proto, fn_proto, "toString".into(), "toString", symbol_to_string);
    let value_of =
        define_method(symbol_proto, fn_proto, "valueOf".into(), "valueOf", symbol_value_of);

    if config.symbols != SymbolSupport::None {
        symbol_proto.set(
            PropertyKey::symbol(well_known::to_string_tag_symbol()),
            Value::string("Symbol"),
        );
    }
    if config.symbols == SymbolSupport::Full {
        define_method(
            symbol_proto,
            fn_proto,
            PropertyKey::symbol(well_known::to_primitive_symbol()),
            "[Symbol.toPrimitive]",
            symbol_to_primitive,
        );
    }
    value_of
}

fn symbol_to_string(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let sym = this_symbol_value(this_val, "toString")?;
    Ok(Value::string(sym.descriptive_string()))
}

fn symbol_value_of(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::symbol(this_symbol_value(this_val, "valueOf")?))
}

fn symbol_to_primitive(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::symbol(this_symbol_value(this_val, "[Symbol.toPrimitive]")?))
}

/// `Symbol([description])`
fn symbol_constructor(
    _this: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    let description = match args.first() {
        None | Some(Value::Undefined) => None,
        Some(desc) => Some(ncx.to_string_value(desc)?),
    };
    Ok(Value::symbol(Symbol::new(description)))
}

/// `Symbol.for(key)`
fn symbol_for(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let key_val = args.first().cloned().unwrap_or(Value::undefined());
    let key = ncx.to_string_value(&key_val)?;
    Ok(Value::symbol(ncx.realm().symbol_registry().get_or_insert(&key)))
}

/// `Symbol.keyFor(sym)`
fn symbol_key_for(_this: &Value, args: &[Value], ncx: &mut NativeContext<'_>) -> VmResult<Value> {
    let arg = args.first().cloned().unwrap_or(Value::undefined());
    let sym = arg
        .as_symbol()
        .ok_or_else(|| VmError::type_error(format!("{} is not a symbol", arg.display_string())))?;
    Ok(ncx
        .realm()
        .symbol_registry()
        .key_for(sym)
        .map(Value::from)
        .unwrap_or(Value::undefined()))
}

/// Create the `Symbol` constructor with its statics
pub fn create_symbol_constructor(
    symbol_proto: &Arc<JsObject>,
    fn_proto: &Arc<JsObject>,
    config: &RealmConfig,
) -> Value {
    let ctor = native_function(fn_proto, "Symbol", symbol_constructor);
    if let Some(ctor_obj) = ctor.as_object() {
        install_symbol_statics(ctor_obj, symbol_proto, fn_proto, config);
    }
    ctor
}

fn install_symbol_statics(
    ctor_obj: &Arc<JsObject>,
    symbol_proto: &Arc<JsObject>,
    fn_proto: &Arc<JsObject>,
    config: &RealmConfig,
) {
    ctor_obj.set("prototype".into(), Value::object(symbol_proto.clone()));
    define_method(ctor_obj, fn_proto, "for".into(), "for", symbol_for);
    define_method(ctor_obj, fn_proto, "keyFor".into(), "keyFor", symbol_key_for);

    if config.symbols != SymbolSupport::None {
        ctor_obj.set("iterator".into(), Value::symbol(well_known::iterator_symbol()));
        ctor_obj.set(
            "toStringTag".into(),
            Value::symbol(well_known::to_string_tag_symbol()),
        );
    }
    if config.symbols == SymbolSupport::Full {
        ctor_obj.set(
            "toPrimitive".into(),
            Value::symbol(well_known::to_primitive_symbol()),
        );
    }
}
