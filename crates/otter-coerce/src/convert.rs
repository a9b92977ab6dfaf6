//! `ToPrimitive` and `OrdinaryToPrimitive` (ECMA-262 §7.1.1).
//!
//! When `ToPrimitive` runs without a hint it generally behaves as if the
//! hint were Number. Objects may override this through `@@toPrimitive`;
//! of the built-ins only Date and Symbol objects do. Date objects treat a
//! missing hint as String.
//!
//! All calls into user code go through a [`ConversionHost`], so the same
//! algorithm serves direct native calls and injected call helpers.

use tracing::{debug, trace};

use crate::config::SymbolSupport;
use crate::context::ConversionHost;
use crate::error::{VmError, VmResult};
use crate::intrinsics::well_known;
use crate::object::PropertyKey;
use crate::realm::Realm;
use crate::value::Value;

/// Conversion hint passed to `@@toPrimitive` and used to order methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    /// No preference
    Default,
    /// Prefer a number
    Number,
    /// Prefer a string
    String,
}

impl Hint {
    /// The hint string handed to conversion hooks
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed preferred type for Rust callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// Prefer a string (`String` constructor marker)
    String,
    /// Prefer a number (`Number` constructor marker)
    Number,
}

impl PreferredType {
    /// The hint this preference selects
    pub const fn hint(self) -> Hint {
        match self {
            Self::String => Hint::String,
            Self::Number => Hint::Number,
        }
    }
}

const TO_STRING_ORDER: [&str; 2] = ["toString", "valueOf"];
const TO_NUMBER_ORDER: [&str; 2] = ["valueOf", "toString"];

/// Exotic conversion capability found on a value
#[derive(Debug, Clone)]
pub enum ExoticMethod {
    /// A callable `@@toPrimitive` property
    UserHook(Value),
    /// `Symbol.prototype.valueOf`, for runtimes without `@@toPrimitive`
    BuiltinSymbolValueOf,
}

/// Map a preferred-type marker to a hint.
///
/// `None` means no marker was supplied. Only the realm's `String` and
/// `Number` constructors are recognized; anything else yields `Default`.
pub fn resolve_hint(realm: &Realm, preferred_type: Option<&Value>) -> Hint {
    match preferred_type {
        Some(marker) if realm.is_string_constructor(marker) => Hint::String,
        Some(marker) if realm.is_number_constructor(marker) => Hint::Number,
        _ => Hint::Default,
    }
}

/// `GetV(value, key)`: property lookup, primitives read through their
/// wrapper prototype.
pub fn get_property(realm: &Realm, value: &Value, key: &PropertyKey) -> VmResult<Value> {
    match value {
        Value::Object(obj) => Ok(obj.get_or_undefined(key)),
        Value::Undefined | Value::Null => Err(VmError::type_error(format!(
            "Cannot read properties of {} (reading '{}')",
            value.display_string(),
            key
        ))),
        _ => Ok(realm
            .prototype_for(value)
            .map(|proto| proto.get_or_undefined(key))
            .unwrap_or(Value::Undefined)),
    }
}

/// `GetMethod(value, key)`: `None` for null/undefined, error if present but
/// not callable.
pub fn get_method(realm: &Realm, value: &Value, key: &PropertyKey) -> VmResult<Option<Value>> {
    let func = get_property(realm, value, key)?;
    if func.is_nullish() {
        return Ok(None);
    }
    if !func.is_callable() {
        return Err(VmError::type_error(format!(
            "{} returned for property {} of object {} is not a function",
            func.display_string(),
            key,
            value.display_string()
        )));
    }
    Ok(Some(func))
}

/// Look up the exotic conversion capability of `value`.
pub fn find_exotic_method(realm: &Realm, value: &Value) -> VmResult<Option<ExoticMethod>> {
    match realm.config().symbols {
        SymbolSupport::Full => {
            let key = PropertyKey::symbol(well_known::to_primitive_symbol());
            Ok(get_method(realm, value, &key)?.map(ExoticMethod::UserHook))
        }
        SymbolSupport::Legacy if value.is_symbol_like() => {
            Ok(Some(ExoticMethod::BuiltinSymbolValueOf))
        }
        SymbolSupport::Legacy | SymbolSupport::None => Ok(None),
    }
}

/// Call an exotic conversion method with the hint string and check that the
/// result is primitive.
pub fn invoke_exotic<H: ConversionHost + ?Sized>(
    host: &mut H,
    method: &ExoticMethod,
    value: &Value,
    hint: Hint,
) -> VmResult<Value> {
    let func = match method {
        ExoticMethod::UserHook(func) => func.clone(),
        ExoticMethod::BuiltinSymbolValueOf => host.realm().intrinsics().symbol_value_of.clone(),
    };
    let result = host.call(&func, value, &[Value::string(hint.as_str())])?;

    if result.is_primitive() {
        return Ok(result);
    }
    debug!(%hint, "exotic conversion returned an object");
    Err(VmError::type_error(
        "unable to convert exotic object to primitive",
    ))
}

/// `OrdinaryToPrimitive(value, hint)`.
///
/// Tries `toString`/`valueOf` in hint order and returns the first primitive
/// result. `hint` must be `String` or `Number`.
pub fn ordinary_to_primitive<H: ConversionHost + ?Sized>(
    host: &mut H,
    value: &Value,
    hint: Hint,
) -> VmResult<Value> {
    if value.is_nullish() {
        return Err(VmError::type_error("value is null or undefined"));
    }

    let method_names = match hint {
        Hint::String => &TO_STRING_ORDER,
        Hint::Number => &TO_NUMBER_ORDER,
        Hint::Default => {
            return Err(VmError::type_error(
                "hint must be \"string\" or \"number\"",
            ));
        }
    };

    for &name in method_names {
        let method = get_property(host.realm(), value, &PropertyKey::string(name))?;
        if !method.is_callable() {
            trace!(method = name, "not callable, skipping");
            continue;
        }
        let result = host.call(&method, value, &[])?;
        if result.is_primitive() {
            trace!(method = name, "produced primitive");
            return Ok(result);
        }
        trace!(method = name, "returned an object");
    }

    debug!(%hint, "ordinary conversion exhausted");
    Err(VmError::type_error("No default value"))
}

/// `ToPrimitive(input, preferredType)` with the preferred type given as a
/// marker value.
///
/// `preferred_type` is `None` when the caller supplied no marker. A marker
/// that is neither the realm's `String` nor `Number` constructor is ignored.
pub fn to_primitive<H: ConversionHost + ?Sized>(
    host: &mut H,
    input: &Value,
    preferred_type: Option<&Value>,
) -> VmResult<Value> {
    if input.is_primitive() {
        return Ok(input.clone());
    }
    let hint = resolve_hint(host.realm(), preferred_type);
    to_primitive_hinted(host, input, hint)
}

/// `ToPrimitive(input, preferredType)` with a typed preference.
pub fn to_primitive_with<H: ConversionHost + ?Sized>(
    host: &mut H,
    input: &Value,
    preferred_type: Option<PreferredType>,
) -> VmResult<Value> {
    if input.is_primitive() {
        return Ok(input.clone());
    }
    let hint = preferred_type.map_or(Hint::Default, PreferredType::hint);
    to_primitive_hinted(host, input, hint)
}

fn to_primitive_hinted<H: ConversionHost + ?Sized>(
    host: &mut H,
    input: &Value,
    hint: Hint,
) -> VmResult<Value> {
    let _span = tracing::trace_span!("to_primitive", %hint).entered();

    if let Some(method) = find_exotic_method(host.realm(), input)? {
        trace!(?method, "using exotic conversion");
        return invoke_exotic(host, &method, input, hint);
    }

    let hint = match hint {
        Hint::Default if input.is_date_object() || input.is_symbol_like() => Hint::String,
        Hint::Default => Hint::Number,
        hint => hint,
    };
    ordinary_to_primitive(host, input, hint)
}
