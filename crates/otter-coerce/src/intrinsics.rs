//! Intrinsics registry for the built-in objects conversions rely on.
//!
//! The initialization follows a two-stage pattern:
//! 1. **Stage 1**: Allocate empty prototype objects so they can reference each other
//! 2. **Stage 2**: Install methods and constructors in dependency order

use std::sync::Arc;

use crate::config::RealmConfig;
use crate::intrinsics_impl::{array, boolean, date, function, number, object, string, symbol};
use crate::object::{JsObject, ObjectKind};
use crate::value::Value;

/// Well-known symbol IDs (fixed, pre-defined).
///
/// Well-known symbols are shared by every realm in the process.
pub mod well_known {
    use std::sync::{Arc, OnceLock};

    use crate::value::Symbol;

    /// `Symbol.iterator`
    pub const ITERATOR: u64 = 1;
    /// `Symbol.toStringTag`
    pub const TO_STRING_TAG: u64 = 3;
    /// `Symbol.toPrimitive`
    pub const TO_PRIMITIVE: u64 = 5;
    /// First ID handed out to user-created symbols
    pub const FIRST_USER_ID: u64 = 64;

    /// `Symbol.iterator`
    pub fn iterator_symbol() -> Arc<Symbol> {
        static SYMBOL: OnceLock<Arc<Symbol>> = OnceLock::new();
        SYMBOL
            .get_or_init(|| Symbol::with_id(ITERATOR, "Symbol.iterator"))
            .clone()
    }

    /// `Symbol.toStringTag`
    pub fn to_string_tag_symbol() -> Arc<Symbol> {
        static SYMBOL: OnceLock<Arc<Symbol>> = OnceLock::new();
        SYMBOL
            .get_or_init(|| Symbol::with_id(TO_STRING_TAG, "Symbol.toStringTag"))
            .clone()
    }

    /// `Symbol.toPrimitive`
    pub fn to_primitive_symbol() -> Arc<Symbol> {
        static SYMBOL: OnceLock<Arc<Symbol>> = OnceLock::new();
        SYMBOL
            .get_or_init(|| Symbol::with_id(TO_PRIMITIVE, "Symbol.toPrimitive"))
            .clone()
    }
}

/// Registry of the intrinsic objects of one realm.
pub struct Intrinsics {
    /// `Object.prototype`
    pub object_prototype: Arc<JsObject>,
    /// `Function.prototype`
    pub function_prototype: Arc<JsObject>,
    /// `Array.prototype`
    pub array_prototype: Arc<JsObject>,
    /// `Date.prototype`
    pub date_prototype: Arc<JsObject>,
    /// `Symbol.prototype`
    pub symbol_prototype: Arc<JsObject>,
    /// `Boolean.prototype`
    pub boolean_prototype: Arc<JsObject>,
    /// `Number.prototype`
    pub number_prototype: Arc<JsObject>,
    /// `String.prototype`
    pub string_prototype: Arc<JsObject>,

    /// `String` constructor, also the "prefer string" marker
    pub string_constructor: Value,
    /// `Number` constructor, also the "prefer number" marker
    pub number_constructor: Value,
    /// `Symbol` constructor
    pub symbol_constructor: Value,
    /// `Symbol.prototype.valueOf`, the built-in exotic conversion for symbols
    pub symbol_value_of: Value,
}

impl Intrinsics {
    pub(crate) fn new(config: &RealmConfig) -> Self {
        // Stage 1
        let object_prototype = JsObject::new(None, ObjectKind::Ordinary);
        let function_prototype = JsObject::new(
            Some(object_prototype.clone()),
            ObjectKind::Function(function::empty_function()),
        );
        let proto = |kind| JsObject::new(Some(object_prototype.clone()), kind);
        let array_prototype = proto(ObjectKind::Array(Default::default()));
        let date_prototype = proto(ObjectKind::Ordinary);
        let symbol_prototype = proto(ObjectKind::Ordinary);
        let boolean_prototype = proto(ObjectKind::Boolean(false));
        let number_prototype = proto(ObjectKind::Number(0.0));
        let string_prototype = proto(ObjectKind::String(Arc::from("")));

        // Stage 2
        object::init_object_prototype(&object_prototype, &function_prototype);
        function::init_function_prototype(&function_prototype);
        array::init_array_prototype(&array_prototype, &function_prototype);
        date::init_date_prototype(&date_prototype, &function_prototype, config);
        let symbol_value_of =
            symbol::init_symbol_prototype(&symbol_prototype, &function_prototype, config);
        boolean::init_boolean_prototype(&boolean_prototype, &function_prototype);
        number::init_number_prototype(&number_prototype, &function_prototype);
        string::init_string_prototype(&string_prototype, &function_prototype);

        let string_constructor =
            string::create_string_constructor(&string_prototype, &function_prototype);
        let number_constructor =
            number::create_number_constructor(&number_prototype, &function_prototype);
        let symbol_constructor =
            symbol::create_symbol_constructor(&symbol_prototype, &function_prototype, config);

        Self {
            object_prototype,
            function_prototype,
            array_prototype,
            date_prototype,
            symbol_prototype,
            boolean_prototype,
            number_prototype,
            string_prototype,
            string_constructor,
            number_constructor,
            symbol_constructor,
            symbol_value_of,
        }
    }

    /// Break the prototype/method cycles so the realm can be freed.
    pub(crate) fn release(&self) {
        for proto in [
            &self.object_prototype,
            &self.function_prototype,
            &self.array_prototype,
            &self.date_prototype,
            &self.symbol_prototype,
            &self.boolean_prototype,
            &self.number_prototype,
            &self.string_prototype,
        ] {
            proto.release();
        }
        for ctor in [
            &self.string_constructor,
            &self.number_constructor,
            &self.symbol_constructor,
        ] {
            if let Some(obj) = ctor.as_object() {
                obj.release();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymbolSupport;
    use crate::object::PropertyKey;

    #[test]
    fn test_well_known_symbols_are_shared() {
        let a = well_known::to_primitive_symbol();
        let b = well_known::to_primitive_symbol();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.id, well_known::TO_PRIMITIVE);
        assert_eq!(a.descriptive_string(), "Symbol(Symbol.toPrimitive)");
    }

    #[test]
    fn test_to_primitive_hooks_follow_config() {
        let key = PropertyKey::symbol(well_known::to_primitive_symbol());

        let full = Intrinsics::new(&RealmConfig::default());
        assert!(full.date_prototype.get_own(&key).is_some());
        assert!(full.symbol_prototype.get_own(&key).is_some());

        let legacy = Intrinsics::new(&RealmConfig {
            symbols: SymbolSupport::Legacy,
            ..Default::default()
        });
        assert!(legacy.date_prototype.get_own(&key).is_none());
        assert!(legacy.symbol_prototype.get_own(&key).is_none());
        assert!(legacy.symbol_value_of.is_callable());

        full.release();
        legacy.release();
    }
}
