//! # Otter Coerce
//!
//! ECMAScript value coercion for the Otter runtime: `ToPrimitive`,
//! `OrdinaryToPrimitive` and the abstract operations built on them
//! (`ToString`, `ToNumber`, `ToPropertyKey`).
//!
//! ## Design Principles
//!
//! - **Injected invocation**: conversions call user code only through a
//!   [`ConversionHost`], so hosts can interpose on every call
//! - **Realm-scoped markers**: the preferred-type markers are the realm's own
//!   `String` and `Number` constructors, compared by identity
//! - **Configurable capabilities**: [`RealmConfig`] selects whether values may
//!   carry `@@toPrimitive` hooks, only the built-in symbol fallback, or neither

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod intrinsics;
mod intrinsics_impl;
pub mod number;
pub mod object;
pub mod operations;
pub mod realm;
#[allow(missing_docs)]
pub mod symbol_registry;
pub mod value;

pub use config::{ConfigError, RealmConfig, SymbolSupport};
pub use context::{ConversionHost, NativeContext};
pub use convert::{
    ExoticMethod, Hint, PreferredType, find_exotic_method, invoke_exotic, ordinary_to_primitive,
    resolve_hint, to_primitive, to_primitive_with,
};
pub use error::{VmError, VmResult};
pub use object::{JsObject, ObjectKind, PropertyKey};
pub use operations::{to_number, to_property_key, to_string};
pub use realm::Realm;
pub use value::{Symbol, Value};
