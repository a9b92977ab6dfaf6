//! Intrinsics implementation modules
//!
//! One module per builtin prototype whose methods take part in conversion:
//! - `helpers` - Method installation and SameValue
//! - `object` - Object.prototype.toString / valueOf
//! - `function` - Function.prototype.toString
//! - `array` - Array.prototype.join / toString
//! - `date` - Date.prototype conversions and `@@toPrimitive`
//! - `symbol` - Symbol constructor and prototype
//! - `boolean`, `number`, `string` - primitive wrapper prototypes and constructors

pub mod array;
pub mod boolean;
pub mod date;
pub mod function;
pub mod helpers;
pub mod number;
pub mod object;
pub mod string;
pub mod symbol;
