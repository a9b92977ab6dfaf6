//! Date.prototype conversion methods
//!
//! Date objects keep their time value (milliseconds since epoch, NaN when
//! invalid) in the object's internal slot. String forms are rendered in UTC.

use chrono::{Month, Weekday};
use std::sync::Arc;

use crate::config::{RealmConfig, SymbolSupport};
use crate::context::NativeContext;
use crate::convert::{self, Hint};
use crate::error::{VmError, VmResult};
use crate::intrinsics::well_known;
use crate::intrinsics_impl::helpers::define_method;
use crate::object::{JsObject, ObjectKind, PropertyKey};
use crate::value::Value;

/// Largest absolute time value a Date can hold (ES2026 §21.4.1.31)
const MAX_TIME: f64 = 8.64e15;

/// `TimeClip(time)`
pub fn time_clip(time: f64) -> f64 {
    if !time.is_finite() || time.abs() > MAX_TIME {
        return f64::NAN;
    }
    // + 0.0 turns -0 into +0
    time.trunc() + 0.0
}

const MS_PER_DAY: i64 = 86_400_000;

/// Calendar fields of a time value, in UTC
struct DateFields {
    year: i64,
    month: u32,
    day: u32,
    weekday: Weekday,
    hour: i64,
    minute: i64,
    second: i64,
    millis: i64,
}

impl DateFields {
    /// Split a finite, clipped time value into calendar fields.
    ///
    /// Uses the proleptic Gregorian civil-from-days conversion so the whole
    /// ±8.64e15 ms range works, not just the part chrono can represent.
    fn from_time(time: f64) -> Self {
        let time = time as i64;
        let days = time.div_euclid(MS_PER_DAY);
        let ms_in_day = time.rem_euclid(MS_PER_DAY);

        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = yoe + era * 400 + i64::from(month <= 2);

        // Day 0 (1970-01-01) was a Thursday
        let weekday =
            Weekday::try_from((days + 3).rem_euclid(7) as u8).unwrap_or(Weekday::Thu);

        Self {
            year,
            month,
            day,
            weekday,
            hour: ms_in_day / 3_600_000,
            minute: ms_in_day / 60_000 % 60,
            second: ms_in_day / 1000 % 60,
            millis: ms_in_day % 1000,
        }
    }

    fn month_abbrev(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .map(|m| &m.name()[..3])
            .unwrap_or("Jan")
    }
}

/// Render a time value like `Date.prototype.toString` (UTC).
pub fn format_date(time: f64) -> String {
    if !time.is_finite() {
        return "Invalid Date".to_string();
    }
    let f = DateFields::from_time(time);
    let sign = if f.year < 0 { "-" } else { "" };
    format!(
        "{} {} {:02} {sign}{:04} {:02}:{:02}:{:02} GMT+0000 (Coordinated Universal Time)",
        f.weekday,
        f.month_abbrev(),
        f.day,
        f.year.abs(),
        f.hour,
        f.minute,
        f.second,
    )
}

/// Render a time value like `Date.prototype.toISOString`.
///
/// Years outside 0..=9999 use the six-digit expanded form (`+275760`).
pub fn format_iso(time: f64) -> Option<String> {
    if !time.is_finite() {
        return None;
    }
    let f = DateFields::from_time(time);
    let year = match f.year {
        0..=9999 => format!("{:04}", f.year),
        y if y < 0 => format!("-{:06}", -y),
        y => format!("+{y:06}"),
    };
    Some(format!(
        "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        f.month, f.day, f.hour, f.minute, f.second, f.millis
    ))
}

/// Helper to extract the time value from a Date object
fn this_time_value(this_val: &Value) -> VmResult<f64> {
    this_val
        .as_object()
        .and_then(|obj| match obj.kind() {
            ObjectKind::Date(time) => Some(*time),
            _ => None,
        })
        .ok_or_else(|| VmError::type_error("this is not a Date object."))
}

/// Wire Date.prototype methods
pub fn init_date_prototype(
    date_proto: &Arc<JsObject>,
    fn_proto: &Arc<JsObject>,
    config: &RealmConfig,
) {
    define_method(date_proto, fn_proto, "getTime".into(), "getTime", date_value_of);
    define_method(date_proto, fn_proto, "valueOf".into(), "valueOf", date_value_of);
    define_method(date_proto, fn_proto, "toString".into(), "toString", date_to_string);
    define_method(
        date_proto,
        fn_proto,
        "toISOString".into(),
        "toISOString",
        date_to_iso_string,
    );

    if config.symbols == SymbolSupport::Full {
        define_method(
            date_proto,
            fn_proto,
            PropertyKey::symbol(well_known::to_primitive_symbol()),
            "[Symbol.toPrimitive]",
            date_to_primitive,
        );
    }
}

fn date_value_of(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::number(this_time_value(this_val)?))
}

fn date_to_string(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    Ok(Value::string(format_date(this_time_value(this_val)?)))
}

fn date_to_iso_string(
    this_val: &Value,
    _args: &[Value],
    _ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    format_iso(this_time_value(this_val)?)
        .map(Value::string)
        .ok_or_else(|| VmError::range_error("Invalid time value"))
}

/// `Date.prototype[@@toPrimitive](hint)`
///
/// `"string"` and `"default"` prefer the string form, `"number"` the time value.
fn date_to_primitive(
    this_val: &Value,
    args: &[Value],
    ncx: &mut NativeContext<'_>,
) -> VmResult<Value> {
    if !this_val.is_object() {
        return Err(VmError::type_error(
            "Date.prototype[Symbol.toPrimitive] called on non-object",
        ));
    }
    let hint_arg = args.first().cloned().unwrap_or(Value::undefined());
    let hint = match hint_arg.as_str() {
        Some("string" | "default") => Hint::String,
        Some("number") => Hint::Number,
        _ => {
            return Err(VmError::type_error(format!(
                "Invalid hint: {}",
                hint_arg.display_string()
            )));
        }
    };
    convert::ordinary_to_primitive(ncx, this_val, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realm::Realm;

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(0.0),
            "Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
        assert_eq!(format_date(f64::NAN), "Invalid Date");
    }

    #[test]
    fn test_format_date_full_range() {
        assert_eq!(
            format_date(8.64e15),
            "Sat Sep 13 275760 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
        assert_eq!(
            format_date(-8.64e15),
            "Tue Apr 20 -271821 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
        // 10000-01-01T00:00:00Z
        assert_eq!(
            format_date(253_402_300_800_000.0),
            "Sat Jan 01 10000 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
        // 0001-02-03T04:05:06Z
        assert_eq!(
            format_date(-62_132_730_894_000.0),
            "Sat Feb 03 0001 04:05:06 GMT+0000 (Coordinated Universal Time)"
        );
        assert_eq!(
            format_date(-1.0),
            "Wed Dec 31 1969 23:59:59 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_format_iso_expanded_years() {
        assert_eq!(format_iso(8.64e15).as_deref(), Some("+275760-09-13T00:00:00.000Z"));
        assert_eq!(format_iso(-8.64e15).as_deref(), Some("-271821-04-20T00:00:00.000Z"));
        assert_eq!(
            format_iso(253_402_300_800_000.0).as_deref(),
            Some("+010000-01-01T00:00:00.000Z")
        );
        assert_eq!(format_iso(-1.0).as_deref(), Some("1969-12-31T23:59:59.999Z"));
        assert!(format_iso(f64::NAN).is_none());
    }

    #[test]
    fn test_time_clip() {
        assert_eq!(time_clip(1.7), 1.0);
        assert!(time_clip(-0.0).is_sign_positive());
        assert!(time_clip(8.64e15 + 1.0).is_nan());
        assert!(time_clip(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_iso_string() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let date = Value::object(realm.new_date(1_500.0));
        let result = date_to_iso_string(&date, &[], &mut ncx).unwrap();
        assert_eq!(result.as_str(), Some("1970-01-01T00:00:01.500Z"));

        let invalid = Value::object(realm.new_date(f64::NAN));
        assert!(matches!(
            date_to_iso_string(&invalid, &[], &mut ncx),
            Err(VmError::RangeError(_))
        ));
    }

    #[test]
    fn test_to_primitive_hints() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let date = Value::object(realm.new_date(0.0));

        let as_number = date_to_primitive(&date, &[Value::string("number")], &mut ncx).unwrap();
        assert_eq!(as_number.as_number(), Some(0.0));

        let as_default = date_to_primitive(&date, &[Value::string("default")], &mut ncx).unwrap();
        assert_eq!(as_default.as_str(), Some(format_date(0.0).as_str()));

        let err = date_to_primitive(&date, &[Value::string("bogus")], &mut ncx).unwrap_err();
        assert_eq!(err.type_error_message(), Some("Invalid hint: bogus"));

        let err = date_to_primitive(&Value::number(1.0), &[], &mut ncx).unwrap_err();
        assert!(err.type_error_message().is_some());
    }

    #[test]
    fn test_methods_reject_non_dates() {
        let realm = Realm::new();
        let mut ncx = NativeContext::new(&realm);
        let obj = Value::object(realm.new_object());
        let err = date_value_of(&obj, &[], &mut ncx).unwrap_err();
        assert_eq!(err.type_error_message(), Some("this is not a Date object."));
    }
}
