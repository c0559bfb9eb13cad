// Defensive numeric coercion for raw stat rows.
//
// The stats feed mixes integers, floats, numeric strings, and sentinel
// values ("", "na", "-") across seasons. Nothing here ever fails: required
// stats fall back to zero, optional stats to absent.

use serde_json::Value;

/// Coerce a raw stat value to a non-negative integer, defaulting to 0.
///
/// Accepts integers, floats (truncated toward zero), booleans, and numeric
/// strings. Empty strings, "na" (any case), "-", and anything unparseable
/// yield the default.
pub fn stat_u32(value: Option<&Value>) -> u32 {
    opt_stat_u32(value).unwrap_or(0)
}

/// Like [`stat_u32`] but preserves absence: missing values and sentinel
/// strings become `None` instead of zero.
pub fn opt_stat_u32(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    match value {
        Value::Bool(b) => Some(u32::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(clamp_u32(i))
            } else {
                n.as_f64().map(|f| clamp_u32(f as i64))
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("na") || s == "-" {
                return None;
            }
            s.parse::<f64>().ok().map(|f| clamp_u32(f as i64))
        }
        _ => None,
    }
}

/// Counting stats are non-negative by definition; a negative upstream value
/// is treated as zero rather than wrapped.
fn clamp_u32(i: i64) -> u32 {
    i.clamp(0, u32::MAX as i64) as u32
}

/// Look up a possibly-nested field by dotted path ("passing.att").
pub fn get_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Resolve an optional stat by trying an ordered list of alternative keys
/// (dotted paths allowed) and coercing the first present, non-null value.
///
/// Matching stops at the first key that exists: a present-but-sentinel value
/// ("na") resolves to `None` rather than falling through to later keys.
pub fn first_alternative(row: &Value, paths: &[&str]) -> Option<u32> {
    for path in paths {
        if let Some(value) = get_path(row, path) {
            if !value.is_null() {
                return opt_stat_u32(Some(value));
            }
        }
    }
    None
}

/// Resolve a required stat across alternative keys, taking the first
/// alternative that coerces to a non-zero value (default 0).
pub fn first_nonzero_alternative(row: &Value, paths: &[&str]) -> u32 {
    for path in paths {
        let v = stat_u32(get_path(row, path));
        if v != 0 {
            return v;
        }
    }
    0
}
