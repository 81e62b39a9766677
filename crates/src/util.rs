use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("ansi pattern is valid"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").to_string()
}

// Terminal columns taken by `s`, escape sequences excluded.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

// Blank filler as wide as `s` renders.
pub fn padding(s: &str) -> String {
    " ".repeat(visible_width(s))
}

// Cast a JSON value to a flat list: arrays are flattened recursively,
// `null` becomes empty, anything else becomes a one-element list.
pub fn arrayify(v: Value) -> Vec<Value> {
    match v {
        Value::Null => vec![],
        Value::Array(arr) => arr.into_iter().flat_map(arrayify).collect(),
        other => vec![other],
    }
}

// Non-negative integral JSON numbers are usable as indices.
pub fn as_index(v: &Value) -> Option<usize> {
    v.as_u64().and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrayify_wraps_flattens_and_drops_null() {
        assert_eq!(arrayify(json!("string")), vec![json!("string")]);
        assert_eq!(arrayify(json!(["string"])), vec![json!("string")]);
        assert_eq!(arrayify(json!(null)), Vec::<Value>::new());
        assert_eq!(
            arrayify(json!(["a", ["b", ["c"]], {"name": "d"}])),
            vec![json!("a"), json!("b"), json!("c"), json!({"name": "d"})]
        );
    }

    #[test]
    fn padding_ignores_escape_codes() {
        let styled = "\u{1b}[36m❯\u{1b}[39m";
        assert_eq!(visible_width(styled), 1);
        assert_eq!(padding(styled), " ");
        assert_eq!(padding(">>"), "  ");
    }

    #[test]
    fn wide_glyphs_count_as_two_columns() {
        assert_eq!(visible_width("👉"), 2);
        assert_eq!(padding("👉"), "  ");
        assert_eq!(visible_width("\u{1b}[1m👉\u{1b}[0m>"), 3);
    }

    #[test]
    fn as_index_accepts_only_unsigned_integers() {
        assert_eq!(as_index(&json!(2)), Some(2));
        assert_eq!(as_index(&json!(-1)), None);
        assert_eq!(as_index(&json!(1.5)), None);
        assert_eq!(as_index(&json!("1")), None);
    }
}
