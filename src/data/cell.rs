//! Raw cell values and the coercions applied to them. None of these fail:
//! malformed input falls back to the caller's default.

use serde_json::Value;

use crate::data::literal::{self, Nested};

/// Markers a tabular export uses for "no value". Matched after trimming.
const MISSING_MARKERS: &[&str] = &[
    "", "nan", "NaN", "-nan", "-NaN", "NA", "N/A", "n/a", "null", "NULL", "None", "<NA>", "#N/A",
    "#NA",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Build a cell from a raw text field, mapping missing markers to [Cell::Missing].
    pub fn from_text(raw: &str) -> Self {
        if is_missing_marker(raw) {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Display form of a present cell; `None` when missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(text) => Some(text.trim().to_string()),
            Cell::Number(number) => Some(format_number(*number)),
            Cell::Bool(flag) => Some(if *flag { "True" } else { "False" }.to_string()),
        }
    }
}

pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Integral values print without a fractional part (`120000`, not `120000.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Trimmed text, or `default` when the cell is missing.
pub fn text(cell: Option<&Cell>, default: &str) -> String {
    cell.and_then(Cell::as_text)
        .unwrap_or_else(|| default.to_string())
}

/// Text if present, `None` otherwise.
pub fn text_opt(cell: Option<&Cell>) -> Option<String> {
    cell.and_then(Cell::as_text)
}

/// Parse a float, ignoring `,` thousands separators. Non-finite values count as unparseable.
pub fn float(cell: Option<&Cell>) -> Option<f64> {
    match cell? {
        Cell::Missing => None,
        Cell::Number(number) => number.is_finite().then_some(*number),
        Cell::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Cell::Text(text) => parse_float(text),
    }
}

pub fn float_or(cell: Option<&Cell>, default: f64) -> f64 {
    float(cell).unwrap_or(default)
}

pub fn parse_float(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Non-negative integer flag (e.g. `dlc`). Fractions truncate; negatives and garbage read as `default`.
pub fn flag(cell: Option<&Cell>, default: u32) -> u32 {
    match float(cell) {
        Some(value) if value >= 0.0 && value <= u32::MAX as f64 => value as u32,
        _ => default,
    }
}

/// Decode a structure literal held in a cell.
pub fn nested(cell: Option<&Cell>) -> Nested {
    match cell {
        None | Some(Cell::Missing) => Nested::Missing,
        Some(Cell::Number(number)) => Nested::Value(number_value(*number)),
        Some(Cell::Bool(flag)) => Nested::Value(Value::Bool(*flag)),
        Some(Cell::Text(text)) => literal::decode(text),
    }
}

/// List-valued cell: decoded list elements, a single wrapped value, or empty.
pub fn list(cell: Option<&Cell>) -> Vec<String> {
    match nested(cell) {
        Nested::Missing => Vec::new(),
        Nested::Raw(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        Nested::Value(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| value_to_text(item).trim().to_string())
            .collect(),
        Nested::Value(value) => {
            if literal::is_falsy(&value) {
                Vec::new()
            } else {
                vec![value_to_text(&value).trim().to_string()]
            }
        }
    }
}

/// Decoded dict; `{}` for anything else.
pub fn dict(cell: Option<&Cell>) -> serde_json::Map<String, Value> {
    match nested(cell) {
        Nested::Value(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

/// Like [dict], but a decoded list yields its first element when that is a dict.
pub fn first_dict(cell: Option<&Cell>) -> serde_json::Map<String, Value> {
    match nested(cell) {
        Nested::Value(Value::Object(map)) => map,
        Nested::Value(Value::Array(items)) => match items.into_iter().next() {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        },
        _ => serde_json::Map::new(),
    }
}

pub fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// String form of a decoded value, as it would read in the source data.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(flag) => if *flag { "True" } else { "False" }.to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| number.to_string()),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(raw: &str) -> Cell {
        Cell::from_text(raw)
    }

    #[test]
    fn missing_markers_read_as_missing() {
        assert!(t("").is_missing());
        assert!(t("  NaN ").is_missing());
        assert!(t("None").is_missing());
        assert!(!t("0").is_missing());
    }

    #[test]
    fn text_trims_and_defaults() {
        assert_eq!(text(Some(&t("  Moonveil ")), "Unknown"), "Moonveil");
        assert_eq!(text(Some(&Cell::Missing), "Unknown"), "Unknown");
        assert_eq!(text(None, "-"), "-");
        assert_eq!(text(Some(&Cell::Number(12.0)), "0"), "12");
        assert_eq!(text(Some(&Cell::Number(6.5)), "0"), "6.5");
    }

    #[test]
    fn float_strips_thousands_separators() {
        assert_eq!(float(Some(&t("120,000"))), Some(120000.0));
        assert_eq!(float(Some(&t(" 3.5 "))), Some(3.5));
        assert_eq!(float(Some(&t("Immune"))), None);
        assert_eq!(float(Some(&t("inf"))), None);
        assert_eq!(float_or(Some(&t("heavy")), 0.0), 0.0);
    }

    #[test]
    fn flag_defaults_on_garbage() {
        assert_eq!(flag(Some(&t("1")), 0), 1);
        assert_eq!(flag(Some(&t("1.0")), 0), 1);
        assert_eq!(flag(Some(&t("yes")), 0), 0);
        assert_eq!(flag(Some(&t("-3")), 0), 0);
        assert_eq!(flag(None, 0), 0);
    }

    #[test]
    fn list_decodes_or_wraps() {
        assert_eq!(list(Some(&t("['Margit', ' Godrick ']"))), vec!["Margit", "Godrick"]);
        assert_eq!(list(Some(&t("Stormveil Castle"))), vec!["Stormveil Castle"]);
        assert_eq!(list(Some(&t("[1, None, 'x']"))), vec!["1", "x"]);
        assert!(list(Some(&t("[]"))).is_empty());
        assert!(list(Some(&Cell::Missing)).is_empty());
    }

    #[test]
    fn first_dict_takes_first_dict_of_list() {
        let map = first_dict(Some(&t("[{'Phy': 10.2, 'Mag': 8}]")));
        assert_eq!(map.get("Mag"), Some(&Value::from(8)));
        assert!(first_dict(Some(&t("not a dict"))).is_empty());
        assert!(first_dict(Some(&t("[1, 2]"))).is_empty());
    }

    #[test]
    fn dict_rejects_lists() {
        assert!(dict(Some(&t("[{'Str': 12}]"))).is_empty());
        assert_eq!(dict(Some(&t("{'Str': 12}"))).get("Str"), Some(&Value::from(12)));
    }
}
