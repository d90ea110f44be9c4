use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Allow-listed CSS font stacks. Every font reference in a document resolves
/// to exactly one of these four families.
pub const FONT_STACKS: [(&str, &str); 4] = [
    ("sans", "Inter, 'Helvetica Neue', Arial, sans-serif"),
    ("display", "'Archivo Black', Impact, 'Arial Black', sans-serif"),
    ("serif", "Georgia, 'Times New Roman', serif"),
    ("mono", "'JetBrains Mono', 'Fira Code', monospace"),
];

const FALLBACK_COLORS: [(&str, &str); 4] = [
    ("primary", "#2563eb"),
    ("bg", "#0f172a"),
    ("accent", "#f59e0b"),
    ("muted", "#94a3b8"),
];

const SPACING_SLOTS: [(&str, f64, f64, f64); 3] = [
    ("sm", 12.0, 24.0, 16.0),
    ("md", 28.0, 56.0, 40.0),
    ("lg", 60.0, 120.0, 80.0),
];

/// Check a string against the canonical 7-character hex color shape.
pub fn is_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(|b| b.is_ascii_hexdigit())
}

/// Flat symbol table resolving `$name` references to concrete values.
///
/// Built once per document from the untrusted `tokens` object and immutable
/// afterwards. Construction never fails: missing or malformed slots fall back
/// to the documented defaults, so a table always carries the four colors, the
/// two font slots, and the three spacing slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenTable {
    entries: BTreeMap<String, String>,
}

impl TokenTable {
    /// Build a table from an optional, possibly malformed tokens value.
    pub fn build(raw: Option<&Value>) -> Self {
        let mut entries = BTreeMap::new();
        let obj = raw.and_then(Value::as_object);

        let colors = obj.and_then(|o| o.get("colors")).and_then(Value::as_object);
        for (name, fallback) in FALLBACK_COLORS {
            let value = colors
                .and_then(|c| c.get(name))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| is_hex_color(s))
                .unwrap_or(fallback);
            entries.insert(name.to_string(), value.to_string());
        }

        let fonts = obj.and_then(|o| o.get("fonts")).and_then(Value::as_object);
        for (slot, default_key) in [("display", "display"), ("body", "sans")] {
            let requested = fonts.and_then(|f| f.get(slot)).and_then(Value::as_str);
            let stack = resolve_font_stack(requested, default_key);
            entries.insert(slot.to_string(), stack.to_string());
        }

        let spacing = obj
            .and_then(|o| o.get("spacing"))
            .and_then(Value::as_object);
        for (slot, min, max, default) in SPACING_SLOTS {
            let value = spacing
                .and_then(|s| s.get(slot))
                .and_then(numeric)
                .map(|n| n.clamp(min, max))
                .unwrap_or(default);
            entries.insert(slot.to_string(), format!("{}", value.round() as i64));
        }

        Self { entries }
    }

    /// Resolve a `$name` reference, passing every other value through
    /// unchanged. Callers validate non-token values independently.
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        match value.strip_prefix('$') {
            Some(key) => self.entries.get(key).map(String::as_str).unwrap_or(value),
            None => value,
        }
    }

    /// Look up a symbol directly, without the `$` sigil.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::build(None)
    }
}

/// Accept a JSON number or a string that parses as one.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn resolve_font_stack(requested: Option<&str>, default_key: &str) -> &'static str {
    match requested {
        Some(value) => font_stack(value),
        None => FONT_STACKS
            .iter()
            .find(|(name, _)| *name == default_key)
            .map(|(_, stack)| *stack)
            .unwrap_or(FONT_STACKS[0].1),
    }
}

/// Map an arbitrary font request onto one of the allow-listed stacks.
///
/// A request that already names a stack verbatim keeps it; anything else is
/// classified by family keywords and lands on the sans stack by default.
pub fn font_stack(requested: &str) -> &'static str {
    if let Some((_, stack)) = FONT_STACKS.iter().find(|(_, s)| *s == requested) {
        return stack;
    }
    let lower = requested.to_ascii_lowercase();
    let key = if lower.contains("mono") || lower.contains("code") || lower.contains("courier") {
        "mono"
    } else if lower.contains("serif") && !lower.contains("sans") {
        "serif"
    } else if lower.contains("display") || lower.contains("black") || lower.contains("impact") {
        "display"
    } else {
        "sans"
    };
    FONT_STACKS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, stack)| *stack)
        .unwrap_or(FONT_STACKS[0].1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_without_input_guarantees_all_slots() {
        let table = TokenTable::build(None);
        for key in ["primary", "bg", "accent", "muted", "display", "body"] {
            assert!(table.get(key).is_some(), "missing slot {key}");
        }
        assert_eq!(table.get("sm"), Some("16"));
        assert_eq!(table.get("md"), Some("40"));
        assert_eq!(table.get("lg"), Some("80"));
    }

    #[test]
    fn resolve_round_trips_known_tokens() {
        let raw = json!({ "colors": { "primary": "#ff0000" } });
        let table = TokenTable::build(Some(&raw));
        assert_eq!(table.resolve("$primary"), "#ff0000");
        assert_eq!(table.resolve("$nope"), "$nope");
        assert_eq!(table.resolve("plain"), "plain");
    }

    #[test]
    fn malformed_colors_fall_back() {
        let raw = json!({ "colors": { "primary": "red", "bg": 7 } });
        let table = TokenTable::build(Some(&raw));
        assert_eq!(table.get("primary"), Some("#2563eb"));
        assert_eq!(table.get("bg"), Some("#0f172a"));
    }

    #[test]
    fn fonts_resolve_to_allow_listed_stacks() {
        let raw = json!({ "fonts": { "display": "Comic Sans", "body": "Courier New" } });
        let table = TokenTable::build(Some(&raw));
        let display = table.get("display").unwrap();
        let body = table.get("body").unwrap();
        assert!(FONT_STACKS.iter().any(|(_, s)| *s == display));
        assert!(FONT_STACKS.iter().any(|(_, s)| *s == body));
        assert!(body.contains("monospace"));
    }

    #[test]
    fn spacing_clamped_into_slot_ranges() {
        let raw = json!({ "spacing": { "sm": 2, "md": "500", "lg": 61.4 } });
        let table = TokenTable::build(Some(&raw));
        assert_eq!(table.get("sm"), Some("12"));
        assert_eq!(table.get("md"), Some("56"));
        assert_eq!(table.get("lg"), Some("61"));
    }

    #[test]
    fn hex_color_shape() {
        assert!(is_hex_color("#1a2B3c"));
        assert!(!is_hex_color("#1a2B3"));
        assert!(!is_hex_color("1a2B3cd"));
        assert!(!is_hex_color("#1a2B3g"));
    }
}
