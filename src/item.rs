//! Item records as stored in the level JSON files, plus the dedupe pass used when
//! several levels are merged.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;

/// One flashcard. Only `kanji` matters to the game logic; the other fields are
/// shown when present and left blank otherwise. Fields are read leniently:
/// numbers and booleans become text, anything else counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_kanji")]
    pub kanji: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reading: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub meaning: Option<String>,
    /// Vietnamese gloss.
    #[serde(default, deserialize_with = "lenient_text")]
    pub vn: Option<String>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_kanji<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

impl Item {
    pub fn new(kanji: &str, meaning: &str) -> Self {
        Self {
            kanji: kanji.to_string(),
            meaning: Some(meaning.to_string()),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_reading(mut self, reading: &str) -> Self {
        self.reading = Some(reading.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_vn(mut self, vn: &str) -> Self {
        self.vn = Some(vn.to_string());
        self
    }

    /// Trimmed kanji, or `None` when there is nothing to key on.
    pub fn key(&self) -> Option<&str> {
        let k = self.kanji.trim();
        if k.is_empty() { None } else { Some(k) }
    }

    pub fn meaning_text(&self) -> &str {
        self.meaning.as_deref().unwrap_or("")
    }

    pub fn reading_text(&self) -> &str {
        self.reading.as_deref().unwrap_or("")
    }
}

// Shown when no level file could be loaded so the board is never empty.
pub const FALLBACK_ITEMS: &[(&str, &str)] = &[
    ("日", "day / sun"),
    ("月", "month / moon"),
    ("火", "fire"),
];

pub fn fallback_items() -> Vec<Item> {
    FALLBACK_ITEMS.iter().map(|(k, m)| Item::new(k, m)).collect()
}

/// Decode one level file. The top level must be a JSON array; every object in it
/// becomes an item, other elements (null, numbers, strings) are skipped.
pub fn decode_items(text: &str) -> Result<Vec<Item>, serde_json::Error> {
    let raw: Vec<Value> = serde_json::from_str(text)?;
    let total = raw.len();
    let items: Vec<Item> = raw
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    if items.len() < total {
        log::debug!("skipped {} malformed item records", total - items.len());
    }
    Ok(items)
}

/// Keep the first item for each trimmed kanji, drop items without one.
/// Survivors keep their relative order and their original data.
pub fn dedupe_by_kanji(items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Some(key) = item.key() else { continue };
        if seen.insert(key.to_string()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let items = vec![
            Item::new("日", "day"),
            Item::new("月", "month"),
            Item::new(" 日 ", "sun"),
            Item::new("火", "fire"),
            Item::new("月", "moon"),
        ];
        let out = dedupe_by_kanji(items);
        let kanji: Vec<&str> = out.iter().map(|i| i.kanji.as_str()).collect();
        assert_eq!(kanji, vec!["日", "月", "火"]);
        assert_eq!(out[0].meaning_text(), "day");
        assert_eq!(out[1].meaning_text(), "month");
    }

    #[test]
    fn dedupe_drops_blank_kanji() {
        let items = vec![Item::new("", "nothing"), Item::new("   ", "space"), Item::new("水", "water")];
        let out = dedupe_by_kanji(items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kanji, "水");
    }

    #[test]
    fn decode_is_permissive() {
        let text = r#"[
            {"kanji": "山", "reading": "やま", "meaning": "mountain", "vn": "sơn", "extra": 1},
            null,
            {"kanji": "川"},
            7,
            {"meaning": "no kanji"}
        ]"#;
        let items = decode_items(text).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].reading_text(), "やま");
        assert_eq!(items[0].vn.as_deref(), Some("sơn"));
        assert_eq!(items[1].meaning, None);
        assert_eq!(items[1].meaning_text(), "");
        assert!(items[2].key().is_none());
    }

    #[test]
    fn decode_keeps_records_with_odd_field_types() {
        let text = r#"[
            {"kanji": "山", "meaning": "mountain", "reading": ["さん", "やま"]},
            {"kanji": 5, "meaning": "five"},
            {"kanji": "川", "meaning": "river", "vn": {"text": "xuyên"}},
            {"kanji": "百", "meaning": 100, "reading": null}
        ]"#;
        let items = decode_items(text).unwrap();
        let kanji: Vec<&str> = items.iter().map(|i| i.kanji.as_str()).collect();
        assert_eq!(kanji, vec!["山", "5", "川", "百"]);
        assert_eq!(items[0].reading, None);
        assert_eq!(items[0].meaning_text(), "mountain");
        assert_eq!(items[1].key(), Some("5"));
        assert_eq!(items[2].vn, None);
        assert_eq!(items[3].meaning_text(), "100");
        assert_eq!(items[3].reading, None);
        assert_eq!(dedupe_by_kanji(items).len(), 4);
    }

    #[test]
    fn decode_rejects_non_array() {
        assert!(decode_items(r#"{"kanji": "山"}"#).is_err());
        assert!(decode_items("not json").is_err());
    }

    #[test]
    fn fallback_has_three_items() {
        let items = fallback_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].kanji, "火");
        assert_eq!(items[2].meaning_text(), "fire");
    }
}
