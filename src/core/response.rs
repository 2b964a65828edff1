//! Word-to-color responses.
//!
//! Two shapes exist. [`Responses`] is the in-memory form keyed by catalog
//! [`WordKey`]s and is what the session mutates. [`ResponseSet`] is the
//! name-keyed form that crosses the persistence boundary (artifacts, prior
//! sessions, checkpoints).

use super::catalog::{Catalog, WordKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A color exactly as submitted.
///
/// The session stores colors verbatim; only the artifact importer checks the
/// `#RRGGBB` form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Suggested color for a word that has not been rated yet.
    pub const UNRATED: &'static str = "#000000";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#` followed by six hex digits, either case.
    ///
    /// ```rust
    /// use chromasurvey::core::Color;
    ///
    /// assert!(Color::new("#1a2B3c").is_hex_rgb());
    /// assert!(!Color::new("#12345").is_hex_rgb());
    /// assert!(!Color::new("red").is_hex_rgb());
    /// ```
    pub fn is_hex_rgb(&self) -> bool {
        self.0
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(Self::UNRATED)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A response names a word the catalog does not contain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("word '{word}' in category '{category}' is not in the catalog")]
pub struct UnknownWord {
    pub category: String,
    pub word: String,
}

/// Name-keyed responses: category -> word -> color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, BTreeMap<String, Color>>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a color, returning the one it replaced.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        word: impl Into<String>,
        color: Color,
    ) -> Option<Color> {
        self.0
            .entry(category.into())
            .or_default()
            .insert(word.into(), color)
    }

    pub fn get(&self, category: &str, word: &str) -> Option<&Color> {
        self.0.get(category)?.get(word)
    }

    pub fn category(&self, category: &str) -> Option<&BTreeMap<String, Color>> {
        self.0.get(category)
    }

    /// Number of recorded (category, word) pairs.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Color)> {
        self.0.iter().flat_map(|(category, words)| {
            words
                .iter()
                .map(move |(word, color)| (category.as_str(), word.as_str(), color))
        })
    }
}

impl From<BTreeMap<String, BTreeMap<String, Color>>> for ResponseSet {
    fn from(value: BTreeMap<String, BTreeMap<String, Color>>) -> Self {
        Self(value)
    }
}

/// Catalog-keyed responses held by a running session.
///
/// At most one color per word; inserting again overwrites.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Responses {
    colors: BTreeMap<WordKey, Color>,
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: WordKey, color: Color) -> Option<Color> {
        self.colors.insert(key, color)
    }

    pub fn get(&self, key: WordKey) -> Option<&Color> {
        self.colors.get(&key)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (WordKey, &Color)> {
        self.colors.iter().map(|(key, color)| (*key, color))
    }

    /// Name-keyed copy for export. Keys not in `catalog` are skipped.
    pub fn to_response_set(&self, catalog: &Catalog) -> ResponseSet {
        let mut set = ResponseSet::new();
        for (key, color) in self.iter() {
            if let Some((category, word)) = catalog.word(key) {
                set.insert(category, word, color.clone());
            }
        }
        set
    }

    /// Resolve a name-keyed set against `catalog`, rejecting unknown words.
    pub fn from_response_set(catalog: &Catalog, set: &ResponseSet) -> Result<Self, UnknownWord> {
        let mut responses = Self::new();
        for (category, word, color) in set.iter() {
            let key = catalog.key_of(category, word).ok_or_else(|| UnknownWord {
                category: category.to_string(),
                word: word.to_string(),
            })?;
            responses.insert(key, color.clone());
        }
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new([
            ("Emotions", vec!["Happy", "Sad"]),
            ("Nature", vec!["Ocean"]),
        ])
        .unwrap()
    }

    #[test]
    fn color_is_stored_verbatim() {
        let color = Color::new("not a color");
        assert_eq!(color.as_str(), "not a color");
        assert!(!color.is_hex_rgb());
    }

    #[test]
    fn default_color_is_black() {
        assert_eq!(Color::default().as_str(), "#000000");
        assert!(Color::default().is_hex_rgb());
    }

    #[test]
    fn hex_check_rejects_wrong_shapes() {
        assert!(Color::new("#ABCDEF").is_hex_rgb());
        assert!(Color::new("#abcdef").is_hex_rgb());
        assert!(!Color::new("ABCDEF").is_hex_rgb());
        assert!(!Color::new("#ABCDEFF").is_hex_rgb());
        assert!(!Color::new("#GGGGGG").is_hex_rgb());
        assert!(!Color::new("").is_hex_rgb());
    }

    #[test]
    fn responses_overwrite_in_place() {
        let catalog = catalog();
        let sad = catalog.key_of("Emotions", "Sad").unwrap();
        let mut responses = Responses::new();

        assert!(responses.insert(sad, Color::new("#00FF00")).is_none());
        let previous = responses.insert(sad, Color::new("#0000FF"));

        assert_eq!(previous, Some(Color::new("#00FF00")));
        assert_eq!(responses.len(), 1);
        assert_eq!(responses.get(sad), Some(&Color::new("#0000FF")));
    }

    #[test]
    fn response_set_groups_by_category() {
        let catalog = catalog();
        let mut responses = Responses::new();
        responses.insert(catalog.key_of("Emotions", "Happy").unwrap(), "#FF0000".into());
        responses.insert(catalog.key_of("Nature", "Ocean").unwrap(), "#123456".into());

        let set = responses.to_response_set(&catalog);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Emotions", "Happy"), Some(&Color::new("#FF0000")));
        assert_eq!(set.get("Nature", "Ocean"), Some(&Color::new("#123456")));
        assert!(set.category("Emotions").unwrap().get("Sad").is_none());
    }

    #[test]
    fn from_response_set_rejects_unknown_words() {
        let catalog = catalog();
        let mut set = ResponseSet::new();
        set.insert("Nature", "Volcano", "#FF4400".into());

        let err = Responses::from_response_set(&catalog, &set).unwrap_err();
        assert_eq!(err.word, "Volcano");
    }

    #[test]
    fn response_set_serializes_as_nested_objects() {
        let mut set = ResponseSet::new();
        set.insert("Nature", "Ocean", "#123456".into());

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r##"{"Nature":{"Ocean":"#123456"}}"##);
    }
}
