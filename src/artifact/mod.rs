//! Persisted survey results and comparison against a prior session.
//!
//! An artifact is a pretty-printed JSON object mapping category names to
//! objects of word -> `#RRGGBB` color:
//!
//! ```json
//! {
//!   "Emotions": {
//!     "Happy": "#FF0000"
//!   }
//! }
//! ```
//!
//! Artifacts are named `<prefix><YYYYMMDD_HHMMSS>.json`, so sorting by name
//! sorts by creation time.

use crate::core::{Catalog, Color, ResponseSet};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod error;
pub mod store;

pub use error::ArtifactError;
pub use store::ArtifactStore;

/// File name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "color_test_";

/// File extension of every artifact.
pub const EXTENSION: &str = ".json";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Identifier of a stored artifact, embedding its creation time.
///
/// # Example
///
/// ```rust
/// use chromasurvey::artifact::ArtifactName;
/// use chrono::NaiveDate;
///
/// let created = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(14, 5, 30)
///     .unwrap();
/// let name = ArtifactName::new("color_test_", created);
///
/// assert_eq!(name.file_name(), "color_test_20240309_140530.json");
/// assert_eq!(ArtifactName::parse("color_test_", &name.file_name()), Some(name));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactName {
    timestamp: NaiveDateTime,
    prefix: String,
}

impl ArtifactName {
    /// Name for an artifact created at `timestamp`. Sub-second precision is
    /// dropped because the file name cannot carry it.
    pub fn new(prefix: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            prefix: prefix.into(),
        }
    }

    /// Name stamped with the current local time.
    pub fn now(prefix: impl Into<String>) -> Self {
        Self::new(prefix, Local::now().naive_local())
    }

    /// Parse a file name produced by [`ArtifactName::file_name`].
    pub fn parse(prefix: &str, file_name: &str) -> Option<Self> {
        let stamp = file_name.strip_prefix(prefix)?.strip_suffix(EXTENSION)?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(prefix, timestamp))
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            self.timestamp.format(TIMESTAMP_FORMAT),
            EXTENSION
        )
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// A serialized response set paired with its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub name: ArtifactName,
    pub bytes: Vec<u8>,
}

/// Serialize a response set as a named artifact.
pub fn export(responses: &ResponseSet, name: ArtifactName) -> Result<Artifact, ArtifactError> {
    let bytes = serde_json::to_vec_pretty(responses).map_err(ArtifactError::Serialization)?;
    Ok(Artifact { name, bytes })
}

/// Parse artifact bytes back into a response set.
///
/// Input must be a JSON object of objects of `#RRGGBB` strings; anything
/// else is reported, never replaced with an empty set.
///
/// ```rust
/// use chromasurvey::artifact::import;
///
/// let set = import(br##"{"Nature": {"Ocean": "#1e90ff"}}"##).unwrap();
/// assert_eq!(set.get("Nature", "Ocean").unwrap().as_str(), "#1e90ff");
///
/// assert!(import(b"not json").unwrap_err().is_malformed());
/// assert!(import(br#"{"Nature": ["Ocean"]}"#).unwrap_err().is_malformed());
/// ```
pub fn import(bytes: &[u8]) -> Result<ResponseSet, ArtifactError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(ArtifactError::MalformedJson)?;
    let raw: BTreeMap<String, BTreeMap<String, Color>> =
        serde_json::from_value(value).map_err(ArtifactError::UnexpectedShape)?;

    let set = ResponseSet::from(raw);
    check_colors(&set)?;
    Ok(set)
}

/// Reject the first color in `set` that is not `#RRGGBB`.
///
/// Applied to every response set that crosses the persistence boundary,
/// whether it arrives as artifact bytes or inside a checkpoint.
pub fn check_colors(set: &ResponseSet) -> Result<(), ArtifactError> {
    match set.iter().find(|(_, _, color)| !color.is_hex_rgb()) {
        Some((category, word, color)) => Err(ArtifactError::InvalidColor {
            category: category.to_string(),
            word: word.to_string(),
            color: color.as_str().to_string(),
        }),
        None => Ok(()),
    }
}

/// One word rated in both sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub category: String,
    pub word: String,
    pub current: Color,
    pub prior: Color,
}

impl Comparison {
    /// Both sessions picked the same color, ignoring hex case.
    pub fn is_unchanged(&self) -> bool {
        self.current.as_str().eq_ignore_ascii_case(self.prior.as_str())
    }
}

/// Pair up colors recorded in both sets, in catalog order.
///
/// Words missing from either side are skipped, as are words in either set
/// that the catalog does not contain.
pub fn compare(catalog: &Catalog, current: &ResponseSet, prior: &ResponseSet) -> Vec<Comparison> {
    catalog
        .keys()
        .filter_map(|key| {
            let (category, word) = catalog.word(key)?;
            let current = current.get(category, word)?;
            let prior = prior.get(category, word)?;
            Some(Comparison {
                category: category.to_string(),
                word: word.to_string(),
                current: current.clone(),
                prior: prior.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample() -> ResponseSet {
        let mut set = ResponseSet::new();
        set.insert("Emotions", "Happy", "#FF0000".into());
        set.insert("Emotions", "Sad", "#0000FF".into());
        set.insert("Nature", "Ocean", "#123456".into());
        set
    }

    #[test]
    fn name_embeds_timestamp() {
        let name = ArtifactName::new(DEFAULT_PREFIX, stamp(9, 8, 7));
        assert_eq!(name.file_name(), "color_test_20240102_090807.json");
        assert_eq!(name.to_string(), name.file_name());
    }

    #[test]
    fn name_drops_subseconds() {
        let precise = stamp(9, 8, 7).with_nanosecond(123_000_000).unwrap();
        let name = ArtifactName::new(DEFAULT_PREFIX, precise);
        assert_eq!(name.timestamp(), stamp(9, 8, 7));
    }

    #[test]
    fn names_sort_chronologically() {
        let early = ArtifactName::new(DEFAULT_PREFIX, stamp(9, 0, 0));
        let late = ArtifactName::new(DEFAULT_PREFIX, stamp(10, 0, 0));
        assert!(early < late);
        assert!(early.file_name() < late.file_name());
    }

    #[test]
    fn parse_rejects_foreign_files() {
        assert!(ArtifactName::parse(DEFAULT_PREFIX, "notes.txt").is_none());
        assert!(ArtifactName::parse(DEFAULT_PREFIX, "color_test_garbage.json").is_none());
        assert!(ArtifactName::parse("other_", "color_test_20240102_090807.json").is_none());
    }

    #[test]
    fn export_is_pretty_json() {
        let artifact = export(&sample(), ArtifactName::new(DEFAULT_PREFIX, stamp(1, 2, 3))).unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();

        assert!(text.starts_with("{\n  \"Emotions\": {\n    \"Happy\": \"#FF0000\""));
    }

    #[test]
    fn import_reverses_export() {
        let set = sample();
        let artifact = export(&set, ArtifactName::now(DEFAULT_PREFIX)).unwrap();

        assert_eq!(import(&artifact.bytes).unwrap(), set);
    }

    #[test]
    fn import_accepts_either_hex_case() {
        let set = import(br##"{"Nature": {"Ocean": "#abcdef", "Sky": "#ABCDEF"}}"##).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_category_survives_round_trip() {
        let mut raw = BTreeMap::new();
        raw.insert("Emotions".to_string(), BTreeMap::new());
        let set = ResponseSet::from(raw);

        let first = export(&set, ArtifactName::new(DEFAULT_PREFIX, stamp(9, 0, 0))).unwrap();
        let imported = import(&first.bytes).unwrap();
        let second = export(&imported, first.name.clone()).unwrap();

        assert_eq!(imported, set);
        assert!(imported.category("Emotions").is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn check_colors_names_the_offending_word() {
        let mut set = sample();
        assert!(check_colors(&set).is_ok());

        set.insert("Nature", "Ocean", "navy".into());
        match check_colors(&set).unwrap_err() {
            ArtifactError::InvalidColor { category, word, color } => {
                assert_eq!((category.as_str(), word.as_str()), ("Nature", "Ocean"));
                assert_eq!(color, "navy");
            }
            other => panic!("Expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn import_reports_each_malformed_kind() {
        assert!(matches!(
            import(b"{").unwrap_err(),
            ArtifactError::MalformedJson(_)
        ));
        assert!(matches!(
            import(br#"["Emotions"]"#).unwrap_err(),
            ArtifactError::UnexpectedShape(_)
        ));
        assert!(matches!(
            import(br#"{"Emotions": {"Happy": 7}}"#).unwrap_err(),
            ArtifactError::UnexpectedShape(_)
        ));

        let err = import(br#"{"Emotions": {"Happy": "red"}}"#).unwrap_err();
        assert!(err.is_malformed());
        match err {
            ArtifactError::InvalidColor { word, color, .. } => {
                assert_eq!(word, "Happy");
                assert_eq!(color, "red");
            }
            other => panic!("Expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn import_of_empty_object_is_empty_set() {
        assert!(import(b"{}").unwrap().is_empty());
    }

    #[test]
    fn compare_follows_catalog_order_and_skips_gaps() {
        let catalog = Catalog::new([
            ("Nature", vec!["Ocean", "Sky"]),
            ("Emotions", vec!["Happy", "Sad"]),
        ])
        .unwrap();

        let current = sample();
        let mut prior = ResponseSet::new();
        prior.insert("Emotions", "Sad", "#0000ff".into());
        prior.insert("Emotions", "Happy", "#00FF00".into());
        prior.insert("Nature", "Ocean", "#654321".into());
        prior.insert("Nature", "Sky", "#87CEEB".into());
        prior.insert("Weather", "Rain", "#778899".into());

        let rows = compare(&catalog, &current, &prior);
        let words: Vec<_> = rows.iter().map(|r| r.word.as_str()).collect();

        assert_eq!(words, vec!["Ocean", "Happy", "Sad"]);
        assert_eq!(rows[1].current, Color::new("#FF0000"));
        assert_eq!(rows[1].prior, Color::new("#00FF00"));
        assert!(!rows[1].is_unchanged());
        assert!(rows[2].is_unchanged());
    }
}
