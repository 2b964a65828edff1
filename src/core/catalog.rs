//! The fixed word catalog presented during a survey.
//!
//! A catalog is an ordered list of categories, each holding an ordered list of
//! words. Declared order is the only order: navigation, progress and comparison
//! all walk the catalog exactly as it was constructed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Built-in categories used when no catalog is configured.
const BUILTIN: &[(&str, &[&str])] = &[
    ("Emotions", &["Happy", "Sad", "Angry", "Peaceful", "Excited"]),
    ("Nature", &["Ocean", "Forest", "Mountain", "Desert", "Sky"]),
    ("Temperature", &["Hot", "Cold", "Warm", "Freezing", "Mild"]),
    ("Abstract", &["Freedom", "Love", "Success", "Power", "Wisdom"]),
];

/// Index of a category within its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub(crate) usize);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a word within its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub(crate) usize);

impl WordId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Key of a single rateable word.
///
/// The derived ordering compares category first, then word, which is
/// exactly declared catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordKey {
    pub category: CategoryId,
    pub word: WordId,
}

/// A single problem found while validating a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogViolation {
    NoCategories,
    EmptyCategory { category: String },
    DuplicateCategory { category: String },
    DuplicateWord { category: String, word: String },
}

impl fmt::Display for CatalogViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCategories => write!(f, "catalog has no categories"),
            Self::EmptyCategory { category } => write!(f, "category '{category}' has no words"),
            Self::DuplicateCategory { category } => {
                write!(f, "category '{category}' is declared more than once")
            }
            Self::DuplicateWord { category, word } => {
                write!(f, "word '{word}' appears more than once in '{category}'")
            }
        }
    }
}

/// Every violation found in a rejected catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid catalog: {}", render_violations(.violations))]
pub struct CatalogError {
    pub violations: Vec<CatalogViolation>,
}

fn render_violations(violations: &[CatalogViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Category {
    name: String,
    words: Vec<String>,
}

/// Ordered, immutable mapping from category name to its words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog, reporting every violation at once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chromasurvey::core::Catalog;
    ///
    /// let catalog = Catalog::new([
    ///     ("Emotions", vec!["Happy", "Sad"]),
    ///     ("Nature", vec!["Ocean"]),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalog.total_words(), 3);
    ///
    /// let err = Catalog::new([("Empty", Vec::<&str>::new()), ("Empty", vec![])]).unwrap_err();
    /// assert_eq!(err.violations.len(), 3);
    /// ```
    pub fn new<I, C, W, S>(categories: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (C, W)>,
        C: Into<String>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<Category> = categories
            .into_iter()
            .map(|(name, words)| Category {
                name: name.into(),
                words: words.into_iter().map(Into::into).collect(),
            })
            .collect();

        match validate(&categories) {
            Validation::Success(_) => Ok(Self { categories }),
            Validation::Failure(errors) => Err(CatalogError {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    /// The built-in four-category word list.
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN
                .iter()
                .map(|(name, words)| Category {
                    name: (*name).to_string(),
                    words: words.iter().map(|w| (*w).to_string()).collect(),
                })
                .collect(),
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of words in a category, or 0 for an id from another catalog.
    pub fn word_count(&self, category: CategoryId) -> usize {
        self.categories
            .get(category.0)
            .map_or(0, |c| c.words.len())
    }

    pub fn total_words(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    pub fn category_ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        (0..self.categories.len()).map(CategoryId)
    }

    pub fn category_name(&self, category: CategoryId) -> Option<&str> {
        self.categories.get(category.0).map(|c| c.name.as_str())
    }

    pub fn words(&self, category: CategoryId) -> &[String] {
        self.categories
            .get(category.0)
            .map_or(&[][..], |c| c.words.as_slice())
    }

    /// Resolve a key to its `(category, word)` names.
    pub fn word(&self, key: WordKey) -> Option<(&str, &str)> {
        let category = self.categories.get(key.category.0)?;
        let word = category.words.get(key.word.0)?;
        Some((category.name.as_str(), word.as_str()))
    }

    /// Names at a key known to belong to this catalog.
    pub(crate) fn names(&self, key: WordKey) -> (&str, &str) {
        let category = &self.categories[key.category.0];
        (&category.name, &category.words[key.word.0])
    }

    pub fn contains(&self, key: WordKey) -> bool {
        self.word(key).is_some()
    }

    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|c| c.name == name)
            .map(CategoryId)
    }

    /// Look up a word by its category and word names.
    pub fn key_of(&self, category: &str, word: &str) -> Option<WordKey> {
        let category = self.category_id(category)?;
        let word = self.words(category).iter().position(|w| w == word)?;
        Some(WordKey {
            category,
            word: WordId(word),
        })
    }

    /// All word keys in declared order.
    pub fn keys(&self) -> impl Iterator<Item = WordKey> + '_ {
        self.categories.iter().enumerate().flat_map(|(c, cat)| {
            (0..cat.words.len()).map(move |w| WordKey {
                category: CategoryId(c),
                word: WordId(w),
            })
        })
    }

    /// Zero-based position of `key` in the flattened declared order.
    pub fn flat_index(&self, key: WordKey) -> usize {
        let before: usize = self
            .categories
            .iter()
            .take(key.category.0)
            .map(|c| c.words.len())
            .sum();
        before + key.word.0
    }
}

fn validate(categories: &[Category]) -> Validation<(), NonEmptyVec<CatalogViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<CatalogViolation>>> = Vec::new();

    if categories.is_empty() {
        checks.push(Validation::fail(CatalogViolation::NoCategories));
    }

    let mut seen_categories = HashSet::new();
    for category in categories {
        if !seen_categories.insert(category.name.as_str()) {
            checks.push(Validation::fail(CatalogViolation::DuplicateCategory {
                category: category.name.clone(),
            }));
        }

        if category.words.is_empty() {
            checks.push(Validation::fail(CatalogViolation::EmptyCategory {
                category: category.name.clone(),
            }));
        }

        let mut seen_words = HashSet::new();
        for word in &category.words {
            if !seen_words.insert(word.as_str()) {
                checks.push(Validation::fail(CatalogViolation::DuplicateWord {
                    category: category.name.clone(),
                    word: word.clone(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
