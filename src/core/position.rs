//! Cursor over the catalog.

use super::catalog::{Catalog, CategoryId, WordId, WordKey};
use serde::{Deserialize, Serialize};

/// The word currently awaiting a response.
///
/// Moves are pure: `next` and `previous` return a new position and never
/// reorder the catalog.
///
/// # Example
///
/// ```rust
/// use chromasurvey::core::{Catalog, Position};
///
/// let catalog = Catalog::new([("Emotions", vec!["Happy", "Sad"]), ("Nature", vec!["Ocean"])]).unwrap();
///
/// let start = Position::start();
/// let second = start.next(&catalog).unwrap();
/// let third = second.next(&catalog).unwrap();
///
/// assert_eq!(catalog.word(third.key()), Some(("Nature", "Ocean")));
/// assert!(third.next(&catalog).is_none());
/// assert_eq!(third.previous(&catalog), Some(second));
/// assert!(start.previous(&catalog).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub category: CategoryId,
    pub word: WordId,
}

impl Position {
    pub fn start() -> Self {
        Self {
            category: CategoryId(0),
            word: WordId(0),
        }
    }

    pub fn is_start(self) -> bool {
        self == Self::start()
    }

    pub fn key(self) -> WordKey {
        WordKey {
            category: self.category,
            word: self.word,
        }
    }

    pub fn from_key(key: WordKey) -> Self {
        Self {
            category: key.category,
            word: key.word,
        }
    }

    /// Advance by one word. `None` means the final word has been passed.
    pub fn next(self, catalog: &Catalog) -> Option<Self> {
        if self.word.0 + 1 < catalog.word_count(self.category) {
            return Some(Self {
                category: self.category,
                word: WordId(self.word.0 + 1),
            });
        }

        let category = CategoryId(self.category.0 + 1);
        (category.0 < catalog.category_count()).then_some(Self {
            category,
            word: WordId(0),
        })
    }

    /// Step back by one word. `None` at the very first word.
    pub fn previous(self, catalog: &Catalog) -> Option<Self> {
        if let Some(word) = self.word.0.checked_sub(1) {
            return Some(Self {
                category: self.category,
                word: WordId(word),
            });
        }

        let category = CategoryId(self.category.0.checked_sub(1)?);
        let last = catalog.word_count(category).checked_sub(1)?;
        Some(Self {
            category,
            word: WordId(last),
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
