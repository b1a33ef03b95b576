use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::content::{default_catalog, ContentItem};
use crate::model::ids::ContentId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LibraryError {
    #[error("no catalog entry with id {0}")]
    UnknownContent(ContentId),
}

//
// ─── LIBRARY ───────────────────────────────────────────────────────────────────
//

/// The content catalog together with the user's saved and liked flags.
///
/// Flags are sets: toggling twice returns to the original state, and a flag
/// can only point at an entry that exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    catalog: Vec<ContentItem>,
    saved: BTreeSet<ContentId>,
    liked: BTreeSet<ContentId>,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Creates a library over the built-in catalog with no flags set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
            saved: BTreeSet::new(),
            liked: BTreeSet::new(),
        }
    }

    /// Rehydrates flags from storage.
    ///
    /// Ids that are not in the catalog are dropped silently.
    #[must_use]
    pub fn from_flags(
        saved: impl IntoIterator<Item = ContentId>,
        liked: impl IntoIterator<Item = ContentId>,
    ) -> Self {
        let mut library = Self::new();
        for id in saved {
            if library.contains(id) {
                library.saved.insert(id);
            }
        }
        for id in liked {
            if library.contains(id) {
                library.liked.insert(id);
            }
        }
        library
    }

    // Accessors
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.catalog
    }

    #[must_use]
    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.catalog.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ContentId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn is_saved(&self, id: ContentId) -> bool {
        self.saved.contains(&id)
    }

    #[must_use]
    pub fn is_liked(&self, id: ContentId) -> bool {
        self.liked.contains(&id)
    }

    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    /// Saved entries in catalog order.
    #[must_use]
    pub fn saved_items(&self) -> Vec<&ContentItem> {
        self.catalog
            .iter()
            .filter(|item| self.saved.contains(&item.id()))
            .collect()
    }

    /// Liked entries in catalog order.
    #[must_use]
    pub fn liked_items(&self) -> Vec<&ContentItem> {
        self.catalog
            .iter()
            .filter(|item| self.liked.contains(&item.id()))
            .collect()
    }

    /// Saved ids for persistence, in ascending order.
    #[must_use]
    pub fn saved_ids(&self) -> Vec<ContentId> {
        self.saved.iter().copied().collect()
    }

    /// Liked ids for persistence, in ascending order.
    #[must_use]
    pub fn liked_ids(&self) -> Vec<ContentId> {
        self.liked.iter().copied().collect()
    }

    /// Flips the saved flag. Returns true if the entry is now saved.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownContent` for ids outside the catalog.
    pub fn toggle_saved(&mut self, id: ContentId) -> Result<bool, LibraryError> {
        if !self.contains(id) {
            return Err(LibraryError::UnknownContent(id));
        }
        if self.saved.remove(&id) {
            Ok(false)
        } else {
            self.saved.insert(id);
            Ok(true)
        }
    }

    /// Flips the liked flag. Returns true if the entry is now liked.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownContent` for ids outside the catalog.
    pub fn toggle_liked(&mut self, id: ContentId) -> Result<bool, LibraryError> {
        if !self.contains(id) {
            return Err(LibraryError::UnknownContent(id));
        }
        if self.liked.remove(&id) {
            Ok(false)
        } else {
            self.liked.insert(id);
            Ok(true)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_saved_roundtrips() {
        let mut library = Library::new();
        let id = ContentId::new(3);
        assert!(library.toggle_saved(id).unwrap());
        assert!(library.is_saved(id));
        assert!(!library.toggle_saved(id).unwrap());
        assert!(!library.is_saved(id));
    }

    #[test]
    fn toggle_rejects_unknown_content() {
        let mut library = Library::new();
        let err = library.toggle_saved(ContentId::new(99)).unwrap_err();
        assert_eq!(err, LibraryError::UnknownContent(ContentId::new(99)));
        let err = library.toggle_liked(ContentId::new(0)).unwrap_err();
        assert_eq!(err, LibraryError::UnknownContent(ContentId::new(0)));
    }

    #[test]
    fn saved_items_follow_catalog_order() {
        let mut library = Library::new();
        library.toggle_saved(ContentId::new(5)).unwrap();
        library.toggle_saved(ContentId::new(1)).unwrap();
        let titles: Vec<&str> = library.saved_items().iter().map(|i| i.title()).collect();
        assert_eq!(titles, vec!["Physics: Mechanics", "Physics: Thermodynamics"]);
    }

    #[test]
    fn from_flags_drops_unknown_ids() {
        let library = Library::from_flags(
            [ContentId::new(2), ContentId::new(42)],
            [ContentId::new(6)],
        );
        assert_eq!(library.saved_count(), 1);
        assert!(library.is_saved(ContentId::new(2)));
        assert!(library.is_liked(ContentId::new(6)));
    }

    #[test]
    fn like_and_save_are_independent() {
        let mut library = Library::new();
        let id = ContentId::new(4);
        library.toggle_liked(id).unwrap();
        assert!(library.is_liked(id));
        assert!(!library.is_saved(id));
        assert_eq!(library.liked_count(), 1);
        assert_eq!(library.saved_count(), 0);
    }
}
