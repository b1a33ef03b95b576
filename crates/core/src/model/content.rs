use std::fmt;

use crate::model::ids::ContentId;

/// Kind of study material behind a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Video,
    Notes,
    Quiz,
    Practice,
}

impl ContentKind {
    /// Stable lowercase label for display and persistence.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Video => "video",
            ContentKind::Notes => "notes",
            ContentKind::Quiz => "quiz",
            ContentKind::Practice => "practice",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the fixed study-material catalog.
///
/// The catalog ships with the app and is never persisted; only the user's
/// saved and liked flags are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    id: ContentId,
    title: String,
    kind: ContentKind,
}

impl ContentItem {
    #[must_use]
    pub fn new(id: ContentId, title: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ContentId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }
}

/// The built-in study-material catalog, in display order.
#[must_use]
pub fn default_catalog() -> Vec<ContentItem> {
    vec![
        ContentItem::new(ContentId::new(1), "Physics: Mechanics", ContentKind::Video),
        ContentItem::new(ContentId::new(2), "Chemistry: Organic", ContentKind::Notes),
        ContentItem::new(ContentId::new(3), "Math: Calculus I", ContentKind::Video),
        ContentItem::new(ContentId::new(4), "Biology: Genetics", ContentKind::Quiz),
        ContentItem::new(
            ContentId::new(5),
            "Physics: Thermodynamics",
            ContentKind::Notes,
        ),
        ContentItem::new(ContentId::new(6), "English: Grammar", ContentKind::Practice),
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_entries_with_sequential_ids() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 6);
        for (i, item) in catalog.iter().enumerate() {
            assert_eq!(item.id(), ContentId::new(u32::try_from(i).unwrap() + 1));
        }
    }

    #[test]
    fn kind_labels_are_lowercase() {
        assert_eq!(ContentKind::Video.label(), "video");
        assert_eq!(ContentKind::Practice.to_string(), "practice");
    }
}
