//! Site pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::editor::{Section, SectionList};
use crate::types::PageId;
use crate::validate::{Validate, ValidationError, required};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page form payload. Sections are edited through the section operations,
/// so replacing a page keeps its sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageDraft {
    pub title: String,
    /// Derived from the title when blank.
    pub slug: String,
}

impl Validate for PageDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        if !self.slug.trim().is_empty() && slugify(&self.slug).is_empty() {
            return Err(ValidationError::new(
                "slug",
                "slug needs at least one letter or digit",
            ));
        }
        Ok(())
    }
}

impl PageDraft {
    fn resolved_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            slugify(&self.slug)
        }
    }
}

/// Lowercase ASCII letters and digits joined by single hyphens.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl Record for Page {
    type Id = PageId;
    type Draft = PageDraft;

    const COLLECTION_KEY: &'static str = "sitePages";
    const LABEL: &'static str = "page";

    fn from_draft(id: PageId, draft: PageDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            slug: draft.resolved_slug(),
            title: draft.title.trim().to_string(),
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: PageDraft, now: DateTime<Utc>) {
        self.slug = draft.resolved_slug();
        self.title = draft.title.trim().to_string();
        self.updated_at = now;
    }

    fn id(&self) -> &PageId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.slug.as_str()]
    }
}

impl SectionList for Page {
    fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn sections_mut(&mut self) -> &mut Vec<Section> {
        &mut self.sections
    }
}
