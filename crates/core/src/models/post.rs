//! Blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::types::{AccessType, PostId};
use crate::validate::{Validate, ValidationError, required};

/// Longest excerpt derived from post content.
pub const EXCERPT_LENGTH: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    pub title: String,
    /// Rich-text HTML from the editor.
    pub content: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub access: AccessType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Blog post form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogPostDraft {
    pub title: String,
    pub content: String,
    /// Left blank, an excerpt is derived from `content`.
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub authors: Vec<String>,
    pub access: AccessType,
}

impl Validate for BlogPostDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        required("content", &plain_text(&self.content))
    }
}

impl BlogPostDraft {
    fn resolved_excerpt(&self) -> String {
        if self.excerpt.trim().is_empty() {
            excerpt_from_html(&self.content, EXCERPT_LENGTH)
        } else {
            self.excerpt.trim().to_string()
        }
    }
}

impl Record for BlogPost {
    type Id = PostId;
    type Draft = BlogPostDraft;

    const COLLECTION_KEY: &'static str = "posts";
    const LABEL: &'static str = "post";

    fn from_draft(id: PostId, draft: BlogPostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            excerpt: draft.resolved_excerpt(),
            title: draft.title.trim().to_string(),
            content: draft.content,
            cover_image: draft.cover_image,
            tags: draft.tags,
            categories: draft.categories,
            authors: draft.authors,
            access: draft.access,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: BlogPostDraft, now: DateTime<Utc>) {
        self.excerpt = draft.resolved_excerpt();
        self.title = draft.title.trim().to_string();
        self.content = draft.content;
        self.cover_image = draft.cover_image;
        self.tags = draft.tags;
        self.categories = draft.categories;
        self.authors = draft.authors;
        self.access = draft.access;
        self.updated_at = now;
    }

    fn id(&self) -> &PostId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    /// Also searches the body text, ignoring markup.
    fn matches(&self, needle: &str) -> bool {
        self.search_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
            || plain_text(&self.content).to_lowercase().contains(needle)
    }
}

/// Strip markup from editor HTML and collapse whitespace.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text preview of at most `max_chars` characters.
#[must_use]
pub fn excerpt_from_html(html: &str, max_chars: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
