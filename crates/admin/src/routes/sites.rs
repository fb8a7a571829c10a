//! Page preview.
//!
//! Renders a page exactly as edited: sections in stored order, and within
//! each section only the blocks that are switched on.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use sitedeck_core::PageId;
use sitedeck_core::editor::{Block, ButtonBlock, Card, Section};
use sitedeck_core::models::{GlobalStyles, Page};
use tracing::instrument;

use crate::{
    db::{CollectionRepository, settings},
    error::AppError,
    state::AppState,
};

/// Build the site preview router.
pub fn router() -> Router<AppState> {
    Router::new().route("/sites/{id}/preview", get(preview))
}

/// A section reduced to its visible, non-empty blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionView {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub carousel: Vec<String>,
    pub cards: Vec<Card>,
    pub button: Option<ButtonBlock>,
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Records stored before link checks existed may still hold script URLs.
fn linkable(button: &ButtonBlock) -> bool {
    button.validate_url("button").is_ok()
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        let mut view = Self::default();
        for block in section.visible_blocks() {
            match block {
                Block::Title => view.title = non_blank(&section.title),
                Block::Subtitle => view.subtitle = non_blank(&section.subtitle),
                Block::Description => view.description = non_blank(&section.description),
                Block::Image => view.image.clone_from(&section.image),
                Block::Carousel => view.carousel.clone_from(&section.carousel),
                Block::Cards => {
                    view.cards.clone_from(&section.cards);
                    for card in &mut view.cards {
                        card.button = card.button.take().filter(linkable);
                    }
                }
                Block::Button => {
                    view.button = (!section.button.label.trim().is_empty()
                        && linkable(&section.button))
                    .then(|| section.button.clone());
                }
            }
        }
        view
    }
}

/// Page preview template.
#[derive(Template, WebTemplate)]
#[template(path = "sites/preview.html")]
pub struct PreviewTemplate {
    pub current_path: String,
    pub page_title: String,
    pub slug: String,
    pub styles: GlobalStyles,
    pub sections: Vec<SectionView>,
}

/// Page preview handler.
///
/// # Errors
///
/// Returns 404 for an unknown page.
#[instrument(skip(state))]
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<PreviewTemplate, AppError> {
    let id = PageId::from(id);
    let page_repo = CollectionRepository::<Page>::new(state.store());
    let (pages, styles) = tokio::try_join!(
        page_repo.load(),
        settings::global_styles(state.store()),
    )?;
    let page = pages
        .get(&id)
        .ok_or_else(|| AppError::not_found("page", &id))?;

    Ok(PreviewTemplate {
        current_path: format!("/sites/{id}/preview"),
        page_title: page.title.clone(),
        slug: page.slug.clone(),
        styles,
        sections: page.sections.iter().map(SectionView::from).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sitedeck_core::SectionId;
    use sitedeck_core::editor::SectionDraft;

    use super::*;

    #[test]
    fn test_disabled_blocks_are_hidden_but_kept() {
        let mut section = Section::new(
            SectionId::from("s1"),
            SectionDraft {
                name: "Hero".to_string(),
                blocks: vec![Block::Title, Block::Subtitle],
            },
        );
        section.title = "Welcome".to_string();
        section.subtitle = "   ".to_string();
        section.description = "Hidden text".to_string();

        let view = SectionView::from(&section);
        assert_eq!(view.title.as_deref(), Some("Welcome"));
        assert!(view.subtitle.is_none());
        assert!(view.description.is_none());

        section.set_block(Block::Description, true);
        assert_eq!(
            SectionView::from(&section).description.as_deref(),
            Some("Hidden text")
        );
    }

    #[test]
    fn test_stored_script_links_are_dropped() {
        let mut section = Section::new(
            SectionId::from("s1"),
            SectionDraft {
                name: "Hero".to_string(),
                blocks: vec![Block::Button],
            },
        );
        section.button = ButtonBlock {
            label: "Win".to_string(),
            url: "javascript:alert(1)".to_string(),
        };
        assert!(SectionView::from(&section).button.is_none());

        section.button.url = "https://bakery.example".to_string();
        assert!(SectionView::from(&section).button.is_some());
    }

    #[test]
    fn test_preview_renders_enabled_blocks() {
        let mut section = Section::new(
            SectionId::from("s1"),
            SectionDraft {
                name: "Hero".to_string(),
                blocks: vec![Block::Title, Block::Button],
            },
        );
        section.title = "Fresh <bread>".to_string();
        section.description = "not shown".to_string();
        section.button = ButtonBlock {
            label: "Order now".to_string(),
            url: "/order".to_string(),
        };

        let html = PreviewTemplate {
            current_path: "/sites/home/preview".to_string(),
            page_title: "Home".to_string(),
            slug: "home".to_string(),
            styles: GlobalStyles::default(),
            sections: vec![SectionView::from(&section)],
        }
        .render()
        .unwrap();

        assert!(html.contains("Fresh &#60;bread&#62;") || html.contains("Fresh &lt;bread&gt;"));
        assert!(html.contains("Order now"));
        assert!(!html.contains("not shown"));
    }
}
