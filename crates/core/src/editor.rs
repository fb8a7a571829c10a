//! Section editor.
//!
//! A page is an ordered list of sections. Each section carries a flag per
//! optional block (title, subtitle, description, image, carousel, cards,
//! button) and the content for every block. Flags and content are
//! independent: switching a block off hides it from the preview but keeps
//! what was typed, so switching it back on restores the block as it was.

use serde::{Deserialize, Serialize};

use crate::reorder::{self, ReorderError};
use crate::types::{CardId, SectionId};
use crate::validate::{Validate, ValidationError, required};

/// The optional blocks a section can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Title,
    Subtitle,
    Description,
    Image,
    Carousel,
    Cards,
    Button,
}

impl Block {
    /// Blocks in the order the preview renders them.
    pub const RENDER_ORDER: [Self; 7] = [
        Self::Title,
        Self::Subtitle,
        Self::Description,
        Self::Image,
        Self::Carousel,
        Self::Cards,
        Self::Button,
    ];
}

impl std::str::FromStr for Block {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "subtitle" => Ok(Self::Subtitle),
            "description" => Ok(Self::Description),
            "image" => Ok(Self::Image),
            "carousel" => Ok(Self::Carousel),
            "cards" => Ok(Self::Cards),
            "button" => Ok(Self::Button),
            _ => Err(format!("unknown block: {s}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBlock {
    pub label: String,
    pub url: String,
}

/// URL schemes a button may link to. Scheme-less URLs are relative.
const LINK_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

impl ButtonBlock {
    /// Reject links that would run script when clicked, such as
    /// `javascript:` or `data:` URLs.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `field` for any other scheme.
    pub fn validate_url(&self, field: &'static str) -> Result<(), ValidationError> {
        let url = self.url.trim();
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.contains(['/', '?', '#']));
        match scheme {
            Some(scheme)
                if !LINK_SCHEMES
                    .iter()
                    .any(|allowed| scheme.trim().eq_ignore_ascii_case(allowed)) =>
            {
                Err(ValidationError::new(
                    field,
                    format!("button links cannot use {}:", scheme.trim()),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub button: Option<ButtonBlock>,
}

/// Card form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardDraft {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub button: Option<ButtonBlock>,
}

impl Validate for CardDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        if let Some(button) = &self.button {
            button.validate_url("button")?;
        }
        Ok(())
    }
}

impl Card {
    fn from_draft(id: CardId, draft: CardDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            image: draft.image,
            button: draft.button,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Section {
    pub id: SectionId,
    /// Editor-only label.
    pub name: String,

    pub has_title: bool,
    pub has_subtitle: bool,
    pub has_description: bool,
    pub has_image: bool,
    pub has_carousel: bool,
    pub has_cards: bool,
    pub has_button: bool,

    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image: Option<String>,
    pub carousel: Vec<String>,
    pub cards: Vec<Card>,
    pub button: ButtonBlock,
}

/// Payload for creating a section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionDraft {
    pub name: String,
    /// Blocks enabled from the start.
    pub blocks: Vec<Block>,
}

impl Validate for SectionDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)
    }
}

/// Partial content update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the image.
    #[serde(deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    pub carousel: Option<Vec<String>>,
    pub button: Option<ButtonBlock>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Validate for SectionPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            required("name", name)?;
        }
        if let Some(button) = &self.button {
            button.validate_url("button")?;
        }
        Ok(())
    }
}

impl Section {
    /// A new section with the given blocks switched on.
    #[must_use]
    pub fn new(id: SectionId, draft: SectionDraft) -> Self {
        let mut section = Self {
            id,
            name: draft.name.trim().to_string(),
            ..Self::default()
        };
        for block in draft.blocks {
            section.set_block(block, true);
        }
        section
    }

    /// Switch a block on or off. Content is never touched.
    pub fn set_block(&mut self, block: Block, enabled: bool) {
        *self.flag_mut(block) = enabled;
    }

    #[must_use]
    pub const fn is_enabled(&self, block: Block) -> bool {
        match block {
            Block::Title => self.has_title,
            Block::Subtitle => self.has_subtitle,
            Block::Description => self.has_description,
            Block::Image => self.has_image,
            Block::Carousel => self.has_carousel,
            Block::Cards => self.has_cards,
            Block::Button => self.has_button,
        }
    }

    fn flag_mut(&mut self, block: Block) -> &mut bool {
        match block {
            Block::Title => &mut self.has_title,
            Block::Subtitle => &mut self.has_subtitle,
            Block::Description => &mut self.has_description,
            Block::Image => &mut self.has_image,
            Block::Carousel => &mut self.has_carousel,
            Block::Cards => &mut self.has_cards,
            Block::Button => &mut self.has_button,
        }
    }

    /// Enabled blocks in render order.
    #[must_use]
    pub fn visible_blocks(&self) -> Vec<Block> {
        Block::RENDER_ORDER
            .into_iter()
            .filter(|block| self.is_enabled(*block))
            .collect()
    }

    /// Apply a partial content update.
    pub fn apply_content(&mut self, patch: SectionPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(subtitle) = patch.subtitle {
            self.subtitle = subtitle;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(carousel) = patch.carousel {
            self.carousel = carousel;
        }
        if let Some(button) = patch.button {
            self.button = button;
        }
    }

    /// Append a card, returning its id.
    pub fn add_card(&mut self, draft: CardDraft) -> CardId {
        let id = CardId::generate();
        self.cards.push(Card::from_draft(id.clone(), draft));
        id
    }

    /// Replace a card's content. Returns `false` if the card does not exist.
    pub fn update_card(&mut self, id: &CardId, draft: CardDraft) -> bool {
        match self.cards.iter_mut().find(|card| &card.id == id) {
            Some(card) => {
                *card = Card::from_draft(id.clone(), draft);
                true
            }
            None => false,
        }
    }

    /// Remove a card. Returns `false` if the card does not exist.
    pub fn remove_card(&mut self, id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| &card.id != id);
        self.cards.len() != before
    }
}

/// Section-level operations on a page's ordered section list.
pub trait SectionList {
    fn sections(&self) -> &[Section];
    fn sections_mut(&mut self) -> &mut Vec<Section>;

    /// Append a section, returning its id.
    fn add_section(&mut self, draft: SectionDraft) -> SectionId {
        let id = SectionId::generate();
        self.sections_mut().push(Section::new(id.clone(), draft));
        id
    }

    fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections().iter().find(|s| &s.id == id)
    }

    fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections_mut().iter_mut().find(|s| &s.id == id)
    }

    /// Remove a section. Returns `false` if it does not exist.
    fn remove_section(&mut self, id: &SectionId) -> bool {
        let sections = self.sections_mut();
        let before = sections.len();
        sections.retain(|s| &s.id != id);
        sections.len() != before
    }

    /// Move a section from one position to another.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::OutOfBounds`] for invalid indices.
    fn move_section(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        reorder::move_within(self.sections_mut(), from, to)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hero() -> Section {
        Section::new(
            SectionId::from("hero"),
            SectionDraft {
                name: "Hero".to_string(),
                blocks: vec![Block::Title, Block::Button],
            },
        )
    }

    fn button(url: &str) -> ButtonBlock {
        ButtonBlock {
            label: "Shop now".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_button_url_schemes() {
        for url in [
            "",
            "/shop",
            "#contact",
            "shop?tab=new",
            "https://bakery.example",
            "HTTP://bakery.example",
            "mailto:hello@bakery.example",
            "tel:+15550100",
            "/search?q=a:b",
        ] {
            assert!(button(url).validate_url("button").is_ok(), "{url}");
        }
        for url in [
            "javascript:alert(document.cookie)",
            " JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "vbscript:msgbox",
        ] {
            let err = button(url).validate_url("button").unwrap_err();
            assert_eq!(err.field, "button", "{url}");
        }
    }

    #[test]
    fn test_script_links_rejected_in_cards_and_patches() {
        let card = CardDraft {
            title: "Sourdough".to_string(),
            button: Some(button("javascript:alert(1)")),
            ..CardDraft::default()
        };
        assert_eq!(card.validate().unwrap_err().field, "button");

        let patch = SectionPatch {
            button: Some(button("javascript:alert(1)")),
            ..SectionPatch::default()
        };
        assert_eq!(patch.validate().unwrap_err().field, "button");

        let patch = SectionPatch {
            button: Some(button("/menu")),
            ..SectionPatch::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_new_section_enables_requested_blocks() {
        let section = hero();
        assert_eq!(section.visible_blocks(), [Block::Title, Block::Button]);
        assert!(!section.is_enabled(Block::Cards));
    }

    #[test]
    fn test_toggle_preserves_content() {
        let mut section = hero();
        section.apply_content(SectionPatch {
            title: Some("Baked fresh every morning".to_string()),
            ..SectionPatch::default()
        });

        section.set_block(Block::Title, false);
        assert!(!section.visible_blocks().contains(&Block::Title));
        assert_eq!(section.title, "Baked fresh every morning");

        section.set_block(Block::Title, true);
        assert!(section.visible_blocks().contains(&Block::Title));
        assert_eq!(section.title, "Baked fresh every morning");
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let mut section = hero();
        section.apply_content(SectionPatch {
            title: Some("Title".to_string()),
            image: Some(Some("data:image/png;base64,AAAA".to_string())),
            ..SectionPatch::default()
        });
        section.apply_content(SectionPatch {
            subtitle: Some("Sub".to_string()),
            ..SectionPatch::default()
        });
        assert_eq!(section.title, "Title");
        assert_eq!(section.subtitle, "Sub");
        assert!(section.image.is_some());

        let clear: SectionPatch = serde_json::from_str(r#"{"image": null}"#).unwrap();
        section.apply_content(clear);
        assert!(section.image.is_none());
    }

    #[test]
    fn test_card_lifecycle() {
        let mut section = hero();
        let first = section.add_card(CardDraft {
            title: "Bread".to_string(),
            ..CardDraft::default()
        });
        let second = section.add_card(CardDraft {
            title: "Cakes".to_string(),
            ..CardDraft::default()
        });

        assert!(section.update_card(
            &first,
            CardDraft {
                title: "Breads".to_string(),
                description: "Sourdough and rye".to_string(),
                ..CardDraft::default()
            }
        ));
        assert_eq!(section.cards.first().unwrap().title, "Breads");
        assert_eq!(section.cards.first().unwrap().id, first);

        assert!(section.remove_card(&second));
        assert!(!section.remove_card(&second));
        assert!(!section.update_card(&second, CardDraft::default()));
        assert_eq!(section.cards.len(), 1);
    }

    #[test]
    fn test_block_from_str() {
        assert_eq!("carousel".parse::<Block>(), Ok(Block::Carousel));
        assert!("video".parse::<Block>().is_err());
    }
}
