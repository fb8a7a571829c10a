//! Product catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::types::{Price, ProductId};
use crate::validate::{Validate, ValidationError, required};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub customizable: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub quantity: u32,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub customizable: bool,
    pub image: Option<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: Price::zero(),
            description: String::new(),
            category: String::new(),
            quantity: 0,
            colors: Vec::new(),
            sizes: Vec::new(),
            customizable: false,
            image: None,
        }
    }
}

impl Validate for ProductDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("name", &self.name)?;
        required("category", &self.category)?;
        if self.price.amount.is_sign_negative() && !self.price.amount.is_zero() {
            return Err(ValidationError::new("price", "price cannot be negative"));
        }
        Ok(())
    }
}

/// Trim entries and drop blanks and duplicates, keeping first occurrence.
fn clean_options(values: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !cleaned.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            cleaned.push(value.to_string());
        }
    }
    cleaned
}

impl Record for Product {
    type Id = ProductId;
    type Draft = ProductDraft;

    const COLLECTION_KEY: &'static str = "products";
    const LABEL: &'static str = "product";

    fn from_draft(id: ProductId, draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            price: draft.price,
            description: draft.description,
            category: draft.category.trim().to_string(),
            quantity: draft.quantity,
            colors: clean_options(draft.colors),
            sizes: clean_options(draft.sizes),
            customizable: draft.customizable,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ProductDraft, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.price = draft.price;
        self.description = draft.description;
        self.category = draft.category.trim().to_string();
        self.quantity = draft.quantity;
        self.colors = clean_options(draft.colors);
        self.sizes = clean_options(draft.sizes);
        self.customizable = draft.customizable;
        self.image = draft.image;
        self.updated_at = now;
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.category.as_str()]
    }
}
