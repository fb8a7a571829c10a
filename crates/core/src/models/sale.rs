//! Sales records.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::types::{Email, Price, SaleId, SaleStatus};
use crate::validate::{Validate, ValidationError, non_empty, required};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub price: Price,
}

impl LineItem {
    /// Price times quantity, or `None` when it does not fit a `Decimal`.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.amount.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<LineItem>,
    /// Always the sum of the line item subtotals.
    pub total: Price,
    #[serde(default)]
    pub status: SaleStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sale form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleDraft {
    /// Left blank, a fresh `ORD-NNNNNN` number is assigned.
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<LineItem>,
    pub status: SaleStatus,
    /// Defaults to the time of submission.
    pub date: Option<DateTime<Utc>>,
}

impl Validate for SaleDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        required("customer_name", &self.customer_name)?;
        Email::parse(&self.customer_email)
            .map_err(|e| ValidationError::new("customer_email", e.to_string()))?;
        non_empty("items", &self.items)?;
        for item in &self.items {
            required("items", &item.name)?;
            if item.quantity == 0 {
                return Err(ValidationError::new(
                    "items",
                    format!("{} needs a quantity of at least 1", item.name.trim()),
                ));
            }
            if item.price.amount < Decimal::ZERO {
                return Err(ValidationError::new(
                    "items",
                    format!("{} cannot have a negative price", item.name.trim()),
                ));
            }
        }
        let currency = self.items.first().map(|item| item.price.currency_code);
        if self
            .items
            .iter()
            .any(|item| Some(item.price.currency_code) != currency)
        {
            return Err(ValidationError::new(
                "items",
                "all items must use the same currency",
            ));
        }
        if checked_total(&self.items).is_none() {
            return Err(ValidationError::new("items", "total is too large"));
        }
        Ok(())
    }
}

/// Generate an order number of the form `ORD-123456`.
#[must_use]
pub fn generate_order_number() -> String {
    let n: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("ORD-{n}")
}

fn checked_total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
}

/// Stored items bypass validation, so an overflowing total saturates.
fn total_of(items: &[LineItem]) -> Price {
    let amount = checked_total(items).unwrap_or(Decimal::MAX);
    let currency_code = items
        .first()
        .map(|item| item.price.currency_code)
        .unwrap_or_default();
    Price {
        amount,
        currency_code,
    }
}

impl Sale {
    /// Recompute `total` from the current line items.
    pub fn recompute_total(&mut self) {
        self.total = total_of(&self.items);
    }
}

impl Record for Sale {
    type Id = SaleId;
    type Draft = SaleDraft;

    const COLLECTION_KEY: &'static str = "sales";
    const LABEL: &'static str = "sale";

    fn from_draft(id: SaleId, draft: SaleDraft, now: DateTime<Utc>) -> Self {
        let order_number = if draft.order_number.trim().is_empty() {
            generate_order_number()
        } else {
            draft.order_number.trim().to_string()
        };
        let mut sale = Self {
            id,
            order_number,
            customer_name: draft.customer_name.trim().to_string(),
            customer_email: draft.customer_email.trim().to_string(),
            items: draft.items,
            total: Price::zero(),
            status: draft.status,
            date: draft.date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        sale.recompute_total();
        sale
    }

    fn apply(&mut self, draft: SaleDraft, now: DateTime<Utc>) {
        if !draft.order_number.trim().is_empty() {
            self.order_number = draft.order_number.trim().to_string();
        }
        self.customer_name = draft.customer_name.trim().to_string();
        self.customer_email = draft.customer_email.trim().to_string();
        self.items = draft.items;
        self.status = draft.status;
        if let Some(date) = draft.date {
            self.date = date;
        }
        self.updated_at = now;
        self.recompute_total();
    }

    fn id(&self) -> &SaleId {
        &self.id
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.order_number.as_str(),
            self.customer_name.as_str(),
            self.customer_email.as_str(),
        ]
    }
}
