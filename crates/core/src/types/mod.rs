//! Core value types for SiteDeck.
//!
//! This module provides type-safe wrappers for ids, prices, emails and the
//! small enums records are classified by.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::*;
