//! SiteDeck Core - Domain types and editing logic.
//!
//! This crate provides the records and operations shared by all SiteDeck
//! components:
//! - `admin` - The dashboard server
//! - `cli` - Command-line tools for seeding and maintaining storage
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP. Persistence lives in the admin crate, which loads a
//! whole [`Collection`], mutates it with the operations here and writes it
//! back.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and statuses
//! - [`models`] - Posts, products, sales, people, pages and settings documents
//! - [`collection`] - The [`Record`] trait and ordered [`Collection`]
//! - [`editor`] - Page sections, their toggleable blocks, and cards
//! - [`reorder`] - Drag-to-reorder list utility
//! - [`validate`] - Required-field validation for form payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod editor;
pub mod models;
pub mod reorder;
pub mod types;
pub mod validate;

pub use collection::{Collection, Record};
pub use reorder::{DragSession, ReorderError};
pub use types::*;
pub use validate::{Validate, ValidationError};
