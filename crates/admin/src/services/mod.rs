//! Business logic services for admin.
//!
//! # Services
//!
//! - `dashboard` - Widget contents computed from stored collections
//! - `media` - Image uploads encoded as inline data URLs

pub mod dashboard;
pub mod media;

pub use media::{MediaError, encode_data_url};
