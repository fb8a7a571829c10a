//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness
//! GET  /health/ready                  - Readiness (storage reachable)
//!
//! # Pages
//! GET  /                              - Dashboard (enabled widgets + metrics)
//! GET  /sites/{id}/preview            - Page preview
//!
//! # Collections (see api::resource)
//! GET|POST        /api/{collection}
//! GET|PUT|DELETE  /api/{collection}/{id}
//!   collections: posts, products, sales, testimonials, team, profiles, users, pages
//!
//! # Record-specific
//! POST /api/products/reorder          - {ids} or {from, to}
//! PUT  /api/sales/{id}/status         - {status}
//! ...  /api/pages/{id}/sections/...   - Section editor (see api::sections)
//!
//! # Settings
//! GET  /api/widgets                   - Widget layout
//! PUT  /api/widgets/{id}              - {enabled}
//! POST /api/widgets/reorder           - {ids} or {from, to}
//! GET|PUT /api/styles                 - Global styles
//! GET|PUT /api/settings/{user_id}     - Per-user settings
//!
//! # Media
//! POST /api/media                     - Multipart image upload -> data URL
//! GET  /api/editor                    - Rich-text editor configuration
//! ```

pub mod api;
pub mod dashboard;
pub mod health;
pub mod sites;

use axum::Router;

use crate::state::AppState;

/// Build every application route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(sites::router())
        .merge(api::router())
}
