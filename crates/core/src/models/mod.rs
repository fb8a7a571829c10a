//! Records managed by the dashboard.

pub mod page;
pub mod people;
pub mod post;
pub mod product;
pub mod sale;
pub mod settings;

pub use page::{Page, PageDraft, slugify};
pub use people::{
    Profile, ProfileDraft, TeamMember, TeamMemberDraft, Testimonial, TestimonialDraft, User,
    UserDraft,
};
pub use post::{BlogPost, BlogPostDraft};
pub use product::{Product, ProductDraft};
pub use sale::{LineItem, Sale, SaleDraft};
pub use settings::{
    Density, GLOBAL_STYLES_KEY, GlobalStyles, Theme, UserSettings, WIDGET_LAYOUT_KEY, Widget,
    default_widgets, user_settings_key,
};
