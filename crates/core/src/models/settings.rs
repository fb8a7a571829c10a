//! Single-document settings: dashboard layout, global styles and per-user
//! preferences.

use serde::{Deserialize, Serialize};

use crate::types::{UserId, WidgetId, WidgetKind};
use crate::validate::{Validate, ValidationError, required};

/// Storage key for the dashboard widget layout.
pub const WIDGET_LAYOUT_KEY: &str = "dashboardWidgets";
/// Storage key for the site-wide style settings.
pub const GLOBAL_STYLES_KEY: &str = "globalStyles";

/// Storage key for one user's settings.
#[must_use]
pub fn user_settings_key(user_id: &UserId) -> String {
    format!("userSettings.{user_id}")
}

/// A dashboard panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub title: String,
    pub kind: WidgetKind,
    pub enabled: bool,
}

impl Widget {
    fn new(id: &str, title: &str, kind: WidgetKind, enabled: bool) -> Self {
        Self {
            id: WidgetId::from(id),
            title: title.to_string(),
            kind,
            enabled,
        }
    }
}

/// Layout shown before the user has arranged anything.
#[must_use]
pub fn default_widgets() -> Vec<Widget> {
    vec![
        Widget::new("traffic", "Site traffic", WidgetKind::TrafficChart, true),
        Widget::new("sales-summary", "Sales summary", WidgetKind::SalesSummary, true),
        Widget::new("recent-orders", "Recent orders", WidgetKind::RecentOrders, true),
        Widget::new("top-products", "Top products", WidgetKind::TopProducts, true),
        Widget::new("latest-posts", "Latest posts", WidgetKind::LatestPosts, false),
        Widget::new("testimonials", "Testimonials", WidgetKind::Testimonials, false),
    ]
}

/// Site-wide look and feel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalStyles {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    /// Base font size in pixels.
    pub base_font_size: u8,
    /// Corner radius in pixels.
    pub border_radius: u8,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#f59e0b".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            base_font_size: 16,
            border_radius: 8,
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl Validate for GlobalStyles {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("secondary_color", &self.secondary_color),
        ] {
            if !is_hex_color(value) {
                return Err(ValidationError::new(
                    field,
                    format!("{value} is not a hex colour like #1a2b3c"),
                ));
            }
        }
        required("font_family", &self.font_family)?;
        if !(10..=32).contains(&self.base_font_size) {
            return Err(ValidationError::new(
                "base_font_size",
                "font size must be between 10 and 32 pixels",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

/// Preferences of one dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub theme: Theme,
    /// BCP 47 language tag, e.g. `en` or `pt-BR`.
    pub language: String,
    pub email_notifications: bool,
    pub density: Density,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: "en".to_string(),
            email_notifications: true,
            density: Density::default(),
        }
    }
}

impl Validate for UserSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        required("language", &self.language)
    }
}
