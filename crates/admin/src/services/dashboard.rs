//! Dashboard widget contents.
//!
//! Widgets read the stored collections directly; there is no separate
//! analytics store.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sitedeck_core::models::{BlogPost, Page, Product, Sale, Testimonial, Widget};
use sitedeck_core::{AccessType, CurrencyCode, Price, SaleStatus, WidgetKind};

use crate::db::{CollectionRepository, RepositoryError, Store, settings};

const LIST_LIMIT: usize = 5;
const TESTIMONIAL_LIMIT: usize = 3;

/// Headline numbers above the widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub products: usize,
    pub posts: usize,
    pub pages: usize,
    pub open_orders: usize,
    pub revenue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRow {
    pub label: String,
    pub value: String,
}

impl WidgetRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One enabled widget, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPanel {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub rows: Vec<WidgetRow>,
    pub show_avatars: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub metrics: DashboardMetrics,
    pub widgets: Vec<WidgetPanel>,
}

/// Everything the dashboard reads, loaded once per request.
#[derive(Debug, Default)]
pub struct DashboardSource {
    pub widgets: Vec<Widget>,
    pub products: Vec<Product>,
    pub posts: Vec<BlogPost>,
    pub sales: Vec<Sale>,
    pub testimonials: Vec<Testimonial>,
    pub pages: Vec<Page>,
}

impl DashboardSource {
    /// Load the widget layout and every collection a widget reads.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub async fn load(store: &Store) -> Result<Self, RepositoryError> {
        let product_repo = CollectionRepository::<Product>::new(store);
        let post_repo = CollectionRepository::<BlogPost>::new(store);
        let sale_repo = CollectionRepository::<Sale>::new(store);
        let testimonial_repo = CollectionRepository::<Testimonial>::new(store);
        let page_repo = CollectionRepository::<Page>::new(store);
        let (widgets, products, posts, sales, testimonials, pages) = tokio::try_join!(
            settings::widget_layout(store),
            product_repo.load(),
            post_repo.load(),
            sale_repo.load(),
            testimonial_repo.load(),
            page_repo.load(),
        )?;

        Ok(Self {
            widgets,
            products: products.into_items(),
            posts: posts.into_items(),
            sales: sales.into_items(),
            testimonials: testimonials.into_items(),
            pages: pages.into_items(),
        })
    }

    /// Metrics plus the enabled widgets in layout order.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let widgets = self
            .widgets
            .iter()
            .filter(|widget| widget.enabled)
            .map(|widget| WidgetPanel {
                id: widget.id.to_string(),
                title: widget.title.clone(),
                kind: widget.kind.to_string(),
                rows: self.rows_for(widget.kind),
                show_avatars: widget.kind == WidgetKind::Testimonials,
            })
            .collect();

        DashboardSnapshot {
            metrics: self.metrics(),
            widgets,
        }
    }

    fn metrics(&self) -> DashboardMetrics {
        DashboardMetrics {
            products: self.products.len(),
            posts: self.posts.len(),
            pages: self.pages.len(),
            open_orders: self
                .sales
                .iter()
                .filter(|sale| matches!(sale.status, SaleStatus::Pending | SaleStatus::Processing))
                .count(),
            revenue: self.revenue().to_string(),
        }
    }

    /// Sum of completed sales in the currency of the first one.
    ///
    /// Sales in other currencies are left out and the sum saturates at
    /// [`Decimal::MAX`].
    fn revenue(&self) -> Price {
        let completed = || {
            self.sales
                .iter()
                .filter(|sale| sale.status == SaleStatus::Completed)
        };
        let currency_code = completed()
            .next()
            .map_or(CurrencyCode::default(), |sale| sale.total.currency_code);
        let amount = completed()
            .filter(|sale| sale.total.currency_code == currency_code)
            .try_fold(Decimal::ZERO, |acc, sale| acc.checked_add(sale.total.amount))
            .unwrap_or(Decimal::MAX);
        Price {
            amount,
            currency_code,
        }
    }

    fn rows_for(&self, kind: WidgetKind) -> Vec<WidgetRow> {
        match kind {
            WidgetKind::TrafficChart => self.content_rows(),
            WidgetKind::SalesSummary => SaleStatus::ALL
                .iter()
                .map(|status| {
                    let count = self.sales.iter().filter(|s| s.status == *status).count();
                    WidgetRow::new(status.label(), count.to_string())
                })
                .collect(),
            WidgetKind::RecentOrders => {
                let mut sales: Vec<&Sale> = self.sales.iter().collect();
                sales.sort_by(|a, b| b.date.cmp(&a.date));
                sales
                    .into_iter()
                    .take(LIST_LIMIT)
                    .map(|sale| {
                        WidgetRow::new(
                            format!("{} · {}", sale.order_number, sale.customer_name),
                            format!("{} ({})", sale.total, sale.status.label()),
                        )
                    })
                    .collect()
            }
            WidgetKind::TopProducts => self.top_products(),
            WidgetKind::LatestPosts => {
                let mut posts: Vec<&BlogPost> = self.posts.iter().collect();
                posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                posts
                    .into_iter()
                    .take(LIST_LIMIT)
                    .map(|post| {
                        WidgetRow::new(&post.title, post.created_at.format("%b %d, %Y").to_string())
                    })
                    .collect()
            }
            WidgetKind::Testimonials => self
                .testimonials
                .iter()
                .take(TESTIMONIAL_LIMIT)
                .map(|t| WidgetRow::new(&t.name, stars(t.rating)))
                .collect(),
        }
    }

    fn content_rows(&self) -> Vec<WidgetRow> {
        let sections: usize = self.pages.iter().map(|page| page.sections.len()).sum();
        let public_posts = self
            .posts
            .iter()
            .filter(|post| post.access == AccessType::Public)
            .count();
        vec![
            WidgetRow::new("Pages", self.pages.len().to_string()),
            WidgetRow::new("Sections", sections.to_string()),
            WidgetRow::new("Public posts", public_posts.to_string()),
        ]
    }

    /// Products ranked by units sold, ties kept in catalogue order.
    fn top_products(&self) -> Vec<WidgetRow> {
        let mut sold: HashMap<String, u64> = HashMap::new();
        for item in self
            .sales
            .iter()
            .filter(|sale| sale.status != SaleStatus::Cancelled)
            .flat_map(|sale| &sale.items)
        {
            *sold.entry(item.name.to_lowercase()).or_default() += u64::from(item.quantity);
        }

        let mut ranked: Vec<(&Product, u64)> = self
            .products
            .iter()
            .map(|product| {
                let units = sold.get(&product.name.to_lowercase()).copied().unwrap_or(0);
                (product, units)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(LIST_LIMIT)
            .map(|(product, units)| WidgetRow::new(&product.name, format!("{units} sold")))
            .collect()
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
