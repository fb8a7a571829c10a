//! Demo data for a fresh install.
//!
//! Each collection is written only when its key is empty, unless `force`
//! is set.

use chrono::{Duration, Utc};
use tracing::info;

use sitedeck_admin::db::{CollectionRepository, KeyValueStore, RepositoryError, Store, settings};
use sitedeck_core::editor::{Block, ButtonBlock, CardDraft, Section, SectionDraft, SectionPatch};
use sitedeck_core::models::{
    BlogPost, BlogPostDraft, GLOBAL_STYLES_KEY, GlobalStyles, LineItem, Page, PageDraft, Product,
    ProductDraft, Profile, ProfileDraft, Sale, SaleDraft, TeamMember, TeamMemberDraft,
    Testimonial, TestimonialDraft, User, UserDraft, WIDGET_LAYOUT_KEY, default_widgets,
};
use sitedeck_core::{
    AccessType, Collection, Price, Record, SaleStatus, SectionId, UserRole, Validate,
    ValidationError,
};

/// Seed every collection and settings document.
///
/// # Errors
///
/// Returns an error if a demo record fails validation or storage fails.
pub async fn run(store: &Store, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut written = 0;

    written += store_collection(store, force, build::<Product>(products()?)?).await?;
    written += store_collection(store, force, build::<BlogPost>(posts())?).await?;
    written += store_collection(store, force, build::<Sale>(sales()?)?).await?;
    written += store_collection(store, force, build::<Testimonial>(testimonials())?).await?;
    written += store_collection(store, force, build::<TeamMember>(team())?).await?;
    written += store_collection(store, force, build::<Profile>(profiles())?).await?;
    written += store_collection(store, force, build::<User>(users())?).await?;

    let mut site_pages = build::<Page>(pages())?;
    if let Some(home) = site_pages.items().first().map(|page| page.id.clone()) {
        site_pages.replace(&home, |page| page.sections = home_sections());
    }
    written += store_collection(store, force, site_pages).await?;

    if force || store.get(WIDGET_LAYOUT_KEY).await?.is_none() {
        settings::set_document(store, WIDGET_LAYOUT_KEY, &default_widgets()).await?;
        written += 1;
    }
    if force || store.get(GLOBAL_STYLES_KEY).await?.is_none() {
        settings::set_document(store, GLOBAL_STYLES_KEY, &GlobalStyles::default()).await?;
        written += 1;
    }

    info!(written, "Seeding complete");
    Ok(())
}

/// Validate drafts and turn them into records.
fn build<T: Record>(drafts: Vec<T::Draft>) -> Result<Collection<T>, ValidationError> {
    let now = Utc::now();
    let mut collection = Collection::default();
    for draft in drafts {
        draft.validate()?;
        collection.insert(T::from_draft(T::new_id(), draft, now));
    }
    Ok(collection)
}

/// Write a collection unless its key already has data. Returns 1 if written.
async fn store_collection<T: Record>(
    store: &Store,
    force: bool,
    collection: Collection<T>,
) -> Result<usize, RepositoryError> {
    if !force && store.get(T::COLLECTION_KEY).await?.is_some() {
        info!(key = T::COLLECTION_KEY, "Already has data, skipping");
        return Ok(0);
    }

    let _guard = store.lock_writes().await;
    CollectionRepository::<T>::new(store).save(&collection).await?;

    info!(key = T::COLLECTION_KEY, count = collection.len(), "Seeded");
    Ok(1)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn products() -> Result<Vec<ProductDraft>, Box<dyn std::error::Error>> {
    let product = |name: &str, price: &str, category: &str, quantity: u32, description: &str| {
        Price::parse(price).map(|price| ProductDraft {
            name: name.to_string(),
            price,
            description: description.to_string(),
            category: category.to_string(),
            quantity,
            ..ProductDraft::default()
        })
    };

    Ok(vec![
        product("Sourdough Loaf", "7.50", "Bread", 24, "Slow-fermented country loaf.")?,
        product("Butter Croissant", "3.25", "Pastry", 60, "Laminated by hand every morning.")?,
        ProductDraft {
            colors: strings(&["Natural", "Charcoal"]),
            sizes: strings(&["S", "M", "L"]),
            customizable: true,
            ..product("Bakery Apron", "28.00", "Merch", 12, "Heavy cotton apron with our logo.")?
        },
        product("Cinnamon Bun", "4.00", "Pastry", 0, "Cardamom dough, brown-butter glaze.")?,
    ])
}

fn posts() -> Vec<BlogPostDraft> {
    vec![
        BlogPostDraft {
            title: "Why we bake overnight".to_string(),
            content: "<p>Long fermentation gives our bread its <strong>depth</strong>.</p>"
                .to_string(),
            tags: strings(&["bread", "process"]),
            categories: strings(&["Behind the scenes"]),
            authors: strings(&["Maya Chen"]),
            access: AccessType::Public,
            ..BlogPostDraft::default()
        },
        BlogPostDraft {
            title: "Members' recipe: brown-butter glaze".to_string(),
            content: "<p>Brown the butter until it smells of hazelnuts.</p>".to_string(),
            tags: strings(&["recipe"]),
            authors: strings(&["Omar Diaz"]),
            access: AccessType::Restricted,
            ..BlogPostDraft::default()
        },
    ]
}

fn sales() -> Result<Vec<SaleDraft>, Box<dyn std::error::Error>> {
    let now = Utc::now();
    let item = |name: &str, quantity: u32, price: &str| {
        Price::parse(price).map(|price| LineItem {
            name: name.to_string(),
            quantity,
            price,
        })
    };

    Ok(vec![
        SaleDraft {
            customer_name: "Priya Nair".to_string(),
            customer_email: "priya@example.com".to_string(),
            items: vec![item("Sourdough Loaf", 2, "7.50")?, item("Butter Croissant", 4, "3.25")?],
            status: SaleStatus::Completed,
            date: Some(now - Duration::days(3)),
            ..SaleDraft::default()
        },
        SaleDraft {
            customer_name: "Lukas Weber".to_string(),
            customer_email: "lukas@example.com".to_string(),
            items: vec![item("Bakery Apron", 1, "28.00")?],
            status: SaleStatus::Processing,
            date: Some(now - Duration::days(1)),
            ..SaleDraft::default()
        },
        SaleDraft {
            customer_name: "Ana Souza".to_string(),
            customer_email: "ana@example.com".to_string(),
            items: vec![item("Cinnamon Bun", 6, "4.00")?],
            status: SaleStatus::Pending,
            date: Some(now),
            ..SaleDraft::default()
        },
    ])
}

fn testimonials() -> Vec<TestimonialDraft> {
    vec![
        TestimonialDraft {
            name: "Priya Nair".to_string(),
            role: "Regular".to_string(),
            content: "The sourdough is the best in town.".to_string(),
            rating: 5,
            ..TestimonialDraft::default()
        },
        TestimonialDraft {
            name: "Lukas Weber".to_string(),
            role: "Café owner".to_string(),
            company: "Weber & Co".to_string(),
            content: "Reliable wholesale deliveries every morning.".to_string(),
            rating: 4,
            ..TestimonialDraft::default()
        },
    ]
}

fn team() -> Vec<TeamMemberDraft> {
    vec![
        TeamMemberDraft {
            name: "Maya Chen".to_string(),
            position: "Head Baker".to_string(),
            bio: "Twenty years of early mornings.".to_string(),
            categories: strings(&["Kitchen"]),
            ..TeamMemberDraft::default()
        },
        TeamMemberDraft {
            name: "Omar Diaz".to_string(),
            position: "Pastry Chef".to_string(),
            categories: strings(&["Kitchen", "Recipes"]),
            ..TeamMemberDraft::default()
        },
    ]
}

fn profiles() -> Vec<ProfileDraft> {
    vec![ProfileDraft {
        name: "Maya Chen".to_string(),
        headline: "Baker and founder".to_string(),
        description: "Started the bakery in a shared kitchen in 2012.".to_string(),
        tags: strings(&["founder"]),
        ..ProfileDraft::default()
    }]
}

fn users() -> Vec<UserDraft> {
    vec![
        UserDraft {
            name: "Maya Chen".to_string(),
            email: "maya@example.com".to_string(),
            role: UserRole::Admin,
            ..UserDraft::default()
        },
        UserDraft {
            name: "Omar Diaz".to_string(),
            email: "omar@example.com".to_string(),
            role: UserRole::Editor,
            ..UserDraft::default()
        },
    ]
}

fn pages() -> Vec<PageDraft> {
    vec![
        PageDraft {
            title: "Home".to_string(),
            ..PageDraft::default()
        },
        PageDraft {
            title: "About us".to_string(),
            ..PageDraft::default()
        },
    ]
}

/// Sections for the seeded home page.
fn home_sections() -> Vec<Section> {
    let mut hero = Section::new(
        SectionId::generate(),
        SectionDraft {
            name: "Hero".to_string(),
            blocks: vec![Block::Title, Block::Subtitle, Block::Button],
        },
    );
    hero.apply_content(SectionPatch {
        title: Some("Fresh bread, every morning".to_string()),
        subtitle: Some("Baked overnight in small batches".to_string()),
        button: Some(ButtonBlock {
            label: "Order now".to_string(),
            url: "/order".to_string(),
        }),
        ..SectionPatch::default()
    });

    let mut favourites = Section::new(
        SectionId::generate(),
        SectionDraft {
            name: "Favourites".to_string(),
            blocks: vec![Block::Title, Block::Cards],
        },
    );
    favourites.apply_content(SectionPatch {
        title: Some("Customer favourites".to_string()),
        ..SectionPatch::default()
    });
    for (title, description) in [
        ("Sourdough Loaf", "Slow-fermented country loaf."),
        ("Butter Croissant", "Laminated by hand every morning."),
    ] {
        favourites.add_card(CardDraft {
            title: title.to_string(),
            description: description.to_string(),
            ..CardDraft::default()
        });
    }

    vec![hero, favourites]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_demo_records_build() {
        assert_eq!(build::<Product>(products().unwrap()).unwrap().len(), 4);
        assert_eq!(build::<Sale>(sales().unwrap()).unwrap().len(), 3);
        assert_eq!(build::<User>(users()).unwrap().len(), 2);
        let pages = build::<Page>(pages()).unwrap();
        assert_eq!(pages.items()[0].slug, "home");
    }

    #[tokio::test]
    async fn test_seed_skips_existing_unless_forced() {
        let store = Store::memory();
        store
            .put(Product::COLLECTION_KEY, json!([]).to_string())
            .await
            .unwrap();

        run(&store, false).await.unwrap();
        let products = CollectionRepository::<Product>::new(&store).load().await.unwrap();
        assert!(products.is_empty());
        let sales = CollectionRepository::<Sale>::new(&store).load().await.unwrap();
        assert_eq!(sales.len(), 3);

        run(&store, true).await.unwrap();
        let products = CollectionRepository::<Product>::new(&store).load().await.unwrap();
        assert_eq!(products.len(), 4);
    }

    #[tokio::test]
    async fn test_home_page_gets_sections() {
        let store = Store::memory();
        run(&store, false).await.unwrap();

        let pages = CollectionRepository::<Page>::new(&store).load().await.unwrap();
        let home = pages.items().iter().find(|p| p.slug == "home").unwrap();
        assert_eq!(home.sections.len(), 2);
        assert_eq!(home.sections[1].cards.len(), 2);
    }
}
