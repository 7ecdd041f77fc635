use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::record::{self, Record, Timestamped};
use crate::domain::slug::slug_or_derived;

/// The fixed set of weekly-product categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    FindsOfTheWeek,
    DealsOfTheWeek,
    FashionOnABudget,
    HighRollerList,
    BestAccessories,
    EmergingBrandSpotlight,
}

pub const PRODUCT_CATEGORIES: [ProductCategory; 6] = [
    ProductCategory::FindsOfTheWeek,
    ProductCategory::DealsOfTheWeek,
    ProductCategory::FashionOnABudget,
    ProductCategory::HighRollerList,
    ProductCategory::BestAccessories,
    ProductCategory::EmergingBrandSpotlight,
];

impl ProductCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FindsOfTheWeek => "finds-of-the-week",
            Self::DealsOfTheWeek => "deals-of-the-week",
            Self::FashionOnABudget => "fashion-on-a-budget",
            Self::HighRollerList => "high-roller-list",
            Self::BestAccessories => "best-accessories",
            Self::EmergingBrandSpotlight => "emerging-brand-spotlight",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FindsOfTheWeek => "Finds of the Week",
            Self::DealsOfTheWeek => "Deals of the Week",
            Self::FashionOnABudget => "Fashion on a Budget",
            Self::HighRollerList => "High Roller List",
            Self::BestAccessories => "Best Accessories",
            Self::EmergingBrandSpotlight => "Emerging Brand Spotlight",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        PRODUCT_CATEGORIES
            .into_iter()
            .find(|category| category.slug() == slug)
    }
}

/// A curated "weekly finds" product.
///
/// `price` stays a display string (`"$129"`, `"€430"`); the pricing engine
/// owns parsing it into a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProductRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub description: String,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: String,
    pub original_price: String,
    pub category: ProductCategory,
    pub tags: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub product_link: String,
    pub affiliate_link: String,
    pub featured: bool,
    pub in_stock: bool,
    pub sort_weight: f64,

    pub view_count: i64,
    pub click_count: i64,
    pub last_viewed_at: Option<String>,
    pub last_clicked_at: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for WeeklyProductRecord {
    fn from_document(id: &str, body: &Value) -> Self {
        let title = record::text(body, "title");
        Self {
            id: id.to_owned(),
            slug: slug_or_derived(&record::text(body, "slug"), &title, id),
            title,
            brand: record::text(body, "brand"),
            description: record::text(body, "description"),
            image: record::text(body, "image"),
            gallery: record::text_list(body, "images"),
            price: record::text(body, "price"),
            original_price: record::text(body, "originalPrice"),
            category: ProductCategory::from_slug(&record::text(body, "category"))
                .unwrap_or(ProductCategory::FindsOfTheWeek),
            tags: record::text_list(body, "tags"),
            sizes: record::text_list(body, "sizes"),
            colors: record::text_list(body, "colors"),
            product_link: record::text(body, "productLink"),
            affiliate_link: record::text(body, "affiliateLink"),
            featured: record::flag(body, "featured"),
            in_stock: record::flag_or(body, "inStock", true),
            sort_weight: record::number(body, "sortWeight"),
            view_count: record::counter(body, "viewCount"),
            click_count: record::counter(body, "clickCount"),
            last_viewed_at: record::optional_text(body, "lastViewedAt"),
            last_clicked_at: record::optional_text(body, "lastClickedAt"),
            created_at: record::optional_text(body, "createdAt"),
            updated_at: record::optional_text(body, "updatedAt"),
        }
    }

    fn to_document(&self) -> Value {
        json!({
            "slug": self.slug,
            "title": self.title,
            "brand": self.brand,
            "description": self.description,
            "image": self.image,
            "images": self.gallery,
            "price": self.price,
            "originalPrice": self.original_price,
            "category": self.category.slug(),
            "tags": self.tags,
            "sizes": self.sizes,
            "colors": self.colors,
            "productLink": self.product_link,
            "affiliateLink": self.affiliate_link,
            "featured": self.featured,
            "inStock": self.in_stock,
            "sortWeight": self.sort_weight,
            "viewCount": self.view_count,
            "clickCount": self.click_count,
            "lastViewedAt": self.last_viewed_at,
            "lastClickedAt": self.last_clicked_at,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Timestamped for WeeklyProductRecord {
    fn date_candidates(&self) -> [Option<&str>; 4] {
        [
            None,
            None,
            self.created_at.as_deref(),
            self.updated_at.as_deref(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_defaults_for_a_bare_document() {
        let product = WeeklyProductRecord::from_document("p1", &json!({}));

        assert_eq!(product.slug, "p1");
        assert_eq!(product.price, "");
        assert_eq!(product.category, ProductCategory::FindsOfTheWeek);
        assert!(product.in_stock);
        assert!(!product.featured);
        assert_eq!(product.view_count, 0);
    }

    #[test]
    fn unknown_category_slug_maps_to_the_default_bucket() {
        let body = json!({ "category": "midnight-drops" });
        let product = WeeklyProductRecord::from_document("p1", &body);
        assert_eq!(product.category, ProductCategory::FindsOfTheWeek);
    }

    #[test]
    fn category_slugs_round_trip() {
        for category in PRODUCT_CATEGORIES {
            assert_eq!(ProductCategory::from_slug(category.slug()), Some(category));
        }
    }
}
