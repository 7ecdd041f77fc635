use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::record::{self, Record, Timestamped};
use crate::domain::slug::slug_or_derived;

/// Occasions a look can be tagged with.
pub const OUTFIT_OCCASIONS: [&str; 8] = [
    "Work",
    "Casual",
    "Date Night",
    "Travel",
    "Weekend",
    "Formal Event",
    "Cocktail Hour",
    "Seasonal",
];

/// Style facets a look can be tagged with.
pub const STYLE_TYPES: [&str; 8] = [
    "Minimalist",
    "Classic",
    "Modern",
    "Streetwear",
    "Business Casual",
    "Smart Casual",
    "Formal",
    "Casual",
];

/// A shoppable outfit look aggregating several weekly-product references.
///
/// `total_price` is fixed at authoring time from the then-current product
/// prices; a later price change on a referenced product is only picked up by
/// an explicit re-save of the look.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub hero_image: String,
    pub gallery: Vec<String>,
    pub occasion: String,
    pub season: String,
    pub style_type: String,
    pub products: Vec<String>,
    pub total_price: f64,
    pub featured: bool,
    pub sort_weight: f64,

    pub view_count: i64,
    pub click_count: i64,
    pub last_viewed_at: Option<String>,
    pub last_clicked_at: Option<String>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for OutfitRecord {
    fn from_document(id: &str, body: &Value) -> Self {
        let title = record::text(body, "title");
        Self {
            id: id.to_owned(),
            slug: slug_or_derived(&record::text(body, "slug"), &title, id),
            title,
            description: record::text(body, "description"),
            hero_image: record::text(body, "heroImage"),
            gallery: record::text_list(body, "gallery"),
            occasion: record::text(body, "occasion"),
            season: record::text(body, "season"),
            style_type: record::text(body, "styleType"),
            products: record::text_list(body, "products"),
            total_price: record::number(body, "totalPrice"),
            featured: record::flag(body, "featured"),
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
            "description": self.description,
            "heroImage": self.hero_image,
            "gallery": self.gallery,
            "occasion": self.occasion,
            "season": self.season,
            "styleType": self.style_type,
            "products": self.products,
            "totalPrice": self.total_price,
            "featured": self.featured,
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

impl Timestamped for OutfitRecord {
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
    fn normalizes_product_references() {
        let body = json!({
            "title": "Airport Uniform",
            "products": ["p1", "p2"],
            "totalPrice": 240.0,
        });
        let outfit = OutfitRecord::from_document("o1", &body);

        assert_eq!(outfit.slug, "airport-uniform");
        assert_eq!(outfit.products, vec!["p1", "p2"]);
        assert_eq!(outfit.total_price, 240.0);
        assert!(!outfit.featured);
    }

    #[test]
    fn malformed_products_field_defaults_to_empty() {
        let body = json!({ "title": "Look", "products": "p1" });
        let outfit = OutfitRecord::from_document("o1", &body);
        assert!(outfit.products.is_empty());
    }
}
