use crate::domain::{
    ArticleRecord, OutfitRecord, ProductCategory, Role, SubscriptionStatus, UserRecord,
    WeeklyProductRecord,
};

/// Builders for fully-populated records, so tests only spell out the fields
/// they care about. Public so other crates can reuse them in their own tests.

pub fn article(id: &str, title: &str, created_at: Option<&str>) -> ArticleRecord {
    ArticleRecord {
        id: id.to_owned(),
        slug: crate::domain::slug::slug_or_derived("", title, id),
        title: title.to_owned(),
        excerpt: String::new(),
        content: String::new(),
        hero_image: String::new(),
        category: "general".to_owned(),
        tag: String::new(),
        occasion: "daily".to_owned(),
        date_published: None,
        publish_date: None,
        created_at: created_at.map(str::to_owned),
        updated_at: None,
    }
}

pub fn product(id: &str, title: &str, price: &str) -> WeeklyProductRecord {
    WeeklyProductRecord {
        id: id.to_owned(),
        slug: crate::domain::slug::slug_or_derived("", title, id),
        title: title.to_owned(),
        brand: String::new(),
        description: String::new(),
        image: String::new(),
        gallery: Vec::new(),
        price: price.to_owned(),
        original_price: String::new(),
        category: ProductCategory::FindsOfTheWeek,
        tags: Vec::new(),
        sizes: Vec::new(),
        colors: Vec::new(),
        product_link: String::new(),
        affiliate_link: String::new(),
        featured: false,
        in_stock: true,
        sort_weight: 0.0,
        view_count: 0,
        click_count: 0,
        last_viewed_at: None,
        last_clicked_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn outfit(id: &str, title: &str, products: &[&str], total_price: f64) -> OutfitRecord {
    OutfitRecord {
        id: id.to_owned(),
        slug: crate::domain::slug::slug_or_derived("", title, id),
        title: title.to_owned(),
        description: String::new(),
        hero_image: String::new(),
        gallery: Vec::new(),
        occasion: String::new(),
        season: String::new(),
        style_type: String::new(),
        products: products.iter().map(|p| (*p).to_owned()).collect(),
        total_price,
        featured: false,
        sort_weight: 0.0,
        view_count: 0,
        click_count: 0,
        last_viewed_at: None,
        last_clicked_at: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn user(id: &str, role: Role, access: bool) -> UserRecord {
    UserRecord {
        id: id.to_owned(),
        email: format!("{}@example.com", id),
        role,
        subscription_status: if access {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::Inactive
        },
        access,
        created_at: None,
        updated_at: None,
    }
}
