use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::record::{self, Record, Timestamped};
use crate::domain::slug::slug_or_derived;

/// An editorial piece. Articles and wellness posts share this shape and
/// differ only in the collection they are stored in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub hero_image: String,
    pub category: String,
    pub tag: String,
    pub occasion: String,

    // Optional on purpose: these feed normalized-date derivation and a
    // missing field must stay distinguishable from an empty one.
    pub date_published: Option<String>,
    pub publish_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Record for ArticleRecord {
    fn from_document(id: &str, body: &Value) -> Self {
        let title = record::text(body, "title");
        Self {
            id: id.to_owned(),
            slug: slug_or_derived(&record::text(body, "slug"), &title, id),
            title,
            excerpt: record::text(body, "excerpt"),
            content: record::text(body, "content"),
            hero_image: record::text(body, "heroImage"),
            category: record::text_or(body, "category", "general"),
            tag: record::text(body, "tag"),
            occasion: record::text_or(body, "occasion", "daily"),
            date_published: record::optional_text(body, "datePublished"),
            publish_date: record::optional_text(body, "publishDate"),
            created_at: record::optional_text(body, "createdAt"),
            updated_at: record::optional_text(body, "updatedAt"),
        }
    }

    fn to_document(&self) -> Value {
        json!({
            "slug": self.slug,
            "title": self.title,
            "excerpt": self.excerpt,
            "content": self.content,
            "heroImage": self.hero_image,
            "category": self.category,
            "tag": self.tag,
            "occasion": self.occasion,
            "datePublished": self.date_published,
            "publishDate": self.publish_date,
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

impl Timestamped for ArticleRecord {
    fn date_candidates(&self) -> [Option<&str>; 4] {
        [
            self.date_published.as_deref(),
            self.publish_date.as_deref(),
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
    fn normalizes_a_sparse_document() {
        let body = json!({ "title": "The Overshirt" });
        let article = ArticleRecord::from_document("a1", &body);

        assert_eq!(article.slug, "the-overshirt");
        assert_eq!(article.category, "general");
        assert_eq!(article.occasion, "daily");
        assert_eq!(article.excerpt, "");
        assert_eq!(article.created_at, None);
    }

    #[test]
    fn unaddressable_title_falls_back_to_id_for_slug() {
        let body = json!({ "title": "???" });
        let article = ArticleRecord::from_document("a9", &body);
        assert_eq!(article.slug, "a9");
    }

    #[test]
    fn stored_slug_survives_round_trip() {
        let body = json!({ "title": "The Overshirt", "slug": "overshirt-guide" });
        let article = ArticleRecord::from_document("a1", &body);
        let persisted = article.to_document();
        assert_eq!(persisted["slug"], "overshirt-guide");
        assert!(persisted.get("id").is_none());
    }
}
