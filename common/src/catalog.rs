use std::fs;
use std::sync::OnceLock;

use anyhow::Context;
use serde_json::Value;

use crate::ID_FIELD_NAME;
use crate::domain::{ArticleRecord, OutfitRecord, Record, WeeklyProductRecord};

/// The content bundled with the deploy artifact: read-only at runtime and
/// merged with store-backed content by the feed handlers.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    pub articles: Vec<ArticleRecord>,
    pub wellness: Vec<ArticleRecord>,
    pub weekly: Vec<WeeklyProductRecord>,
    pub outfits: Vec<OutfitRecord>,
}

static CATALOG: OnceLock<StaticCatalog> = OnceLock::new();

/// Load the static catalog once at startup and hand out a `'static`
/// reference for the lifetime of the process.
pub fn load_catalog(static_content_path: &str) -> Result<&'static StaticCatalog, anyhow::Error> {
    tracing::debug!("loading static catalog from {}", static_content_path);

    let raw = fs::read_to_string(static_content_path).with_context(|| {
        format!("failed to read static content file '{}'", static_content_path)
    })?;
    let catalog = StaticCatalog::from_json(&raw)
        .with_context(|| format!("failed to parse static content file '{}'", static_content_path))?;

    CATALOG.set(catalog).expect("static catalog already loaded");
    Ok(CATALOG.get().unwrap())
}

impl StaticCatalog {
    /// Parse the bundled content file. Entries go through the same
    /// parse-and-default normalization as store documents, so static and
    /// dynamic items are indistinguishable downstream.
    pub fn from_json(raw: &str) -> Result<Self, anyhow::Error> {
        let root: Value = serde_json::from_str(raw)?;

        Ok(Self {
            articles: section(&root, "articles"),
            wellness: section(&root, "wellness"),
            weekly: section(&root, "weekly"),
            outfits: section(&root, "outfits"),
        })
    }
}

fn section<T: Record>(root: &Value, name: &str) -> Vec<T> {
    root.get(name)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| {
                    let id = entry
                        .get(ID_FIELD_NAME)
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    T::from_document(id, entry)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sections_with_normalization() {
        let raw = r#"{
            "articles": [
                { "id": "sa1", "title": "Static One", "datePublished": "2024-01-02" }
            ],
            "weekly": [
                { "id": "sp1", "title": "Derby Shoes", "price": "$189" }
            ],
            "outfits": []
        }"#;

        let catalog = StaticCatalog::from_json(raw).unwrap();

        assert_eq!(catalog.articles.len(), 1);
        assert_eq!(catalog.articles[0].slug, "static-one");
        assert_eq!(catalog.weekly[0].price, "$189");
        assert!(catalog.wellness.is_empty());
        assert!(catalog.outfits.is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(StaticCatalog::from_json("not json").is_err());
    }
}
