use std::fmt::Debug;
use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

pub mod articles;
pub mod outfits;
pub mod products;
pub mod record;
pub mod slug;
pub mod users;

pub use articles::ArticleRecord;
pub use outfits::{OUTFIT_OCCASIONS, OutfitRecord, STYLE_TYPES};
pub use products::{PRODUCT_CATEGORIES, ProductCategory, WeeklyProductRecord};
pub use record::{Record, Source, Timestamped};
pub use slug::{find_by_slug, slug_or_derived, slugify};
pub use users::{Role, SubscriptionStatus, UserRecord};

// A regex for collection names: lowercase ASCII letters, digits, underscore
// and hyphen, starting with a letter. Example: "weekly" or "outfit-looks" is
// valid; "Weekly" or "my collection" are not.
pub const COLLECTION_NAME_REGEX: &str = r"^[a-z][a-z0-9_-]*$";

static COLLECTION_NAME_REGEX_COMPILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(COLLECTION_NAME_REGEX).expect("COLLECTION_NAME_REGEX must be a valid regex")
});

pub fn is_eligible_collection_name(name: &str) -> bool {
    COLLECTION_NAME_REGEX_COMPILED.is_match(name)
}

#[nutype(
    sanitize(trim, lowercase),
    validate(not_empty, len_char_max = 32, predicate = is_eligible_collection_name),
    derive(
        Clone,
        Debug,
        Display,
        FromStr,
        AsRef,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize
    )
)]
pub struct CollectionName(String);

// The collections backing each content kind.

pub static ARTICLES_COLLECTION: LazyLock<CollectionName> = LazyLock::new(|| {
    CollectionName::try_new("articles").expect("articles collection name must be valid")
});

pub static WELLNESS_COLLECTION: LazyLock<CollectionName> = LazyLock::new(|| {
    CollectionName::try_new("wellness").expect("wellness collection name must be valid")
});

pub static WEEKLY_COLLECTION: LazyLock<CollectionName> = LazyLock::new(|| {
    CollectionName::try_new("weekly").expect("weekly collection name must be valid")
});

pub static OUTFITS_COLLECTION: LazyLock<CollectionName> = LazyLock::new(|| {
    CollectionName::try_new("outfits").expect("outfits collection name must be valid")
});

pub static USERS_COLLECTION: LazyLock<CollectionName> = LazyLock::new(|| {
    CollectionName::try_new("users").expect("users collection name must be valid")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_collection_names() {
        assert!(CollectionName::try_new("outfits").is_ok());
        assert!(CollectionName::try_new("outfit-looks").is_ok());
    }

    #[test]
    fn rejects_malformed_collection_names() {
        assert!(CollectionName::try_new("").is_err());
        assert!(CollectionName::try_new("9lives").is_err());
        assert!(CollectionName::try_new("my collection").is_err());
    }
}
