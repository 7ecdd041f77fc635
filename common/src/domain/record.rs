use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a content item comes from. Static items are bundled with the deploy
/// artifact and read-only at runtime; dynamic items live in the document
/// store and are mutable through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Static,
    Dynamic,
}

/// A typed, fully-populated content record.
///
/// `from_document` is the strict parse-and-default step at the store
/// boundary: every absent field is filled with a type-appropriate empty
/// default so downstream code never branches on missing data.
pub trait Record: Clone + Send + Sync + 'static {
    /// Build a complete record from a stored document body.
    fn from_document(id: &str, body: &Value) -> Self;

    /// The document body persisted for this record. The id is not part of
    /// the body; the store keys documents by it separately.
    fn to_document(&self) -> Value;

    fn id(&self) -> &str;

    /// The stored-or-derived slug. Always non-empty: normalization falls
    /// back to the record id when the title yields an empty slug.
    fn slug(&self) -> &str;
}

/// Access to the optional date fields a record may carry, in normalization
/// priority order: published date, publish date, created, updated.
pub trait Timestamped {
    fn date_candidates(&self) -> [Option<&str>; 4];

    /// The single comparable instant used for feed ordering. The first
    /// candidate that parses wins; a record with no parseable date has no
    /// normalized date and sorts after every dated record.
    fn normalized_date(&self) -> Option<DateTime<Utc>> {
        self.date_candidates()
            .into_iter()
            .flatten()
            .find_map(parse_instant)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Static content often carries bare dates like "2024-01-02".
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// Field extraction helpers shared by the per-kind normalizers.

pub(crate) fn text(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

pub(crate) fn text_or(body: &Value, field: &str, default: &str) -> String {
    match body.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => default.to_owned(),
    }
}

/// `None` for absent or empty strings, so date fields stay optional.
pub(crate) fn optional_text(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

pub(crate) fn text_list(body: &Value, field: &str) -> Vec<String> {
    body.get(field)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn flag(body: &Value, field: &str) -> bool {
    body.get(field).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn flag_or(body: &Value, field: &str, default: bool) -> bool {
    body.get(field).and_then(Value::as_bool).unwrap_or(default)
}

pub(crate) fn number(body: &Value, field: &str) -> f64 {
    body.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

pub(crate) fn counter(body: &Value, field: &str) -> i64 {
    body.get(field).and_then(Value::as_i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    struct Probe {
        published: Option<String>,
        created: Option<String>,
    }

    impl Timestamped for Probe {
        fn date_candidates(&self) -> [Option<&str>; 4] {
            [self.published.as_deref(), None, self.created.as_deref(), None]
        }
    }

    #[test]
    fn first_present_date_wins() {
        let probe = Probe {
            published: Some("2024-01-02T00:00:00Z".into()),
            created: Some("2020-05-05T00:00:00Z".into()),
        };
        assert_eq!(
            probe.normalized_date(),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unparseable_date_falls_through_to_next_candidate() {
        let probe = Probe {
            published: Some("not a date".into()),
            created: Some("2020-05-05".into()),
        };
        assert_eq!(
            probe.normalized_date(),
            Some(Utc.with_ymd_and_hms(2020, 5, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn undated_record_has_no_normalized_date() {
        let probe = Probe {
            published: None,
            created: None,
        };
        assert_eq!(probe.normalized_date(), None);
    }

    #[test]
    fn absent_fields_default_to_empty_values() {
        let body = json!({ "title": "Linen Shirts" });

        assert_eq!(text(&body, "title"), "Linen Shirts");
        assert_eq!(text(&body, "excerpt"), "");
        assert_eq!(text_or(&body, "category", "general"), "general");
        assert_eq!(optional_text(&body, "createdAt"), None);
        assert!(text_list(&body, "tags").is_empty());
        assert!(!flag(&body, "featured"));
        assert!(flag_or(&body, "inStock", true));
        assert_eq!(number(&body, "totalPrice"), 0.0);
        assert_eq!(counter(&body, "viewCount"), 0);
    }
}
