use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use gentleman_common::{Source, Timestamped};
use serde::Serialize;

/// A content item tagged with where it came from and the instant it is
/// ordered by.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sourced<T> {
    #[serde(flatten)]
    pub item: T,
    pub source: Source,
    #[serde(skip)]
    pub normalized_date: Option<DateTime<Utc>>,
}

impl<T: Timestamped> Sourced<T> {
    fn new(item: T, source: Source) -> Self {
        let normalized_date = item.normalized_date();
        Self {
            item,
            source,
            normalized_date,
        }
    }
}

/// Merge bundled and store-backed items of one content kind into a single
/// feed, newest first.
///
/// Pure and stable: ties on the normalized date keep encounter order, with
/// every dynamic item ahead of every static item. Items without any
/// parseable date sort last, so repeated calls with the same inputs always
/// produce the same order. No de-duplication across sources happens here;
/// the two catalogs are kept disjoint by data governance, not code.
pub fn merge<T>(static_items: &[T], dynamic_items: &[T]) -> Vec<Sourced<T>>
where
    T: Timestamped + Clone,
{
    let mut merged: Vec<Sourced<T>> = dynamic_items
        .iter()
        .cloned()
        .map(|item| Sourced::new(item, Source::Dynamic))
        .chain(
            static_items
                .iter()
                .cloned()
                .map(|item| Sourced::new(item, Source::Static)),
        )
        .collect();

    // Descending by date; `Reverse(None)` is the maximum, so undated items
    // land at the end. Vec::sort_by_key is stable.
    merged.sort_by_key(|sourced| Reverse(sourced.normalized_date));
    merged
}

#[cfg(test)]
mod tests {
    use gentleman_common::ArticleRecord;
    use gentleman_common::test_utils::article;

    use super::*;

    #[test]
    fn orders_newest_first_regardless_of_input_order() {
        let a = article("a", "A", Some("2024-01-02T00:00:00Z"));
        let b = article("b", "B", Some("2024-01-01T00:00:00Z"));

        let forward = merge(&[], &[a.clone(), b.clone()]);
        let backward = merge(&[], &[b.clone(), a.clone()]);

        let ids = |feed: &[Sourced<ArticleRecord>]| {
            feed.iter().map(|s| s.item.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&forward), vec!["a", "b"]);
        assert_eq!(ids(&backward), vec!["a", "b"]);
    }

    #[test]
    fn is_deterministic_and_idempotent_for_dated_inputs() {
        let statics = vec![
            article("s1", "S1", Some("2023-06-01T00:00:00Z")),
            article("s2", "S2", Some("2023-09-01T00:00:00Z")),
        ];
        let dynamics = vec![article("d1", "D1", Some("2023-07-15T00:00:00Z"))];

        let first = merge(&statics, &dynamics);
        let second = merge(&statics, &dynamics);

        let ids = |feed: &[Sourced<ArticleRecord>]| {
            feed.iter().map(|s| s.item.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first), vec!["s2", "d1", "s1"]);
    }

    #[test]
    fn ties_keep_dynamic_items_ahead_of_static_in_original_order() {
        let same = Some("2024-03-01T00:00:00Z");
        let statics = vec![article("s1", "S1", same), article("s2", "S2", same)];
        let dynamics = vec![article("d1", "D1", same)];

        let feed = merge(&statics, &dynamics);
        let ids: Vec<_> = feed.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "s1", "s2"]);

        assert_eq!(feed[0].source, Source::Dynamic);
        assert_eq!(feed[1].source, Source::Static);
    }

    #[test]
    fn undated_items_sort_last_deterministically() {
        let dated = article("dated", "Dated", Some("2020-01-01T00:00:00Z"));
        let undated = article("undated", "Undated", None);

        let feed = merge(&[], &[undated.clone(), dated.clone()]);
        let ids: Vec<_> = feed.iter().map(|s| s.item.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "undated"]);
        assert_eq!(feed[1].normalized_date, None);
    }

    #[test]
    fn duplicate_ids_across_sources_are_not_deduplicated() {
        let shared = article("x", "X", Some("2024-01-01T00:00:00Z"));
        let feed = merge(&[shared.clone()], &[shared.clone()]);
        assert_eq!(feed.len(), 2);
    }
}
