use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Record;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("slug regex must be valid"));

/// Derive a URL-safe slug from a title.
///
/// Lowercases, trims, collapses every run of non `[a-z0-9]` characters into a
/// single hyphen and strips leading/trailing hyphens. Total: a title with no
/// alphanumeric characters yields an empty slug, which callers must resolve
/// (normalization falls back to the record id).
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = NON_SLUG_RUN.replace_all(lowered.trim(), "-");
    hyphenated.trim_matches('-').to_owned()
}

/// Resolve the slug a record is addressed by: the stored slug when present,
/// otherwise one derived from the title, otherwise the record id.
pub fn slug_or_derived(stored: &str, title: &str, id: &str) -> String {
    if !stored.is_empty() {
        return stored.to_owned();
    }
    let derived = slugify(title);
    if derived.is_empty() { id.to_owned() } else { derived }
}

/// Linear scan for the first record whose slug matches exactly.
/// Case-sensitive; fine at catalog scale.
pub fn find_by_slug<'a, T: Record>(items: &'a [T], slug: &str) -> Option<&'a T> {
    items.iter().find(|item| item.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_punctuated_titles() {
        assert_eq!(slugify("Men's Style Guide!"), "men-s-style-guide");
    }

    #[test]
    fn slugify_is_total_and_may_return_empty() {
        assert_eq!(slugify("  "), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_collapses_runs_and_trims_hyphens() {
        assert_eq!(slugify("  --Linen & Wool--  "), "linen-wool");
        assert_eq!(slugify("A   B"), "a-b");
    }

    #[test]
    fn empty_slug_falls_back_to_record_id() {
        assert_eq!(slug_or_derived("", "  ", "doc-7"), "doc-7");
        assert_eq!(slug_or_derived("", "Loafers 101", "doc-7"), "loafers-101");
        assert_eq!(slug_or_derived("kept-slug", "Loafers 101", "doc-7"), "kept-slug");
    }
}
