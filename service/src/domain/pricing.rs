use gentleman_common::WeeklyProductRecord;

/// Parse a display price like `"$129"` or `"€1.299,00"`-ish strings into a
/// number, leniently.
///
/// Commas are treated as thousands separators and stripped before the
/// numeric filter runs, so `"$1,299"` parses as 1299 rather than 1.299.
/// Anything that still fails to parse yields 0.
pub fn parse_price(display: &str) -> f64 {
    if display.is_empty() {
        return 0.0;
    }

    let numeric: String = display
        .replace(',', "")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    numeric.parse().unwrap_or(0.0)
}

/// Sum the parsed prices of the selected products.
///
/// Ids without a catalog entry contribute zero silently: a look may
/// reference a product that was deleted later without breaking its total.
pub fn compute_total(selected_ids: &[String], catalog: &[WeeklyProductRecord]) -> f64 {
    selected_ids
        .iter()
        .filter_map(|id| catalog.iter().find(|product| &product.id == id))
        .map(|product| parse_price(&product.price))
        .sum()
}

/// Symmetric-difference toggle for the authoring selection: remove the id if
/// present, append it at the end otherwise. Order of the remaining elements
/// is preserved.
pub fn toggle_selection(current: &[String], id: &str) -> Vec<String> {
    if current.iter().any(|existing| existing == id) {
        current
            .iter()
            .filter(|existing| *existing != id)
            .cloned()
            .collect()
    } else {
        let mut next = current.to_vec();
        next.push(id.to_owned());
        next
    }
}

#[cfg(test)]
mod tests {
    use gentleman_common::test_utils::product;

    use super::*;

    #[test]
    fn parses_currency_prefixed_prices() {
        assert_eq!(parse_price("$129"), 129.0);
        assert_eq!(parse_price("€430"), 430.0);
        assert_eq!(parse_price("$89.50"), 89.5);
    }

    #[test]
    fn unparseable_input_yields_zero() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("N/A"), 0.0);
        assert_eq!(parse_price("TBD"), 0.0);
    }

    #[test]
    fn comma_thousands_separators_are_stripped_before_parsing() {
        assert_eq!(parse_price("$1,299"), 1299.0);
        assert_eq!(parse_price("1,299,000"), 1299000.0);
    }

    #[test]
    fn missing_products_contribute_zero_to_the_total() {
        let catalog = vec![product("p1", "Boots", "$50")];
        let selected = vec!["p1".to_owned(), "missing".to_owned()];
        assert_eq!(compute_total(&selected, &catalog), 50.0);
    }

    #[test]
    fn total_sums_every_selected_catalog_entry() {
        let catalog = vec![
            product("p1", "Boots", "$50"),
            product("p2", "Belt", "$25.50"),
            product("p3", "Coat", "$1,200"),
        ];
        let selected = vec!["p3".to_owned(), "p1".to_owned()];
        assert_eq!(compute_total(&selected, &catalog), 1250.0);
    }

    #[test]
    fn toggling_twice_returns_to_the_original_selection() {
        let toggled = toggle_selection(&[], "x");
        assert_eq!(toggled, vec!["x".to_owned()]);
        assert!(toggle_selection(&toggled, "x").is_empty());
    }

    #[test]
    fn toggle_appends_new_ids_and_preserves_order() {
        let current = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(toggle_selection(&current, "c"), vec!["a", "b", "c"]);
        assert_eq!(toggle_selection(&current, "a"), vec!["b"]);
    }
}
