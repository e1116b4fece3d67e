//! Category filtering for skill and project grids.

/// Anything that belongs to a named category.
pub trait Categorized {
    fn category(&self) -> &str;
}

/// Pseudo-category that matches every item.
pub const ALL_CATEGORIES: &str = "all";

/// Items whose category equals `category`, in their original order.
/// [`ALL_CATEGORIES`] keeps everything.
pub fn filter_by_category<'a, T: Categorized>(items: &'a [T], category: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| category == ALL_CATEGORIES || item.category() == category)
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories<T: Categorized>(items: &[T]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !seen.contains(&item.category()) {
            seen.push(item.category());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        category: &'static str,
    }

    impl Categorized for Item {
        fn category(&self) -> &str {
            self.category
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "nmap", category: "security" },
            Item { name: "python", category: "programming" },
            Item { name: "burp", category: "security" },
            Item { name: "arduino", category: "iot" },
            Item { name: "wireshark", category: "security" },
        ]
    }

    #[test]
    fn test_filter_keeps_order() {
        let items = items();
        let names: Vec<&str> = filter_by_category(&items, "security")
            .iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["nmap", "burp", "wireshark"]);
    }

    #[test]
    fn test_filter_is_pure() {
        let items = items();
        let first = filter_by_category(&items, "security");
        let second = filter_by_category(&items, "security");
        assert_eq!(first, second);
        assert_eq!(items.len(), 5);
        assert!(filter_by_category(&items, "Security").is_empty());
        assert!(filter_by_category(&items, "").is_empty());
    }

    #[test]
    fn test_all_keeps_everything() {
        let items = items();
        assert_eq!(filter_by_category(&items, ALL_CATEGORIES).len(), items.len());
    }

    #[test]
    fn test_categories_first_seen() {
        assert_eq!(categories(&items()), vec!["security", "programming", "iot"]);
        assert!(categories::<Item>(&[]).is_empty());
    }
}
