//! Category tabs over a filterable grid.

use folio_config::{ALL_CATEGORIES, Categorized, categories, filter_by_category};

/// "All" plus every category of the items, cycled with a key.
#[derive(Debug, Clone, Default)]
pub struct FilterTabs {
    categories: Vec<String>,
    /// `None` is the "All" tab.
    selected: Option<usize>,
}

impl FilterTabs {
    pub fn new<T: Categorized>(items: &[T]) -> Self {
        Self {
            categories: categories(items).into_iter().map(String::from).collect(),
            selected: None,
        }
    }

    /// Move to the next tab, wrapping back to "All".
    pub fn next(&mut self) {
        self.selected = match self.selected {
            None if !self.categories.is_empty() => Some(0),
            Some(i) if i + 1 < self.categories.len() => Some(i + 1),
            _ => None,
        };
    }

    pub fn current(&self) -> Option<&str> {
        self.selected.map(|i| self.categories[i].as_str())
    }

    /// Tab labels with a flag for the selected one.
    pub fn labels(&self) -> Vec<(&str, bool)> {
        std::iter::once((ALL_CATEGORIES, self.selected.is_none()))
            .chain(
                self.categories
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.as_str(), self.selected == Some(i))),
            )
            .collect()
    }

    /// Items visible under the selected tab, in original order.
    pub fn apply<'a, T: Categorized>(&self, items: &'a [T]) -> Vec<&'a T> {
        filter_by_category(items, self.current().unwrap_or(ALL_CATEGORIES))
    }
}
