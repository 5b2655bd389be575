use super::selection::FilterSelection;
use super::types::{Catalog, Item};

/// Free-text search over item titles and authors.
///
/// Matching is a case-insensitive substring test; the empty query matches
/// every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The query exactly as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// True when the query has visible characters.
    pub fn is_active(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.raw.push(c);
        self.folded = self.raw.to_lowercase();
    }

    pub fn pop(&mut self) -> Option<char> {
        let c = self.raw.pop();
        self.folded = self.raw.to_lowercase();
        c
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.folded.clear();
    }

    pub fn matches(&self, item: &Item) -> bool {
        if self.folded.is_empty() {
            return true;
        }
        item.title.to_lowercase().contains(&self.folded)
            || item.author.to_lowercase().contains(&self.folded)
    }
}

/// A catalog item paired with the name of the category it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedItem<'a> {
    pub item: &'a Item,
    pub topic: &'a str,
}

/// Run the filter pipeline: category stage, flatten, then search.
///
/// Output order is catalog category order, then item order within each
/// category. The catalog is only borrowed.
pub fn filter_catalog<'a>(
    catalog: &'a Catalog,
    selection: &FilterSelection,
    query: &SearchQuery,
) -> Vec<MatchedItem<'a>> {
    catalog
        .categories()
        .iter()
        .filter(|cat| selection.admits(&cat.name))
        .flat_map(|cat| {
            cat.items.iter().map(move |item| MatchedItem {
                item,
                topic: cat.name.as_str(),
            })
        })
        .filter(|matched| query.matches(matched.item))
        .collect()
}
