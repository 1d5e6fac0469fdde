//! Search filtering over the catalog.

use super::product::{Product, ProductCatalog};

/// The subsequence of the catalog matching a search term.
///
/// Holds catalog indices in ascending order, so a view is always a
/// subsequence of the catalog in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// The unfiltered view of a catalog.
    pub fn all(catalog: &ProductCatalog) -> Self {
        Self {
            indices: (0..catalog.len()).collect(),
        }
    }

    /// Catalog indices of the visible products.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the view against the catalog it was computed from.
    pub fn products<'a>(&'a self, catalog: &'a ProductCatalog) -> impl Iterator<Item = &'a Product> + 'a {
        self.indices.iter().filter_map(move |&i| catalog.get(i))
    }
}

/// Filter the catalog by a case-insensitive substring search.
///
/// A product is kept when its description, code or category contains the
/// term. An empty term keeps everything.
pub fn filter_catalog(catalog: &ProductCatalog, term: &str) -> FilteredView {
    let needle = term.to_lowercase();
    let indices = catalog
        .iter()
        .enumerate()
        .filter(|(_, p)| p.matches(&needle))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}
