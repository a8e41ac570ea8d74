//! Category routing.
//!
//! A static table assigns each news provider a domain of topical categories.
//! The wildcard category routes to every provider.

use std::collections::BTreeSet;

use crate::models::{Category, NewsSource};

/// Provider domains. Order here is irrelevant; selection returns a sorted set.
const DOMAINS: [(NewsSource, &[Category]); 3] = [
    (
        NewsSource::Tavily,
        &[
            Category::UsStocks,
            Category::CnStocks,
            Category::Crypto,
            Category::Macro,
        ],
    ),
    (NewsSource::AkShare, &[Category::CnStocks]),
    (NewsSource::OpenBb, &[Category::UsStocks]),
];

/// Topical categories `source` covers.
pub fn domain(source: NewsSource) -> &'static [Category] {
    DOMAINS
        .iter()
        .find(|(candidate, _)| *candidate == source)
        .map(|(_, categories)| *categories)
        .unwrap_or(&[])
}

/// Whether `source` should be called for `category`.
pub fn is_eligible(source: NewsSource, category: Category) -> bool {
    category.is_wildcard() || domain(source).contains(&category)
}

/// The providers to call for `category`, in merge order.
///
/// Pure and deterministic: no I/O, no configuration.
pub fn select_providers(category: Category) -> BTreeSet<NewsSource> {
    NewsSource::ALL
        .into_iter()
        .filter(|source| is_eligible(*source, category))
        .collect()
}
