//! Filtering and ordering for catalog browsing.

use crate::catalog::types::Tool;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of tools shown in each home page strip.
pub const HOME_STRIP_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Popularity,
    Trending,
    New,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Popularity, SortOrder::Trending, SortOrder::New];

    /// Parse a user-supplied sort key. Unknown values fall back to popularity.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "trending" => Self::Trending,
            "new" => Self::New,
            _ => Self::Popularity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Popularity => "popularity",
            SortOrder::Trending => "trending",
            SortOrder::New => "new",
        }
    }
}

/// Browse filters as given in the query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pricing: String,
    #[serde(default)]
    pub sort: String,
}

impl BrowseQuery {
    /// Trim every field and resolve the sort key.
    pub fn normalized(&self) -> (BrowseQuery, SortOrder) {
        let sort = SortOrder::parse(&self.sort);
        let query = BrowseQuery {
            q: self.q.trim().to_string(),
            category: self.category.trim().to_string(),
            pricing: self.pricing.trim().to_string(),
            sort: sort.as_str().to_string(),
        };
        (query, sort)
    }
}

/// Keep tools matching category, pricing and free-text query.
///
/// Empty filters match everything. The text query is a case-insensitive
/// substring match over [`Tool::search_text`].
pub fn apply_filters(tools: Vec<Tool>, q: &str, category: &str, pricing: &str) -> Vec<Tool> {
    let q_norm = q.to_lowercase();

    tools
        .into_iter()
        .filter(|tool| {
            if !category.is_empty() && tool.category.as_str() != category {
                return false;
            }
            if !pricing.is_empty() && tool.pricing_type.as_str() != pricing {
                return false;
            }
            q_norm.is_empty() || tool.search_text().contains(&q_norm)
        })
        .collect()
}

/// Sort descending by the chosen key. Ties keep catalog order.
pub fn apply_sort(mut tools: Vec<Tool>, sort: SortOrder) -> Vec<Tool> {
    match sort {
        SortOrder::New => tools.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Trending => tools.sort_by(|a, b| desc(a.trending, b.trending)),
        SortOrder::Popularity => tools.sort_by(|a, b| desc(a.popularity, b.popularity)),
    }
    tools
}

/// Most popular tools for the home page.
pub fn featured(tools: &[Tool]) -> Vec<Tool> {
    top_by(tools, SortOrder::Popularity)
}

/// Highest trending tools for the home page.
pub fn trending(tools: &[Tool]) -> Vec<Tool> {
    top_by(tools, SortOrder::Trending)
}

fn top_by(tools: &[Tool], sort: SortOrder) -> Vec<Tool> {
    let mut sorted = apply_sort(tools.to_vec(), sort);
    sorted.truncate(HOME_STRIP_SIZE);
    sorted
}

#[inline]
fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(slug: &str, category: &str, pricing: &str, popularity: f64, trending: f64, created_at: &str) -> Tool {
        serde_json::from_value(json!({
            "slug": slug,
            "name": slug,
            "description": format!("{} description", slug),
            "category": category,
            "pricing_type": pricing,
            "tags": ["alpha"],
            "popularity": popularity,
            "trending": trending,
            "created_at": created_at
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Tool> {
        vec![
            tool("resumer", "Resume & Career", "Free", 10.0, 5.0, "2024-01-01"),
            tool("painter", "Design & Images", "Paid", 90.0, 1.0, "2024-03-01"),
            tool("coder", "Coding & Development", "Freemium", 50.0, 70.0, "2024-02-01"),
            tool("sketcher", "Design & Images", "Free", 50.0, 20.0, "2023-12-01"),
        ]
    }

    fn slugs(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.slug.as_str()).collect()
    }

    #[test]
    fn test_filter_by_category_and_pricing() {
        let filtered = apply_filters(catalog(), "", "Design & Images", "Free");
        assert_eq!(slugs(&filtered), vec!["sketcher"]);
    }

    #[test]
    fn test_filter_query_is_case_insensitive_substring() {
        let filtered = apply_filters(catalog(), "PAINT", "", "");
        assert_eq!(slugs(&filtered), vec!["painter"]);

        // "career" only appears in the category name
        let filtered = apply_filters(catalog(), "career", "", "");
        assert_eq!(slugs(&filtered), vec!["resumer"]);
    }

    #[test]
    fn test_empty_filters_keep_everything() {
        assert_eq!(apply_filters(catalog(), "", "", "").len(), 4);
    }

    #[test]
    fn test_sort_popularity_is_stable() {
        let sorted = apply_sort(catalog(), SortOrder::Popularity);
        assert_eq!(slugs(&sorted), vec!["painter", "coder", "sketcher", "resumer"]);
    }

    #[test]
    fn test_sort_new_and_trending() {
        assert_eq!(
            slugs(&apply_sort(catalog(), SortOrder::New)),
            vec!["painter", "coder", "resumer", "sketcher"]
        );
        assert_eq!(
            slugs(&apply_sort(catalog(), SortOrder::Trending)),
            vec!["coder", "sketcher", "resumer", "painter"]
        );
    }

    #[test]
    fn test_unknown_sort_falls_back_to_popularity() {
        assert_eq!(SortOrder::parse("cheapest"), SortOrder::Popularity);
        assert_eq!(SortOrder::parse(" Trending "), SortOrder::Trending);
    }

    #[test]
    fn test_home_strips_are_capped() {
        let many: Vec<Tool> = (0..10)
            .map(|i| tool(&format!("t{}", i), "Video & Audio", "Free", i as f64, (10 - i) as f64, ""))
            .collect();

        let featured = featured(&many);
        assert_eq!(featured.len(), HOME_STRIP_SIZE);
        assert_eq!(featured[0].slug, "t9");

        let trending = trending(&many);
        assert_eq!(trending.len(), HOME_STRIP_SIZE);
        assert_eq!(trending[0].slug, "t0");
    }
}
