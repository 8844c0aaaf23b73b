//! Type definitions for the tool catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Marketplace category a tool is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Resume & Career")]
    ResumeCareer,
    #[serde(rename = "Marketing & Social Media")]
    MarketingSocial,
    #[serde(rename = "Design & Images")]
    DesignImages,
    #[serde(rename = "Video & Audio")]
    VideoAudio,
    #[serde(rename = "Coding & Development")]
    CodingDevelopment,
    #[serde(rename = "Business & Analytics")]
    BusinessAnalytics,
    #[serde(rename = "Chatbots & Automation")]
    ChatbotsAutomation,
    #[serde(rename = "Education & Learning")]
    EducationLearning,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::ResumeCareer,
        Category::MarketingSocial,
        Category::DesignImages,
        Category::VideoAudio,
        Category::CodingDevelopment,
        Category::BusinessAnalytics,
        Category::ChatbotsAutomation,
        Category::EducationLearning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ResumeCareer => "Resume & Career",
            Category::MarketingSocial => "Marketing & Social Media",
            Category::DesignImages => "Design & Images",
            Category::VideoAudio => "Video & Audio",
            Category::CodingDevelopment => "Coding & Development",
            Category::BusinessAnalytics => "Business & Analytics",
            Category::ChatbotsAutomation => "Chatbots & Automation",
            Category::EducationLearning => "Education & Learning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingType {
    Free,
    Freemium,
    Paid,
}

impl PricingType {
    pub const ALL: [PricingType; 3] = [PricingType::Free, PricingType::Freemium, PricingType::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingType::Free => "Free",
            PricingType::Freemium => "Freemium",
            PricingType::Paid => "Paid",
        }
    }
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog record.
///
/// `slug` is the only key used to cross-reference recommendation output with
/// full records. Fields the service does not model (e.g. `url`, `logo`) are
/// kept in `extra` so they round-trip to API clients untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default)]
    pub slug: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    pub pricing_type: PricingType,

    #[serde(default)]
    pub use_cases: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub trending: f64,

    #[serde(default)]
    pub created_at: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tool {
    /// Lower-cased searchable text used by the browse filter.
    ///
    /// Field order: name, description, use cases, tags, category.
    pub fn search_text(&self) -> String {
        let use_cases = self.use_cases.join(" ");
        let tags = self.tags.join(" ");
        [
            self.name.as_str(),
            self.description.as_str(),
            use_cases.as_str(),
            tags.as_str(),
            self.category.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// Read-only projection of a [`Tool`] sent to remote recommendation providers.
///
/// Only catalog-facing fields are exposed; popularity, timestamps and any
/// extra record fields stay local.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub category: Category,
    pub pricing_type: PricingType,
    pub use_cases: &'a [String],
    pub tags: &'a [String],
}

impl<'a> From<&'a Tool> for CatalogEntry<'a> {
    fn from(tool: &'a Tool) -> Self {
        Self {
            slug: &tool.slug,
            name: &tool.name,
            category: tool.category,
            pricing_type: tool.pricing_type,
            use_cases: &tool.use_cases,
            tags: &tool.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_defaults_for_missing_fields() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "Bare",
            "category": "Video & Audio",
            "pricing_type": "Free"
        }))
        .unwrap();

        assert_eq!(tool.slug, "");
        assert_eq!(tool.popularity, 0.0);
        assert!(tool.tags.is_empty());
        assert!(tool.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let raw = json!({
            "slug": "copyai",
            "name": "Copy.ai",
            "category": "Marketing & Social Media",
            "pricing_type": "Freemium",
            "url": "https://copy.ai"
        });
        let tool: Tool = serde_json::from_value(raw).unwrap();
        assert_eq!(tool.extra["url"], "https://copy.ai");

        let back = serde_json::to_value(&tool).unwrap();
        assert_eq!(back["url"], "https://copy.ai");
        assert_eq!(back["category"], "Marketing & Social Media");
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<Tool, _> = serde_json::from_value(json!({
            "name": "Odd",
            "category": "Gardening",
            "pricing_type": "Free"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_entry_omits_internal_fields() {
        let tool: Tool = serde_json::from_value(json!({
            "slug": "devbot",
            "name": "DevBot",
            "description": "internal",
            "category": "Coding & Development",
            "pricing_type": "Paid",
            "tags": ["coding"],
            "popularity": 80,
            "url": "https://devbot.dev"
        }))
        .unwrap();

        let entry = serde_json::to_value(CatalogEntry::from(&tool)).unwrap();
        let keys: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(
            keys.len(),
            6,
            "reduced entry should only carry six fields, got {:?}",
            keys
        );
        assert!(entry.get("popularity").is_none());
        assert!(entry.get("description").is_none());
        assert!(entry.get("url").is_none());
        assert_eq!(entry["pricing_type"], "Paid");
    }

    #[test]
    fn test_search_text_is_lowercase() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "ResumeAI",
            "category": "Resume & Career",
            "pricing_type": "Free",
            "use_cases": ["Cover Letters"]
        }))
        .unwrap();

        let text = tool.search_text();
        assert!(text.contains("resumeai"));
        assert!(text.contains("cover letters"));
        assert!(text.ends_with("resume & career"));
    }
}
