use serde::{Deserialize, Serialize};
use url::Url;

use super::collection::CollectionName;
use crate::Result;

/// A brand story timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(rename = "_id")]
    pub id: String,
    pub milestone_title: Option<String>,
    pub narrative_text: Option<String>,
    pub year: Option<i32>,
    pub milestone_image: Option<String>,
    pub short_summary: Option<String>,
    pub cta_url: Option<String>,
}

/// A "why choose us" statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: Option<String>,
    pub statistic_value: Option<f64>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub icon_image: Option<String>,
    pub display_order: Option<f64>,
}

/// A service card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_name: Option<String>,
    pub short_description: Option<String>,
    pub geometric_icon_image: Option<String>,
    pub detailed_description: Option<String>,
    pub learn_more_url: Option<String>,
}

/// A technology badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    #[serde(rename = "_id")]
    pub id: String,
    pub technology_name: Option<String>,
    pub tech_icon: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub official_website: Option<String>,
    pub usage_context: Option<String>,
}

/// One record of any collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Milestone(Milestone),
    Service(Service),
    Technology(Technology),
    Stat(StatEntry),
}

impl ContentItem {
    /// Decode a raw store record as an item of the given collection
    pub fn decode(collection: CollectionName, record: serde_json::Value) -> Result<Self> {
        let item = match collection {
            CollectionName::Milestones => Self::Milestone(serde_json::from_value(record)?),
            CollectionName::Services => Self::Service(serde_json::from_value(record)?),
            CollectionName::Technologies => Self::Technology(serde_json::from_value(record)?),
            CollectionName::Stats => Self::Stat(serde_json::from_value(record)?),
        };
        Ok(item)
    }

    /// Opaque identity key, unique within a collection
    pub fn id(&self) -> &str {
        match self {
            Self::Milestone(m) => &m.id,
            Self::Service(s) => &s.id,
            Self::Technology(t) => &t.id,
            Self::Stat(s) => &s.id,
        }
    }

    /// Collection this item belongs to
    pub fn collection(&self) -> CollectionName {
        match self {
            Self::Milestone(_) => CollectionName::Milestones,
            Self::Service(_) => CollectionName::Services,
            Self::Technology(_) => CollectionName::Technologies,
            Self::Stat(_) => CollectionName::Stats,
        }
    }

    /// Headline text, if the record has one
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Milestone(m) => m.milestone_title.as_deref(),
            Self::Service(s) => s.service_name.as_deref(),
            Self::Technology(t) => t.technology_name.as_deref(),
            Self::Stat(s) => s.label.as_deref(),
        }
    }

    /// Body text shown under the title
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Milestone(m) => m.narrative_text.as_deref(),
            Self::Service(s) => s.short_description.as_deref(),
            Self::Technology(t) => t.category.as_deref(),
            Self::Stat(s) => s.description.as_deref(),
        }
    }

    /// Image reference, if any
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Milestone(m) => m.milestone_image.as_deref(),
            Self::Service(s) => s.geometric_icon_image.as_deref(),
            Self::Technology(t) => t.tech_icon.as_deref(),
            Self::Stat(s) => s.icon_image.as_deref(),
        }
    }

    /// External link; absent or unparseable URLs yield None
    pub fn link(&self) -> Option<Url> {
        let raw = match self {
            Self::Milestone(m) => m.cta_url.as_deref(),
            Self::Service(s) => s.learn_more_url.as_deref(),
            Self::Technology(t) => t.official_website.as_deref(),
            Self::Stat(_) => None,
        };
        parse_link(raw)
    }
}

impl StatEntry {
    /// Value and unit as shown on the page, e.g. "150+" or "99.9%"
    pub fn display_value(&self) -> Option<String> {
        let value = self.statistic_value?;
        let number = if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        };
        Some(format!("{}{}", number, self.unit.as_deref().unwrap_or("")))
    }
}

fn parse_link(raw: Option<&str>) -> Option<Url> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Ignoring malformed link '{}': {}", raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_milestone_with_store_field_names() {
        let item = ContentItem::decode(
            CollectionName::Milestones,
            json!({
                "_id": "m1",
                "_createdDate": "2024-01-01T00:00:00Z",
                "milestoneTitle": "Founded",
                "year": 2015,
                "ctaUrl": "https://staviya.example/story"
            }),
        )
        .unwrap();

        assert_eq!(item.id(), "m1");
        assert_eq!(item.title(), Some("Founded"));
        assert_eq!(item.collection(), CollectionName::Milestones);
        assert_eq!(
            item.link().map(|u| u.to_string()),
            Some("https://staviya.example/story".to_string())
        );
        match item {
            ContentItem::Milestone(m) => assert_eq!(m.year, Some(2015)),
            other => panic!("unexpected variant {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_fields_are_not_errors() {
        let item = ContentItem::decode(CollectionName::Services, json!({ "_id": "s1" })).unwrap();
        assert_eq!(item.title(), None);
        assert_eq!(item.image(), None);
        assert!(item.link().is_none());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = ContentItem::decode(CollectionName::Technologies, json!({ "technologyName": "Rust" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_link_is_omitted() {
        let item = ContentItem::decode(
            CollectionName::Services,
            json!({ "_id": "s1", "learnMoreUrl": "not a url" }),
        )
        .unwrap();
        assert!(item.link().is_none());
    }

    #[test]
    fn test_stat_display_value() {
        let stat = StatEntry {
            id: "st".into(),
            label: Some("Projects".into()),
            statistic_value: Some(150.0),
            unit: Some("+".into()),
            description: None,
            icon_image: None,
            display_order: None,
        };
        assert_eq!(stat.display_value().as_deref(), Some("150+"));

        let uptime = StatEntry {
            statistic_value: Some(99.9),
            unit: Some("%".into()),
            ..stat.clone()
        };
        assert_eq!(uptime.display_value().as_deref(), Some("99.9%"));

        let empty = StatEntry {
            statistic_value: None,
            ..stat
        };
        assert_eq!(empty.display_value(), None);
    }
}
