use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::models::ContentItem;
use crate::Error;

/// The content collections the site reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionName {
    Milestones,
    Stats,
    Services,
    Technologies,
}

impl CollectionName {
    pub const ALL: [CollectionName; 4] = [
        CollectionName::Services,
        CollectionName::Technologies,
        CollectionName::Milestones,
        CollectionName::Stats,
    ];

    /// Identifier of the collection in the content store
    pub fn store_id(&self) -> &'static str {
        match self {
            Self::Milestones => "brandstorymilestones",
            Self::Stats => "companystats",
            Self::Services => "services",
            Self::Technologies => "technologies",
        }
    }

    /// Client-side ordering applied after fetching
    pub fn sort_policy(&self) -> SortPolicy {
        match self {
            Self::Milestones => SortPolicy::ByYear,
            Self::Stats => SortPolicy::ByDisplayOrder,
            Self::Services | Self::Technologies => SortPolicy::SourceOrder,
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_id())
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brandstorymilestones" | "milestones" => Ok(Self::Milestones),
            "companystats" | "stats" => Ok(Self::Stats),
            "services" => Ok(Self::Services),
            "technologies" => Ok(Self::Technologies),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }
}

/// How a collection is ordered before it reaches the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// Keep the order the store returned
    SourceOrder,
    /// Ascending `year`, missing treated as 0
    ByYear,
    /// Ascending `displayOrder`, missing treated as 0
    ByDisplayOrder,
}

impl SortPolicy {
    /// Sort in place. `sort_by` is stable, so equal keys keep input order.
    pub fn apply(&self, items: &mut [ContentItem]) {
        match self {
            SortPolicy::SourceOrder => {}
            SortPolicy::ByYear => items.sort_by_key(year_key),
            SortPolicy::ByDisplayOrder => {
                items.sort_by(|a, b| display_order_key(a).total_cmp(&display_order_key(b)))
            }
        }
    }

    /// Check that a sequence respects this policy (non-decreasing keys)
    pub fn is_sorted(&self, items: &[ContentItem]) -> bool {
        items.windows(2).all(|pair| match self {
            SortPolicy::SourceOrder => true,
            SortPolicy::ByYear => year_key(&pair[0]) <= year_key(&pair[1]),
            SortPolicy::ByDisplayOrder => {
                display_order_key(&pair[0]).total_cmp(&display_order_key(&pair[1]))
                    != Ordering::Greater
            }
        })
    }
}

fn year_key(item: &ContentItem) -> i32 {
    match item {
        ContentItem::Milestone(m) => m.year.unwrap_or(0),
        _ => 0,
    }
}

fn display_order_key(item: &ContentItem) -> f64 {
    match item {
        ContentItem::Stat(s) => s.display_order.unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{Milestone, Service, StatEntry};

    fn milestone(id: &str, year: Option<i32>) -> ContentItem {
        ContentItem::Milestone(Milestone {
            id: id.to_string(),
            milestone_title: None,
            narrative_text: None,
            year,
            milestone_image: None,
            short_summary: None,
            cta_url: None,
        })
    }

    fn stat(id: &str, order: Option<f64>) -> ContentItem {
        ContentItem::Stat(StatEntry {
            id: id.to_string(),
            label: None,
            statistic_value: None,
            unit: None,
            description: None,
            icon_image: None,
            display_order: order,
        })
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_store_id_round_trip() {
        for name in CollectionName::ALL {
            assert_eq!(name.store_id().parse::<CollectionName>().unwrap(), name);
        }
        assert!("blog".parse::<CollectionName>().is_err());
    }

    #[test]
    fn test_milestones_sort_by_year_missing_is_zero() {
        let mut items = vec![
            milestone("c", Some(2020)),
            milestone("a", None),
            milestone("b", Some(2015)),
            milestone("d", Some(-1)),
        ];
        SortPolicy::ByYear.apply(&mut items);
        assert_eq!(ids(&items), vec!["d", "a", "b", "c"]);
        assert!(SortPolicy::ByYear.is_sorted(&items));
    }

    #[test]
    fn test_year_sort_is_stable_for_equal_keys() {
        let mut items = vec![
            milestone("first", Some(2018)),
            milestone("none-1", None),
            milestone("second", Some(2018)),
            milestone("none-2", Some(0)),
            milestone("third", Some(2018)),
        ];
        SortPolicy::ByYear.apply(&mut items);
        assert_eq!(ids(&items), vec!["none-1", "none-2", "first", "second", "third"]);
    }

    #[test]
    fn test_stats_sort_by_display_order_stable() {
        let mut items = vec![
            stat("x", Some(3.0)),
            stat("y", Some(1.0)),
            stat("z", None),
            stat("w", Some(1.0)),
        ];
        SortPolicy::ByDisplayOrder.apply(&mut items);
        assert_eq!(ids(&items), vec!["z", "y", "w", "x"]);
        assert!(SortPolicy::ByDisplayOrder.is_sorted(&items));
    }

    #[test]
    fn test_source_order_untouched() {
        let mut items: Vec<ContentItem> = ["b", "a", "c"]
            .iter()
            .map(|id| {
                ContentItem::Service(Service {
                    id: id.to_string(),
                    service_name: None,
                    short_description: None,
                    geometric_icon_image: None,
                    detailed_description: None,
                    learn_more_url: None,
                })
            })
            .collect();
        CollectionName::Services.sort_policy().apply(&mut items);
        assert_eq!(ids(&items), vec!["b", "a", "c"]);
    }
}
