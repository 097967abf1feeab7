//! Static table of page sections that scroll-to calls resolve against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::CollectionName;
use crate::Error;

/// Named anchors of the landing page, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Anchor {
    Story,
    Services,
    Technology,
    WhyChoose,
    Contact,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::Story,
        Anchor::Services,
        Anchor::Technology,
        Anchor::WhyChoose,
        Anchor::Contact,
    ];

    /// Element id used in the page markup
    pub fn id(&self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Services => "services",
            Self::Technology => "technology",
            Self::WhyChoose => "why-choose",
            Self::Contact => "contact",
        }
    }

    /// Label shown in the header navigation
    pub fn label(&self) -> &'static str {
        match self {
            Self::Story => "Our Story",
            Self::Services => "Services",
            Self::Technology => "Technology",
            Self::WhyChoose => "Why Choose Us",
            Self::Contact => "Contact",
        }
    }

    /// Collection rendered inside the section, if any
    pub fn collection(&self) -> Option<CollectionName> {
        match self {
            Self::Story => Some(CollectionName::Milestones),
            Self::Services => Some(CollectionName::Services),
            Self::Technology => Some(CollectionName::Technologies),
            Self::WhyChoose => Some(CollectionName::Stats),
            Self::Contact => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().trim_start_matches('#');
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.id() == id)
            .ok_or_else(|| Error::UnknownAnchor(s.to_string()))
    }
}

/// Hero call-to-action buttons and where they scroll to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallToAction {
    InitiateProject,
    ExploreSystems,
}

impl CallToAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InitiateProject => "Initiate Project",
            Self::ExploreSystems => "Explore Systems",
        }
    }

    pub fn target(&self) -> Anchor {
        match self {
            Self::InitiateProject => Anchor::Contact,
            Self::ExploreSystems => Anchor::Services,
        }
    }
}
