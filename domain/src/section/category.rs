//! Section category value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Discovery section categories (Value Object)
///
/// Every project is organized into these seven sections. Each category has
/// a fixed question template in the prompt catalog, so an unknown category
/// string is a programming or configuration error, never a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionCategory {
    Problem,
    TargetUsers,
    Vision,
    Features,
    Competitors,
    Differentiation,
    TechStack,
}

/// A category string that matches none of the known sections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown section category: '{0}'")]
pub struct UnknownCategoryError(pub String);

impl SectionCategory {
    /// All categories in canonical discovery order.
    pub const ALL: [SectionCategory; 7] = [
        SectionCategory::Problem,
        SectionCategory::TargetUsers,
        SectionCategory::Vision,
        SectionCategory::Features,
        SectionCategory::Competitors,
        SectionCategory::Differentiation,
        SectionCategory::TechStack,
    ];

    /// Get the string key for this category (used in prompts and storage)
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCategory::Problem => "problem",
            SectionCategory::TargetUsers => "target_users",
            SectionCategory::Vision => "vision",
            SectionCategory::Features => "features",
            SectionCategory::Competitors => "competitors",
            SectionCategory::Differentiation => "differentiation",
            SectionCategory::TechStack => "tech_stack",
        }
    }

    /// Human-readable section title
    pub fn title(&self) -> &'static str {
        match self {
            SectionCategory::Problem => "Problem Statement",
            SectionCategory::TargetUsers => "Target Users",
            SectionCategory::Vision => "Product Vision",
            SectionCategory::Features => "Key Features",
            SectionCategory::Competitors => "Competitors",
            SectionCategory::Differentiation => "Differentiation",
            SectionCategory::TechStack => "Tech Stack",
        }
    }
}

impl std::fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SectionCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(SectionCategory::Problem),
            "target_users" => Ok(SectionCategory::TargetUsers),
            "vision" => Ok(SectionCategory::Vision),
            "features" => Ok(SectionCategory::Features),
            "competitors" => Ok(SectionCategory::Competitors),
            "differentiation" => Ok(SectionCategory::Differentiation),
            "tech_stack" => Ok(SectionCategory::TechStack),
            other => Err(UnknownCategoryError(other.to_string())),
        }
    }
}

impl Serialize for SectionCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
