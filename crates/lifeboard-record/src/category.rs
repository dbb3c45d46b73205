//! Life domains and display categories
//!
//! Provides [`Category`], the partition a record is currently shown under, and
//! [`Domain`], the subset of categories a promoted record can return to.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::RecordError;

/// Display category of a record
///
/// `Main` is the cross-cutting view; the other three are life domains.
/// Legacy localized labels are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Personal life domain
    #[serde(alias = "אישי")]
    Personal,
    /// Occupational (career) domain
    #[serde(alias = "תעסוקתי")]
    Occupational,
    /// Financial domain
    #[serde(alias = "כלכלי")]
    Financial,
    /// Cross-cutting main view
    #[serde(alias = "ראשי")]
    Main,
}

impl Category {
    /// All categories, main first
    pub const ALL: [Category; 4] = [
        Category::Main,
        Category::Personal,
        Category::Occupational,
        Category::Financial,
    ];

    /// Stable upper-case name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "PERSONAL",
            Category::Occupational => "OCCUPATIONAL",
            Category::Financial => "FINANCIAL",
            Category::Main => "MAIN",
        }
    }

    /// Domain for this category, `None` for `Main`
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> Option<Domain> {
        match self {
            Category::Personal => Some(Domain::Personal),
            Category::Occupational => Some(Domain::Occupational),
            Category::Financial => Some(Domain::Financial),
            Category::Main => None,
        }
    }

    /// Check if this is the main view
    #[inline]
    #[must_use]
    pub const fn is_main(&self) -> bool {
        matches!(self, Category::Main)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PERSONAL" => Ok(Category::Personal),
            "OCCUPATIONAL" => Ok(Category::Occupational),
            "FINANCIAL" => Ok(Category::Financial),
            "MAIN" => Ok(Category::Main),
            _ => Err(RecordError::UnknownCategory(s.to_string())),
        }
    }
}

/// Life domain a record belongs to when it is not promoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    /// Personal life domain
    #[serde(alias = "אישי")]
    Personal,
    /// Occupational (career) domain
    #[serde(alias = "תעסוקתי")]
    Occupational,
    /// Financial domain
    #[serde(alias = "כלכלי")]
    Financial,
}

impl Domain {
    /// All domains in display order
    pub const ALL: [Domain; 3] = [Domain::Personal, Domain::Occupational, Domain::Financial];

    /// Stable upper-case name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.category().as_str()
    }

    /// Category with the same name
    #[inline]
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Domain::Personal => Category::Personal,
            Domain::Occupational => Category::Occupational,
            Domain::Financial => Category::Financial,
        }
    }
}

impl From<Domain> for Category {
    fn from(domain: Domain) -> Self {
        domain.category()
    }
}

impl TryFrom<Category> for Domain {
    type Error = RecordError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        category.domain().ok_or(RecordError::NotADomain(category))
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::try_from(Category::from_str(s)?)
    }
}
