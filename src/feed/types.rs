use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Identifier assigned to every generated item. Starts at 1.
pub type ItemId = u64;

// ============================================================================
// Error Types
// ============================================================================

/// Returned when a category name does not match any known filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category '{0}' (expected one of: All, Tech, Campus, Sports)")]
pub struct ParseCategoryError(pub String);

// ============================================================================
// Category
// ============================================================================

/// Category carried by a generated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Campus,
    Sports,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Category; 3] = [Category::Tech, Category::Campus, Category::Sports];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Campus => "Campus",
            Self::Sports => "Sports",
        }
    }

    /// Pick a category uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

// ============================================================================
// Category Filter
// ============================================================================

/// The filter a consumer has selected. `All` passes every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Tech,
    Campus,
    Sports,
}

impl CategoryFilter {
    /// Every filter, in tab order.
    pub const TABS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Tech,
        CategoryFilter::Campus,
        CategoryFilter::Sports,
    ];

    /// Returns true if an item of `category` passes this filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Tech => category == Category::Tech,
            Self::Campus => category == Category::Campus,
            Self::Sports => category == Category::Sports,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Tech => "Tech",
            Self::Campus => "Campus",
            Self::Sports => "Sports",
        }
    }

    /// Position of this filter in [`CategoryFilter::TABS`].
    pub fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Tech => 1,
            Self::Campus => 2,
            Self::Sports => 3,
        }
    }

    /// Cycle forward: All → Tech → Campus → Sports → All.
    pub fn next(self) -> Self {
        Self::TABS[(self.index() + 1) % Self::TABS.len()]
    }

    /// Cycle backward.
    pub fn prev(self) -> Self {
        Self::TABS[(self.index() + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Tech => Self::Tech,
            Category::Campus => Self::Campus,
            Category::Sports => Self::Sports,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    /// Case-insensitive parse of a filter name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "tech" => Ok(Self::Tech),
            "campus" => Ok(Self::Campus),
            "sports" => Ok(Self::Sports),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

// ============================================================================
// Raw Item
// ============================================================================

/// A freshly generated, unfiltered news entry. Immutable once created.
///
/// `title` is an `Arc<str>` so the engine can project it into display items
/// without copying the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub id: ItemId,
    pub title: Arc<str>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}
