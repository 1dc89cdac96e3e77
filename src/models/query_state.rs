//! Session query state and its enumerated parameters.
//!
//! This module defines [`QueryState`], the single mutable value a viewing
//! session holds, plus the enumerated types for its group filter, sort key,
//! sort direction, and page size. Each enumerated type knows how to parse
//! itself from its URL parameter form; an unrecognized value parses to
//! `None` so callers can fall back to the default instead of failing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The active group filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupFilter {
    /// No group restriction (the "ALL" sentinel).
    #[default]
    All,
    /// Restrict to one specific group label.
    Group(String),
}

impl GroupFilter {
    /// Parses the `g` URL parameter against the set of known groups.
    ///
    /// `"ALL"` and any label not present in `known_groups` both resolve to
    /// [`GroupFilter::All`].
    pub fn from_param(raw: &str, known_groups: &[String]) -> Self {
        if raw == "ALL" || !known_groups.iter().any(|g| g == raw) {
            GroupFilter::All
        } else {
            GroupFilter::Group(raw.to_string())
        }
    }

    /// The URL parameter form of this filter.
    pub fn as_param(&self) -> &str {
        match self {
            GroupFilter::All => "ALL",
            GroupFilter::Group(label) => label,
        }
    }

    /// Returns true if a worker with the given group label passes this filter.
    pub fn matches(&self, group: Option<&str>) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(label) => group == Some(label.as_str()),
        }
    }
}

/// The column a result set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Lexical order on the normalized worker identifier.
    Id,
    /// Locale-aware lexical order on the raw name.
    Name,
    /// Numeric order on days worked in range.
    DaysWorked,
    /// Numeric order on total in-range quantity.
    Total,
}

impl SortKey {
    /// Parses the `sort` URL parameter.
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "daysWorked" => Some(SortKey::DaysWorked),
            "total" => Some(SortKey::Total),
            _ => None,
        }
    }

    /// The URL parameter form of this key.
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::DaysWorked => "daysWorked",
            SortKey::Total => "total",
        }
    }

    /// The direction a freshly selected key starts in.
    ///
    /// Numeric fields default to showing the largest values first; text
    /// fields default to alphabetical order.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::DaysWorked | SortKey::Total => SortDirection::Desc,
            SortKey::Id | SortKey::Name => SortDirection::Asc,
        }
    }
}

/// The direction a result set is ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses the `dir` URL parameter. Anything other than `"desc"` is `Asc`.
    pub fn from_param(raw: &str) -> Self {
        if raw == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// The URL parameter form of this direction.
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A validated page size. Only 25, 50, and 100 are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    /// The permitted page sizes.
    pub const ALLOWED: [usize; 3] = [25, 50, 100];

    /// Creates a page size, rejecting values outside [`PageSize::ALLOWED`].
    pub fn new(size: usize) -> Option<Self> {
        Self::ALLOWED.contains(&size).then_some(Self(size))
    }

    /// Parses the `ps` URL parameter.
    pub fn from_param(raw: &str) -> Option<Self> {
        raw.parse().ok().and_then(Self::new)
    }

    /// The number of rows per page.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(25)
    }
}

/// The complete session-scoped query state.
///
/// `date_from` and `date_to` are `None` until a dataset with at least one
/// parseable harvest date is known; once set they are always snapped to
/// actual harvest dates with `date_from <= date_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// Free-text search over names and identifiers.
    pub search_text: String,
    /// Active group filter.
    pub group: GroupFilter,
    /// Inclusive start of the active date interval.
    pub date_from: Option<NaiveDate>,
    /// Inclusive end of the active date interval.
    pub date_to: Option<NaiveDate>,
    /// Active sort column.
    pub sort_key: SortKey,
    /// Active sort direction.
    pub sort_direction: SortDirection,
    /// Rows per page.
    pub page_size: PageSize,
    /// 0-based page index, clamped against the page count when applied.
    pub page_index: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            group: GroupFilter::All,
            date_from: None,
            date_to: None,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            page_size: PageSize::default(),
            page_index: 0,
        }
    }
}
