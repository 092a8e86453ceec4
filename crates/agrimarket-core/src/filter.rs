//! Collection filtering and aggregation for the console pages
//!
//! Every list page follows the same pattern: fetch a snapshot, narrow it
//! with a set of predicates (logical AND), and derive per-group rollups
//! for the summary cards and charts. The functions here are pure; for a
//! fixed input they always produce the same output.

use crate::types::{FeedbackEntry, FeedbackStatus, Listing, ListingStatus, UserAccount};
use indexmap::IndexMap;

/// Records that expose free-text fields for substring search
pub trait Searchable {
    /// The fields a search term is matched against
    fn searchable_text(&self) -> Vec<&str>;
}

impl Searchable for UserAccount {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.username, &self.email]
    }
}

impl Searchable for Listing {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.title, &self.seller]
    }
}

impl Searchable for FeedbackEntry {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.subject, &self.message, &self.user]
    }
}

/// A single matching rule applied to one record
pub enum Predicate<'a, T> {
    /// Sentinel that matches everything
    All,
    /// Case-insensitive substring match over the record's searchable text
    Search(&'a str),
    /// Arbitrary field test (status equality, category equality, ...)
    Test(Box<dyn Fn(&T) -> bool + 'a>),
}

impl<'a, T: Searchable> Predicate<'a, T> {
    /// Predicate from a search box value; an empty term matches everything
    #[must_use]
    pub const fn search(term: &'a str) -> Self {
        Self::Search(term)
    }

    /// Predicate from a field test closure
    pub fn test(test: impl Fn(&T) -> bool + 'a) -> Self {
        Self::Test(Box::new(test))
    }

    /// Whether the item satisfies this predicate
    #[must_use]
    pub fn matches(&self, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Search(term) => matches_search(item, term),
            Self::Test(test) => test(item),
        }
    }
}

impl<T> std::fmt::Debug for Predicate<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Search(term) => write!(f, "Search({term:?})"),
            Self::Test(_) => write!(f, "Test(..)"),
        }
    }
}

/// Case-insensitive substring match over the record's searchable fields
#[must_use]
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.searchable_text()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items satisfying every predicate, in input order
#[must_use]
pub fn filter_collection<'c, T: Searchable>(
    items: &'c [T],
    predicates: &[Predicate<'_, T>],
) -> Vec<&'c T> {
    items
        .iter()
        .filter(|item| predicates.iter().all(|predicate| predicate.matches(item)))
        .collect()
}

/// Per-item metric contributions accumulated into an [`AggregateRow`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// View count contribution
    pub views: i64,
    /// Sales count contribution
    pub sales: i64,
    /// Revenue contribution
    pub revenue: i64,
}

/// Accumulated rollup for one group key
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AggregateRow {
    /// Grouping key (category name, ...)
    pub key: String,
    /// Number of items in the group
    pub count: i64,
    /// Sum of views across the group
    pub total_views: i64,
    /// Sum of sales across the group
    pub total_sales: i64,
    /// Sum of revenue across the group
    pub revenue: i64,
    /// Average unit price, derived once after accumulation as
    /// revenue / total sales, rounded to the nearest whole unit
    pub avg_price: i64,
}

/// Group items by a string key and accumulate count and metric sums.
///
/// Averages are computed once after accumulation completes; accumulating
/// them per item would make the result depend on input order through
/// rounding. Groups appear in first-seen order.
#[must_use]
pub fn aggregate_by_key<T>(
    items: &[T],
    key_fn: impl Fn(&T) -> &str,
    metrics_fn: impl Fn(&T) -> Metrics,
) -> Vec<AggregateRow> {
    let mut groups: IndexMap<String, AggregateRow> = IndexMap::new();

    for item in items {
        let key = key_fn(item);
        let metrics = metrics_fn(item);
        let row = groups
            .entry(key.to_string())
            .or_insert_with(|| AggregateRow {
                key: key.to_string(),
                count: 0,
                total_views: 0,
                total_sales: 0,
                revenue: 0,
                avg_price: 0,
            });
        row.count += 1;
        row.total_views += metrics.views;
        row.total_sales += metrics.sales;
        row.revenue += metrics.revenue;
    }

    let mut rows: Vec<AggregateRow> = groups.into_values().collect();
    for row in &mut rows {
        row.avg_price = round_div(row.revenue, row.total_sales);
    }
    rows
}

/// Integer division rounded to the nearest whole unit (half away from
/// zero); a zero denominator yields 0
#[must_use]
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let n = i128::from(numerator);
    let d = i128::from(denominator);
    let half = if (n < 0) == (d < 0) { d / 2 } else { -(d / 2) };
    #[allow(clippy::cast_possible_truncation)]
    {
        ((n + half) / d) as i64
    }
}

/// Per-category performance rollup, sorted by revenue descending
#[must_use]
pub fn category_performance(listings: &[Listing]) -> Vec<AggregateRow> {
    let mut rows = aggregate_by_key(
        listings,
        |listing| &listing.category,
        |listing| Metrics {
            views: listing.views,
            sales: listing.sales,
            revenue: listing.revenue(),
        },
    );
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    rows
}

/// The top `n` listings by revenue
#[must_use]
pub fn top_listings(listings: &[Listing], n: usize) -> Vec<&Listing> {
    let mut ranked: Vec<&Listing> = listings.iter().collect();
    ranked.sort_by(|a, b| b.revenue().cmp(&a.revenue()));
    ranked.truncate(n);
    ranked
}

/// Headline figures for the listings page summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListingTotals {
    /// Total revenue across all listings
    pub revenue: i64,
    /// Total units sold
    pub sales: i64,
    /// Total views
    pub views: i64,
    /// Average order value (revenue / sales, rounded)
    pub avg_order_value: i64,
    /// Sales per hundred views
    pub conversion_rate: f64,
    /// Listings currently active
    pub active: usize,
    /// Listings awaiting review
    pub pending: usize,
}

/// Compute the listings page headline figures
#[must_use]
pub fn listing_totals(listings: &[Listing]) -> ListingTotals {
    let revenue: i64 = listings.iter().map(Listing::revenue).sum();
    let sales: i64 = listings.iter().map(|l| l.sales).sum();
    let views: i64 = listings.iter().map(|l| l.views).sum();

    #[allow(clippy::cast_precision_loss)]
    let conversion_rate = if views > 0 {
        sales as f64 / views as f64 * 100.0
    } else {
        0.0
    };

    ListingTotals {
        revenue,
        sales,
        views,
        avg_order_value: round_div(revenue, sales),
        conversion_rate,
        active: listings
            .iter()
            .filter(|l| l.status == ListingStatus::Active)
            .count(),
        pending: listings
            .iter()
            .filter(|l| l.status == ListingStatus::Pending)
            .count(),
    }
}

/// Headline figures for the feedback page summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeedbackTotals {
    /// Total entries
    pub total: usize,
    /// Mean star rating across entries (0 when empty)
    pub average_rating: f64,
    /// Entries not yet triaged
    pub pending: usize,
    /// Entries in progress
    pub in_progress: usize,
    /// Entries resolved
    pub resolved: usize,
}

/// Compute the feedback page headline figures
#[must_use]
pub fn feedback_totals(feedback: &[FeedbackEntry]) -> FeedbackTotals {
    let total = feedback.len();
    let rating_sum: u64 = feedback
        .iter()
        .map(|entry| u64::from(entry.clamped_rating()))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let average_rating = if total > 0 {
        rating_sum as f64 / total as f64
    } else {
        0.0
    };

    let count_status = |status: FeedbackStatus| feedback.iter().filter(|e| e.status == status).count();

    FeedbackTotals {
        total,
        average_rating,
        pending: count_status(FeedbackStatus::Pending),
        in_progress: count_status(FeedbackStatus::InProgress),
        resolved: count_status(FeedbackStatus::Resolved),
    }
}
