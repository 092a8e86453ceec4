//! Core data types for the `AgriMarket` admin console

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Moderation status of a marketplace listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Visible and purchasable
    Active,
    /// Awaiting moderator review
    Pending,
    /// Rejected by a moderator
    Rejected,
}

impl Default for ListingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ListingStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::Error::Validation {
                field: "status".to_string(),
                message: format!("unknown listing status '{other}'"),
            }),
        }
    }
}

/// Triage status of a feedback entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStatus {
    /// Not yet triaged
    Pending,
    /// Being worked on
    InProgress,
    /// Closed out
    Resolved,
}

impl Default for FeedbackStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for FeedbackStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(crate::Error::Validation {
                field: "status".to_string(),
                message: format!("unknown feedback status '{other}'"),
            }),
        }
    }
}

/// Kind of feedback a user submitted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    /// Praise or a feature that worked well
    Feature,
    /// A defect report
    Bug,
    /// An improvement suggestion
    Suggestion,
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feature => write!(f, "feature"),
            Self::Bug => write!(f, "bug"),
            Self::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// A platform user account as served by the users endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Server-issued identifier
    pub id: i64,

    /// Login name
    #[serde(default)]
    pub username: String,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Given name, when the user filled it in
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name, when the user filled it in
    #[serde(default)]
    pub last_name: Option<String>,

    /// Whether the account may log in (false = suspended)
    #[serde(default)]
    pub is_active: bool,

    /// Whether the account has staff/admin rights
    #[serde(default)]
    pub is_staff: bool,

    /// Whether the account is a superuser (cannot be suspended)
    #[serde(default)]
    pub is_superuser: bool,

    /// Last successful login, if any
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,

    /// When the account was created
    pub date_joined: DateTime<Utc>,
}

impl UserAccount {
    /// Display name: "first last" when both are present, username otherwise
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{first} {last}")
            }
            _ => self.username.clone(),
        }
    }
}

/// A marketplace product listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Server-issued identifier
    pub id: i64,

    /// Listing title
    #[serde(default)]
    pub title: String,

    /// Seller display name
    #[serde(default)]
    pub seller: String,

    /// Category name (Crops, Equipment, Livestock, ...)
    #[serde(default)]
    pub category: String,

    /// Unit price in whole currency units
    #[serde(default)]
    pub price: i64,

    /// Moderation status
    #[serde(default)]
    pub status: ListingStatus,

    /// Times the listing page was viewed
    #[serde(default)]
    pub views: i64,

    /// Units sold
    #[serde(default)]
    pub sales: i64,

    /// When the listing was created
    #[serde(default)]
    pub created_at: NaiveDate,
}

impl Listing {
    /// Revenue attributed to this listing (price times units sold)
    #[must_use]
    pub const fn revenue(&self) -> i64 {
        self.price * self.sales
    }
}

/// A feedback entry submitted by a platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEntry {
    /// Server-issued identifier
    pub id: i64,

    /// Name of the submitting user
    #[serde(default)]
    pub user: String,

    /// Star rating, 1-5
    #[serde(default)]
    pub rating: u8,

    /// What kind of feedback this is
    pub category: FeedbackCategory,

    /// Short subject line
    #[serde(default)]
    pub subject: String,

    /// Full message body
    #[serde(default)]
    pub message: String,

    /// Submission date
    #[serde(default)]
    pub date: NaiveDate,

    /// Triage status
    #[serde(default)]
    pub status: FeedbackStatus,
}

impl FeedbackEntry {
    /// Rating clamped to the displayable 1-5 range (0 stays 0 for "unrated")
    #[must_use]
    pub fn clamped_rating(&self) -> u8 {
        self.rating.min(5)
    }
}

/// One month of revenue figures for the KPI charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenuePoint {
    /// Month label ("Jan", "Feb", ...)
    pub month: String,
    /// Gross revenue
    #[serde(default)]
    pub revenue: i64,
    /// Profit
    #[serde(default)]
    pub profit: i64,
    /// Expenses
    #[serde(default)]
    pub expenses: i64,
}

/// One month of user growth figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserGrowthPoint {
    /// Month label
    pub month: String,
    /// Accounts created in the month
    #[serde(default)]
    pub new_users: i64,
    /// Accounts active during the month
    #[serde(default)]
    pub active_users: i64,
}

/// Share of sales attributed to one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryShare {
    /// Category name
    pub name: String,
    /// Share value (percentage points or unit count, as served)
    #[serde(default)]
    pub value: i64,
}

/// Everything the KPI overview endpoint returns in one payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpiOverview {
    /// Monthly revenue/profit/expenses series
    #[serde(default)]
    pub revenue: Vec<RevenuePoint>,

    /// Monthly user growth series
    #[serde(default)]
    pub user_growth: Vec<UserGrowthPoint>,

    /// Category distribution for the pie chart
    #[serde(default)]
    pub category_distribution: Vec<CategoryShare>,
}

/// The authenticated user attached to a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    /// Server-issued identifier
    pub id: i64,
    /// Login name
    pub username: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Whether the user has staff/admin rights
    #[serde(default)]
    pub is_staff: bool,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Opaque API token to present on subsequent requests
    pub token: String,
    /// The user that logged in
    pub user: SessionUser,
}

/// Result of the auth-check endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStatus {
    /// Whether the caller holds a live session
    #[serde(default)]
    pub is_authenticated: bool,

    /// The session's user when authenticated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}
