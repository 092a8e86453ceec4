//! Test fixtures and sample data

use agrimarket_core::types::{
    CategoryShare, FeedbackCategory, FeedbackEntry, FeedbackStatus, KpiOverview, Listing,
    ListingStatus, RevenuePoint, UserAccount, UserGrowthPoint,
};
use chrono::{NaiveDate, TimeZone, Utc};

/// Sample user accounts for testing
pub struct UserFixtures;

impl UserFixtures {
    /// A regular active account
    pub fn regular(id: i64, username: &str) -> UserAccount {
        UserAccount {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: None,
            last_name: None,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: Some(Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap()),
            date_joined: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    /// The superuser account that cannot be suspended
    pub fn superuser() -> UserAccount {
        UserAccount {
            id: 1,
            username: "admin".to_string(),
            email: "admin@agrimarket.example".to_string(),
            first_name: Some("Site".to_string()),
            last_name: Some("Admin".to_string()),
            is_active: true,
            is_staff: true,
            is_superuser: true,
            last_login: Some(Utc.with_ymd_and_hms(2025, 8, 20, 8, 0, 0).unwrap()),
            date_joined: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// The roster the user management tests run against
    pub fn roster() -> Vec<UserAccount> {
        let mut suspended = Self::regular(9, "dormant_dave");
        suspended.is_active = false;

        vec![
            Self::superuser(),
            Self::regular(7, "farmer_joe"),
            Self::regular(8, "dairy_ann"),
            suspended,
        ]
    }
}

/// Sample marketplace listings for testing
pub struct ListingFixtures;

impl ListingFixtures {
    fn listing(
        id: i64,
        title: &str,
        seller: &str,
        category: &str,
        price: i64,
        status: ListingStatus,
        views: i64,
        sales: i64,
    ) -> Listing {
        Listing {
            id,
            title: title.to_string(),
            seller: seller.to_string(),
            category: category.to_string(),
            price,
            status,
            views,
            sales,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    /// A small catalog spanning categories and statuses
    pub fn catalog() -> Vec<Listing> {
        vec![
            Self::listing(
                1,
                "Organic Tomatoes - 5kg",
                "GreenAcres Farm",
                "Crops",
                125,
                ListingStatus::Active,
                1520,
                156,
            ),
            Self::listing(
                2,
                "Tractor - John Deere 5055E",
                "AgriMach Traders",
                "Equipment",
                25000,
                ListingStatus::Active,
                640,
                8,
            ),
            Self::listing(
                3,
                "Wheat Seeds - Premium",
                "SeedCo Supplies",
                "Seeds",
                399,
                ListingStatus::Active,
                980,
                89,
            ),
            Self::listing(
                4,
                "Fresh Honey - 10L",
                "Hillside Apiary",
                "Crops",
                85,
                ListingStatus::Pending,
                210,
                0,
            ),
            Self::listing(
                5,
                "Used Irrigation Pump",
                "WaterWorks",
                "Equipment",
                1200,
                ListingStatus::Rejected,
                95,
                0,
            ),
        ]
    }

    /// The two-listing Seeds scenario behind the rollup arithmetic tests
    pub fn seeds_pair() -> Vec<Listing> {
        vec![
            Self::listing(
                10,
                "Wheat Seeds",
                "SeedCo",
                "Seeds",
                100,
                ListingStatus::Active,
                50,
                2,
            ),
            Self::listing(
                11,
                "Corn Seeds",
                "SeedCo",
                "Seeds",
                50,
                ListingStatus::Active,
                30,
                1,
            ),
        ]
    }
}

/// Sample feedback entries for testing
pub struct FeedbackFixtures;

impl FeedbackFixtures {
    fn entry(
        id: i64,
        user: &str,
        rating: u8,
        category: FeedbackCategory,
        subject: &str,
        message: &str,
        status: FeedbackStatus,
    ) -> FeedbackEntry {
        FeedbackEntry {
            id,
            user: user.to_string(),
            rating,
            category,
            subject: subject.to_string(),
            message: message.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            status,
        }
    }

    /// A triage queue spanning categories and statuses
    pub fn queue() -> Vec<FeedbackEntry> {
        vec![
            Self::entry(
                1,
                "farmer_joe",
                2,
                FeedbackCategory::Bug,
                "Checkout fails on equipment orders",
                "Paying for a tractor listing errors out at the last step.",
                FeedbackStatus::Pending,
            ),
            Self::entry(
                2,
                "dairy_ann",
                5,
                FeedbackCategory::Feature,
                "Love the new seller dashboard",
                "The sales chart makes restocking decisions much easier.",
                FeedbackStatus::Resolved,
            ),
            Self::entry(
                3,
                "miller",
                3,
                FeedbackCategory::Suggestion,
                "Bulk pricing tiers",
                "Let sellers offer discounts for bulk grain orders.",
                FeedbackStatus::InProgress,
            ),
        ]
    }
}

/// Sample KPI payloads for testing
pub struct KpiFixtures;

impl KpiFixtures {
    fn month(month: &str, revenue: i64, profit: i64) -> RevenuePoint {
        RevenuePoint {
            month: month.to_string(),
            revenue,
            profit,
            expenses: revenue - profit,
        }
    }

    /// A six-month overview payload
    pub fn overview() -> KpiOverview {
        KpiOverview {
            revenue: vec![
                Self::month("Jan", 45000, 12000),
                Self::month("Feb", 52000, 15000),
                Self::month("Mar", 48000, 13500),
                Self::month("Apr", 61000, 18000),
                Self::month("May", 55000, 16000),
                Self::month("Jun", 67000, 21000),
            ],
            user_growth: vec![
                UserGrowthPoint {
                    month: "Jan".to_string(),
                    new_users: 120,
                    active_users: 800,
                },
                UserGrowthPoint {
                    month: "Feb".to_string(),
                    new_users: 150,
                    active_users: 920,
                },
                UserGrowthPoint {
                    month: "Mar".to_string(),
                    new_users: 170,
                    active_users: 1050,
                },
            ],
            category_distribution: vec![
                CategoryShare {
                    name: "Crops".to_string(),
                    value: 35,
                },
                CategoryShare {
                    name: "Equipment".to_string(),
                    value: 25,
                },
                CategoryShare {
                    name: "Seeds".to_string(),
                    value: 20,
                },
                CategoryShare {
                    name: "Livestock".to_string(),
                    value: 20,
                },
            ],
        }
    }
}
