//! Overview dashboard page state

use crate::pages::{RemoteData, Selection};
use agrimarket_client::MarketplaceApi;
use agrimarket_core::config::ConsoleConfig;
use agrimarket_core::types::{CategoryShare, KpiOverview, RevenuePoint, UserGrowthPoint};

/// Local-only chart filters; these never reach the server
#[derive(Debug, Clone)]
pub struct DashboardFilters {
    /// How many days of history the charts cover
    pub date_range_days: u32,
    /// Lower price bound, when set
    pub min_price: Option<i64>,
    /// Upper price bound, when set
    pub max_price: Option<i64>,
    /// Seller type dropdown value
    pub seller_type: Selection<String>,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self {
            date_range_days: 30,
            min_price: None,
            max_price: None,
            seller_type: Selection::All,
        }
    }
}

impl DashboardFilters {
    /// Whether a price falls inside the configured bounds
    #[must_use]
    pub fn admits_price(&self, price: i64) -> bool {
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

/// View state for the overview dashboard
#[derive(Debug, Default)]
pub struct DashboardPage {
    overview: RemoteData<KpiOverview>,
    /// Chart filter controls
    pub filters: DashboardFilters,
}

impl DashboardPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page with the configured default date range
    #[must_use]
    pub fn with_config(config: &ConsoleConfig) -> Self {
        Self {
            overview: RemoteData::new(),
            filters: DashboardFilters {
                date_range_days: config.default_date_range_days,
                ..DashboardFilters::default()
            },
        }
    }

    /// Re-fetch the KPI overview payload
    pub async fn refresh(&mut self, api: &dyn MarketplaceApi) {
        let epoch = self.overview.begin_refresh();
        let result = api.kpi_overview().await;
        self.overview.complete_refresh(epoch, result);
    }

    /// Monthly revenue series for the revenue chart
    #[must_use]
    pub fn revenue_series(&self) -> &[RevenuePoint] {
        &self.overview.get().revenue
    }

    /// Monthly user growth series
    #[must_use]
    pub fn user_growth(&self) -> &[UserGrowthPoint] {
        &self.overview.get().user_growth
    }

    /// Category sales shares for the distribution chart
    #[must_use]
    pub fn category_sales(&self) -> &[CategoryShare] {
        &self.overview.get().category_distribution
    }

    /// Whether a refresh is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.overview.is_loading()
    }

    /// The most recent request failure, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.overview.last_error()
    }
}
