//! KPI analytics page state

use crate::pages::RemoteData;
use agrimarket_client::MarketplaceApi;
use agrimarket_core::types::{CategoryShare, KpiOverview, RevenuePoint, UserGrowthPoint};

/// Which analytics tab is selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KpiTab {
    /// Revenue, profit and expenses over time
    #[default]
    Revenue,
    /// New and active user counts over time
    Users,
    /// Sales share per category
    Categories,
}

/// Headline figures derived from the KPI series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KpiHeadlines {
    /// Revenue summed over the fetched months
    pub total_revenue: i64,
    /// Profit summed over the fetched months
    pub total_profit: i64,
    /// Profit as a percentage of revenue (0 when revenue is 0)
    pub profit_margin: f64,
    /// New accounts summed over the fetched months
    pub total_new_users: i64,
    /// Active accounts in the most recent month
    pub latest_active_users: i64,
}

/// View state for the KPI analytics page
#[derive(Debug, Default)]
pub struct KpiPage {
    overview: RemoteData<KpiOverview>,
    /// Selected tab
    pub tab: KpiTab,
}

impl KpiPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetch the KPI overview payload
    pub async fn refresh(&mut self, api: &dyn MarketplaceApi) {
        let epoch = self.overview.begin_refresh();
        let result = api.kpi_overview().await;
        self.overview.complete_refresh(epoch, result);
    }

    /// Monthly revenue series
    #[must_use]
    pub fn revenue_series(&self) -> &[RevenuePoint] {
        &self.overview.get().revenue
    }

    /// Monthly user growth series
    #[must_use]
    pub fn user_growth(&self) -> &[UserGrowthPoint] {
        &self.overview.get().user_growth
    }

    /// Category sales shares
    #[must_use]
    pub fn category_distribution(&self) -> &[CategoryShare] {
        &self.overview.get().category_distribution
    }

    /// The most recent request failure, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.overview.last_error()
    }

    /// Headline figures across the fetched series
    #[must_use]
    pub fn headlines(&self) -> KpiHeadlines {
        let overview = self.overview.get();

        let total_revenue: i64 = overview.revenue.iter().map(|p| p.revenue).sum();
        let total_profit: i64 = overview.revenue.iter().map(|p| p.profit).sum();

        #[allow(clippy::cast_precision_loss)]
        let profit_margin = if total_revenue > 0 {
            total_profit as f64 / total_revenue as f64 * 100.0
        } else {
            0.0
        };

        KpiHeadlines {
            total_revenue,
            total_profit,
            profit_margin,
            total_new_users: overview.user_growth.iter().map(|p| p.new_users).sum(),
            latest_active_users: overview
                .user_growth
                .last()
                .map_or(0, |p| p.active_users),
        }
    }
}
