//! `AgriMarket` Admin Console
//!
//! Command line entry point: wires configuration, logging and the API
//! client together, establishes a session, and runs a fetch cycle over
//! the console pages.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use agrimarket_console::pages::{
    DashboardPage, FeedbackPage, KpiPage, ListingsPage, UsersPage,
};
use agrimarket_console::session::Session;
use agrimarket_console::state::AppState;
use agrimarket_core::{Config, Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command line interface for the `AgriMarket` admin console
#[derive(Parser)]
#[command(
    name = "agrimarket-console",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for the AgriMarket marketplace",
    long_about = "Data and state layer of the AgriMarket admin console: \
                  authenticates against the marketplace API and drives the \
                  dashboard, KPI, user, listing and feedback pages."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Check connectivity and session state against the API
    Check,

    /// Fetch one page's data and log a summary
    Fetch {
        /// Page to fetch (dashboard, kpis, users, listings, feedback)
        #[arg(value_name = "PAGE")]
        page: String,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present (development convenience)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Check) => check_session(config).await,
        Some(Commands::Fetch { page }) => fetch_page(config, &page).await,
        Some(Commands::Config) => show_config(&config),
        None => run_fetch_cycle(config).await,
    }
}

/// Initialize logging system
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer()).init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %cli.log_level,
        "AgriMarket console starting"
    );
}

/// Load configuration from an explicit file, or layered sources
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
            message: format!("failed to read config file {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| Error::Configuration {
            message: format!("failed to parse config file: {e}"),
        })
    } else {
        Config::load().or_else(|err| {
            warn!(error = %err, "falling back to default configuration");
            Ok(Config::default())
        })
    }
}

/// Print the resolved configuration as TOML
fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).map_err(|e| Error::Configuration {
        message: format!("failed to serialize configuration: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}

/// Build state and establish a session from the configured token or the
/// `AGRIMARKET_USERNAME` / `AGRIMARKET_PASSWORD` environment variables
async fn authenticate(config: Config) -> Result<AppState> {
    let (mut state, client) = AppState::connect(config)?;

    if state.config.api.token.is_some() {
        let user = Session::verify(state.api.as_ref()).await?;
        info!(username = %user.username, "existing token verified");
        return Ok(state);
    }

    let username = std::env::var("AGRIMARKET_USERNAME").map_err(|_| Error::Configuration {
        message: "no API token configured and AGRIMARKET_USERNAME is not set".to_string(),
    })?;
    let password = std::env::var("AGRIMARKET_PASSWORD").map_err(|_| Error::Configuration {
        message: "AGRIMARKET_PASSWORD is not set".to_string(),
    })?;

    state.login(&username, &password).await?;
    if let Some(ref session) = state.session {
        client.set_token(session.token());
    }
    Ok(state)
}

/// Verify connectivity and report the session state
async fn check_session(config: Config) -> Result<()> {
    let state = authenticate(config).await?;
    let user = Session::verify(state.api.as_ref()).await?;
    println!("authenticated as {} ({})", user.username, user.email);
    Ok(())
}

/// Fetch a single page and log its headline figures
async fn fetch_page(config: Config, page: &str) -> Result<()> {
    let state = authenticate(config).await?;
    let api = state.api.as_ref();

    match page {
        "dashboard" => {
            let mut dashboard = DashboardPage::with_config(&state.config.console);
            dashboard.refresh(api).await;
            info!(
                revenue_months = dashboard.revenue_series().len(),
                categories = dashboard.category_sales().len(),
                "dashboard fetched"
            );
        }
        "kpis" => {
            let mut kpis = KpiPage::new();
            kpis.refresh(api).await;
            let headlines = kpis.headlines();
            info!(
                total_revenue = headlines.total_revenue,
                total_profit = headlines.total_profit,
                new_users = headlines.total_new_users,
                "KPIs fetched"
            );
        }
        "users" => {
            let mut users = UsersPage::new();
            users.refresh(api).await;
            let (total, active, suspended) = users.totals();
            info!(total, active, suspended, "users fetched");
        }
        "listings" => {
            let mut listings = ListingsPage::new();
            listings.refresh(api).await;
            let totals = listings.totals();
            info!(
                count = listings.listings().len(),
                revenue = totals.revenue,
                active = totals.active,
                pending = totals.pending,
                "listings fetched"
            );
        }
        "feedback" => {
            let mut feedback = FeedbackPage::new();
            feedback.refresh(api).await;
            let totals = feedback.totals();
            info!(
                total = totals.total,
                pending = totals.pending,
                resolved = totals.resolved,
                "feedback fetched"
            );
        }
        other => {
            return Err(Error::Validation {
                field: "page".to_string(),
                message: format!("unknown page '{other}'"),
            });
        }
    }

    Ok(())
}

/// Authenticate and fetch every page once
async fn run_fetch_cycle(config: Config) -> Result<()> {
    let state = authenticate(config).await?;
    let api = state.api.as_ref();

    let mut dashboard = DashboardPage::with_config(&state.config.console);
    let mut kpis = KpiPage::new();
    let mut users = UsersPage::new();
    let mut listings = ListingsPage::new();
    let mut feedback = FeedbackPage::new();

    dashboard.refresh(api).await;
    kpis.refresh(api).await;
    users.refresh(api).await;
    listings.refresh(api).await;
    feedback.refresh(api).await;

    let (total_users, active_users, suspended_users) = users.totals();
    let listing_totals = listings.totals();
    let feedback_totals = feedback.totals();

    info!(
        users = total_users,
        active_users,
        suspended_users,
        listings = listings.listings().len(),
        listing_revenue = listing_totals.revenue,
        feedback = feedback_totals.total,
        revenue_months = dashboard.revenue_series().len(),
        kpi_revenue = kpis.headlines().total_revenue,
        "fetch cycle complete"
    );

    for page_error in [
        dashboard.last_error(),
        kpis.last_error(),
        users.last_error(),
        listings.last_error(),
        feedback.last_error(),
    ]
    .into_iter()
    .flatten()
    {
        warn!(error = page_error, "page fetch failed");
    }

    Ok(())
}
