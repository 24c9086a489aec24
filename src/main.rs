//! Terminal entry point: loads configuration, fetches every dashboard page
//! from the backend, and prints their plain-text renderings.

use bundle_board::api::BackendClient;
use bundle_board::config::{backend, settings};
use bundle_board::core::filter::BundleFilter;
use bundle_board::core::inventory::StockFilter;
use bundle_board::errors::Result;
use bundle_board::pages::{
    DashboardContext, bundles::BundlesPage, favorites::FavoritesPage, inventory::InventoryPage,
    overview::OverviewPage,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load display settings
    let settings = settings::load_default_settings()
        .inspect(|_| info!("Settings loaded."))
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Build the shared context for page loads
    let base_url = backend::api_base_url();
    info!(%base_url, "Using bundle backend");
    let context = DashboardContext::new(BackendClient::new(&base_url), settings);

    // 5. Load and print each page; one failing page doesn't stop the others
    match OverviewPage::load(&context).await {
        Ok(page) => println!("{}", page.render_text()),
        Err(e) => error!("Failed to load overview page: {e}"),
    }

    match BundlesPage::load(&context, &BundleFilter::default()).await {
        Ok(page) => println!("{}", page.render_text()),
        Err(e) => error!("Failed to load bundles page: {e}"),
    }

    match InventoryPage::load(&context, &StockFilter::default(), 1, 1).await {
        Ok(page) => println!("{}", page.render_text()),
        Err(e) => error!("Failed to load inventory page: {e}"),
    }

    match FavoritesPage::load(&context).await {
        Ok(page) => println!("{}", page.render_text()),
        Err(e) => error!("Failed to load favorites page: {e}"),
    }

    Ok(())
}
